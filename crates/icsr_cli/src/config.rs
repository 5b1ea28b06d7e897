use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use icsr_core::ReferenceData;
use tracing::debug;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://icsr_cases.db?mode=rwc";
pub const DEFAULT_ARTIFACT_DIR: &str = "./artifacts";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub artifact_dir: PathBuf,
    /// JSON file with the listed events and other reference lists.
    pub reference_data: Option<PathBuf>,
}

impl Config {
    /// Reads the environment. `DATABASE_URL` is only checked by the commands
    /// that open the case log.
    pub fn from_env() -> Self {
        dotenv().ok(); // Load .env if present

        let config = Config {
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),

            artifact_dir: env::var("ARTIFACT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_ARTIFACT_DIR)),

            reference_data: env::var("REFERENCE_DATA")
                .ok()
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
        };
        debug!(?config, "configuration loaded");
        config
    }

    /// The configured reference data, or the built-in lists.
    pub fn reference(&self) -> Result<ReferenceData> {
        match &self.reference_data {
            Some(path) => ReferenceData::from_json_file(path)
                .with_context(|| format!("Failed to load reference data from {}", path.display())),
            None => Ok(ReferenceData::default()),
        }
    }
}
