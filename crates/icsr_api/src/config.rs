use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use icsr_core::ReferenceData;

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub bind: String,
    pub artifact_dir: PathBuf,
    pub reference_data: Option<PathBuf>,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self> {
        dotenv().ok(); // Load .env if present

        Ok(ApiConfig {
            bind: env::var("API_BIND").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),

            artifact_dir: env::var("ARTIFACT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./artifacts")),

            reference_data: env::var("REFERENCE_DATA")
                .ok()
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    pub fn reference(&self) -> Result<ReferenceData> {
        match &self.reference_data {
            Some(path) => ReferenceData::from_json_file(path)
                .with_context(|| format!("Failed to load reference data from {}", path.display())),
            None => Ok(ReferenceData::default()),
        }
    }
}
