pub mod cases;
pub mod classify;
pub mod field;
pub mod form;
pub mod import_listed;
pub mod rebuild;
pub mod submit;

use anyhow::{bail, Context, Result};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    if !database_url.starts_with("sqlite:") {
        bail!("DATABASE_URL must be a sqlite: URL, got '{}'", database_url);
    }

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
        .with_context(|| format!("Failed to open case log at {}", database_url))
}
