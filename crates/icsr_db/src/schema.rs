use rust_embed::RustEmbed;
use sqlx::{Executor, SqlitePool};
use std::str;
use tracing::{debug, info};

use crate::error::{DbError, Result};

#[derive(RustEmbed)]
#[folder = "schema/"]
struct SchemaAssets;

/// Reads the build order and applies all SQL files in a single transaction.
/// Every statement is idempotent, so rebuilding never drops logged cases.
pub async fn rebuild_database(pool: &SqlitePool) -> Result<()> {
    // 1. Assemble the script before touching the database
    let script = build_script()?;

    // 2. Execute
    let mut tx = pool.begin().await?;
    (&mut *tx).execute(script.as_str()).await?;
    tx.commit().await?;

    info!("case log schema applied");
    Ok(())
}

fn build_script() -> Result<String> {
    let manifest = get_file_content("00_build_order.sql")?;

    let mut full_script = String::new();
    for line in manifest.lines() {
        let trimmed = line.trim();

        // Parse: -- @include folder/file.sql
        if let Some(path) = parse_include_directive(trimmed) {
            debug!(file = path, "including schema file");
            full_script.push_str(&get_file_content(path)?);
            full_script.push('\n');
        } else if !trimmed.starts_with("--") {
            full_script.push_str(line);
            full_script.push('\n');
        }
    }
    Ok(full_script)
}

fn get_file_content(path: &str) -> Result<String> {
    let file = SchemaAssets::get(path).ok_or_else(|| DbError::MissingSchemaFile(path.to_string()))?;
    str::from_utf8(file.data.as_ref())
        .map(str::to_string)
        .map_err(|_| DbError::InvalidSchemaEncoding(path.to_string()))
}

fn parse_include_directive(line: &str) -> Option<&str> {
    if line.starts_with("--") && line.contains("@include") {
        line.split_whitespace().last()
    } else {
        None
    }
}
