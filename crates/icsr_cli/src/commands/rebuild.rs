use anyhow::Result;
use clap::Args;
use icsr_db::rebuild_database;
use sqlx::SqlitePool;

#[derive(Debug, Args)]
pub struct RebuildArgs {}

pub async fn execute(pool: SqlitePool, _args: RebuildArgs) -> Result<()> {
    println!("🏗️  Rebuilding Case Log Schema...");
    rebuild_database(&pool).await?;
    println!("✅ Case Log Schema Applied Successfully.");
    Ok(())
}
