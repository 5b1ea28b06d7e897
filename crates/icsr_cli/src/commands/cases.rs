use anyhow::Result;
use clap::Args;
use icsr_db::{rebuild_database, CaseRepository};
use sqlx::SqlitePool;

#[derive(Debug, Args)]
pub struct CasesArgs {
    /// Print the log as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(pool: SqlitePool, args: CasesArgs) -> Result<()> {
    rebuild_database(&pool).await?;
    let rows = CaseRepository::new(pool).list_cases().await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("📭 No cases logged yet.");
        return Ok(());
    }

    println!("{:>5}  {:<20} {:<20} {}", "#", "Patient", "Drug", "Reaction");
    println!("{:-<70}", "-");
    for row in &rows {
        println!("{:>5}  {:<20} {:<20} {}", row.id, row.patient, row.drug, row.reaction);
    }
    println!("📚 {} case(s) logged.", rows.len());
    Ok(())
}
