use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use icsr_db::{rebuild_database, CaseRepository, NewCaseEntry};
use icsr_service::{FsArtifactStore, IcsrService, SubmissionOutcome};

use crate::commands::classify::{print_classification, print_pending};
use crate::commands::connect;
use crate::commands::form::{load_form, session_from_form};
use crate::config::Config;

#[derive(Debug, Args)]
pub struct SubmitArgs {
    /// JSON form file (field path -> raw value)
    #[arg(short, long)]
    pub form: PathBuf,

    /// Directory for the exported report (defaults to ARTIFACT_DIR)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also append the case to the case log
    #[arg(long)]
    pub record: bool,
}

pub async fn execute(config: &Config, args: SubmitArgs) -> Result<()> {
    println!("📨 Submitting: {}", args.form.display());

    // 1. Load the form into a session
    let form = load_form(&args.form)?;
    let mut session = session_from_form(&form)?;

    // 2. Classify and export
    let output = args.output.unwrap_or_else(|| config.artifact_dir.clone());
    let service = IcsrService::new(config.reference()?, FsArtifactStore::new(&output));

    let receipt = match service.submit(&mut session).context("Submit failed")? {
        SubmissionOutcome::Submitted(receipt) => receipt,
        SubmissionOutcome::Rejected { pending } => {
            print_pending(&pending);
            bail!("Submit blocked: {} required selection(s) missing", pending.len());
        }
    };

    print_classification(&receipt.classification);
    println!(
        "📄 Report: {} ({} page(s), {} bytes)",
        receipt.artifact.location, receipt.artifact.pages, receipt.artifact.bytes
    );
    println!("   SHA-256: {}", receipt.artifact.sha256);
    println!("   Case ID: {}", receipt.case_id);

    // 3. Optional case log entry
    if args.record {
        let pool = connect(&config.database_url).await?;
        rebuild_database(&pool).await?;
        let id = CaseRepository::new(pool)
            .record_case(&NewCaseEntry::from_record(&receipt.record))
            .await
            .context("Failed to record the case")?;
        println!("🗄️  Logged as case #{}", id);
    }

    Ok(())
}
