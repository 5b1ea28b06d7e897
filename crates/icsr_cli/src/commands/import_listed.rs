use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::config::Config;

#[derive(Args, Debug)]
pub struct ImportListedArgs {
    /// CSV with one listed event per row
    #[arg(short, long)]
    pub file: PathBuf,

    /// Reference data JSON to write
    #[arg(short, long)]
    pub output: PathBuf,

    /// Header of the column holding the event term (falls back to the first column)
    #[arg(long, default_value = "term")]
    pub column: String,
}

pub fn run(config: &Config, args: ImportListedArgs) -> Result<()> {
    println!("⚙️  Parsing listed events: {}", args.file.display());

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(&args.file)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;

    let index = rdr
        .headers()?
        .iter()
        .position(|h| h.eq_ignore_ascii_case(&args.column))
        .unwrap_or(0);

    // Keep the first spelling of each term, drop case-insensitive repeats.
    let mut seen = BTreeSet::new();
    let mut events = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let term = record.get(index).unwrap_or("");
        if !term.is_empty() && seen.insert(term.to_lowercase()) {
            events.push(term.to_string());
        }
    }

    // The other reference lists carry over from the current configuration.
    let count = events.len();
    let reference = config.reference()?.with_listed_events(events);

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&args.output, serde_json::to_string_pretty(&reference)?)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!("✨ Import Complete: {} listed events written to {}", count, args.output.display());
    Ok(())
}
