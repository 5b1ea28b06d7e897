// icsr_cli/src/main.rs
use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use icsr_cli::commands;
use icsr_cli::config::Config;

#[derive(Parser)]
#[command(name = "icsr_forge")]
#[command(about = "Individual Case Safety Report intake, classification and export", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the catalog definition of a form field
    Field(commands::field::FieldArgs),

    /// Classify a filled-in form without exporting it
    Classify(commands::classify::ClassifyArgs),

    /// Submit a form: classify it and export the case report
    Submit(commands::submit::SubmitArgs),

    /// Apply the case log schema from embedded assets
    Rebuild(commands::rebuild::RebuildArgs),

    /// List the cases recorded in the case log
    Cases(commands::cases::CasesArgs),

    /// Build a reference data file from a CSV of listed events
    ImportListed(commands::import_listed::ImportListedArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics go to stderr; stdout is for the user.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    // 1. Parse arguments
    let cli = Cli::parse();

    // 2. Load Config and route to the correct command
    let config = Config::from_env();

    match cli.command {
        Commands::Field(args) => commands::field::run(args)?,
        Commands::Classify(args) => commands::classify::run(&config, args)?,
        Commands::Submit(args) => commands::submit::execute(&config, args).await?,
        Commands::Rebuild(args) => {
            let pool = commands::connect(&config.database_url).await?;
            commands::rebuild::execute(pool, args).await?;
        }
        Commands::Cases(args) => {
            let pool = commands::connect(&config.database_url).await?;
            commands::cases::execute(pool, args).await?;
        }
        Commands::ImportListed(args) => commands::import_listed::run(&config, args)?,
    }

    Ok(())
}
