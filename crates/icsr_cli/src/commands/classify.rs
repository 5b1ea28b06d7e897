use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use icsr_core::catalog::FieldId;
use icsr_core::validation::Severity;
use icsr_core::{get_standard_classifier, CaseClassification, Classification, Prepared};

use crate::commands::form::{load_form, session_from_form};
use crate::config::Config;

#[derive(Debug, Args)]
pub struct ClassifyArgs {
    /// JSON form file (field path -> raw value)
    #[arg(short, long)]
    pub form: PathBuf,

    /// Print the classification as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(config: &Config, args: ClassifyArgs) -> Result<()> {
    println!("🔍 Classifying: {}", args.form.display());

    // 1. Load the form into a session
    let form = load_form(&args.form)?;
    let session = session_from_form(&form)?;

    // 2. Pre-submit constraints
    let record = match session.prepare()? {
        Prepared::Ready(record) => record,
        Prepared::Blocked { pending } => {
            print_pending(&pending);
            bail!("Classification blocked: {} required selection(s) missing", pending.len());
        }
    };

    // 3. Run the classifier
    let classifier = get_standard_classifier(config.reference()?);
    let result = classifier.classify(&record);

    // 4. Report Results
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_classification(&result);
    }
    Ok(())
}

pub(crate) fn print_pending(pending: &[FieldId]) {
    for field in pending {
        println!("   ⛔ Select a value for {} ({})", field.definition().label, field.path());
    }
}

pub(crate) fn print_classification(result: &Classification) {
    match result.outcome {
        CaseClassification::ValidIcsrNewInfo => println!("🎉 Valid ICSR: new safety information"),
        CaseClassification::ValidIcsrNoNewInfo => println!("✅ Valid ICSR: no new safety information"),
        CaseClassification::InvalidIcsr => println!("⚠️  Not a valid ICSR"),
    }

    if let Err(feedback) = result.ensure_complete() {
        println!("   {}", feedback);
        for field in &feedback.missing {
            println!("   Missing: {} ({})", field.definition().label, field.path());
        }
    }

    for finding in &result.findings {
        let icon = if finding.severity == Severity::Error { "🛑" } else { "ℹ️ " };
        println!("{} [{}] {}", icon, finding.code, finding.message);
    }
}
