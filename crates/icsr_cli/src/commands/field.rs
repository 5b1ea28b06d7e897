use anyhow::Result;
use clap::Args;
use icsr_core::catalog::{FieldConstraint, FieldDefault};
use icsr_core::get_field_definition;

#[derive(Debug, Args)]
pub struct FieldArgs {
    /// Field path, e.g. generalInfo.seriousness
    pub id: String,

    /// Print the definition as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: FieldArgs) -> Result<()> {
    let def = get_field_definition(&args.id)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(def)?);
        return Ok(());
    }

    println!("📋 {} ({})", def.label, def.id.path());
    println!("   Section: {}", def.section.title());
    println!("   Type:    {:?}", def.field_type);
    match def.constraint {
        FieldConstraint::None => {}
        FieldConstraint::Range { min, max } => println!("   Range:   {} to {}", min, max),
        FieldConstraint::OneOf { values } => println!("   Choices: {}", values.join(", ")),
    }
    match def.default {
        FieldDefault::Empty => {}
        FieldDefault::Choice(label) => println!("   Default: {}", label),
        FieldDefault::Bool(value) => println!("   Default: {}", if value { "Yes" } else { "No" }),
    }
    Ok(())
}
