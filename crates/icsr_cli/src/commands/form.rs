use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use icsr_core::IntakeSession;

/// A form file: a JSON object of field paths to raw input strings.
pub type FormFile = BTreeMap<String, String>;

pub fn load_form(path: &Path) -> Result<FormFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read form: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("{} is not a JSON object of field paths to strings", path.display()))
}

/// Feeds every entry through the session, reporting all bad entries at once.
pub fn session_from_form(form: &FormFile) -> Result<IntakeSession> {
    let mut session = IntakeSession::new();
    if let Err(errors) = session.apply_form(form.iter().map(|(path, raw)| (path.as_str(), raw.as_str()))) {
        for error in &errors {
            eprintln!("   ❌ {}", error);
        }
        bail!("{} form entries could not be applied", errors.len());
    }
    Ok(session)
}
