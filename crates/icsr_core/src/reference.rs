use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ReferenceError;

/// Static reference lists injected at startup.
///
/// Owned by whoever deploys the intake form; the core only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReferenceData {
    /// Adverse events already documented in the reference safety information.
    pub listed_events: Vec<String>,
    pub regulatory_authorities: Vec<String>,
    pub report_types: Vec<String>,
    pub causality_methods: Vec<String>,
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self {
            listed_events: ["Headache", "Dizziness", "Fatigue", "Rash", "Dry Mouth", "Somnolence"]
                .map(String::from)
                .to_vec(),
            regulatory_authorities: [
                "FDA (United States)",
                "EMA (European Union)",
                "MHRA (United Kingdom)",
                "PMDA (Japan)",
                "Health Canada",
                "TGA (Australia)",
                "CDSCO (India)",
            ]
            .map(String::from)
            .to_vec(),
            report_types: crate::models::ReportType::LABELS.iter().map(|s| s.to_string()).collect(),
            causality_methods: crate::models::CausalityMethod::LABELS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ReferenceData {
    pub fn from_json_str(json: &str) -> Result<Self, ReferenceError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ReferenceError> {
        let content = fs::read_to_string(path).map_err(|source| ReferenceError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn with_listed_events<I, S>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.listed_events = events.into_iter().map(Into::into).collect();
        self
    }

    /// Case-insensitive match on the trimmed term.
    pub fn is_listed(&self, term: &str) -> bool {
        let wanted = normalize(term);
        !wanted.is_empty() && self.listed_events.iter().any(|e| normalize(e) == wanted)
    }
}

fn normalize(term: &str) -> String {
    term.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listed_match_ignores_case_and_padding() {
        let reference = ReferenceData::default();
        assert!(reference.is_listed("  headache "));
        assert!(reference.is_listed("DRY MOUTH"));
        assert!(!reference.is_listed("Nausea"));
        assert!(!reference.is_listed("   "));
    }

    #[test]
    fn json_overrides_only_given_lists() {
        let reference = ReferenceData::from_json_str(r#"{ "listedEvents": ["Nausea"] }"#).unwrap();
        assert!(reference.is_listed("nausea"));
        assert!(!reference.is_listed("Headache"));
        assert_eq!(reference.report_types, ReferenceData::default().report_types);
    }

    #[test]
    fn bad_json_is_reported() {
        let err = ReferenceData::from_json_str("{ listedEvents: ").unwrap_err();
        assert!(matches!(err, ReferenceError::Parse(_)));
    }
}
