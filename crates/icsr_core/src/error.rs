use thiserror::Error;

use crate::catalog::FieldId;
use crate::models::InvalidChoice;

/// Catalog lookup miss. Signals a configuration defect, not a user mistake.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Unknown field: {0}")]
    UnknownField(String),
}

/// Raised when a raw form value cannot be applied to the draft.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("{field}: {source}")]
    InvalidChoice {
        field: FieldId,
        #[source]
        source: InvalidChoice,
    },

    #[error("{field}: '{value}' is not a date (expected YYYY-MM-DD)")]
    InvalidDate { field: FieldId, value: String },

    #[error("{field}: '{value}' is not a finite number")]
    InvalidNumber { field: FieldId, value: String },

    #[error("{field}: '{value}' is not a yes/no value")]
    InvalidBoolean { field: FieldId, value: String },

    #[error("{0} is derived and cannot be edited in the current state")]
    NotEditable(FieldId),
}

/// Misuse of the intake session state machine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error(transparent)]
    Field(#[from] FieldError),

    #[error("Session is {0} and no longer accepts changes")]
    Closed(&'static str),

    #[error("Nothing to submit: the form is still empty")]
    NothingToSubmit,
}

/// Classification came back invalid. Recoverable: surfaced to the user as the
/// list of inputs still missing, and a draft may still be exported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Case is not a valid ICSR; missing: {}", display_fields(.missing))]
pub struct ValidationIncomplete {
    pub missing: Vec<FieldId>,
    pub reasons: Vec<String>,
}

fn display_fields(fields: &[FieldId]) -> String {
    if fields.is_empty() {
        return "none (screening rule not met)".to_string();
    }
    fields.iter().map(|f| f.path()).collect::<Vec<_>>().join(", ")
}

/// Reference data could not be loaded.
#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("Failed to read reference data {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Reference data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
