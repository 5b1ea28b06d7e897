//! Conditional field derivation.
//!
//! Modelled as a pure reducer over the whole record rather than per-widget
//! callbacks: `evaluate` is re-run after every change and on submit.

use crate::catalog::FieldId;
use crate::models::{CaseRecord, Seriousness, SeriousnessCriteria};

/// Recomputes every dependent field. Total and idempotent.
pub fn evaluate(mut record: CaseRecord) -> CaseRecord {
    let general = &mut record.general_info;

    match general.seriousness {
        Seriousness::Serious => {
            // A sentinel carried over from a non-serious state is not a choice.
            if general.seriousness_criteria == Some(SeriousnessCriteria::NonSerious) {
                general.seriousness_criteria = None;
            }
        }
        Seriousness::NonSerious => {
            general.seriousness_criteria = Some(SeriousnessCriteria::NonSerious);
        }
    }

    record
}

/// Whether the user may currently edit `field`.
pub fn is_editable(record: &CaseRecord, field: FieldId) -> bool {
    match field {
        FieldId::SeriousnessCriteria => record.general_info.seriousness == Seriousness::Serious,
        _ => true,
    }
}

/// Selections the user still has to make before the form can be submitted.
pub fn pending_selections(record: &CaseRecord) -> Vec<FieldId> {
    let mut pending = Vec::new();
    let general = &record.general_info;
    if general.seriousness == Seriousness::Serious && general.seriousness_criteria.is_none() {
        pending.push(FieldId::SeriousnessCriteria);
    }
    pending
}
