use crate::catalog::FieldId;
use crate::models::CaseRecord;
use crate::reference::ReferenceData;
use crate::validation::{Finding, FindingKind, Severity, ValidationRule};

// =========================================================================
// RULES: ICSR-001 .. ICSR-004
// "Four elements are required for a valid case": an identifiable reporter,
// an identifiable patient, a named suspect drug and a described event.
// Whitespace-only input counts as empty.
// =========================================================================
pub struct RequiredElement {
    code: &'static str,
    field: FieldId,
    message: &'static str,
}

impl RequiredElement {
    pub fn reporter() -> Self {
        Self { code: "ICSR-001", field: FieldId::ReporterName, message: "Identifiable reporter is required" }
    }

    pub fn patient() -> Self {
        Self { code: "ICSR-002", field: FieldId::PatientIdentifier, message: "Identifiable patient is required" }
    }

    pub fn suspect_drug() -> Self {
        Self { code: "ICSR-003", field: FieldId::DrugName, message: "Suspect drug name is required" }
    }

    pub fn adverse_event() -> Self {
        Self {
            code: "ICSR-004",
            field: FieldId::EventVerbatimText,
            message: "Adverse event description is required",
        }
    }

    pub fn all() -> [Self; 4] {
        [Self::reporter(), Self::patient(), Self::suspect_drug(), Self::adverse_event()]
    }

    fn value<'a>(&self, record: &'a CaseRecord) -> &'a str {
        match self.field {
            FieldId::ReporterName => &record.reporter.name,
            FieldId::PatientIdentifier => &record.patient.identifier,
            FieldId::DrugName => &record.suspected_drug.name,
            FieldId::EventVerbatimText => &record.adverse_event.verbatim_text,
            _ => "",
        }
    }
}

impl ValidationRule for RequiredElement {
    fn rule_id(&self) -> &str { self.code }

    fn check(&self, record: &CaseRecord, _reference: &ReferenceData) -> Vec<Finding> {
        let mut findings = Vec::new();
        if self.value(record).trim().is_empty() {
            findings.push(Finding {
                code: self.rule_id().to_string(),
                severity: Severity::Error,
                message: format!("{} ({})", self.message, self.field),
                kind: FindingKind::MissingElement { field: self.field },
            });
        }
        findings
    }
}
