use serde::Serialize;

use crate::catalog::FieldId;
use crate::error::ValidationIncomplete;
use crate::models::CaseRecord;
use crate::reference::ReferenceData;

pub mod literature;
pub mod required;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FindingKind {
    MissingElement { field: FieldId },
    NotMarketedInCountry,
    ListedEvent { term: String },
}

// The structure of a finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub code: String,      // e.g., "ICSR-003"
    pub severity: Severity,
    pub message: String,   // "Adverse event description is required"
    pub kind: FindingKind,
}

// The contract every rule must fulfill
pub trait ValidationRule {
    fn check(&self, record: &CaseRecord, reference: &ReferenceData) -> Vec<Finding>;
    fn rule_id(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CaseClassification {
    #[serde(rename = "invalidICSR")]
    InvalidIcsr,
    #[serde(rename = "validICSR_noNewInfo")]
    ValidIcsrNoNewInfo,
    #[serde(rename = "validICSR_newInfo")]
    ValidIcsrNewInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub outcome: CaseClassification,
    /// True for both valid outcomes.
    #[serde(rename = "isValidICSR")]
    pub valid_icsr: bool,
    /// Empty required elements, in catalog order.
    pub missing_fields: Vec<FieldId>,
    pub findings: Vec<Finding>,
}

impl Classification {
    pub fn is_valid_icsr(&self) -> bool {
        self.valid_icsr
    }

    pub fn has_new_safety_information(&self) -> bool {
        self.outcome == CaseClassification::ValidIcsrNewInfo
    }

    /// Turns an invalid outcome into the user-facing feedback error.
    pub fn ensure_complete(&self) -> Result<(), ValidationIncomplete> {
        if self.is_valid_icsr() {
            return Ok(());
        }
        Err(ValidationIncomplete {
            missing: self.missing_fields.clone(),
            reasons: self
                .findings
                .iter()
                .filter(|f| f.severity == Severity::Error)
                .map(|f| f.message.clone())
                .collect(),
        })
    }
}

// The Engine that holds the registry of all rules
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule + Send + Sync>>,
    reference: ReferenceData,
}

impl ValidationEngine {
    pub fn new(reference: ReferenceData) -> Self {
        Self { rules: Vec::new(), reference }
    }

    pub fn add_rule<R: ValidationRule + Send + Sync + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn run(&self, record: &CaseRecord) -> Vec<Finding> {
        let mut findings = Vec::new();
        for rule in &self.rules {
            let mut rule_findings = rule.check(record, &self.reference);
            findings.append(&mut rule_findings);
        }
        findings
    }

    /// Classifies a finalized record. Deterministic: the same record always
    /// yields the same outcome and the same `missing_fields` order.
    pub fn classify(&self, record: &CaseRecord) -> Classification {
        let findings = self.run(record);

        let mut missing_fields: Vec<FieldId> = findings
            .iter()
            .filter_map(|f| match f.kind {
                FindingKind::MissingElement { field } => Some(field),
                _ => None,
            })
            .collect();
        missing_fields.sort();
        missing_fields.dedup();

        let not_marketed = findings.iter().any(|f| f.kind == FindingKind::NotMarketedInCountry);
        let listed = findings.iter().any(|f| matches!(f.kind, FindingKind::ListedEvent { .. }));

        // No partial credit: every required element, then the screening gate.
        let outcome = if !missing_fields.is_empty() || not_marketed {
            CaseClassification::InvalidIcsr
        } else if listed {
            CaseClassification::ValidIcsrNoNewInfo
        } else {
            CaseClassification::ValidIcsrNewInfo
        };

        let valid_icsr = outcome != CaseClassification::InvalidIcsr;
        Classification { outcome, valid_icsr, missing_fields, findings }
    }
}
