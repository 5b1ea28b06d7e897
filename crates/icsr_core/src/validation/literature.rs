use crate::models::{CaseRecord, ReportType};
use crate::reference::ReferenceData;
use crate::validation::{Finding, FindingKind, Severity, ValidationRule};

// =========================================================================
// RULE: ICSR-LIT-001 / ICSR-LIT-002
// Literature screening. A case found in the literature only counts when the
// product holds a marketing authorization in the country. A reaction that is
// already listed in the reference safety information carries no new safety
// information.
//
// Applies to literature reports only; other report types are not screened.
// =========================================================================
pub struct LiteratureScreening;

impl LiteratureScreening {
    pub const NOT_MARKETED: &'static str = "ICSR-LIT-001";
    pub const LISTED_EVENT: &'static str = "ICSR-LIT-002";
}

impl ValidationRule for LiteratureScreening {
    fn rule_id(&self) -> &str { "ICSR-LIT" }

    fn check(&self, record: &CaseRecord, reference: &ReferenceData) -> Vec<Finding> {
        let mut findings = Vec::new();
        if record.general_info.report_type != ReportType::Literature {
            return findings;
        }

        if !record.general_info.marketed_in_country {
            findings.push(Finding {
                code: Self::NOT_MARKETED.to_string(),
                severity: Severity::Error,
                message: "Literature screening not applicable: product is not marketed in the country"
                    .to_string(),
                kind: FindingKind::NotMarketedInCountry,
            });
        }

        // Either the reporter's words or the coded term may name the listed event.
        let event = &record.adverse_event;
        let listed = [event.verbatim_text.as_str(), event.coded_term.as_str()]
            .into_iter()
            .find(|term| reference.is_listed(term));

        if let Some(term) = listed {
            findings.push(Finding {
                code: Self::LISTED_EVENT.to_string(),
                severity: Severity::Info,
                message: format!("'{}' is a listed/expected event: no new safety information", term.trim()),
                kind: FindingKind::ListedEvent { term: term.trim().to_string() },
            });
        }

        findings
    }
}
