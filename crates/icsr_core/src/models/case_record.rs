use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::*;

// ---------------------------------------------------------------------------
// The Root Container: one Individual Case Safety Report
// Sections are laid out in the same order the catalog declares them.
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaseRecord {
    pub general_info: GeneralInfo,
    pub reporter: Reporter,
    pub patient: Patient,
    pub parent_case: ParentCase,
    pub adverse_event: AdverseEvent,
    pub suspected_drug: SuspectedDrug,
    pub causality: Causality,
    pub narrative: Narrative,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneralInfo {
    pub received_date: Option<NaiveDate>,
    pub report_type: ReportType,
    pub country: String,
    pub seriousness: Seriousness,

    // Only meaningful for serious cases; the rule evaluator pins it to the
    // NonSerious sentinel otherwise.
    pub seriousness_criteria: Option<SeriousnessCriteria>,

    // Marketing authorization held in the reporting country.
    // Gates literature screening.
    pub marketed_in_country: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Reporter {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub qualification: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Patient {
    /// Initials or local patient id. This is the "identifiable patient" element.
    pub identifier: String,
    pub age: Option<f64>,    // years
    pub gender: Option<Gender>,
    pub weight: Option<f64>, // kg
    pub height: Option<f64>, // cm
    pub medical_history: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParentCase {
    pub parent_case_id: String,
    pub status: Option<ParentCaseStatus>,
    pub related_cases: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdverseEvent {
    pub verbatim_text: String,
    pub coded_term: String,
    pub outcome: Option<Outcome>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuspectedDrug {
    pub name: String,
    pub dose: String,
    pub route: Option<Route>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub indication: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Causality {
    pub method: Option<CausalityMethod>,
    pub result: Option<CausalityResult>,
    pub comments: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Narrative {
    pub summary: String,
}
