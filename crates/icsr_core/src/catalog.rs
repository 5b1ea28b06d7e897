//! The single source of truth for every intake field.
//!
//! Declaration order here drives everything that must be reproducible: the
//! order of `missing_fields` in a classification, and the order of the
//! `Label: value` lines in an exported report.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::error::{CatalogError, FieldError};
use crate::models::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Section {
    General,
    Reporter,
    Patient,
    ParentCase,
    AdverseEvent,
    SuspectedDrug,
    Causality,
    Narrative,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::General,
        Section::Reporter,
        Section::Patient,
        Section::ParentCase,
        Section::AdverseEvent,
        Section::SuspectedDrug,
        Section::Causality,
        Section::Narrative,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::General => "General Information",
            Section::Reporter => "Reporter",
            Section::Patient => "Patient",
            Section::ParentCase => "Parent Case",
            Section::AdverseEvent => "Adverse Event",
            Section::SuspectedDrug => "Suspected Drug",
            Section::Causality => "Causality",
            Section::Narrative => "Narrative",
        }
    }
}

/// Every catalogued field, in declaration order (the derived `Ord` is relied on).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldId {
    // General
    ReceivedDate,
    ReportType,
    Country,
    Seriousness,
    SeriousnessCriteria,
    MarketedInCountry,
    // Reporter
    ReporterName,
    ReporterEmail,
    ReporterPhone,
    ReporterQualification,
    // Patient
    PatientIdentifier,
    PatientAge,
    PatientGender,
    PatientWeight,
    PatientHeight,
    PatientMedicalHistory,
    // Parent case
    ParentCaseId,
    ParentCaseStatus,
    RelatedCases,
    // Adverse event
    EventVerbatimText,
    EventCodedTerm,
    EventOutcome,
    // Suspected drug
    DrugName,
    DrugDose,
    DrugRoute,
    DrugStartDate,
    DrugEndDate,
    DrugIndication,
    // Causality
    CausalityMethod,
    CausalityResult,
    CausalityComments,
    // Narrative
    NarrativeSummary,
}

impl FieldId {
    /// Dotted camelCase path, e.g. `adverseEvent.verbatimText`.
    pub fn path(&self) -> &'static str {
        match self {
            FieldId::ReceivedDate => "generalInfo.receivedDate",
            FieldId::ReportType => "generalInfo.reportType",
            FieldId::Country => "generalInfo.country",
            FieldId::Seriousness => "generalInfo.seriousness",
            FieldId::SeriousnessCriteria => "generalInfo.seriousnessCriteria",
            FieldId::MarketedInCountry => "generalInfo.marketedInCountry",
            FieldId::ReporterName => "reporter.name",
            FieldId::ReporterEmail => "reporter.email",
            FieldId::ReporterPhone => "reporter.phone",
            FieldId::ReporterQualification => "reporter.qualification",
            FieldId::PatientIdentifier => "patient.identifier",
            FieldId::PatientAge => "patient.age",
            FieldId::PatientGender => "patient.gender",
            FieldId::PatientWeight => "patient.weight",
            FieldId::PatientHeight => "patient.height",
            FieldId::PatientMedicalHistory => "patient.medicalHistory",
            FieldId::ParentCaseId => "parentCase.parentCaseId",
            FieldId::ParentCaseStatus => "parentCase.status",
            FieldId::RelatedCases => "parentCase.relatedCases",
            FieldId::EventVerbatimText => "adverseEvent.verbatimText",
            FieldId::EventCodedTerm => "adverseEvent.codedTerm",
            FieldId::EventOutcome => "adverseEvent.outcome",
            FieldId::DrugName => "suspectedDrug.name",
            FieldId::DrugDose => "suspectedDrug.dose",
            FieldId::DrugRoute => "suspectedDrug.route",
            FieldId::DrugStartDate => "suspectedDrug.startDate",
            FieldId::DrugEndDate => "suspectedDrug.endDate",
            FieldId::DrugIndication => "suspectedDrug.indication",
            FieldId::CausalityMethod => "causality.method",
            FieldId::CausalityResult => "causality.result",
            FieldId::CausalityComments => "causality.comments",
            FieldId::NarrativeSummary => "narrative.summary",
        }
    }

    pub fn definition(&self) -> &'static FieldDefinition {
        // CATALOG is declared in the same order as the enum.
        &CATALOG[*self as usize]
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for FieldId {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CATALOG
            .iter()
            .map(|def| def.id)
            .find(|id| id.path() == s.trim())
            .ok_or_else(|| CatalogError::UnknownField(s.to_string()))
    }
}

impl Serialize for FieldId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldType {
    Text,
    LongText,
    Email,
    Phone,
    Date,
    Number,
    Choice,
    Boolean,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldConstraint {
    None,
    Range { min: f64, max: f64 },
    OneOf { values: &'static [&'static str] },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum FieldDefault {
    Empty,
    Choice(&'static str),
    Bool(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub id: FieldId,
    pub section: Section,
    pub label: &'static str,
    pub field_type: FieldType,
    pub constraint: FieldConstraint,
    pub default: FieldDefault,
}

/// A raw form string after the catalog constraints were applied.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Empty,
    Text(String),
    Date(NaiveDate),
    Number(f64),
    Choice(&'static str),
    Bool(bool),
}

impl FieldDefinition {
    /// Coerces raw input into a typed value.
    ///
    /// Numeric ranges are not enforced here: the builder clamps on snapshot.
    pub fn parse(&self, raw: &str) -> Result<FieldValue, FieldError> {
        let trimmed = raw.trim();

        match self.field_type {
            FieldType::Text | FieldType::LongText | FieldType::Email | FieldType::Phone => {
                Ok(FieldValue::Text(raw.to_string()))
            }
            _ if trimmed.is_empty() => Ok(FieldValue::Empty),
            FieldType::Date => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .map(FieldValue::Date)
                .map_err(|_| FieldError::InvalidDate { field: self.id, value: raw.to_string() }),
            FieldType::Number => match trimmed.parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(FieldValue::Number(n)),
                _ => Err(FieldError::InvalidNumber { field: self.id, value: raw.to_string() }),
            },
            FieldType::Boolean => match trimmed.to_ascii_lowercase().as_str() {
                "true" | "yes" | "y" | "1" | "on" => Ok(FieldValue::Bool(true)),
                "false" | "no" | "n" | "0" | "off" => Ok(FieldValue::Bool(false)),
                _ => Err(FieldError::InvalidBoolean { field: self.id, value: raw.to_string() }),
            },
            FieldType::Choice => {
                let allowed = match self.constraint {
                    FieldConstraint::OneOf { values } => values,
                    _ => &[],
                };
                allowed
                    .iter()
                    .copied()
                    .find(|label| label.eq_ignore_ascii_case(trimmed))
                    .map(FieldValue::Choice)
                    .ok_or_else(|| FieldError::InvalidChoice {
                        field: self.id,
                        source: InvalidChoice { value: raw.to_string(), allowed },
                    })
            }
        }
    }

    /// Returns the `(min, max)` range for numeric fields.
    pub fn range(&self) -> Option<(f64, f64)> {
        match self.constraint {
            FieldConstraint::Range { min, max } => Some((min, max)),
            _ => None,
        }
    }
}

/// Looks up a field by its dotted path.
pub fn get_field_definition(field_id: &str) -> Result<&'static FieldDefinition, CatalogError> {
    let id: FieldId = field_id.parse()?;
    Ok(id.definition())
}

/// All definitions, in declaration order.
pub fn catalog() -> &'static [FieldDefinition] {
    CATALOG
}

pub fn fields_in(section: Section) -> impl Iterator<Item = &'static FieldDefinition> {
    CATALOG.iter().filter(move |def| def.section == section)
}

const fn text(id: FieldId, section: Section, label: &'static str) -> FieldDefinition {
    typed(id, section, label, FieldType::Text)
}

const fn typed(id: FieldId, section: Section, label: &'static str, field_type: FieldType) -> FieldDefinition {
    FieldDefinition {
        id,
        section,
        label,
        field_type,
        constraint: FieldConstraint::None,
        default: FieldDefault::Empty,
    }
}

const fn number(id: FieldId, section: Section, label: &'static str, min: f64, max: f64) -> FieldDefinition {
    FieldDefinition {
        id,
        section,
        label,
        field_type: FieldType::Number,
        constraint: FieldConstraint::Range { min, max },
        default: FieldDefault::Empty,
    }
}

const fn choice(
    id: FieldId,
    section: Section,
    label: &'static str,
    values: &'static [&'static str],
    default: FieldDefault,
) -> FieldDefinition {
    FieldDefinition {
        id,
        section,
        label,
        field_type: FieldType::Choice,
        constraint: FieldConstraint::OneOf { values },
        default,
    }
}

use table::CATALOG;

mod table {
    use super::*;
    use FieldId as F;
    use Section as S;

    pub(super) static CATALOG: &[FieldDefinition] = &[
        // General
        typed(F::ReceivedDate, S::General, "Received Date", FieldType::Date),
        choice(F::ReportType, S::General, "Report Type", ReportType::LABELS, FieldDefault::Choice("Spontaneous")),
        text(F::Country, S::General, "Country"),
        choice(F::Seriousness, S::General, "Seriousness", Seriousness::LABELS, FieldDefault::Choice("Non-Serious")),
        choice(
            F::SeriousnessCriteria,
            S::General,
            "Seriousness Criteria",
            SeriousnessCriteria::LABELS,
            FieldDefault::Choice("Non-Serious"),
        ),
        FieldDefinition {
            id: F::MarketedInCountry,
            section: S::General,
            label: "Marketed In Country",
            field_type: FieldType::Boolean,
            constraint: FieldConstraint::None,
            default: FieldDefault::Bool(false),
        },
        // Reporter
        text(F::ReporterName, S::Reporter, "Reporter Name"),
        typed(F::ReporterEmail, S::Reporter, "Email", FieldType::Email),
        typed(F::ReporterPhone, S::Reporter, "Phone", FieldType::Phone),
        text(F::ReporterQualification, S::Reporter, "Qualification"),
        // Patient
        text(F::PatientIdentifier, S::Patient, "Patient Identifier"),
        number(F::PatientAge, S::Patient, "Age", 0.0, 120.0),
        choice(F::PatientGender, S::Patient, "Gender", Gender::LABELS, FieldDefault::Empty),
        number(F::PatientWeight, S::Patient, "Weight (kg)", 0.0, 300.0),
        number(F::PatientHeight, S::Patient, "Height (cm)", 0.0, 250.0),
        typed(F::PatientMedicalHistory, S::Patient, "Medical History", FieldType::LongText),
        // Parent case
        text(F::ParentCaseId, S::ParentCase, "Parent Case ID"),
        choice(F::ParentCaseStatus, S::ParentCase, "Status", ParentCaseStatus::LABELS, FieldDefault::Empty),
        typed(F::RelatedCases, S::ParentCase, "Related Cases", FieldType::LongText),
        // Adverse event
        typed(F::EventVerbatimText, S::AdverseEvent, "Verbatim Text", FieldType::LongText),
        text(F::EventCodedTerm, S::AdverseEvent, "Coded Term"),
        choice(F::EventOutcome, S::AdverseEvent, "Outcome", Outcome::LABELS, FieldDefault::Empty),
        // Suspected drug
        text(F::DrugName, S::SuspectedDrug, "Drug Name"),
        text(F::DrugDose, S::SuspectedDrug, "Dose"),
        choice(F::DrugRoute, S::SuspectedDrug, "Route", Route::LABELS, FieldDefault::Empty),
        typed(F::DrugStartDate, S::SuspectedDrug, "Start Date", FieldType::Date),
        typed(F::DrugEndDate, S::SuspectedDrug, "End Date", FieldType::Date),
        text(F::DrugIndication, S::SuspectedDrug, "Indication"),
        // Causality
        choice(F::CausalityMethod, S::Causality, "Method", CausalityMethod::LABELS, FieldDefault::Empty),
        choice(F::CausalityResult, S::Causality, "Result", CausalityResult::LABELS, FieldDefault::Empty),
        typed(F::CausalityComments, S::Causality, "Comments", FieldType::LongText),
        // Narrative
        typed(F::NarrativeSummary, S::Narrative, "Summary", FieldType::LongText),
    ];
}
