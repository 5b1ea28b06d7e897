pub mod builder;
pub mod catalog;
pub mod error;
pub mod models;
pub mod reference;
pub mod rules;
pub mod session;
pub mod validation;

pub use builder::build;
pub use catalog::{get_field_definition, FieldDefinition, FieldId, Section};
pub use error::{CatalogError, FieldError, ReferenceError, SessionError, ValidationIncomplete};
pub use models::CaseRecord;
pub use reference::ReferenceData;
pub use rules::evaluate;
pub use session::{FormState, IntakeSession, Prepared, SessionState};
pub use validation::{CaseClassification, Classification, ValidationEngine};

use validation::{literature, required};

/// The classifier used at submit time: the four required elements, then
/// literature screening.
pub fn get_standard_classifier(reference: ReferenceData) -> ValidationEngine {
    let [reporter, patient, drug, event] = required::RequiredElement::all();
    ValidationEngine::new(reference)
        .add_rule(reporter)
        .add_rule(patient)
        .add_rule(drug)
        .add_rule(event)
        .add_rule(literature::LiteratureScreening)
}

/// `classify(record)` against the built-in reference data.
pub fn classify(record: &CaseRecord) -> Classification {
    get_standard_classifier(ReferenceData::default()).classify(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ReportType, SeriousnessCriteria};

    fn scenario_a() -> IntakeSession {
        let mut session = IntakeSession::new();
        session
            .apply_form([
                ("reporter.name", "J. Doe"),
                ("patient.identifier", "P-001"),
                ("suspectedDrug.name", "DrugX"),
                ("adverseEvent.verbatimText", "Nausea"),
                ("generalInfo.reportType", "Spontaneous"),
            ])
            .unwrap();
        session
    }

    fn ready(session: &IntakeSession) -> CaseRecord {
        match session.prepare().unwrap() {
            Prepared::Ready(record) => record,
            blocked => panic!("expected a ready record, got {:?}", blocked),
        }
    }

    #[test]
    fn scenario_a_spontaneous_case_is_valid_with_new_info() {
        let result = classify(&ready(&scenario_a()));
        assert_eq!(result.outcome, CaseClassification::ValidIcsrNewInfo);
        assert!(result.missing_fields.is_empty());
        assert!(result.is_valid_icsr());
        assert!(result.has_new_safety_information());
        assert!(result.ensure_complete().is_ok());
    }

    #[test]
    fn scenario_b_missing_event_is_invalid() {
        let mut session = scenario_a();
        session.set_path("adverseEvent.verbatimText", "").unwrap();

        let result = classify(&ready(&session));
        assert_eq!(result.outcome, CaseClassification::InvalidIcsr);
        assert_eq!(result.missing_fields, vec![FieldId::EventVerbatimText]);

        let feedback = result.ensure_complete().unwrap_err();
        assert_eq!(feedback.missing, vec![FieldId::EventVerbatimText]);
        assert!(feedback.to_string().contains("adverseEvent.verbatimText"));
    }

    #[test]
    fn scenario_c_literature_not_marketed_is_invalid() {
        let mut session = scenario_a();
        session.set_path("generalInfo.reportType", "Literature").unwrap();
        session.set_path("generalInfo.marketedInCountry", "false").unwrap();

        let result = classify(&ready(&session));
        assert_eq!(result.outcome, CaseClassification::InvalidIcsr);
        assert!(result.missing_fields.is_empty());
        assert!(result.ensure_complete().unwrap_err().reasons[0].contains("not marketed"));

        // Regardless of the other fields.
        let mut empty = CaseRecord::default();
        empty.general_info.report_type = ReportType::Literature;
        assert_eq!(classify(&empty).outcome, CaseClassification::InvalidIcsr);
    }

    #[test]
    fn scenario_d_literature_listed_event_has_no_new_info() {
        let mut session = scenario_a();
        session.set_path("generalInfo.reportType", "Literature").unwrap();
        session.set_path("generalInfo.marketedInCountry", "true").unwrap();
        session.set_path("adverseEvent.verbatimText", "Headache").unwrap();

        let result = classify(&ready(&session));
        assert_eq!(result.outcome, CaseClassification::ValidIcsrNoNewInfo);
        assert!(result.is_valid_icsr());
        assert!(!result.has_new_safety_information());
    }

    #[test]
    fn literature_unlisted_event_has_new_info() {
        let mut session = scenario_a();
        session.set_path("generalInfo.reportType", "Literature").unwrap();
        session.set_path("generalInfo.marketedInCountry", "yes").unwrap();

        assert_eq!(classify(&ready(&session)).outcome, CaseClassification::ValidIcsrNewInfo);
    }

    #[test]
    fn scenario_e_serious_without_criteria_is_rejected() {
        let mut session = scenario_a();
        session.set_path("generalInfo.seriousness", "Serious").unwrap();

        assert_eq!(
            session.prepare().unwrap(),
            Prepared::Blocked { pending: vec![FieldId::SeriousnessCriteria] }
        );

        session.set_path("generalInfo.seriousnessCriteria", "Life-Threatening").unwrap();
        let record = ready(&session);
        assert_eq!(record.general_info.seriousness_criteria, Some(SeriousnessCriteria::LifeThreatening));
    }

    #[test]
    fn configured_listed_set_changes_the_outcome() {
        let reference = ReferenceData::default().with_listed_events(["Nausea"]);
        let mut session = scenario_a();
        session.set_path("generalInfo.reportType", "Literature").unwrap();
        session.set_path("generalInfo.marketedInCountry", "true").unwrap();

        let result = get_standard_classifier(reference).classify(&ready(&session));
        assert_eq!(result.outcome, CaseClassification::ValidIcsrNoNewInfo);
    }
}
