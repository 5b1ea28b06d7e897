use crate::catalog::FieldId;
use crate::models::CaseRecord;
use crate::rules::evaluate;
use crate::session::FormState;

/// Snapshots the current form into a frozen `CaseRecord`.
///
/// Purely structural: dependent fields are re-derived and numeric fields are
/// clamped to their catalog range. Nothing is validated here.
pub fn build(form: &FormState) -> CaseRecord {
    let mut record = evaluate(form.draft().clone());

    let patient = &mut record.patient;
    patient.age = clamp(FieldId::PatientAge, patient.age);
    patient.weight = clamp(FieldId::PatientWeight, patient.weight);
    patient.height = clamp(FieldId::PatientHeight, patient.height);

    record
}

fn clamp(field: FieldId, value: Option<f64>) -> Option<f64> {
    let value = value.filter(|v| !v.is_nan())?;
    let value = match field.definition().range() {
        Some((min, max)) => value.clamp(min, max),
        None => value,
    };
    // Adding +0.0 turns a negative zero into 0.0.
    Some(value + 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Seriousness, SeriousnessCriteria};

    #[test]
    fn clamps_numeric_fields_to_catalog_range() {
        let mut form = FormState::new();
        form.set_field(FieldId::PatientAge, "130").unwrap();
        form.set_field(FieldId::PatientWeight, "-4").unwrap();
        form.set_field(FieldId::PatientHeight, "180.5").unwrap();

        let record = build(&form);
        assert_eq!(record.patient.age, Some(120.0));
        assert_eq!(record.patient.weight, Some(0.0));
        assert_eq!(record.patient.height, Some(180.5));
    }

    #[test]
    fn negative_zero_is_normalised() {
        let mut form = FormState::new();
        form.set_field(FieldId::PatientAge, "-0").unwrap();

        let age = build(&form).patient.age.unwrap();
        assert_eq!(age.to_string(), "0");
        assert!(age.is_sign_positive());
    }

    #[test]
    fn unset_numbers_stay_unset() {
        let record = build(&FormState::new());
        assert_eq!(record.patient.age, None);
        assert_eq!(record.patient.weight, None);
    }

    #[test]
    fn snapshot_is_detached_from_the_form() {
        let mut form = FormState::new();
        form.set_field(FieldId::DrugName, "DrugX").unwrap();
        let record = build(&form);

        form.set_field(FieldId::DrugName, "DrugY").unwrap();
        assert_eq!(record.suspected_drug.name, "DrugX");
    }

    #[test]
    fn build_applies_derivation() {
        let mut draft = CaseRecord::default();
        draft.general_info.seriousness = Seriousness::NonSerious;
        draft.general_info.seriousness_criteria = None;

        let record = build(&FormState::from_record(draft));
        assert_eq!(record.general_info.seriousness_criteria, Some(SeriousnessCriteria::NonSerious));
    }
}
