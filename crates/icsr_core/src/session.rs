use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::builder::build;
use crate::catalog::{FieldDefault, FieldId, FieldValue};
use crate::error::{FieldError, SessionError};
use crate::models::*;
use crate::rules::{evaluate, is_editable, pending_selections};

// ---------------------------------------------------------------------------
// The Draft: mutable form state, scoped to one editing session
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    draft: CaseRecord,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    pub fn new() -> Self {
        Self { draft: evaluate(CaseRecord::default()) }
    }

    /// Seeds the draft from an already structured record.
    pub fn from_record(record: CaseRecord) -> Self {
        Self { draft: evaluate(record) }
    }

    pub fn draft(&self) -> &CaseRecord {
        &self.draft
    }

    /// Applies one raw input through the catalog, then re-derives dependents.
    pub fn set_field(&mut self, field: FieldId, raw: &str) -> Result<(), FieldError> {
        let definition = field.definition();
        let value = definition.parse(raw)?;

        if !is_editable(&self.draft, field) {
            // Re-sending the derived value of a locked field is a no-op.
            return match (&value, definition.default) {
                (FieldValue::Empty, _) => Ok(()),
                (FieldValue::Choice(v), FieldDefault::Choice(d)) if *v == d => Ok(()),
                _ => Err(FieldError::NotEditable(field)),
            };
        }

        apply(&mut self.draft, field, value)?;
        self.draft = evaluate(std::mem::take(&mut self.draft));
        Ok(())
    }

    pub fn set_path(&mut self, path: &str, raw: &str) -> Result<FieldId, FieldError> {
        let field = FieldId::from_str(path)?;
        self.set_field(field, raw)?;
        Ok(field)
    }
}

fn apply(record: &mut CaseRecord, field: FieldId, value: FieldValue) -> Result<(), FieldError> {
    match field {
        FieldId::ReceivedDate => record.general_info.received_date = date(value),
        FieldId::ReportType => {
            record.general_info.report_type = required_choice(field, value)?;
        }
        FieldId::Country => record.general_info.country = text(value),
        FieldId::Seriousness => {
            record.general_info.seriousness = required_choice(field, value)?;
        }
        FieldId::SeriousnessCriteria => {
            record.general_info.seriousness_criteria = choice(field, value)?;
        }
        FieldId::MarketedInCountry => {
            record.general_info.marketed_in_country = matches!(value, FieldValue::Bool(true));
        }

        FieldId::ReporterName => record.reporter.name = text(value),
        FieldId::ReporterEmail => record.reporter.email = text(value),
        FieldId::ReporterPhone => record.reporter.phone = text(value),
        FieldId::ReporterQualification => record.reporter.qualification = text(value),

        FieldId::PatientIdentifier => record.patient.identifier = text(value),
        FieldId::PatientAge => record.patient.age = number(value),
        FieldId::PatientGender => record.patient.gender = choice(field, value)?,
        FieldId::PatientWeight => record.patient.weight = number(value),
        FieldId::PatientHeight => record.patient.height = number(value),
        FieldId::PatientMedicalHistory => record.patient.medical_history = text(value),

        FieldId::ParentCaseId => record.parent_case.parent_case_id = text(value),
        FieldId::ParentCaseStatus => record.parent_case.status = choice(field, value)?,
        FieldId::RelatedCases => record.parent_case.related_cases = text(value),

        FieldId::EventVerbatimText => record.adverse_event.verbatim_text = text(value),
        FieldId::EventCodedTerm => record.adverse_event.coded_term = text(value),
        FieldId::EventOutcome => record.adverse_event.outcome = choice(field, value)?,

        FieldId::DrugName => record.suspected_drug.name = text(value),
        FieldId::DrugDose => record.suspected_drug.dose = text(value),
        FieldId::DrugRoute => record.suspected_drug.route = choice(field, value)?,
        FieldId::DrugStartDate => record.suspected_drug.start_date = date(value),
        FieldId::DrugEndDate => record.suspected_drug.end_date = date(value),
        FieldId::DrugIndication => record.suspected_drug.indication = text(value),

        FieldId::CausalityMethod => record.causality.method = choice(field, value)?,
        FieldId::CausalityResult => record.causality.result = choice(field, value)?,
        FieldId::CausalityComments => record.causality.comments = text(value),

        FieldId::NarrativeSummary => record.narrative.summary = text(value),
    }
    Ok(())
}

fn text(value: FieldValue) -> String {
    match value {
        FieldValue::Text(s) => s,
        _ => String::new(),
    }
}

fn date(value: FieldValue) -> Option<NaiveDate> {
    match value {
        FieldValue::Date(d) => Some(d),
        _ => None,
    }
}

fn number(value: FieldValue) -> Option<f64> {
    match value {
        FieldValue::Number(n) => Some(n),
        _ => None,
    }
}

fn choice<T>(field: FieldId, value: FieldValue) -> Result<Option<T>, FieldError>
where
    T: FromStr<Err = InvalidChoice>,
{
    match value {
        FieldValue::Choice(label) => label
            .parse()
            .map(Some)
            .map_err(|source| FieldError::InvalidChoice { field, source }),
        _ => Ok(None),
    }
}

/// Choice lists that always hold a value fall back to their catalog default.
fn required_choice<T>(field: FieldId, value: FieldValue) -> Result<T, FieldError>
where
    T: FromStr<Err = InvalidChoice>,
{
    let value = match (value, field.definition().default) {
        (FieldValue::Empty, FieldDefault::Choice(label)) => FieldValue::Choice(label),
        (value, _) => value,
    };
    match choice(field, value.clone())? {
        Some(v) => Ok(v),
        None => Err(FieldError::InvalidChoice {
            field,
            source: InvalidChoice { value: format!("{:?}", value), allowed: &[] },
        }),
    }
}

// ---------------------------------------------------------------------------
// The Session: Empty -> Editing -> (Submitted | Abandoned)
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    Empty,
    Editing,
    Submitted,
    Abandoned,
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Submitted | SessionState::Abandoned)
    }

    fn name(&self) -> &'static str {
        match self {
            SessionState::Empty => "empty",
            SessionState::Editing => "editing",
            SessionState::Submitted => "submitted",
            SessionState::Abandoned => "abandoned",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of asking the session for a submittable snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum Prepared {
    Ready(CaseRecord),
    /// Required selections are still open; the session stays in `Editing`.
    Blocked { pending: Vec<FieldId> },
}

#[derive(Debug, Clone)]
pub struct IntakeSession {
    state: SessionState,
    form: FormState,
}

impl Default for IntakeSession {
    fn default() -> Self {
        Self::new()
    }
}

impl IntakeSession {
    pub fn new() -> Self {
        Self { state: SessionState::Empty, form: FormState::new() }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn set_field(&mut self, field: FieldId, raw: &str) -> Result<(), SessionError> {
        self.ensure_open()?;
        self.form.set_field(field, raw)?;
        debug!(field = %field, "intake field updated");
        self.state = SessionState::Editing;
        Ok(())
    }

    pub fn set_path(&mut self, path: &str, raw: &str) -> Result<FieldId, SessionError> {
        let field = FieldId::from_str(path).map_err(FieldError::from)?;
        self.set_field(field, raw)?;
        Ok(field)
    }

    /// Applies a whole form of `path -> raw value` pairs.
    ///
    /// Entries are applied in catalog order so that a field is always set
    /// after the fields it depends on. Every failing entry is reported; the
    /// valid ones are still applied.
    pub fn apply_form<'a, I>(&mut self, entries: I) -> Result<(), Vec<SessionError>>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        if let Err(e) = self.ensure_open() {
            return Err(vec![e]);
        }

        let mut errors = Vec::new();
        let mut parsed = Vec::new();
        for (path, raw) in entries {
            match FieldId::from_str(path) {
                Ok(field) => parsed.push((field, raw)),
                Err(e) => errors.push(SessionError::Field(e.into())),
            }
        }
        parsed.sort_by_key(|(field, _)| *field);

        for (field, raw) in parsed {
            if let Err(e) = self.set_field(field, raw) {
                errors.push(e);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Evaluates, checks the pre-submit constraints and builds the record.
    /// Does not change the session state.
    pub fn prepare(&self) -> Result<Prepared, SessionError> {
        match self.state {
            SessionState::Empty => return Err(SessionError::NothingToSubmit),
            SessionState::Editing => {}
            closed => return Err(SessionError::Closed(closed.name())),
        }

        let pending = pending_selections(&evaluate(self.form.draft().clone()));
        if !pending.is_empty() {
            return Ok(Prepared::Blocked { pending });
        }
        Ok(Prepared::Ready(build(&self.form)))
    }

    /// Marks the session as submitted. Terminal.
    pub fn complete(&mut self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Editing => {
                self.state = SessionState::Submitted;
                Ok(())
            }
            SessionState::Empty => Err(SessionError::NothingToSubmit),
            closed => Err(SessionError::Closed(closed.name())),
        }
    }

    /// Drops all in-memory state. No autosave, no side effect.
    pub fn abandon(&mut self) {
        if self.state == SessionState::Submitted {
            return;
        }
        self.form = FormState::new();
        self.state = SessionState::Abandoned;
    }

    fn ensure_open(&self) -> Result<(), SessionError> {
        if self.state.is_terminal() {
            return Err(SessionError::Closed(self.state.name()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty_and_moves_to_editing() {
        let mut session = IntakeSession::new();
        assert_eq!(session.state(), SessionState::Empty);
        assert_eq!(session.prepare(), Err(SessionError::NothingToSubmit));

        session.set_path("reporter.name", "J. Doe").unwrap();
        assert_eq!(session.state(), SessionState::Editing);
        assert_eq!(session.form().draft().reporter.name, "J. Doe");
    }

    #[test]
    fn criteria_is_locked_until_serious() {
        let mut session = IntakeSession::new();
        let err = session.set_field(FieldId::SeriousnessCriteria, "Death").unwrap_err();
        assert_eq!(err, SessionError::Field(FieldError::NotEditable(FieldId::SeriousnessCriteria)));

        session.set_field(FieldId::Seriousness, "Serious").unwrap();
        session.set_field(FieldId::SeriousnessCriteria, "Death").unwrap();
        assert_eq!(
            session.form().draft().general_info.seriousness_criteria,
            Some(SeriousnessCriteria::Death)
        );

        session.set_field(FieldId::Seriousness, "Non-Serious").unwrap();
        assert_eq!(
            session.form().draft().general_info.seriousness_criteria,
            Some(SeriousnessCriteria::NonSerious)
        );
    }

    #[test]
    fn serious_without_criteria_is_blocked_not_defaulted() {
        let mut session = IntakeSession::new();
        session.set_field(FieldId::ReporterName, "J. Doe").unwrap();
        session.set_field(FieldId::Seriousness, "Serious").unwrap();

        assert_eq!(
            session.prepare().unwrap(),
            Prepared::Blocked { pending: vec![FieldId::SeriousnessCriteria] }
        );
        assert_eq!(session.state(), SessionState::Editing);

        session.set_field(FieldId::SeriousnessCriteria, "Hospitalization").unwrap();
        match session.prepare().unwrap() {
            Prepared::Ready(record) => assert_eq!(
                record.general_info.seriousness_criteria,
                Some(SeriousnessCriteria::Hospitalization)
            ),
            other => panic!("expected a ready record, got {:?}", other),
        }
    }

    #[test]
    fn submitted_is_terminal() {
        let mut session = IntakeSession::new();
        session.set_field(FieldId::DrugName, "DrugX").unwrap();
        session.complete().unwrap();

        assert_eq!(session.state(), SessionState::Submitted);
        assert_eq!(session.set_field(FieldId::DrugName, "DrugY"), Err(SessionError::Closed("submitted")));
        assert_eq!(session.complete(), Err(SessionError::Closed("submitted")));
        assert!(matches!(session.prepare(), Err(SessionError::Closed(_))));

        session.abandon();
        assert_eq!(session.state(), SessionState::Submitted);
    }

    #[test]
    fn abandon_discards_the_draft() {
        let mut session = IntakeSession::new();
        session.set_field(FieldId::NarrativeSummary, "half typed").unwrap();
        session.abandon();

        assert_eq!(session.state(), SessionState::Abandoned);
        assert_eq!(session.form().draft(), FormState::new().draft());
        assert!(session.set_field(FieldId::NarrativeSummary, "again").is_err());
    }

    #[test]
    fn apply_form_orders_dependencies_and_collects_errors() {
        let mut session = IntakeSession::new();
        let entries = vec![
            ("generalInfo.seriousnessCriteria", "Death"),
            ("generalInfo.seriousness", "Serious"),
            ("patient.shoeSize", "42"),
            ("patient.age", "abc"),
            ("reporter.name", "J. Doe"),
        ];

        let errors = session.apply_form(entries).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(&SessionError::Field(FieldError::Catalog(
            crate::error::CatalogError::UnknownField("patient.shoeSize".to_string())
        ))));

        let draft = session.form().draft();
        assert_eq!(draft.general_info.seriousness, Seriousness::Serious);
        assert_eq!(draft.general_info.seriousness_criteria, Some(SeriousnessCriteria::Death));
        assert_eq!(draft.reporter.name, "J. Doe");
    }

    #[test]
    fn empty_report_type_falls_back_to_default() {
        let mut form = FormState::new();
        form.set_field(FieldId::ReportType, "Literature").unwrap();
        form.set_field(FieldId::ReportType, "").unwrap();
        assert_eq!(form.draft().general_info.report_type, ReportType::Spontaneous);
    }
}
