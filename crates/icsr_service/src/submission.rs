use icsr_core::catalog::FieldId;
use icsr_core::{CaseRecord, Classification, IntakeSession, Prepared};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::IcsrError;
use crate::export::{export_case, ExportedArtifact};
use crate::IcsrService;

/// Everything a successful submit hands back. The record is frozen: it is the
/// snapshot that was classified and exported.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub case_id: Uuid,
    pub record: CaseRecord,
    pub classification: Classification,
    pub artifact: ExportedArtifact,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Submitted(SubmissionReceipt),
    /// Required selections are still open. Nothing was classified or exported.
    Rejected { pending: Vec<FieldId> },
}

impl IcsrService {
    /// evaluate -> build -> classify -> export, strictly in that order.
    ///
    /// The session only becomes `Submitted` once the artifact is stored; a
    /// rejection or an export failure leaves it in `Editing`.
    pub fn submit(&self, session: &mut IntakeSession) -> Result<SubmissionOutcome, IcsrError> {
        // 1. Evaluate + pre-submit constraints + build
        let record = match session.prepare()? {
            Prepared::Ready(record) => record,
            Prepared::Blocked { pending } => {
                warn!(pending = ?pending, "submit rejected: required selections missing");
                return Ok(SubmissionOutcome::Rejected { pending });
            }
        };

        // 2. Classify
        let classification = self.classify_only(&record);

        // 3. Export (drafts included)
        let case_id = Uuid::new_v4();
        let artifact = export_case(&*self.store, &case_id.to_string(), &record)?;

        // 4. Close the session
        session.complete()?;
        info!(
            case_id = %case_id,
            outcome = ?classification.outcome,
            missing = classification.missing_fields.len(),
            "case submitted"
        );

        Ok(SubmissionOutcome::Submitted(SubmissionReceipt { case_id, record, classification, artifact }))
    }

    pub fn classify_only(&self, record: &CaseRecord) -> Classification {
        self.classifier.classify(record)
    }
}
