pub mod error;
pub mod export;
pub mod store;
pub mod submission;

pub use error::{ExportError, IcsrError};
pub use export::{layout, render_pdf, ExportedArtifact, ReportLine};
pub use store::{ArtifactStore, FsArtifactStore};
pub use submission::{SubmissionOutcome, SubmissionReceipt};

use icsr_core::{get_standard_classifier, ReferenceData, ValidationEngine};

pub struct IcsrService {
    pub classifier: ValidationEngine,
    pub store: Box<dyn ArtifactStore + Send + Sync>,
}

impl IcsrService {
    pub fn new(reference: ReferenceData, store: impl ArtifactStore + Send + Sync + 'static) -> Self {
        Self {
            classifier: get_standard_classifier(reference),
            store: Box::new(store),
        }
    }
}
