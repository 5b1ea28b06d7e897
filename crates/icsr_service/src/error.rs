use icsr_core::SessionError;
use thiserror::Error;

/// Rendering or persisting a case report failed. Nothing is left behind on
/// disk when this is returned.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Could not reserve {bytes} bytes for the rendered report")]
    Allocation { bytes: usize },

    #[error("PDF rendering failed: {0}")]
    Render(String),

    #[error("Failed to write artifact {name}: {source}")]
    Write {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum IcsrError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Export(#[from] ExportError),
}
