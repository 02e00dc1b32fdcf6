use crate::analysis::ViewKind;
use crate::record::MalformedRecordError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    // Fatal: nothing is reported from a partially read input.
    #[error("input {path} is unavailable: {source}")]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Strict mode only; otherwise malformed records become warnings.
    #[error("malformed record: {0}")]
    Malformed(#[from] MalformedRecordError),

    #[error("analysis cancelled")]
    Cancelled,

    #[error("worker for view {} panicked", .view.as_str())]
    WorkerPanicked { view: ViewKind },
}

impl AnalysisError {
    pub fn input_unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::InputUnavailable {
            path: path.into(),
            source,
        }
    }
}
