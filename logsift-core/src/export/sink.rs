use crate::analysis::AnalysisReport;
use crate::export::error::ExportError;
use crate::partition::PartitionSet;
use std::path::Path;

/// What gets exported.
#[derive(Debug, Clone, Copy)]
pub enum ExportPayload<'a> {
    Report(&'a AnalysisReport),
    Partitions {
        set: &'a PartitionSet,
        /// Row delimiter, normally the one the input used.
        delimiter: char,
    },
}

/// Destination-side half of an export. Implementations own the storage
/// medium; callers keep ownership of the payload, so a failed export never
/// costs them the computed result.
pub trait ExportSink {
    fn export(&self, payload: ExportPayload<'_>, destination: &Path) -> Result<(), ExportError>;
}
