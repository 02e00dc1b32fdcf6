use crate::analysis::types::{AggregationResult, ViewKind};
use crate::record::MalformedRecordError;
use serde::Serialize;

/// Everything one analysis run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    pub total_requests: u64,
    pub views: Vec<AggregationResult>,
    /// Malformed lines that were left out of every count.
    pub warnings: Vec<MalformedRecordError>,
}

impl AnalysisReport {
    pub fn view(&self, kind: ViewKind) -> Option<&AggregationResult> {
        self.views.iter().find(|v| v.view == kind)
    }

    pub fn malformed_count(&self) -> usize {
        self.warnings.len()
    }
}
