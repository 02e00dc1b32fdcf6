use crate::analysis::constants::{
    DAY_PREFIX_LEN, DEFAULT_FAILURE_CODES, DEFAULT_FAILURE_THRESHOLD, DEFAULT_TOP_N,
    HOUR_PREFIX_LEN, MINUTE_PREFIX_LEN,
};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// The keyed views. Total requests is always reported alongside them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ViewKind {
    StatusDistribution,
    TopResources,
    TopSources,
    SuspiciousClients,
    TrafficTrend,
}

impl ViewKind {
    pub const ALL: [ViewKind; 5] = [
        ViewKind::StatusDistribution,
        ViewKind::TopResources,
        ViewKind::TopSources,
        ViewKind::SuspiciousClients,
        ViewKind::TrafficTrend,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ViewKind::StatusDistribution => "status-distribution",
            ViewKind::TopResources => "top-resources",
            ViewKind::TopSources => "top-sources",
            ViewKind::SuspiciousClients => "suspicious-clients",
            ViewKind::TrafficTrend => "traffic-trend",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ViewKind::StatusDistribution => "Status Distribution",
            ViewKind::TopResources => "Top Resources",
            ViewKind::TopSources => "Top Traffic Sources",
            ViewKind::SuspiciousClients => "Suspicious Clients",
            ViewKind::TrafficTrend => "Traffic Trend",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewOrdering {
    KeyAscending,
    /// Count descending, ties in first-seen order.
    CountDescending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewEntry {
    pub key: String,
    pub count: u64,
}

/// Output of one view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregationResult {
    pub view: ViewKind,
    pub ordering: ViewOrdering,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    pub entries: Vec<ViewEntry>,
}

impl AggregationResult {
    pub fn get(&self, key: &str) -> Option<u64> {
        self.entries.iter().find(|e| e.key == key).map(|e| e.count)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// Sum of all counts in the view.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TrendGranularity {
    #[default]
    Minute,
    Hour,
    Day,
}

impl TrendGranularity {
    pub fn prefix_len(self) -> usize {
        match self {
            TrendGranularity::Minute => MINUTE_PREFIX_LEN,
            TrendGranularity::Hour => HOUR_PREFIX_LEN,
            TrendGranularity::Day => DAY_PREFIX_LEN,
        }
    }
}

/// Knobs for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Views to compute, in report order.
    pub views: Vec<ViewKind>,
    pub top_n: usize,
    pub failure_codes: Vec<i64>,
    /// Suspicious clients need strictly more failures than this.
    pub failure_threshold: u64,
    pub trend_granularity: TrendGranularity,
    /// Abort on the first malformed record instead of collecting a warning.
    pub strict: bool,
    /// Fan views out to one thread each after decoding everything.
    pub concurrent: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            views: ViewKind::ALL.to_vec(),
            top_n: DEFAULT_TOP_N,
            failure_codes: DEFAULT_FAILURE_CODES.to_vec(),
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
            trend_granularity: TrendGranularity::default(),
            strict: false,
            concurrent: false,
        }
    }
}
