use crate::analysis::counter::FirstSeenCounter;
use crate::analysis::types::{
    AggregationResult, AnalysisOptions, ViewEntry, ViewKind, ViewOrdering,
};
use crate::record::Record;
use std::collections::BTreeMap;

/// Running state for one view. Each view owns its accumulator outright, so
/// accumulators can be folded on separate threads and dropped whole.
pub trait ViewAccumulator: Send {
    fn push(&mut self, record: &Record);

    fn finish(self: Box<Self>) -> AggregationResult;
}

pub fn accumulator_for(kind: ViewKind, options: &AnalysisOptions) -> Box<dyn ViewAccumulator> {
    match kind {
        ViewKind::StatusDistribution => Box::new(StatusDistribution::default()),
        ViewKind::TopResources => Box::new(Ranked::new(kind, options.top_n, Record::resource_path)),
        ViewKind::TopSources => Box::new(Ranked::new(kind, options.top_n, Record::client_agent)),
        ViewKind::SuspiciousClients => Box::new(SuspiciousClients::new(
            options.failure_codes.clone(),
            options.failure_threshold,
        )),
        ViewKind::TrafficTrend => Box::new(TrafficTrend::new(
            options.trend_granularity.prefix_len(),
        )),
    }
}

fn key_ascending(view: ViewKind, entries: Vec<ViewEntry>) -> AggregationResult {
    AggregationResult {
        view,
        ordering: ViewOrdering::KeyAscending,
        limit: None,
        entries,
    }
}

fn into_entries<K: ToString>(counts: BTreeMap<K, u64>) -> Vec<ViewEntry> {
    counts
        .into_iter()
        .map(|(key, count)| ViewEntry {
            key: key.to_string(),
            count,
        })
        .collect()
}

//-----------------------------------------------------------------------------
// Status distribution
//-----------------------------------------------------------------------------

#[derive(Default)]
pub struct StatusDistribution {
    // Numeric key so 99 sorts before 200.
    counts: BTreeMap<i64, u64>,
}

impl ViewAccumulator for StatusDistribution {
    fn push(&mut self, record: &Record) {
        *self.counts.entry(record.status_code()).or_insert(0) += 1;
    }

    fn finish(self: Box<Self>) -> AggregationResult {
        key_ascending(ViewKind::StatusDistribution, into_entries(self.counts))
    }
}

//-----------------------------------------------------------------------------
// Top resources / top sources
//-----------------------------------------------------------------------------

pub struct Ranked {
    view: ViewKind,
    limit: usize,
    key: fn(&Record) -> &str,
    counter: FirstSeenCounter,
}

impl Ranked {
    pub fn new(view: ViewKind, limit: usize, key: fn(&Record) -> &str) -> Self {
        Self {
            view,
            limit,
            key,
            counter: FirstSeenCounter::new(),
        }
    }
}

impl ViewAccumulator for Ranked {
    fn push(&mut self, record: &Record) {
        self.counter.record((self.key)(record));
    }

    fn finish(self: Box<Self>) -> AggregationResult {
        AggregationResult {
            view: self.view,
            ordering: ViewOrdering::CountDescending,
            limit: Some(self.limit),
            entries: self.counter.ranked(Some(self.limit)),
        }
    }
}

//-----------------------------------------------------------------------------
// Suspicious clients
//-----------------------------------------------------------------------------

/// Failures per client address. Records are filtered on status before they
/// are grouped, so the grouped value is the failure count, not the request
/// count.
pub struct SuspiciousClients {
    failure_codes: Vec<i64>,
    threshold: u64,
    failures: BTreeMap<String, u64>,
}

impl SuspiciousClients {
    pub fn new(failure_codes: Vec<i64>, threshold: u64) -> Self {
        Self {
            failure_codes,
            threshold,
            failures: BTreeMap::new(),
        }
    }
}

impl ViewAccumulator for SuspiciousClients {
    fn push(&mut self, record: &Record) {
        if !self.failure_codes.contains(&record.status_code()) {
            return;
        }

        match self.failures.get_mut(record.client_address()) {
            Some(count) => *count += 1,
            None => {
                self.failures.insert(record.client_address().to_string(), 1);
            }
        }
    }

    fn finish(self: Box<Self>) -> AggregationResult {
        let threshold = self.threshold;
        let mut entries = into_entries(self.failures);
        entries.retain(|e| e.count > threshold);
        key_ascending(ViewKind::SuspiciousClients, entries)
    }
}

//-----------------------------------------------------------------------------
// Traffic trend
//-----------------------------------------------------------------------------

/// Requests per timestamp prefix. The timestamp format sorts lexicographically,
/// so key order is chronological.
pub struct TrafficTrend {
    prefix_len: usize,
    buckets: BTreeMap<String, u64>,
}

impl TrafficTrend {
    pub fn new(prefix_len: usize) -> Self {
        Self {
            prefix_len,
            buckets: BTreeMap::new(),
        }
    }
}

impl ViewAccumulator for TrafficTrend {
    fn push(&mut self, record: &Record) {
        let bucket = record.timestamp_prefix(self.prefix_len);
        match self.buckets.get_mut(bucket) {
            Some(count) => *count += 1,
            None => {
                self.buckets.insert(bucket.to_string(), 1);
            }
        }
    }

    fn finish(self: Box<Self>) -> AggregationResult {
        key_ascending(ViewKind::TrafficTrend, into_entries(self.buckets))
    }
}
