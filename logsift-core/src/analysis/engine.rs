use crate::analysis::accumulators::{
    Ranked, StatusDistribution, SuspiciousClients, TrafficTrend, ViewAccumulator, accumulator_for,
};
use crate::analysis::constants::CANCEL_CHECK_INTERVAL;
use crate::analysis::report::AnalysisReport;
use crate::analysis::types::{AggregationResult, AnalysisOptions, TrendGranularity, ViewKind};
use crate::error::AnalysisError;
use crate::record::{MalformedRecordError, Record};
use std::thread;
use tokio_util::sync::CancellationToken;

//-----------------------------------------------------------------------------
// Single views
//-----------------------------------------------------------------------------

pub fn total_requests<'a, I>(records: I) -> u64
where
    I: IntoIterator<Item = &'a Record>,
{
    records.into_iter().count() as u64
}

pub fn status_distribution<'a, I>(records: I) -> AggregationResult
where
    I: IntoIterator<Item = &'a Record>,
{
    fold(records, Box::new(StatusDistribution::default()))
}

pub fn top_resources<'a, I>(records: I, n: usize) -> AggregationResult
where
    I: IntoIterator<Item = &'a Record>,
{
    let acc = Ranked::new(ViewKind::TopResources, n, Record::resource_path);
    fold(records, Box::new(acc))
}

pub fn top_sources<'a, I>(records: I, n: usize) -> AggregationResult
where
    I: IntoIterator<Item = &'a Record>,
{
    let acc = Ranked::new(ViewKind::TopSources, n, Record::client_agent);
    fold(records, Box::new(acc))
}

pub fn suspicious_clients<'a, I>(
    records: I,
    failure_codes: &[i64],
    threshold: u64,
) -> AggregationResult
where
    I: IntoIterator<Item = &'a Record>,
{
    let acc = SuspiciousClients::new(failure_codes.to_vec(), threshold);
    fold(records, Box::new(acc))
}

pub fn traffic_trend<'a, I>(records: I, granularity: TrendGranularity) -> AggregationResult
where
    I: IntoIterator<Item = &'a Record>,
{
    fold(records, Box::new(TrafficTrend::new(granularity.prefix_len())))
}

fn fold<'a, I>(records: I, mut acc: Box<dyn ViewAccumulator>) -> AggregationResult
where
    I: IntoIterator<Item = &'a Record>,
{
    for record in records {
        acc.push(record);
    }
    acc.finish()
}

//-----------------------------------------------------------------------------
// Combined pass
//-----------------------------------------------------------------------------

/// Fold every requested view in one pass over a decoded stream.
///
/// Malformed items are collected as warnings (or returned as the error in
/// strict mode). Stopping the stream early, e.g. through a cancelled decoder,
/// is the caller's business: the report covers whatever the stream yielded.
pub fn analyze<I>(stream: I, options: &AnalysisOptions) -> Result<AnalysisReport, AnalysisError>
where
    I: IntoIterator<Item = Result<Record, MalformedRecordError>>,
{
    let mut accumulators: Vec<Box<dyn ViewAccumulator>> = options
        .views
        .iter()
        .map(|kind| accumulator_for(*kind, options))
        .collect();

    let mut total = 0u64;
    let mut warnings = Vec::new();

    for item in stream {
        match item {
            Ok(record) => {
                total += 1;
                for acc in accumulators.iter_mut() {
                    acc.push(&record);
                }
            }
            Err(e) => {
                if options.strict {
                    return Err(e.into());
                }
                tracing::debug!(error = %e, "skipping malformed record");
                warnings.push(e);
            }
        }
    }

    Ok(AnalysisReport {
        total_requests: total,
        views: accumulators.into_iter().map(|acc| acc.finish()).collect(),
        warnings,
    })
}

/// Drain a decoded stream into memory, splitting out malformed items.
pub fn materialize<I>(
    stream: I,
    strict: bool,
) -> Result<(Vec<Record>, Vec<MalformedRecordError>), AnalysisError>
where
    I: IntoIterator<Item = Result<Record, MalformedRecordError>>,
{
    let mut records = Vec::new();
    let mut warnings = Vec::new();

    for item in stream {
        match item {
            Ok(record) => records.push(record),
            Err(e) if strict => return Err(e.into()),
            Err(e) => {
                tracing::debug!(error = %e, "skipping malformed record");
                warnings.push(e);
            }
        }
    }

    Ok((records, warnings))
}

//-----------------------------------------------------------------------------
// Concurrent fan-out
//-----------------------------------------------------------------------------

/// Run each requested view on its own thread over a fully decoded slice.
///
/// The slice is only read. Every worker owns its accumulator and polls
/// `cancel` as it goes; on cancellation all accumulators are dropped and no
/// partial report is returned.
pub fn analyze_concurrent(
    records: &[Record],
    warnings: Vec<MalformedRecordError>,
    options: &AnalysisOptions,
    cancel: &CancellationToken,
) -> Result<AnalysisReport, AnalysisError> {
    let views = thread::scope(|scope| {
        let handles: Vec<_> = options
            .views
            .iter()
            .map(|&kind| {
                let cancel = cancel.clone();
                let handle = scope.spawn(move || fold_view(kind, records, options, &cancel));
                (kind, handle)
            })
            .collect();

        // Join every worker before looking at any result.
        let joined: Vec<_> = handles
            .into_iter()
            .map(|(kind, handle)| (kind, handle.join()))
            .collect();

        joined
            .into_iter()
            .map(|(kind, result)| result.map_err(|_| AnalysisError::WorkerPanicked { view: kind }))
            .collect::<Result<Vec<_>, _>>()
    })?;

    if cancel.is_cancelled() {
        return Err(AnalysisError::Cancelled);
    }

    let views = views
        .into_iter()
        .collect::<Option<Vec<_>>>()
        .ok_or(AnalysisError::Cancelled)?;

    tracing::debug!(views = views.len(), records = records.len(), "concurrent views folded");

    Ok(AnalysisReport {
        total_requests: records.len() as u64,
        views,
        warnings,
    })
}

fn fold_view(
    kind: ViewKind,
    records: &[Record],
    options: &AnalysisOptions,
    cancel: &CancellationToken,
) -> Option<AggregationResult> {
    let mut acc = accumulator_for(kind, options);
    for (i, record) in records.iter().enumerate() {
        if i % CANCEL_CHECK_INTERVAL == 0 && cancel.is_cancelled() {
            return None;
        }
        acc.push(record);
    }
    Some(acc.finish())
}
