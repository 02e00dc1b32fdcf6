use crate::analysis::engine::{analyze, analyze_concurrent, materialize};
use crate::analysis::report::AnalysisReport;
use crate::analysis::types::AnalysisOptions;
use crate::error::AnalysisError;
use crate::ingest::{DecodeHalt, DecodeOptions, DecodeSummary, Decoder, decode, open_input};
use std::io::BufRead;
use std::path::Path;
use tokio_util::sync::CancellationToken;

/// Decode `input` and run the requested views over it.
pub fn run_analysis(
    input: &Path,
    decode_options: DecodeOptions,
    options: &AnalysisOptions,
    cancel: &CancellationToken,
) -> Result<AnalysisReport, AnalysisError> {
    let reader = open_input(input)?;
    analyze_reader(reader, input, decode_options, options, cancel)
}

/// Same as [`run_analysis`] over an already opened reader. `source` only
/// labels errors.
pub fn analyze_reader<R: BufRead>(
    reader: R,
    source: &Path,
    decode_options: DecodeOptions,
    options: &AnalysisOptions,
    cancel: &CancellationToken,
) -> Result<AnalysisReport, AnalysisError> {
    let mut decoder = decode(reader, decode_options).with_cancel(cancel.clone());

    let report = if options.concurrent {
        // Decode completes before any worker starts reading the records.
        let (records, warnings) = materialize(decoder.by_ref(), options.strict)?;
        finish_decode(decoder, source)?;
        analyze_concurrent(&records, warnings, options, cancel)?
    } else {
        let report = analyze(decoder.by_ref(), options)?;
        finish_decode(decoder, source)?;
        report
    };

    tracing::info!(
        source = %source.display(),
        total_requests = report.total_requests,
        malformed = report.malformed_count(),
        views = report.views.len(),
        "analysis complete"
    );

    Ok(report)
}

pub(crate) fn finish_decode<R: BufRead>(
    decoder: Decoder<R>,
    source: &Path,
) -> Result<DecodeSummary, AnalysisError> {
    let summary = decoder.finish().map_err(|halt| match halt {
        DecodeHalt::Io { source: e, .. } => AnalysisError::input_unavailable(source, e),
        DecodeHalt::Cancelled { line } => {
            tracing::info!(line, "analysis cancelled, discarding partial results");
            AnalysisError::Cancelled
        }
    })?;

    tracing::debug!(
        source = %source.display(),
        lines = summary.lines,
        header_skipped = summary.header_skipped,
        "input decoded"
    );
    Ok(summary)
}
