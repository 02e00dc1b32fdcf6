use super::test_helpers::{SAMPLE_LOG, decoded, record, sample_records};
use crate::analysis::{
    AnalysisOptions, analyze, analyze_concurrent, analyze_reader, materialize,
};
use crate::error::AnalysisError;
use crate::ingest::DecodeOptions;
use pretty_assertions::assert_eq;
use std::io::Cursor;
use std::path::Path;
use tokio_util::sync::CancellationToken;

#[test]
fn concurrent_matches_single_pass() {
    // Arrange
    let options = AnalysisOptions {
        failure_threshold: 0,
        ..Default::default()
    };
    let (records, warnings) = materialize(decoded(SAMPLE_LOG), false).unwrap();

    // Act
    let sequential = analyze(decoded(SAMPLE_LOG), &options).unwrap();
    let concurrent =
        analyze_concurrent(&records, warnings, &options, &CancellationToken::new()).unwrap();

    // Assert
    assert_eq!(concurrent, sequential);
}

#[test]
fn concurrent_over_larger_input() {
    // Arrange
    let mut records = Vec::new();
    for i in 0..5_000 {
        let status = if i % 7 == 0 { 500 } else { 200 };
        let address = format!("10.0.0.{}", i % 13);
        let ts = format!("2024-03-15 10:{:02}:00", (i / 100) % 60);
        records.push(record(&address, &ts, &format!("/p{}", i % 5), status, "x"));
    }
    let options = AnalysisOptions::default();

    // Act
    let cancel = CancellationToken::new();
    let report = analyze_concurrent(&records, Vec::new(), &options, &cancel).unwrap();
    let sequential = analyze(records.iter().cloned().map(Ok), &options).unwrap();

    // Assert
    assert_eq!(report.total_requests, 5_000);
    assert_eq!(report, sequential);
}

#[test]
fn cancelled_run_returns_no_partial_report() {
    // Arrange
    let token = CancellationToken::new();
    token.cancel();

    // Act
    let result = analyze_concurrent(
        &sample_records(),
        Vec::new(),
        &AnalysisOptions::default(),
        &token,
    );

    // Assert
    assert!(matches!(result, Err(AnalysisError::Cancelled)));
}

#[test]
fn reader_pipeline_uses_concurrent_mode_when_asked() {
    let options = AnalysisOptions {
        concurrent: true,
        ..Default::default()
    };

    let report = analyze_reader(
        Cursor::new(SAMPLE_LOG),
        Path::new("sample.csv"),
        DecodeOptions::default(),
        &options,
        &CancellationToken::new(),
    )
    .unwrap();

    assert_eq!(report.total_requests, 5);
    assert_eq!(report.views.len(), 5);
}

#[test]
fn reader_pipeline_reports_cancellation() {
    let token = CancellationToken::new();
    token.cancel();

    let result = analyze_reader(
        Cursor::new(SAMPLE_LOG),
        Path::new("sample.csv"),
        DecodeOptions::default(),
        &AnalysisOptions::default(),
        &token,
    );

    assert!(matches!(result, Err(AnalysisError::Cancelled)));
}
