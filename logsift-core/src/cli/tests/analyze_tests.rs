use crate::analysis::tests::test_helpers::SAMPLE_LOG;
use crate::analysis::{TrendGranularity, ViewKind};
use crate::cli::analyze::{AnalyzeArgs, analyze_with};
use crate::cli::tests::test_sinks::FailingSink;
use crate::error::AnalysisError;
use crate::export::{ExportError, ExportFormat, FsSink};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;
use tokio_util::sync::CancellationToken;

fn write_sample(dir: &Path) -> PathBuf {
    let path = dir.join("access.csv");
    fs::write(&path, SAMPLE_LOG).unwrap();
    path
}

#[test]
fn report_is_printed_and_exported() {
    // Arrange
    let dir = tempdir().unwrap();
    let args = AnalyzeArgs {
        input: write_sample(dir.path()),
        export: Some(dir.path().join("report.json")),
        ..Default::default()
    };
    let cfg = args.resolve_config().unwrap();
    let mut out = Vec::new();

    // Act
    let report = analyze_with(
        &args,
        &cfg,
        &CancellationToken::new(),
        &mut out,
        &FsSink::new(ExportFormat::Json),
        false,
    )
    .unwrap();

    // Assert
    let printed = String::from_utf8(out).unwrap();
    assert!(printed.starts_with("Total Requests: 5\n"));
    assert_eq!(report.total_requests, 5);

    let exported = fs::read_to_string(dir.path().join("report.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&exported).unwrap();
    assert_eq!(json["total_requests"], 5);
}

#[test]
fn export_failure_keeps_the_printed_report() {
    // Arrange
    let dir = tempdir().unwrap();
    let args = AnalyzeArgs {
        input: write_sample(dir.path()),
        export: Some(PathBuf::from("s3://bucket/report.txt")),
        ..Default::default()
    };
    let cfg = args.resolve_config().unwrap();
    let sink = FailingSink::default();
    let mut out = Vec::new();

    // Act
    let cancel = CancellationToken::new();
    let err = analyze_with(&args, &cfg, &cancel, &mut out, &sink, false).unwrap_err();

    // Assert
    assert_eq!(sink.calls.get(), 1);
    assert!(err.downcast_ref::<ExportError>().is_some());
    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("Status Distribution\n200: 2\n404: 2\n500: 1\n"));
}

#[test]
fn missing_input_is_fatal_and_names_the_path() {
    // Arrange
    let dir = tempdir().unwrap();
    let args = AnalyzeArgs {
        input: dir.path().join("missing.csv"),
        ..Default::default()
    };
    let cfg = args.resolve_config().unwrap();
    let mut out = Vec::new();

    // Act
    let err = analyze_with(
        &args,
        &cfg,
        &CancellationToken::new(),
        &mut out,
        &FsSink::default(),
        false,
    )
    .unwrap_err();

    // Assert
    assert!(out.is_empty());
    let err = err.downcast::<AnalysisError>().unwrap();
    assert!(matches!(
        err,
        AnalysisError::InputUnavailable { ref path, .. } if path.ends_with("missing.csv")
    ));
    assert!(err.to_string().contains("missing.csv"));
}

#[test]
fn flags_override_config_file() {
    // Arrange
    let dir = tempdir().unwrap();
    let config = dir.path().join("logsift.hcl");
    fs::write(&config, "analysis {\n  top_n = 10\n  failure_threshold = 1\n}\n").unwrap();
    let args = AnalyzeArgs {
        config: Some(config),
        views: vec![ViewKind::TrafficTrend],
        top_n: Some(2),
        granularity: Some(TrendGranularity::Day),
        delimiter: Some(';'),
        no_skip_header: true,
        strict: true,
        ..Default::default()
    };

    // Act
    let cfg = args.resolve_config().unwrap();

    // Assert
    let options = cfg.analysis_options();
    assert_eq!(options.views, vec![ViewKind::TrafficTrend]);
    assert_eq!(options.top_n, 2);
    assert_eq!(options.failure_threshold, 1);
    assert_eq!(options.trend_granularity, TrendGranularity::Day);
    assert!(options.strict);
    let decode = cfg.decode_options().unwrap();
    assert_eq!(decode.delimiter, ';');
    assert!(!decode.skip_header);
}

#[test]
fn invalid_override_is_rejected() {
    let args = AnalyzeArgs {
        top_n: Some(0),
        ..Default::default()
    };

    assert!(args.resolve_config().is_err());
}
