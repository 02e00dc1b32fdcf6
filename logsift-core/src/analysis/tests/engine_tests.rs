use super::test_helpers::{SAMPLE_LOG, decoded, record, sample_records};
use crate::analysis::{
    AnalysisOptions, TrendGranularity, ViewKind, ViewOrdering, analyze, status_distribution,
    suspicious_clients, top_resources, top_sources, total_requests, traffic_trend,
};
use crate::error::AnalysisError;
use crate::record::MalformedReason;
use pretty_assertions::assert_eq;

fn entries(result: &crate::analysis::AggregationResult) -> Vec<(&str, u64)> {
    result
        .entries
        .iter()
        .map(|e| (e.key.as_str(), e.count))
        .collect()
}

#[test]
fn status_distribution_matches_sample() {
    // Arrange
    let records = sample_records();

    // Act
    let dist = status_distribution(&records);

    // Assert
    assert_eq!(total_requests(&records), 5);
    assert_eq!(entries(&dist), vec![("200", 2), ("404", 2), ("500", 1)]);
    assert_eq!(dist.ordering, ViewOrdering::KeyAscending);
    assert_eq!(dist.total(), 5);
}

#[test]
fn status_distribution_orders_numerically() {
    let records = vec![
        record("a", "t", "/", 1000, "x"),
        record("a", "t", "/", 404, "x"),
        record("a", "t", "/", 99, "x"),
    ];

    let dist = status_distribution(&records);

    assert_eq!(entries(&dist), vec![("99", 1), ("404", 1), ("1000", 1)]);
}

#[test]
fn top_resources_breaks_ties_by_first_seen() {
    // Arrange
    let records = sample_records();

    // Act
    let top = top_resources(&records, 3);

    // Assert
    assert_eq!(
        entries(&top),
        vec![("/home", 2), ("/products", 2), ("/checkout", 1)]
    );
    assert_eq!(top.ordering, ViewOrdering::CountDescending);
    assert_eq!(top.limit, Some(3));
}

#[test]
fn top_resources_never_exceeds_n() {
    let records = sample_records();

    assert_eq!(entries(&top_resources(&records, 1)), vec![("/home", 2)]);
    assert!(top_resources(&records, 2).len() <= 2);
}

#[test]
fn top_sources_ranks_agents() {
    let records = sample_records();

    let top = top_sources(&records, 3);

    assert_eq!(
        entries(&top),
        vec![
            ("Mozilla/5.0 (Windows NT 10.0)", 2),
            ("Chrome/91.0", 2),
            ("Safari/14.0", 1)
        ]
    );
}

#[test]
fn suspicious_clients_with_zero_threshold_lists_every_failing_address() {
    // Arrange
    let records = sample_records();

    // Act
    let suspicious = suspicious_clients(&records, &[404, 500], 0);

    // Assert
    assert_eq!(
        entries(&suspicious),
        vec![("192.168.1.10", 1), ("192.168.1.15", 1), ("192.168.1.3", 1)]
    );
}

#[test]
fn suspicious_clients_count_only_failures() {
    // Arrange: one client with many successes and exactly four failures,
    // another with exactly three failures.
    let mut records = Vec::new();
    for _ in 0..10 {
        records.push(record("10.0.0.1", "t", "/", 200, "x"));
    }
    for status in [404, 500, 404, 404] {
        records.push(record("10.0.0.1", "t", "/", status, "x"));
    }
    for _ in 0..3 {
        records.push(record("10.0.0.2", "t", "/", 500, "x"));
    }
    records.push(record("10.0.0.3", "t", "/", 403, "x"));

    // Act
    let suspicious = suspicious_clients(&records, &[404, 500], 3);

    // Assert
    assert_eq!(entries(&suspicious), vec![("10.0.0.1", 4)]);
}

#[test]
fn suspicious_clients_honour_custom_failure_codes() {
    let records = vec![
        record("10.0.0.1", "t", "/", 403, "x"),
        record("10.0.0.1", "t", "/", 404, "x"),
    ];

    let suspicious = suspicious_clients(&records, &[403], 0);

    assert_eq!(entries(&suspicious), vec![("10.0.0.1", 1)]);
}

#[test]
fn traffic_trend_groups_by_minute_in_order() {
    // Arrange
    let mut records = sample_records();
    records.insert(0, record("a", "2024-03-15 09:59:59", "/", 200, "x"));

    // Act
    let trend = traffic_trend(&records, TrendGranularity::Minute);

    // Assert
    assert_eq!(
        entries(&trend),
        vec![
            ("2024-03-15 09:59", 1),
            ("2024-03-15 10:00", 2),
            ("2024-03-15 10:01", 2),
            ("2024-03-15 10:02", 1),
        ]
    );
    let keys: Vec<_> = trend.keys().collect();
    assert!(keys.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn traffic_trend_supports_coarser_granularity() {
    let records = sample_records();

    let trend = traffic_trend(&records, TrendGranularity::Hour);

    assert_eq!(entries(&trend), vec![("2024-03-15 10", 5)]);
}

#[test]
fn analyze_runs_every_view_in_one_pass() {
    // Arrange
    let options = AnalysisOptions::default();

    // Act
    let report = analyze(decoded(SAMPLE_LOG), &options).unwrap();

    // Assert
    assert_eq!(report.total_requests, 5);
    assert_eq!(report.views.len(), 5);
    let kinds: Vec<_> = report.views.iter().map(|v| v.view).collect();
    assert_eq!(kinds, ViewKind::ALL.to_vec());

    let dist = report.view(ViewKind::StatusDistribution).unwrap();
    assert_eq!(dist.total(), report.total_requests);

    // Default threshold (3) leaves no suspicious client in the sample.
    assert!(report.view(ViewKind::SuspiciousClients).unwrap().is_empty());
    assert_eq!(report.malformed_count(), 0);
}

#[test]
fn analyze_only_computes_requested_views() {
    let options = AnalysisOptions {
        views: vec![ViewKind::TrafficTrend],
        ..Default::default()
    };

    let report = analyze(decoded(SAMPLE_LOG), &options).unwrap();

    assert_eq!(report.views.len(), 1);
    assert!(report.view(ViewKind::TrafficTrend).is_some());
    assert!(report.view(ViewKind::TopResources).is_none());
}

#[test]
fn malformed_line_is_excluded_and_warned() {
    // Arrange
    let input = format!("{SAMPLE_LOG}192.168.1.99,2024-03-15 10:03:00,/home,200\n");

    // Act
    let report = analyze(decoded(&input), &AnalysisOptions::default()).unwrap();

    // Assert
    assert_eq!(report.total_requests, 5);
    assert_eq!(report.malformed_count(), 1);
    assert_eq!(report.warnings[0].line, Some(7));
    assert_eq!(
        report.warnings[0].reason,
        MalformedReason::FieldCount {
            expected: 5,
            found: 4
        }
    );
    let dist = report.view(ViewKind::StatusDistribution).unwrap();
    assert_eq!(dist.total(), 5);
}

#[test]
fn strict_mode_aborts_on_first_malformed_line() {
    let input = format!("{SAMPLE_LOG}bad line\n");
    let options = AnalysisOptions {
        strict: true,
        ..Default::default()
    };

    let err = analyze(decoded(&input), &options).unwrap_err();

    assert!(matches!(err, AnalysisError::Malformed(e) if e.line == Some(7)));
}

#[test]
fn analysis_is_idempotent() {
    let options = AnalysisOptions {
        failure_threshold: 0,
        ..Default::default()
    };

    let first = analyze(decoded(SAMPLE_LOG), &options).unwrap();
    let second = analyze(decoded(SAMPLE_LOG), &options).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn empty_input_yields_empty_views() {
    let report = analyze(decoded(""), &AnalysisOptions::default()).unwrap();

    assert_eq!(report.total_requests, 0);
    assert!(report.views.iter().all(|v| v.is_empty()));
}
