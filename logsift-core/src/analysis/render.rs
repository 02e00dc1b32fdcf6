use crate::analysis::report::AnalysisReport;
use crate::analysis::types::{AggregationResult, ViewKind};
use owo_colors::OwoColorize;

/// Plain-text report: `Total Requests: N`, then one block per view.
pub fn render_report(report: &AnalysisReport, colored: bool) -> String {
    let mut out = format!("Total Requests: {}\n", report.total_requests);

    for view in &report.views {
        out.push('\n');
        out.push_str(&heading(view.view.title(), colored));
        out.push('\n');
        render_view(&mut out, view);
    }

    out.push_str(&format!(
        "\nSkipped malformed lines: {}\n",
        report.malformed_count()
    ));

    out
}

fn render_view(out: &mut String, view: &AggregationResult) {
    if view.is_empty() {
        out.push_str("(none)\n");
        return;
    }

    for entry in &view.entries {
        match view.view {
            ViewKind::SuspiciousClients => {
                out.push_str(&format!("{}: {} failed requests\n", entry.key, entry.count));
            }
            _ => out.push_str(&format!("{}: {}\n", entry.key, entry.count)),
        }
    }
}

fn heading(title: &str, colored: bool) -> String {
    if colored {
        title.bold().to_string()
    } else {
        title.to_string()
    }
}
