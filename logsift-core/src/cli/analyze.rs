use crate::analysis::{AnalysisReport, TrendGranularity, ViewKind, render_report, run_analysis};
use crate::conf::{LogsiftConfig, load_config_or_default};
use crate::export::{ExportFormat, ExportPayload, ExportSink, FsSink};
use anyhow::{Context, Result};
use clap::Args;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

#[derive(Args, Debug, Clone, Default)]
pub struct AnalyzeArgs {
    /// Access log to read, `-` for stdin
    pub input: PathBuf,

    /// HCL config file; built-in defaults when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// View to compute (repeatable); all views when omitted
    #[arg(long = "view", value_enum)]
    pub views: Vec<ViewKind>,

    /// Entries kept by the ranked views
    #[arg(long)]
    pub top_n: Option<usize>,

    /// Failures a client must exceed to be reported as suspicious
    #[arg(long)]
    pub threshold: Option<u64>,

    /// Status code counted as a failure (repeatable)
    #[arg(long = "failure-code")]
    pub failure_codes: Vec<i64>,

    /// Traffic trend bucket size
    #[arg(long, value_enum)]
    pub granularity: Option<TrendGranularity>,

    /// Input field separator
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Treat the first line as data even if it names the columns
    #[arg(long)]
    pub no_skip_header: bool,

    /// Decode first, then compute each view on its own thread
    #[arg(long)]
    pub concurrent: bool,

    /// Abort on the first malformed line
    #[arg(long)]
    pub strict: bool,

    /// Also write the report to this path
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export format; guessed from the export path when omitted
    #[arg(long, value_enum)]
    pub format: Option<ExportFormat>,
}

impl AnalyzeArgs {
    /// Config file values with command-line overrides applied, validated.
    pub fn resolve_config(&self) -> Result<LogsiftConfig> {
        let mut cfg = load_config_or_default(self.config.as_deref())?;

        if !self.views.is_empty() {
            cfg.analysis.views = self.views.clone();
        }
        if let Some(n) = self.top_n {
            cfg.analysis.top_n = n;
        }
        if let Some(threshold) = self.threshold {
            cfg.analysis.failure_threshold = threshold;
        }
        if !self.failure_codes.is_empty() {
            cfg.analysis.failure_codes = self.failure_codes.clone();
        }
        if let Some(granularity) = self.granularity {
            cfg.analysis.trend_granularity = granularity;
        }
        if let Some(delimiter) = self.delimiter {
            cfg.ingest.delimiter = delimiter.to_string();
        }
        if self.no_skip_header {
            cfg.ingest.skip_header = false;
        }
        cfg.analysis.concurrent |= self.concurrent;
        cfg.analysis.strict |= self.strict;

        cfg.validate()?;
        Ok(cfg)
    }

    fn export_format(&self, cfg: &LogsiftConfig) -> ExportFormat {
        self.format
            .or(cfg.export.format)
            .or_else(|| self.export.as_deref().and_then(ExportFormat::from_path))
            .unwrap_or_default()
    }
}

pub fn run(args: AnalyzeArgs, cancel: &CancellationToken) -> Result<()> {
    let cfg = args.resolve_config()?;
    let sink = FsSink::new(args.export_format(&cfg));
    let colored = io::stdout().is_terminal();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    analyze_with(&args, &cfg, cancel, &mut out, &sink, colored).map(|_| ())
}

/// Analyze, print, then export. The report is printed before the export is
/// attempted, so an export failure still leaves the caller with the result.
pub fn analyze_with(
    args: &AnalyzeArgs,
    cfg: &LogsiftConfig,
    cancel: &CancellationToken,
    out: &mut dyn Write,
    sink: &dyn ExportSink,
    colored: bool,
) -> Result<AnalysisReport> {
    let report = run_analysis(
        &args.input,
        cfg.decode_options()?,
        &cfg.analysis_options(),
        cancel,
    )?;

    if report.malformed_count() > 0 {
        tracing::warn!(
            malformed = report.malformed_count(),
            first = %report.warnings[0],
            "skipped malformed lines"
        );
    }

    write!(out, "{}", render_report(&report, colored))?;
    out.flush()?;

    if let Some(destination) = &args.export {
        sink.export(ExportPayload::Report(&report), destination)
            .with_context(|| {
                format!(
                    "export to {} failed (report above is complete)",
                    destination.display()
                )
            })?;
    }

    Ok(report)
}
