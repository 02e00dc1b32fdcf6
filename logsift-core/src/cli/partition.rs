use crate::conf::{LogsiftConfig, load_config_or_default};
use crate::export::{ExportPayload, ExportSink, FsSink};
use crate::partition::{PartitionOutcome, partition_dir_name, run_partition};
use anyhow::{Context, Result};
use clap::Args;
use std::io::{self, Write};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

#[derive(Args, Debug, Clone, Default)]
pub struct PartitionArgs {
    /// Access log to read, `-` for stdin
    pub input: PathBuf,

    /// Output directory; must be missing or empty
    #[arg(long)]
    pub out: PathBuf,

    /// HCL config file; built-in defaults when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Field separator for input and output rows
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Treat the first line as data even if it names the columns
    #[arg(long)]
    pub no_skip_header: bool,

    /// Abort on the first malformed line
    #[arg(long)]
    pub strict: bool,
}

impl PartitionArgs {
    pub fn resolve_config(&self) -> Result<LogsiftConfig> {
        let mut cfg = load_config_or_default(self.config.as_deref())?;

        if let Some(delimiter) = self.delimiter {
            cfg.ingest.delimiter = delimiter.to_string();
        }
        if self.no_skip_header {
            cfg.ingest.skip_header = false;
        }
        cfg.analysis.strict |= self.strict;

        cfg.validate()?;
        Ok(cfg)
    }
}

pub fn run(args: PartitionArgs, cancel: &CancellationToken) -> Result<()> {
    let cfg = args.resolve_config()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    partition_with(&args, &cfg, cancel, &mut out, &FsSink::default()).map(|_| ())
}

/// Partition, print the summary, then export. The summary is printed before the
/// export is attempted, so an export failure still leaves the caller with the
/// per-status counts.
pub fn partition_with(
    args: &PartitionArgs,
    cfg: &LogsiftConfig,
    cancel: &CancellationToken,
    out: &mut dyn Write,
    sink: &dyn ExportSink,
) -> Result<PartitionOutcome> {
    let decode_options = cfg.decode_options()?;
    let delimiter = decode_options.delimiter;

    let outcome = run_partition(&args.input, decode_options, cfg.analysis.strict, cancel)?;

    for (status, rows) in outcome.partitions.iter() {
        writeln!(out, "{}: {} rows", partition_dir_name(status), rows.len())?;
    }
    writeln!(out, "\nSkipped malformed lines: {}", outcome.warnings.len())?;
    out.flush()?;

    sink.export(
        ExportPayload::Partitions {
            set: &outcome.partitions,
            delimiter,
        },
        &args.out,
    )
    .with_context(|| {
        format!(
            "failed to write partitions to {} (summary above is complete)",
            args.out.display()
        )
    })?;

    Ok(outcome)
}
