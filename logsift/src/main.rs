use clap::{Parser, Subcommand};
use logsift_core::cli::{self, AnalyzeArgs, PartitionArgs};
use logsift_core::error::AnalysisError;
use logsift_core::logging::{LogFormat, default_log_format, init_logging};
use tokio_util::sync::CancellationToken;

#[derive(Parser, Debug)]
#[command(
    name = "logsift",
    version,
    about = "Logsift: access log aggregation and partitioning"
)]
struct Cli {
    /// Log output format; pretty on a terminal, JSON otherwise
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute request statistics for an access log
    Analyze(AnalyzeArgs),

    /// Split an access log into one directory per status code
    Partition(PartitionArgs),

    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: cli::conf::ConfigCmd,
    },
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.log_format.unwrap_or_else(default_log_format));

    let cancel = CancellationToken::new();
    let handler_token = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        tracing::info!("shutdown requested, cancelling");
        handler_token.cancel();
    }) {
        tracing::warn!(error = %e, "failed to install interrupt handler");
    }

    let result = match cli.command {
        Command::Analyze(args) => cli::analyze::run(args, &cancel),
        Command::Partition(args) => cli::partition::run(args, &cancel),
        Command::Config { cmd } => cli::conf::run(cmd),
    };

    if let Err(e) = result {
        if matches!(
            e.downcast_ref::<AnalysisError>(),
            Some(AnalysisError::Cancelled)
        ) {
            eprintln!("cancelled");
            std::process::exit(130);
        }
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
