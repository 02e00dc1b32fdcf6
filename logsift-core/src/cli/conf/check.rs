use crate::conf::{ConfigError, load_config};
use anyhow::Result;
use std::path::PathBuf;

pub fn check(path: PathBuf) -> Result<()> {
    match load_config(&path) {
        Ok(cfg) => {
            let options = cfg.analysis_options();
            println!("✔ Config loaded successfully");
            println!("✔ {} views", options.views.len());
            println!(
                "✔ top {} | suspicious above {} failures on {:?}",
                options.top_n, options.failure_threshold, options.failure_codes
            );
            Ok(())
        }
        Err(err) => {
            if let Some(hint) = config_error_hint(&err) {
                eprintln!("{hint}");
                eprintln!();
            }
            Err(err.into())
        }
    }
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        ConfigError::InvalidDelimiter { .. } => Some(
            "The delimiter is a single character.\n\
             \n\
             Example:\n\
             \n\
             ingest {\n\
             \x20 delimiter = \"|\"\n\
             }",
        ),

        ConfigError::InvalidTopN => Some(
            "Ranked views need room for at least one entry.\n\
             \n\
             Set analysis.top_n to 1 or more.",
        ),

        ConfigError::EmptyFailureCodes => Some(
            "Suspicious clients are counted on failure statuses.\n\
             \n\
             Example:\n\
             \n\
             analysis {\n\
             \x20 failure_codes = [404, 500]\n\
             }",
        ),

        ConfigError::EmptyViews => Some(
            "Remove analysis.views to run every view, or list at least one.",
        ),

        ConfigError::ReadFile { .. } => Some(
            "Create a starting config with `logsift config init`.",
        ),

        ConfigError::Parse { .. } => None,
    }
}
