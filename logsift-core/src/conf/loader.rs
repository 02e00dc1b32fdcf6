use crate::conf::error::ConfigError;
use crate::conf::types::LogsiftConfig;
use std::fs;
use std::path::Path;

/// Read, parse and validate a config file.
pub fn load_config(path: &Path) -> Result<LogsiftConfig, ConfigError> {
    let s = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let cfg = parse_config(&s).map_err(|e| ConfigError::parse(path, e))?;

    cfg.validate()?;

    tracing::debug!(path = %path.display(), "config loaded");
    Ok(cfg)
}

/// Built-in defaults when no path is given.
pub fn load_config_or_default(path: Option<&Path>) -> Result<LogsiftConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(LogsiftConfig::default()),
    }
}

pub fn parse_config(s: &str) -> Result<LogsiftConfig, hcl::Error> {
    hcl::from_str(s)
}
