mod error;
mod loader;
pub mod types;


pub use error::ConfigError;
pub use loader::{load_config, load_config_or_default, parse_config};
pub use types::LogsiftConfig;
