pub mod analysis;
pub mod cli;
pub mod conf;
pub mod error;
pub mod export;
pub mod ingest;
pub mod logging;
pub mod partition;
pub mod record;
