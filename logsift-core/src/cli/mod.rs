pub mod analyze;
pub mod conf;
pub mod partition;

#[cfg(test)]
mod tests;

pub use analyze::AnalyzeArgs;
pub use partition::PartitionArgs;
