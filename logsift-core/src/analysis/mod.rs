//! Access Log Analysis
//!
//! Turns a stream of decoded access log records into counted views:
//!
//! - **Status distribution**: requests per status code
//! - **Top resources** / **top traffic sources**: the most requested paths and
//!   the most common client agents, ranked by count
//! - **Suspicious clients**: addresses with more failed requests than a threshold
//! - **Traffic trend**: requests per minute (or hour, or day)
//!
//! Total request volume is reported next to the views on every run.
//!
//! Each view keeps its own accumulator. The default mode folds all of them in a
//! single pass over the decoder; the concurrent mode decodes everything first
//! and then gives each view its own thread over the shared, read-only records.
//!
//! The overall data processing architecture is:
//!
//! reader
//! decode
//! Record
//! ViewAccumulator (one per view)
//! AnalysisReport
//! render_report / ExportSink
//!

mod accumulators;
mod constants;
mod counter;
mod engine;
mod render;
mod report;
mod run;
mod types;

#[cfg(test)]
pub(crate) mod tests;

pub use accumulators::{ViewAccumulator, accumulator_for};
pub use constants::*;
pub use engine::*;
pub use render::render_report;
pub use report::AnalysisReport;
pub use run::{analyze_reader, run_analysis};
pub(crate) use run::finish_decode;
pub use types::*;
