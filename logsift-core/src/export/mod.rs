//! Export of analysis results and partition sets.
//!
//! The core only needs "take these rows or views, put them at this
//! destination, tell me if it failed". [`ExportSink`] is that contract;
//! [`FsSink`] is the local filesystem implementation.

mod error;
mod format;
mod fs_sink;
mod sink;


pub use error::*;
pub use format::*;
pub use fs_sink::*;
pub use sink::*;
