//! Status-keyed partitioning.
//!
//! Records are regrouped by status code so that status-scoped reads only touch
//! one group. The status code becomes the partition key and is dropped from the
//! stored row body; everything else keeps the input column order.

mod layout;
mod run;
mod writer;


pub use layout::*;
pub use run::*;
pub use writer::*;
