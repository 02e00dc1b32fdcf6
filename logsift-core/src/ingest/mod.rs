mod decoder;
mod header;
mod source;


pub use decoder::*;
pub use source::*;
