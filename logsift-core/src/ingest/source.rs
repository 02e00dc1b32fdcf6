use crate::error::AnalysisError;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Path that selects standard input.
pub const STDIN_PATH: &str = "-";

/// Open a log source for reading. `-` reads standard input.
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>, AnalysisError> {
    if path == Path::new(STDIN_PATH) {
        return Ok(Box::new(io::stdin().lock()));
    }

    let file = File::open(path).map_err(|e| AnalysisError::input_unavailable(path, e))?;
    Ok(Box::new(BufReader::new(file)))
}
