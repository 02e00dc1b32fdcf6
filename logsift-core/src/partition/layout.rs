use crate::record::{FIELD_NAMES, STATUS_FIELD};

/// Name of the single data file inside each partition directory.
pub const PART_FILE_NAME: &str = "part-00000.csv";

/// `status_code=404`
pub fn partition_dir_name(status_code: i64) -> String {
    format!("{}={status_code}", FIELD_NAMES[STATUS_FIELD])
}
