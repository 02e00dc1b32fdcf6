pub const DEFAULT_TOP_N: usize = 3;
pub const DEFAULT_FAILURE_THRESHOLD: u64 = 3;
pub const DEFAULT_FAILURE_CODES: &[i64] = &[404, 500];

/// `YYYY-MM-DD HH:MM`
pub const MINUTE_PREFIX_LEN: usize = 16;
/// `YYYY-MM-DD HH`
pub const HOUR_PREFIX_LEN: usize = 13;
/// `YYYY-MM-DD`
pub const DAY_PREFIX_LEN: usize = 10;

/// Records folded by a concurrent worker between cancellation checks.
pub const CANCEL_CHECK_INTERVAL: usize = 1024;
