/// Number of symbols fetched concurrently before the next batch may start
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Seconds between two status observer reads
pub const STATUS_POLL_INTERVAL_SECS: u64 = 5;

/// Day-resolution date format, also the stored form of price bar dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";
