//! Command-line arguments of the two entry points.

use chrono::NaiveDate;
use clap::Parser;

/// Fetch daily price history for every listed symbol into a local SQLite store.
#[derive(Parser, Debug, Clone)]
#[command(name = "stockfetch", version)]
pub struct FetchArgs {
    /// First trading day to fetch (YYYY-MM-DD), inclusive.
    #[arg(long)]
    pub start: NaiveDate,

    /// Last trading day to fetch (YYYY-MM-DD), inclusive.
    #[arg(long)]
    pub end: NaiveDate,

    /// SQLite database file. Overrides SF_DB_PATH.
    #[arg(long)]
    pub db: Option<String>,

    /// Symbols fetched concurrently per batch. Overrides SF_BATCH_SIZE.
    #[arg(long)]
    pub batch_size: Option<usize>,
}

/// Print the progress counters of the fetch runs recorded in a store.
#[derive(Parser, Debug, Clone)]
#[command(name = "stockfetch-status", version)]
pub struct StatusArgs {
    /// SQLite database file. Overrides SF_DB_PATH.
    #[arg(long)]
    pub db: Option<String>,

    /// Seconds between reads. Overrides SF_STATUS_INTERVAL_SECS.
    #[arg(long)]
    pub interval: Option<u64>,

    /// Print a single snapshot and exit.
    #[arg(long, default_value_t = false)]
    pub once: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_args_parse_dates() {
        let args = FetchArgs::try_parse_from([
            "stockfetch",
            "--start",
            "2024-01-02",
            "--end",
            "2024-03-29",
        ])
        .unwrap();
        assert_eq!(args.start, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(args.end, NaiveDate::from_ymd_opt(2024, 3, 29).unwrap());
        assert_eq!(args.db, None);
        assert_eq!(args.batch_size, None);
    }

    #[test]
    fn test_fetch_args_require_both_dates() {
        assert!(FetchArgs::try_parse_from(["stockfetch", "--start", "2024-01-02"]).is_err());
    }

    #[test]
    fn test_fetch_args_reject_malformed_date() {
        assert!(FetchArgs::try_parse_from([
            "stockfetch",
            "--start",
            "01/02/2024",
            "--end",
            "2024-03-29"
        ])
        .is_err());
    }

    #[test]
    fn test_status_args_once() {
        let args = StatusArgs::try_parse_from(["stockfetch-status", "--once"]).unwrap();
        assert!(args.once);
        assert_eq!(args.interval, None);
    }
}
