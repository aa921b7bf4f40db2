use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};

use stockfetch_market_data::FailureKind;

use crate::errors::{Result, ValidationError};
use crate::prices::PriceBar;

/// Inclusive range of trading days requested for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(ValidationError::InvalidDateRange { start, end }.into());
        }
        Ok(Self { start, end })
    }

    /// Midnight UTC of the first day.
    pub fn start_utc(&self) -> DateTime<Utc> {
        self.start.and_time(NaiveTime::MIN).and_utc()
    }

    /// Midnight UTC of the day after the last day (exclusive bound).
    pub fn end_utc_exclusive(&self) -> DateTime<Utc> {
        self.end
            .checked_add_days(Days::new(1))
            .unwrap_or(self.end)
            .and_time(NaiveTime::MIN)
            .and_utc()
    }

    /// True if `day` (midnight UTC) falls inside the range.
    pub fn contains(&self, day: DateTime<Utc>) -> bool {
        let date = day.date_naive();
        date >= self.start && date <= self.end
    }
}

/// Terminal state of one per-symbol task.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolOutcome {
    Completed {
        symbol: String,
        bars: usize,
    },
    Failed {
        symbol: String,
        kind: FailureKind,
        message: String,
    },
}

/// Counts of terminal outcomes within one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchTally {
    pub completed: usize,
    pub failed: usize,
    pub bars: usize,
}

impl BatchTally {
    pub fn record(&mut self, outcome: &SymbolOutcome) {
        match outcome {
            SymbolOutcome::Completed { bars, .. } => {
                self.completed += 1;
                self.bars += bars;
            }
            SymbolOutcome::Failed { .. } => self.failed += 1,
        }
    }
}

/// What one run did, counted from its own task outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchRunSummary {
    pub total: usize,
    pub batches: usize,
    pub completed: usize,
    pub failed: usize,
    pub bars: usize,
}

impl FetchRunSummary {
    pub fn add_batch(&mut self, tally: BatchTally) {
        self.batches += 1;
        self.completed += tally.completed;
        self.failed += tally.failed;
        self.bars += tally.bars;
    }
}

/// Split `symbols` into consecutive slices of `batch_size`, preserving order.
///
/// The last batch may be shorter. A `batch_size` of zero is treated as one.
pub fn partition_batches(symbols: &[String], batch_size: usize) -> Vec<&[String]> {
    symbols.chunks(batch_size.max(1)).collect()
}

/// Convert a provider series into bars for `symbol`, dropping days outside `range`.
pub(crate) fn bars_from_quotes(
    symbol: &str,
    quotes: &[stockfetch_market_data::Quote],
    range: &DateRange,
) -> Result<Vec<PriceBar>> {
    let mut bars = Vec::with_capacity(quotes.len());
    for quote in quotes {
        let bar = PriceBar::from_quote(symbol, quote)?;
        if range.contains(bar.date) {
            bars.push(bar);
        }
    }
    Ok(bars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use stockfetch_market_data::Quote;

    fn symbols(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("S{:04}", i)).collect()
    }

    #[test]
    fn test_partition_batches_exact_and_remainder() {
        let universe = symbols(250);
        let batches = partition_batches(&universe, 100);
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].len(), 100);
        assert_eq!(batches[1].len(), 100);
        assert_eq!(batches[2].len(), 50);
        assert_eq!(batches[1][0], "S0100");
        assert_eq!(batches[2][49], "S0249");
    }

    #[test]
    fn test_partition_batches_empty() {
        let universe: Vec<String> = Vec::new();
        assert!(partition_batches(&universe, 100).is_empty());
    }

    #[test]
    fn test_partition_batches_zero_size() {
        let universe = symbols(3);
        assert_eq!(partition_batches(&universe, 0).len(), 3);
    }

    #[test]
    fn test_date_range_rejects_reversed_dates() {
        let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(DateRange::new(start, end).is_err());
    }

    #[test]
    fn test_date_range_bounds() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )
        .unwrap();
        assert_eq!(
            range.start_utc(),
            Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()
        );
        assert_eq!(
            range.end_utc_exclusive(),
            Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()
        );
        assert!(range.contains(Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap()));
        assert!(!range.contains(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_bars_from_quotes_drops_out_of_range_days() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
        )
        .unwrap();
        let at = |day: u32| Utc.with_ymd_and_hms(2024, 1, day, 14, 30, 0).unwrap();
        let quotes = vec![
            Quote::ohlcv(at(2), 1.0, 2.0, 0.5, 1.5, 10, "T"),
            Quote::ohlcv(at(3), 1.5, 2.5, 1.0, 2.0, 20, "T"),
            Quote::ohlcv(at(4), 2.0, 3.0, 1.5, 2.5, 30, "T"),
        ];

        let bars = bars_from_quotes("AAA", &quotes, &range).unwrap();

        assert_eq!(bars.len(), 2);
        assert!(bars.iter().all(|b| b.symbol == "AAA"));
        assert_eq!(bars[1].volume, 20);
    }

    #[test]
    fn test_batch_tally_and_summary() {
        let mut tally = BatchTally::default();
        tally.record(&SymbolOutcome::Completed {
            symbol: "AAA".into(),
            bars: 5,
        });
        tally.record(&SymbolOutcome::Failed {
            symbol: "ZZZ".into(),
            kind: FailureKind::Network,
            message: "timeout".into(),
        });

        let mut summary = FetchRunSummary {
            total: 2,
            ..Default::default()
        };
        summary.add_batch(tally);

        assert_eq!(summary.batches, 1);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.bars, 5);
    }
}
