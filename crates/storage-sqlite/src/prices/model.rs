//! Database models for price bars.

use chrono::{NaiveDate, NaiveTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use stockfetch_core::constants::DATE_FORMAT;
use stockfetch_core::errors::{Error, ValidationError};
use stockfetch_core::prices::PriceBar;

/// Database model for a stored price bar
#[derive(Queryable, Identifiable, Selectable, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[diesel(table_name = crate::schema::price_bars)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct PriceBarDB {
    pub id: i32,
    pub symbol: String,
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

/// Insert model; the row id is assigned by SQLite.
#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::price_bars)]
pub struct NewPriceBarDB {
    pub symbol: String,
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

impl TryFrom<PriceBarDB> for PriceBar {
    type Error = Error;

    fn try_from(db: PriceBarDB) -> Result<Self, Self::Error> {
        let day = NaiveDate::parse_from_str(&db.date, DATE_FORMAT).map_err(|e| {
            Error::Validation(ValidationError::InvalidInput(format!(
                "Invalid stored date '{}' for {}: {}",
                db.date, db.symbol, e
            )))
        })?;

        Ok(PriceBar {
            symbol: db.symbol,
            date: day.and_time(NaiveTime::MIN).and_utc(),
            open: db.open,
            high: db.high,
            low: db.low,
            close: db.close,
            volume: db.volume,
        })
    }
}

impl From<&PriceBar> for NewPriceBarDB {
    fn from(bar: &PriceBar) -> Self {
        Self {
            symbol: bar.symbol.clone(),
            date: bar.date.format(DATE_FORMAT).to_string(),
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
        }
    }
}
