use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use log::debug;
use std::sync::Arc;

use stockfetch_core::prices::{PriceBar, PriceStore};
use stockfetch_core::Result;

use super::model::{NewPriceBarDB, PriceBarDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::price_bars;

#[derive(Clone)]
pub struct PriceRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl PriceRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl PriceStore for PriceRepository {
    async fn upsert_bars(&self, bars: &[PriceBar]) -> Result<usize> {
        if bars.is_empty() {
            return Ok(0);
        }

        let rows: Vec<NewPriceBarDB> = bars.iter().map(NewPriceBarDB::from).collect();

        self.writer
            .exec(move |conn| {
                // Row by row in call order, so a repeated key keeps the last values.
                let mut written = 0;
                for row in &rows {
                    written += diesel::insert_into(price_bars::table)
                        .values(row)
                        .on_conflict((price_bars::symbol, price_bars::date))
                        .do_update()
                        .set((
                            price_bars::open.eq(row.open),
                            price_bars::high.eq(row.high),
                            price_bars::low.eq(row.low),
                            price_bars::close.eq(row.close),
                            price_bars::volume.eq(row.volume),
                        ))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                debug!("Upserted {} price bars", written);
                Ok(written)
            })
            .await
    }

    fn bars_for_symbol(&self, symbol: &str) -> Result<Vec<PriceBar>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = price_bars::table
            .filter(price_bars::symbol.eq(symbol))
            .order(price_bars::date.asc())
            .select(PriceBarDB::as_select())
            .load::<PriceBarDB>(&mut conn)
            .map_err(StorageError::from)?;

        rows.into_iter().map(PriceBar::try_from).collect()
    }

    fn count_bars(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;

        let count = price_bars::table
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(count)
    }
}
