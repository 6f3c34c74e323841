//! Market-data access port trait.

use crate::domain::error::LsbotError;
use crate::domain::price_series::PriceTable;
use chrono::NaiveDate;

/// What a fetch produced. Total failure (no symbol usable) is an `Err` from
/// the port; the core only ever consumes these two.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Complete(PriceTable),
    Partial {
        table: PriceTable,
        failed: Vec<String>,
    },
}

impl FetchOutcome {
    pub fn table(&self) -> &PriceTable {
        match self {
            FetchOutcome::Complete(table) => table,
            FetchOutcome::Partial { table, .. } => table,
        }
    }

    pub fn failed(&self) -> &[String] {
        match self {
            FetchOutcome::Complete(_) => &[],
            FetchOutcome::Partial { failed, .. } => failed,
        }
    }
}

pub trait MarketDataPort {
    /// Fetch daily closes for every symbol over `[start, end]`. Symbols that
    /// cannot be fetched are collected, not fatal, unless every one fails.
    fn fetch_daily_closes(
        &self,
        symbols: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchOutcome, LsbotError>;
}
