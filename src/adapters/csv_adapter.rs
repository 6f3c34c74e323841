//! Local CSV price directory adapter.
//!
//! Reads `<base>/<SYMBOL>.csv` in the daily-download layout
//! (`Date,Open,High,Low,Close,Volume`, or any layout with Date and Close
//! columns). Used for offline runs and tests; the HTTP adapter reuses the
//! row parser.

use crate::domain::error::LsbotError;
use crate::domain::price_series::{PricePoint, PriceSeries, PriceTable};
use crate::ports::data_port::{FetchOutcome, MarketDataPort};
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvDirAdapter {
    base_path: PathBuf,
}

impl CsvDirAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{symbol}.csv"))
    }
}

/// Parse daily closes out of a headered CSV body. Rows with an empty or
/// "N/D" close (non-trading days in some exports) are skipped.
pub(crate) fn parse_daily_closes(
    symbol: &str,
    content: &str,
) -> Result<Vec<PricePoint>, LsbotError> {
    let mut rdr = csv::Reader::from_reader(content.as_bytes());

    let headers = rdr
        .headers()
        .map_err(|e| LsbotError::BadData {
            symbol: symbol.to_string(),
            reason: format!("CSV header error: {e}"),
        })?
        .clone();

    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| LsbotError::BadData {
                symbol: symbol.to_string(),
                reason: format!("missing {name} column"),
            })
    };
    let date_idx = find("Date")?;
    let close_idx = find("Close")?;

    let mut points = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| LsbotError::BadData {
            symbol: symbol.to_string(),
            reason: format!("CSV parse error: {e}"),
        })?;

        let date_str = record.get(date_idx).unwrap_or_default();
        let close_str = record.get(close_idx).unwrap_or_default();
        if close_str.is_empty() || close_str == "N/D" {
            continue;
        }

        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
            LsbotError::BadData {
                symbol: symbol.to_string(),
                reason: format!("invalid date {date_str}: {e}"),
            }
        })?;
        let close: f64 = close_str.parse().map_err(|e| LsbotError::BadData {
            symbol: symbol.to_string(),
            reason: format!("invalid close {close_str}: {e}"),
        })?;

        points.push(PricePoint { date, close });
    }

    points.sort_by_key(|p| p.date);
    Ok(points)
}

impl MarketDataPort for CsvDirAdapter {
    fn fetch_daily_closes(
        &self,
        symbols: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchOutcome, LsbotError> {
        let mut table = PriceTable::new();
        let mut failed = Vec::new();

        for symbol in symbols {
            let path = self.csv_path(symbol);
            let content = match fs::read_to_string(&path) {
                Ok(c) => c,
                Err(_) => {
                    failed.push(symbol.clone());
                    continue;
                }
            };

            let mut points = match parse_daily_closes(symbol, &content) {
                Ok(p) => p,
                Err(_) => {
                    failed.push(symbol.clone());
                    continue;
                }
            };
            points.retain(|p| p.date >= start && p.date <= end);

            if points.is_empty() {
                failed.push(symbol.clone());
                continue;
            }

            match PriceSeries::new(symbol, points) {
                Ok(series) => table.insert(series),
                Err(_) => failed.push(symbol.clone()),
            }
        }

        if table.is_empty() {
            return Err(LsbotError::AllSymbolsFailed {
                symbols: failed.join(", "),
            });
        }
        if failed.is_empty() {
            Ok(FetchOutcome::Complete(table))
        } else {
            Ok(FetchOutcome::Partial { table, failed })
        }
    }
}
