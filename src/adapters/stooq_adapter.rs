//! Stooq daily-close HTTP adapter.
//!
//! Fetches daily OHLCV CSV from Stooq's download endpoint (keyless, one
//! request per symbol) with retry and exponential backoff. A short pause
//! between symbols keeps the bot a polite client.

use crate::adapters::csv_adapter::parse_daily_closes;
use crate::domain::error::LsbotError;
use crate::domain::price_series::{PriceSeries, PriceTable};
use crate::ports::data_port::{FetchOutcome, MarketDataPort};
use chrono::NaiveDate;
use std::time::Duration;

pub struct StooqAdapter {
    client: reqwest::blocking::Client,
    max_retries: u32,
    base_delay: Duration,
}

impl StooqAdapter {
    pub fn new(max_retries: u32, base_delay: Duration) -> Result<Self, LsbotError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("lsbot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LsbotError::Http {
                symbol: String::new(),
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            max_retries,
            base_delay,
        })
    }

    /// Stooq wants lowercase symbols with a market suffix; the four ETFs all
    /// trade on US exchanges.
    fn download_url(symbol: &str, start: NaiveDate, end: NaiveDate) -> String {
        format!(
            "https://stooq.com/q/d/l/?s={sym}.us&d1={d1}&d2={d2}&i=d",
            sym = symbol.to_lowercase(),
            d1 = start.format("%Y%m%d"),
            d2 = end.format("%Y%m%d"),
        )
    }

    fn fetch_one(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, LsbotError> {
        let url = Self::download_url(symbol, start, end);
        let mut last_error = LsbotError::NoData {
            symbol: symbol.to_string(),
        };

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                std::thread::sleep(self.base_delay * 2u32.pow(attempt - 1));
            }

            let response = match self.client.get(&url).send() {
                Ok(r) => r,
                Err(e) => {
                    last_error = LsbotError::Http {
                        symbol: symbol.to_string(),
                        reason: e.to_string(),
                    };
                    continue;
                }
            };

            let status = response.status();
            if !status.is_success() {
                last_error = LsbotError::Http {
                    symbol: symbol.to_string(),
                    reason: format!("HTTP {status}"),
                };
                continue;
            }

            let body = match response.text() {
                Ok(b) => b,
                Err(e) => {
                    last_error = LsbotError::Http {
                        symbol: symbol.to_string(),
                        reason: format!("failed to read body: {e}"),
                    };
                    continue;
                }
            };

            // Stooq answers unknown symbols with 200 and a bare error line.
            if !body.starts_with("Date") {
                return Err(LsbotError::NoData {
                    symbol: symbol.to_string(),
                });
            }

            let points = parse_daily_closes(symbol, &body)?;
            if points.is_empty() {
                return Err(LsbotError::NoData {
                    symbol: symbol.to_string(),
                });
            }
            return PriceSeries::new(symbol, points);
        }

        Err(last_error)
    }
}

impl MarketDataPort for StooqAdapter {
    fn fetch_daily_closes(
        &self,
        symbols: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchOutcome, LsbotError> {
        let mut table = PriceTable::new();
        let mut failed = Vec::new();

        for (i, symbol) in symbols.iter().enumerate() {
            if i > 0 {
                std::thread::sleep(self.base_delay);
            }

            match self.fetch_one(symbol, start, end) {
                Ok(series) => table.insert(series),
                Err(e) => {
                    eprintln!("warning: {symbol} failed: {e}");
                    failed.push(symbol.clone());
                }
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
