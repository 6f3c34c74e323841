#![allow(dead_code)]

use chrono::NaiveDate;
use lsbot::domain::error::LsbotError;
use lsbot::domain::price_series::{PricePoint, PriceSeries, PriceTable};
use lsbot::ports::data_port::{FetchOutcome, MarketDataPort};
use lsbot::ports::notify_port::NotifyPort;
use std::cell::RefCell;
use std::collections::HashMap;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// `n` daily closes ending with `last`, flat at `base` before that.
pub fn trending_series(symbol: &str, base: f64, last: f64, n: usize) -> PriceSeries {
    let start = date(2023, 1, 1);
    let points: Vec<PricePoint> = (0..n)
        .map(|i| PricePoint {
            date: start + chrono::Duration::days(i as i64),
            close: if i == n - 1 { last } else { base },
        })
        .collect();
    PriceSeries::new(symbol, points).unwrap()
}

pub fn flat_series(symbol: &str, close: f64, n: usize) -> PriceSeries {
    trending_series(symbol, close, close, n)
}

/// Data port serving pre-built series, teacher-style mock. Symbols not
/// registered count as failed fetches.
pub struct MockDataPort {
    pub series: HashMap<String, PriceSeries>,
    pub total_failure: bool,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            series: HashMap::new(),
            total_failure: false,
        }
    }

    pub fn with_series(mut self, series: PriceSeries) -> Self {
        self.series.insert(series.symbol().to_string(), series);
        self
    }

    pub fn failing_entirely(mut self) -> Self {
        self.total_failure = true;
        self
    }
}

impl MarketDataPort for MockDataPort {
    fn fetch_daily_closes(
        &self,
        symbols: &[String],
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<FetchOutcome, LsbotError> {
        if self.total_failure {
            return Err(LsbotError::AllSymbolsFailed {
                symbols: symbols.join(", "),
            });
        }

        let mut table = PriceTable::new();
        let mut failed = Vec::new();
        for symbol in symbols {
            match self.series.get(symbol) {
                Some(series) => table.insert(series.clone()),
                None => failed.push(symbol.clone()),
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

/// Records every message instead of delivering it.
pub struct MockNotifier {
    pub sent: RefCell<Vec<String>>,
    pub fail: bool,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self {
            sent: RefCell::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            sent: RefCell::new(Vec::new()),
            fail: true,
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.sent.borrow().clone()
    }
}

impl NotifyPort for MockNotifier {
    fn send(&self, message: &str) -> Result<(), LsbotError> {
        self.sent.borrow_mut().push(message.to_string());
        if self.fail {
            return Err(LsbotError::Notify {
                reason: "mock delivery failure".into(),
            });
        }
        Ok(())
    }
}
