//! Daily closing-price series and the per-run price table.

use crate::domain::error::LsbotError;
use chrono::NaiveDate;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Ordered daily closes for one instrument. Dates strictly increasing,
/// closes positive and finite; both are enforced at construction and the
/// series is never mutated afterwards.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    symbol: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(symbol: &str, points: Vec<PricePoint>) -> Result<Self, LsbotError> {
        for pair in points.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(LsbotError::BadData {
                    symbol: symbol.to_string(),
                    reason: format!(
                        "dates not strictly increasing: {} then {}",
                        pair[0].date, pair[1].date
                    ),
                });
            }
        }
        for point in &points {
            if !point.close.is_finite() || point.close <= 0.0 {
                return Err(LsbotError::BadData {
                    symbol: symbol.to_string(),
                    reason: format!("close {} on {} is not a positive price", point.close, point.date),
                });
            }
        }
        Ok(Self {
            symbol: symbol.to_string(),
            points,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.last()
    }
}

/// One run's worth of price data, keyed by symbol. An absent symbol means
/// the fetch failed for it; downstream treats that as "no signal available",
/// never as a zero price.
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    series: BTreeMap<String, PriceSeries>,
}

impl PriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, series: PriceSeries) {
        self.series.insert(series.symbol().to_string(), series);
    }

    pub fn get(&self, symbol: &str) -> Option<&PriceSeries> {
        self.series.get(symbol)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn latest_close(&self, symbol: &str) -> Option<f64> {
        self.get(symbol)?.latest().map(|p| p.close)
    }

    /// Latest date across every series — the run's as-of date.
    pub fn as_of(&self) -> Option<NaiveDate> {
        self.series
            .values()
            .filter_map(|s| s.latest())
            .map(|p| p.date)
            .max()
    }
}
