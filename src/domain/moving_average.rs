//! Trailing simple moving average.
//!
//! Output is the same length as the input with the first (window - 1)
//! points flagged invalid. A series shorter than the window yields no
//! valid point at all, which downstream reads as "no data".

use crate::domain::price_series::PriceSeries;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy)]
pub struct MaPoint {
    pub date: NaiveDate,
    pub valid: bool,
    pub value: f64,
}

#[derive(Debug, Clone)]
pub struct MaSeries {
    pub symbol: String,
    pub window: usize,
    pub points: Vec<MaPoint>,
}

impl MaSeries {
    /// The latest defined value, if the series ever warmed up.
    pub fn latest(&self) -> Option<f64> {
        self.points.last().filter(|p| p.valid).map(|p| p.value)
    }
}

pub fn trailing_mean(series: &PriceSeries, window: usize) -> MaSeries {
    let points = series.points();

    if window == 0 {
        return MaSeries {
            symbol: series.symbol().to_string(),
            window,
            points: Vec::new(),
        };
    }

    let mut out = Vec::with_capacity(points.len());
    let mut sum = 0.0;

    for (i, point) in points.iter().enumerate() {
        sum += point.close;
        if i >= window {
            sum -= points[i - window].close;
        }

        if i + 1 < window {
            out.push(MaPoint {
                date: point.date,
                valid: false,
                value: 0.0,
            });
        } else {
            out.push(MaPoint {
                date: point.date,
                valid: true,
                value: sum / window as f64,
            });
        }
    }

    MaSeries {
        symbol: series.symbol().to_string(),
        window,
        points: out,
    }
}
