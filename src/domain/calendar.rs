//! Calendar-quarter countdown.

use chrono::{Datelike, NaiveDate};

/// Days until the nearest calendar quarter-end (last day of March, June,
/// September or December) on or after `date`. A date that is itself a
/// quarter-end returns 0.
pub fn days_to_quarter_end(date: NaiveDate) -> i64 {
    let year = date.year();
    let quarter_ends = [(3, 31), (6, 30), (9, 30), (12, 31)]
        .map(|(m, d)| NaiveDate::from_ymd_opt(year, m, d).unwrap());

    let next = quarter_ends
        .into_iter()
        .find(|q| *q >= date)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year + 1, 3, 31).unwrap());

    (next - date).num_days()
}
