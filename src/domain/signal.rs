//! Signal evaluation: latest price against its reference moving average.

use std::fmt;

/// State of a banded signal. The band keeps an instrument "On" until price
/// drops clear of the lower threshold, which damps whipsaw near the average.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandState {
    On,
    Off,
}

impl fmt::Display for BandState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BandState::On => write!(f, "On"),
            BandState::Off => write!(f, "Off"),
        }
    }
}

/// Plain above/below comparison. `None` when the reference average is
/// undefined (missing instrument or insufficient history).
pub fn simple_signal(latest_price: f64, latest_ma: Option<f64>) -> Option<bool> {
    latest_ma.map(|ma| latest_price > ma)
}

/// Banded comparison, evaluated in precedence order:
/// above `ma * (1 + upper_pct)` is On, below `ma * (1 - lower_pct)` is Off,
/// and the interior of the band (both boundaries inclusive) stays On.
///
/// The caller guarantees the average is defined.
pub fn banded_signal(latest_price: f64, latest_ma: f64, upper_pct: f64, lower_pct: f64) -> BandState {
    if latest_price > latest_ma * (1.0 + upper_pct) {
        BandState::On
    } else if latest_price < latest_ma * (1.0 - lower_pct) {
        BandState::Off
    } else {
        BandState::On
    }
}
