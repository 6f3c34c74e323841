//! Strategy-generation descriptors and their evaluation.
//!
//! Each generation of the LS family is a data-driven descriptor: the signals
//! it reads (instrument, window, comparison mode) and the rule combining them
//! into holdings. A new generation is a new [`GenerationSpec`], not new code.

use crate::domain::moving_average::trailing_mean;
use crate::domain::price_series::PriceTable;
use crate::domain::signal::{banded_signal, simple_signal, BandState};
use std::fmt;

/// Symbolic portfolio holding. A label for the implied allocation, never an
/// executable order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Holding {
    ThreeLus,
    Lqq3,
    ThreeTyl,
    Cash,
}

impl fmt::Display for Holding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Holding::ThreeLus => write!(f, "3LUS"),
            Holding::Lqq3 => write!(f, "LQQ3"),
            Holding::ThreeTyl => write!(f, "3TYL"),
            Holding::Cash => write!(f, "Cash"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SignalMode {
    /// Plain `price > ma`.
    Simple,
    /// Percentage band around the average; see [`banded_signal`].
    Banded { upper_pct: f64, lower_pct: f64 },
}

/// One signal a generation reads: which instrument, which trailing window,
/// and how the comparison is made. `label` is the report wording.
#[derive(Debug, Clone)]
pub struct SignalSpec {
    pub label: String,
    pub symbol: String,
    pub window: usize,
    pub mode: SignalMode,
}

/// How a generation's signal vector maps to holdings.
#[derive(Debug, Clone)]
pub enum HoldingRule {
    /// One holding per signal; the holdings of all true signals are held
    /// together, and an empty set collapses to Cash.
    PerSignal(Vec<Holding>),
    /// A single holding, taken only when every signal is on.
    AllOrCash(Holding),
    /// First pattern matching the signal vector wins; no match means Cash.
    FirstMatch(Vec<(Vec<bool>, Holding)>),
}

#[derive(Debug, Clone)]
pub struct GenerationSpec {
    pub title: String,
    pub signals: Vec<SignalSpec>,
    pub rule: HoldingRule,
    /// LS2.0 rebalances at quarter boundaries, so its block carries the
    /// countdown line.
    pub show_quarter_countdown: bool,
}

/// Informational readout with no positioning implication.
#[derive(Debug, Clone)]
pub struct BenchmarkSpec {
    pub title: String,
    pub label: String,
    pub symbol: String,
    pub window: usize,
}

/// How a single evaluated signal reads in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalState {
    Above,
    Below,
    Band(BandState),
}

#[derive(Debug, Clone)]
pub struct SignalReadout {
    pub label: String,
    pub state: SignalState,
}

#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub title: String,
    pub signals: Vec<SignalReadout>,
    pub holdings: Vec<Holding>,
    pub quarter_countdown: Option<i64>,
}

/// A generation either computes or is explicitly unavailable. It is never
/// silently defaulted to Cash and never dropped from the report.
#[derive(Debug, Clone)]
pub enum GenerationReadout {
    Computed(GenerationResult),
    Unavailable { title: String, reason: String },
}

#[derive(Debug, Clone)]
pub enum BenchmarkReadout {
    Computed {
        title: String,
        label: String,
        above: bool,
        ma: f64,
        latest_price: f64,
    },
    Unavailable { title: String, symbol: String },
}

const SPY_BAND_PCT: f64 = 0.0175;
const IEF_BAND_PCT: f64 = 0.02;

fn signal(label: &str, symbol: &str, window: usize, mode: SignalMode) -> SignalSpec {
    SignalSpec {
        label: label.to_string(),
        symbol: symbol.to_string(),
        window,
        mode,
    }
}

/// The shipped generations, in report order. LS3.0 appears twice on purpose:
/// the banded implementation view and the unbanded overview are independent
/// readouts over the same two instruments and are allowed to disagree — the
/// gap between them shows drift between the theoretical signal and the one
/// actually tradable through the bands.
pub fn generations() -> Vec<GenerationSpec> {
    vec![
        GenerationSpec {
            title: "LS3.0 Implementation".to_string(),
            signals: vec![
                signal(
                    "Signal 1 (SPY 200d MA ±1.75%)",
                    "SPY",
                    200,
                    SignalMode::Banded {
                        upper_pct: SPY_BAND_PCT,
                        lower_pct: SPY_BAND_PCT,
                    },
                ),
                signal(
                    "Signal 2 (IEF 50d MA ±2%)",
                    "IEF",
                    50,
                    SignalMode::Banded {
                        upper_pct: IEF_BAND_PCT,
                        lower_pct: IEF_BAND_PCT,
                    },
                ),
            ],
            rule: HoldingRule::AllOrCash(Holding::ThreeLus),
            show_quarter_countdown: false,
        },
        GenerationSpec {
            title: "LS3.0: The Last Dance".to_string(),
            signals: vec![
                signal("SPX 200d MA", "SPY", 200, SignalMode::Simple),
                signal("IEF 50d MA", "IEF", 50, SignalMode::Simple),
            ],
            rule: HoldingRule::FirstMatch(vec![
                (vec![true, true], Holding::ThreeLus),
                (vec![false, true], Holding::ThreeTyl),
            ]),
            show_quarter_countdown: false,
        },
        GenerationSpec {
            title: "LS2.0: The Challenger".to_string(),
            signals: vec![
                signal("SPX 200d MA", "SPY", 200, SignalMode::Simple),
                signal("NDX 220d MA", "QQQ", 220, SignalMode::Simple),
                signal("IEF 50d MA", "IEF", 50, SignalMode::Simple),
            ],
            rule: HoldingRule::PerSignal(vec![
                Holding::ThreeLus,
                Holding::Lqq3,
                Holding::ThreeTyl,
            ]),
            show_quarter_countdown: true,
        },
        GenerationSpec {
            title: "LS1.0: The OG".to_string(),
            // The original wording calls these "20w": 20 weeks of trading
            // days, i.e. a 100-day window.
            signals: vec![
                signal("SPX 20w MA", "SPY", 100, SignalMode::Simple),
                signal("NDX 20w MA", "QQQ", 100, SignalMode::Simple),
            ],
            rule: HoldingRule::PerSignal(vec![Holding::ThreeLus, Holding::Lqq3]),
            show_quarter_countdown: false,
        },
    ]
}

pub fn benchmark() -> BenchmarkSpec {
    BenchmarkSpec {
        title: "FTSE Global All Cap (VT)".to_string(),
        label: "VT 20d MA".to_string(),
        symbol: "VT".to_string(),
        window: 20,
    }
}

/// Latest price and latest defined average for one signal, or `None` when
/// the instrument is absent or its history too short.
fn latest_pair(table: &PriceTable, spec: &SignalSpec) -> Option<(f64, f64)> {
    let series = table.get(&spec.symbol)?;
    let price = series.latest()?.close;
    let ma = trailing_mean(series, spec.window).latest()?;
    Some((price, ma))
}

pub fn evaluate_generation(
    spec: &GenerationSpec,
    table: &PriceTable,
    quarter_countdown: i64,
) -> GenerationReadout {
    let mut readouts = Vec::with_capacity(spec.signals.len());
    let mut on_vector = Vec::with_capacity(spec.signals.len());

    for sig in &spec.signals {
        let Some((price, ma)) = latest_pair(table, sig) else {
            let reason = if table.get(&sig.symbol).is_none() {
                format!("no price data for {}", sig.symbol)
            } else {
                format!(
                    "insufficient history for {} ({}d average)",
                    sig.symbol, sig.window
                )
            };
            return GenerationReadout::Unavailable {
                title: spec.title.clone(),
                reason,
            };
        };

        let (state, on) = match sig.mode {
            SignalMode::Simple => {
                // latest_pair guaranteed the average, so the signal is defined.
                let above = simple_signal(price, Some(ma)) == Some(true);
                (if above { SignalState::Above } else { SignalState::Below }, above)
            }
            SignalMode::Banded { upper_pct, lower_pct } => {
                let band = banded_signal(price, ma, upper_pct, lower_pct);
                (SignalState::Band(band), band == BandState::On)
            }
        };

        readouts.push(SignalReadout {
            label: sig.label.clone(),
            state,
        });
        on_vector.push(on);
    }

    let holdings = apply_rule(&spec.rule, &on_vector);

    GenerationReadout::Computed(GenerationResult {
        title: spec.title.clone(),
        signals: readouts,
        holdings,
        quarter_countdown: spec.show_quarter_countdown.then_some(quarter_countdown),
    })
}

fn apply_rule(rule: &HoldingRule, on_vector: &[bool]) -> Vec<Holding> {
    match rule {
        HoldingRule::PerSignal(holdings) => {
            let held: Vec<Holding> = on_vector
                .iter()
                .copied()
                .zip(holdings.iter().copied())
                .filter(|&(on, _)| on)
                .map(|(_, h)| h)
                .collect();
            if held.is_empty() {
                vec![Holding::Cash]
            } else {
                held
            }
        }
        HoldingRule::AllOrCash(holding) => {
            if on_vector.iter().all(|&on| on) {
                vec![*holding]
            } else {
                vec![Holding::Cash]
            }
        }
        HoldingRule::FirstMatch(patterns) => patterns
            .iter()
            .find(|(pattern, _)| pattern == on_vector)
            .map(|(_, holding)| vec![*holding])
            .unwrap_or_else(|| vec![Holding::Cash]),
    }
}

pub fn evaluate_benchmark(spec: &BenchmarkSpec, table: &PriceTable) -> BenchmarkReadout {
    let available = table.get(&spec.symbol).and_then(|series| {
        let price = series.latest()?.close;
        let ma = trailing_mean(series, spec.window).latest();
        let above = simple_signal(price, ma)?;
        Some((price, ma?, above))
    });

    match available {
        Some((price, ma, above)) => BenchmarkReadout::Computed {
            title: spec.title.clone(),
            label: spec.label.clone(),
            above,
            ma,
            latest_price: price,
        },
        None => BenchmarkReadout::Unavailable {
            title: spec.title.clone(),
            symbol: spec.symbol.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price_series::{PricePoint, PriceSeries};
    use chrono::NaiveDate;

    /// A table whose every symbol has 250 flat closes, enough history for
    /// every shipped window.
    fn flat_table(closes: &[(&str, f64)]) -> PriceTable {
        let mut table = PriceTable::new();
        for &(symbol, close) in closes {
            table.insert(flat_series(symbol, close, 250));
        }
        table
    }

    fn flat_series(symbol: &str, close: f64, n: usize) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let points: Vec<PricePoint> = (0..n)
            .map(|i| PricePoint {
                date: start + chrono::Duration::days(i as i64),
                close,
            })
            .collect();
        PriceSeries::new(symbol, points).unwrap()
    }

    /// Flat history at `base` with the final close bumped to `last`, so the
    /// latest price sits above or below the near-flat average as needed.
    fn trending_series(symbol: &str, base: f64, last: f64, n: usize) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let points: Vec<PricePoint> = (0..n)
            .map(|i| PricePoint {
                date: start + chrono::Duration::days(i as i64),
                close: if i == n - 1 { last } else { base },
            })
            .collect();
        PriceSeries::new(symbol, points).unwrap()
    }

    fn gen_by_title(title: &str) -> GenerationSpec {
        generations()
            .into_iter()
            .find(|g| g.title == title)
            .unwrap()
    }

    fn holdings_of(readout: &GenerationReadout) -> Vec<Holding> {
        match readout {
            GenerationReadout::Computed(r) => r.holdings.clone(),
            GenerationReadout::Unavailable { title, reason } => {
                panic!("{title} unavailable: {reason}")
            }
        }
    }

    #[test]
    fn og_spy_on_qqq_off() {
        let mut table = PriceTable::new();
        table.insert(trending_series("SPY", 100.0, 120.0, 250));
        table.insert(trending_series("QQQ", 100.0, 80.0, 250));

        let readout = evaluate_generation(&gen_by_title("LS1.0: The OG"), &table, 0);
        assert_eq!(holdings_of(&readout), vec![Holding::ThreeLus]);
    }

    #[test]
    fn og_both_on() {
        let mut table = PriceTable::new();
        table.insert(trending_series("SPY", 100.0, 120.0, 250));
        table.insert(trending_series("QQQ", 100.0, 120.0, 250));

        let readout = evaluate_generation(&gen_by_title("LS1.0: The OG"), &table, 0);
        assert_eq!(holdings_of(&readout), vec![Holding::ThreeLus, Holding::Lqq3]);
    }

    #[test]
    fn og_price_equal_to_average_reads_below() {
        // Flat history: latest price sits exactly on its average. The
        // comparison is strictly greater-than, so both signals read Below
        // and the positioning collapses to Cash.
        let table = flat_table(&[("SPY", 100.0), ("QQQ", 100.0)]);

        let readout = evaluate_generation(&gen_by_title("LS1.0: The OG"), &table, 0);
        match &readout {
            GenerationReadout::Computed(r) => {
                assert!(r.signals.iter().all(|s| s.state == SignalState::Below));
            }
            _ => panic!("OG should compute"),
        }
        assert_eq!(holdings_of(&readout), vec![Holding::Cash]);
    }

    #[test]
    fn challenger_all_off_is_cash() {
        let mut table = PriceTable::new();
        table.insert(trending_series("SPY", 100.0, 80.0, 250));
        table.insert(trending_series("QQQ", 100.0, 80.0, 250));
        table.insert(trending_series("IEF", 100.0, 80.0, 250));

        let readout = evaluate_generation(&gen_by_title("LS2.0: The Challenger"), &table, 17);
        assert_eq!(holdings_of(&readout), vec![Holding::Cash]);

        match readout {
            GenerationReadout::Computed(r) => {
                assert_eq!(r.quarter_countdown, Some(17));
                assert!(r.signals.iter().all(|s| s.state == SignalState::Below));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn challenger_all_on_holds_everything() {
        let mut table = PriceTable::new();
        table.insert(trending_series("SPY", 100.0, 120.0, 250));
        table.insert(trending_series("QQQ", 100.0, 120.0, 250));
        table.insert(trending_series("IEF", 100.0, 120.0, 250));

        let readout = evaluate_generation(&gen_by_title("LS2.0: The Challenger"), &table, 0);
        assert_eq!(
            holdings_of(&readout),
            vec![Holding::ThreeLus, Holding::Lqq3, Holding::ThreeTyl]
        );
    }

    #[test]
    fn last_dance_only_ief_means_bonds() {
        let mut table = PriceTable::new();
        table.insert(trending_series("SPY", 100.0, 80.0, 250));
        table.insert(trending_series("IEF", 100.0, 120.0, 250));

        let readout = evaluate_generation(&gen_by_title("LS3.0: The Last Dance"), &table, 0);
        assert_eq!(holdings_of(&readout), vec![Holding::ThreeTyl]);
    }

    #[test]
    fn last_dance_only_spy_means_cash() {
        let mut table = PriceTable::new();
        table.insert(trending_series("SPY", 100.0, 120.0, 250));
        table.insert(trending_series("IEF", 100.0, 80.0, 250));

        let readout = evaluate_generation(&gen_by_title("LS3.0: The Last Dance"), &table, 0);
        assert_eq!(holdings_of(&readout), vec![Holding::Cash]);
    }

    #[test]
    fn implementation_both_on_holds_equity() {
        let table = flat_table(&[("SPY", 100.0), ("IEF", 100.0)]);

        // Flat series: price equals its average, interior of the band, On.
        let readout = evaluate_generation(&gen_by_title("LS3.0 Implementation"), &table, 0);
        assert_eq!(holdings_of(&readout), vec![Holding::ThreeLus]);
    }

    #[test]
    fn implementation_one_off_is_cash() {
        let mut table = PriceTable::new();
        table.insert(flat_series("SPY", 100.0, 250));
        table.insert(trending_series("IEF", 100.0, 90.0, 250));

        let readout = evaluate_generation(&gen_by_title("LS3.0 Implementation"), &table, 0);
        assert_eq!(holdings_of(&readout), vec![Holding::Cash]);

        match readout {
            GenerationReadout::Computed(r) => {
                assert_eq!(r.signals[0].state, SignalState::Band(BandState::On));
                assert_eq!(r.signals[1].state, SignalState::Band(BandState::Off));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn missing_mandatory_symbol_is_unavailable() {
        let mut table = PriceTable::new();
        table.insert(flat_series("SPY", 100.0, 250));
        table.insert(flat_series("QQQ", 100.0, 250));
        // IEF absent.

        for title in ["LS2.0: The Challenger", "LS3.0 Implementation", "LS3.0: The Last Dance"] {
            let readout = evaluate_generation(&gen_by_title(title), &table, 0);
            match readout {
                GenerationReadout::Unavailable { reason, .. } => {
                    assert!(reason.contains("IEF"), "{title}: {reason}");
                }
                _ => panic!("{title} should be unavailable without IEF"),
            }
        }

        // LS1.0 only needs SPY and QQQ and still computes.
        let og = evaluate_generation(&gen_by_title("LS1.0: The OG"), &table, 0);
        assert!(matches!(og, GenerationReadout::Computed(_)));
    }

    #[test]
    fn short_history_is_unavailable() {
        let mut table = PriceTable::new();
        table.insert(flat_series("SPY", 100.0, 150)); // < 200
        table.insert(flat_series("IEF", 100.0, 250));

        let readout = evaluate_generation(&gen_by_title("LS3.0 Implementation"), &table, 0);
        match readout {
            GenerationReadout::Unavailable { reason, .. } => {
                assert!(reason.contains("insufficient history"));
                assert!(reason.contains("SPY"));
            }
            _ => panic!("should be unavailable with 150 closes"),
        }
    }

    #[test]
    fn benchmark_reports_price_and_average() {
        let table = flat_table(&[("VT", 105.0)]);
        match evaluate_benchmark(&benchmark(), &table) {
            BenchmarkReadout::Computed {
                above,
                ma,
                latest_price,
                ..
            } => {
                assert!(!above);
                approx::assert_abs_diff_eq!(ma, 105.0, epsilon = 1e-9);
                approx::assert_abs_diff_eq!(latest_price, 105.0, epsilon = 1e-9);
            }
            _ => panic!("benchmark should compute"),
        }
    }

    #[test]
    fn benchmark_degrades_alone() {
        let table = flat_table(&[("SPY", 100.0)]);
        assert!(matches!(
            evaluate_benchmark(&benchmark(), &table),
            BenchmarkReadout::Unavailable { .. }
        ));
    }
}
