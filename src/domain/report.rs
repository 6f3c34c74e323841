//! Report rendering. Pure presentation: every computed value is produced
//! upstream and only formatted here.

use crate::domain::calendar::days_to_quarter_end;
use crate::domain::generation::{
    benchmark, evaluate_benchmark, evaluate_generation, generations, BenchmarkReadout,
    GenerationReadout, SignalState,
};
use crate::domain::price_series::PriceTable;
use crate::domain::signal::BandState;
use chrono::NaiveDate;
use std::fmt::Write;

/// Everything one run computes, ready for rendering.
#[derive(Debug, Clone)]
pub struct RunReadout {
    pub as_of: NaiveDate,
    pub generations: Vec<GenerationReadout>,
    pub benchmark: BenchmarkReadout,
}

/// Evaluate every shipped generation plus the benchmark against the table.
pub fn evaluate_all(table: &PriceTable, as_of: NaiveDate) -> RunReadout {
    let countdown = days_to_quarter_end(as_of);
    RunReadout {
        as_of,
        generations: generations()
            .iter()
            .map(|spec| evaluate_generation(spec, table, countdown))
            .collect(),
        benchmark: evaluate_benchmark(&benchmark(), table),
    }
}

const RULE: &str = "------------------------";
const BENCH_RULE: &str = "---------------------------";

fn signal_line(state: SignalState) -> String {
    match state {
        SignalState::Above => "above".to_string(),
        SignalState::Below => "below".to_string(),
        SignalState::Band(BandState::On) => "✅ On".to_string(),
        SignalState::Band(BandState::Off) => "❌ Off".to_string(),
    }
}

fn render_generation(out: &mut String, readout: &GenerationReadout) {
    match readout {
        GenerationReadout::Computed(result) => {
            let _ = writeln!(out, "📊 {}", result.title);
            let _ = writeln!(out, "{RULE}");
            for sig in &result.signals {
                let _ = writeln!(out, "{}: {}", sig.label, signal_line(sig.state));
            }
            let holdings: Vec<String> =
                result.holdings.iter().map(|h| h.to_string()).collect();
            let _ = writeln!(out, "Positioning: {}", holdings.join(", "));
            if let Some(days) = result.quarter_countdown {
                let _ = writeln!(out, "Days to quarter-end: {days}");
            }
        }
        GenerationReadout::Unavailable { title, reason } => {
            let _ = writeln!(out, "📊 {title}");
            let _ = writeln!(out, "{RULE}");
            let _ = writeln!(out, "unavailable: {reason}");
        }
    }
}

fn render_benchmark(out: &mut String, readout: &BenchmarkReadout) {
    match readout {
        BenchmarkReadout::Computed {
            title,
            label,
            above,
            ma,
            latest_price,
        } => {
            let _ = writeln!(out, "📊 {title}");
            let _ = writeln!(out, "{BENCH_RULE}");
            let side = if *above { "above" } else { "below" };
            let _ = writeln!(out, "{label}: {side} ({ma:.2})");
            let _ = writeln!(out, "Latest Price: {latest_price:.2}");
        }
        BenchmarkReadout::Unavailable { title, symbol } => {
            let _ = writeln!(out, "📊 {title}");
            let _ = writeln!(out, "{BENCH_RULE}");
            let _ = writeln!(out, "{symbol}: data unavailable");
        }
    }
}

/// Render the full notification body: one block per generation, then the
/// benchmark block, blank-line separated.
pub fn render(readout: &RunReadout) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Signals as of {}", readout.as_of);

    for generation in &readout.generations {
        out.push('\n');
        render_generation(&mut out, generation);
    }

    out.push('\n');
    render_benchmark(&mut out, &readout.benchmark);

    out
}
