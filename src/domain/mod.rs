//! Core domain types and logic. Pure computation only — no I/O lives here.

pub mod price_series;
pub mod moving_average;
pub mod signal;
pub mod generation;
pub mod calendar;
pub mod report;
pub mod config;
pub mod error;
