//! lsbot — trend-following signal notifier for the LS strategy family.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`]. One run fetches daily closes,
//! evaluates every strategy generation, and pushes a single report.

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
