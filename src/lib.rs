//! Stockchart: chart data preparation for stock price history.
//!
//! Hexagonal architecture: pure chart logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`], command-line dispatch in [`cli`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
