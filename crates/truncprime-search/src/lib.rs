//! # Truncprime Search
//!
//! Enumerates left-truncatable primes by growing them one leading digit at
//! a time, asking a [`PrimalityOracle`](truncprime_oracle::PrimalityOracle)
//! about every candidate. One oracle backs one run, so the whole run shares
//! a single error budget.

mod decimal;
pub mod error;
pub mod render;
pub mod search;

pub use error::SearchError;
pub use render::{render_report, render_width};
pub use search::{SearchOptions, SearchReport, StopReason, Variant, WidthGroup, search, search_with};
