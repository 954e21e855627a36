//! Error types for primality oracle operations.

use thiserror::Error;

/// Errors raised by the oracle or while loading its configuration.
///
/// The primality test itself is total; the only runtime fault is running
/// out of error budget in the randomized regime.
#[derive(Debug, Error)]
pub enum OracleError {
    /// The per-call allowance is no longer a usable positive probability.
    #[error(
        "error budget exhausted: {remaining:e} remaining across {opportunity_count} opportunities"
    )]
    BudgetExhausted {
        remaining: f64,
        opportunity_count: u64,
    },

    /// A configuration value is out of range.
    #[error("invalid oracle config: {0}")]
    InvalidConfig(String),

    #[error("failed to read file: {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid toml at {path}: {source}")]
    ParseToml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}
