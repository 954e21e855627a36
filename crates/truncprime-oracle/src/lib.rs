//! # Truncprime Oracle
//!
//! A Miller–Rabin primality oracle that bounds, over its whole lifetime,
//! the probability of ever answering "prime" for a composite.
//!
//! ## Architecture
//!
//! ```text
//! PrimalityOracle       ← is_prime(n): trivial cases, then one of two regimes
//!     │
//!     ├── deterministic ← n < 3,215,031,751: bases {2,3,5,7}, exact
//!     │
//!     └── randomized    ← n ≥ 3,215,031,751: k random bases
//!             │
//! ErrorLedger           ← open() an Allowance, size k from it, settle() once
//!     │
//! ErrorBudget           ← ceiling, spent-so-far, opportunity count
//! ```
//!
//! Primes are never reported composite. Composites escape the randomized
//! regime with probability at most the allowance charged for that call, and
//! the allowances charged never sum past the configured ceiling.

pub mod budget;
pub mod config;
pub mod error;
pub mod oracle;
pub mod witness;

pub use budget::{Allowance, BudgetSnapshot, ErrorBudget, ErrorLedger, witness_count};
pub use config::{DEFAULT_MAX_CUMULATIVE_ERROR, DEFAULT_OPPORTUNITY_FLOOR, OracleConfig};
pub use error::OracleError;
pub use oracle::{PrimalityOracle, Regime, SharedOracle, Verdict};
pub use witness::{DETERMINISTIC_BASES, DETERMINISTIC_LIMIT};
