//! Cumulative error-budget allocation.
//!
//! Every randomized call borrows an [`Allowance`] from the ledger, sizes its
//! witness count from it, and hands it back with the verdict. Only a "prime"
//! verdict spends the allowance; a detected composite carries no
//! false-positive risk.
//!
//! The allowance for a call is
//!
//! ```text
//! (max_cumulative_error - cumulative_error_so_far) / max(floor, error_opportunity_count)
//! ```
//!
//! so each success consumes at most `1 / floor` of what is left and the
//! running total never crosses the ceiling.

use crate::config::OracleConfig;
use crate::error::OracleError;
use serde::{Deserialize, Serialize};

/// Probability that one random base fails to expose a composite.
const SINGLE_WITNESS_ESCAPE: f64 = 0.25;

/// Upper bound on the probability that `k` independent random witnesses all
/// miss a composite: `4^-k`.
pub fn escape_bound(k: u32) -> f64 {
    SINGLE_WITNESS_ESCAPE.powi(k as i32)
}

/// Smallest `k` with `4^-k <= allowance`.
///
/// The logarithm gives the estimate; the exact power comparison settles
/// rounding at the boundary.
pub fn witness_count(allowance: f64) -> u32 {
    if allowance >= 1.0 {
        return 0;
    }
    let estimate = (-allowance.ln() / 4f64.ln()).ceil().max(0.0);
    let mut k = estimate as u32;
    while escape_bound(k) > allowance {
        k += 1;
    }
    while k > 0 && escape_bound(k - 1) <= allowance {
        k -= 1;
    }
    k
}

/// The error a single randomized call may contribute if it answers "prime".
///
/// Not `Clone`: settling consumes the ticket, so one allowance backs exactly
/// one verdict.
#[derive(Debug, PartialEq)]
pub struct Allowance {
    probability: f64,
    witnesses: u32,
}

impl Allowance {
    /// `None` unless `probability` is a positive normal float. Values above
    /// one are capped at one.
    pub fn from_probability(probability: f64) -> Option<Self> {
        if !probability.is_normal() || probability < 0.0 {
            return None;
        }
        let probability = probability.min(1.0);
        Some(Self {
            probability,
            witnesses: witness_count(probability),
        })
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Number of random witnesses needed to keep the escape probability
    /// within this allowance.
    pub fn witness_count(&self) -> u32 {
        self.witnesses
    }
}

/// Source of per-call allowances for the randomized regime.
pub trait ErrorLedger {
    /// Compute the allowance for the next call without mutating state.
    fn open(&self) -> Result<Allowance, OracleError>;

    /// Record the verdict reached under `allowance`.
    fn settle(&mut self, allowance: Allowance, is_prime: bool);

    /// Read-only view of the ledger.
    fn snapshot(&self) -> BudgetSnapshot;
}

/// The oracle's running error budget.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorBudget {
    max_cumulative_error: f64,
    cumulative_error_so_far: f64,
    error_opportunity_count: u64,
    opportunity_floor: u64,
}

impl ErrorBudget {
    pub fn new(max_cumulative_error: f64) -> Result<Self, OracleError> {
        Self::from_config(&OracleConfig::with_max_cumulative_error(max_cumulative_error))
    }

    pub fn from_config(config: &OracleConfig) -> Result<Self, OracleError> {
        config.validate()?;
        Ok(Self {
            max_cumulative_error: config.max_cumulative_error,
            cumulative_error_so_far: 0.0,
            error_opportunity_count: 0,
            opportunity_floor: config.opportunity_floor,
        })
    }

    pub fn max_cumulative_error(&self) -> f64 {
        self.max_cumulative_error
    }

    pub fn cumulative_error_so_far(&self) -> f64 {
        self.cumulative_error_so_far
    }

    pub fn error_opportunity_count(&self) -> u64 {
        self.error_opportunity_count
    }

    pub fn opportunity_floor(&self) -> u64 {
        self.opportunity_floor
    }

    /// Unspent budget, never negative.
    pub fn remaining(&self) -> f64 {
        (self.max_cumulative_error - self.cumulative_error_so_far).max(0.0)
    }

    /// Denominator of the next allowance.
    pub fn opportunity_count(&self) -> u64 {
        self.error_opportunity_count.max(self.opportunity_floor)
    }

    /// Raw allowance for the next randomized call; may be zero once the
    /// budget is spent.
    pub fn next_allowance(&self) -> f64 {
        self.remaining() / self.opportunity_count() as f64
    }
}

impl Default for ErrorBudget {
    fn default() -> Self {
        let config = OracleConfig::default();
        Self {
            max_cumulative_error: config.max_cumulative_error,
            cumulative_error_so_far: 0.0,
            error_opportunity_count: 0,
            opportunity_floor: config.opportunity_floor,
        }
    }
}

impl ErrorLedger for ErrorBudget {
    fn open(&self) -> Result<Allowance, OracleError> {
        Allowance::from_probability(self.next_allowance()).ok_or(OracleError::BudgetExhausted {
            remaining: self.remaining(),
            opportunity_count: self.opportunity_count(),
        })
    }

    fn settle(&mut self, allowance: Allowance, is_prime: bool) {
        if !is_prime {
            return;
        }
        // Clamp absorbs float rounding; the exact sum never exceeds the ceiling.
        self.cumulative_error_so_far =
            (self.cumulative_error_so_far + allowance.probability).min(self.max_cumulative_error);
        self.error_opportunity_count += 1;
        tracing::trace!(
            spent = allowance.probability,
            cumulative = self.cumulative_error_so_far,
            opportunities = self.error_opportunity_count,
            "error budget charged"
        );
    }

    fn snapshot(&self) -> BudgetSnapshot {
        BudgetSnapshot {
            max_cumulative_error: self.max_cumulative_error,
            cumulative_error_so_far: self.cumulative_error_so_far,
            error_opportunity_count: self.error_opportunity_count,
            opportunity_floor: self.opportunity_floor,
            next_allowance: self.next_allowance(),
        }
    }
}

/// Serializable view of a ledger's state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSnapshot {
    pub max_cumulative_error: f64,
    pub cumulative_error_so_far: f64,
    pub error_opportunity_count: u64,
    pub opportunity_floor: u64,
    pub next_allowance: f64,
}
