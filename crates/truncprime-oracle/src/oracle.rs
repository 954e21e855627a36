//! The primality oracle.

use crate::budget::{BudgetSnapshot, ErrorBudget, ErrorLedger};
use crate::config::OracleConfig;
use crate::error::OracleError;
use crate::witness::{DETERMINISTIC_BASES, DETERMINISTIC_LIMIT, decompose, is_definitely_composite};
use num_bigint::{BigInt, BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::One;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};

/// How a verdict was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// Decided without witnesses: `n <= 2` or even.
    Trivial,
    /// Fixed bases below [`DETERMINISTIC_LIMIT`]; exact.
    Deterministic,
    /// Random bases sized from the error budget.
    Randomized,
}

impl std::fmt::Display for Regime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trivial => write!(f, "trivial"),
            Self::Deterministic => write!(f, "deterministic"),
            Self::Randomized => write!(f, "randomized"),
        }
    }
}

/// Outcome of one oracle call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub is_prime: bool,
    pub regime: Regime,
    /// Witness rounds actually run; stops at the first proof of compositeness.
    pub witnesses_run: u32,
    /// Witness rounds planned for this call.
    pub witnesses_planned: u32,
    /// Error this call was permitted to contribute (randomized regime only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowance: Option<f64>,
}

impl Verdict {
    fn trivial(is_prime: bool) -> Self {
        Self {
            is_prime,
            regime: Regime::Trivial,
            witnesses_run: 0,
            witnesses_planned: 0,
            allowance: None,
        }
    }
}

/// Miller–Rabin oracle with a lifetime bound on false "prime" answers.
///
/// Each instance owns its budget; independent oracles never share state.
pub struct PrimalityOracle<L = ErrorBudget, R = StdRng> {
    ledger: L,
    rng: R,
}

impl PrimalityOracle {
    /// Oracle with the given ceiling and an entropy-seeded RNG.
    pub fn new(max_cumulative_error: f64) -> Result<Self, OracleError> {
        Self::with_config(OracleConfig::with_max_cumulative_error(max_cumulative_error))
    }

    pub fn with_config(config: OracleConfig) -> Result<Self, OracleError> {
        let ledger = ErrorBudget::from_config(&config)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self::from_parts(ledger, rng))
    }

    /// Reproducible oracle: same seed and inputs give the same witnesses.
    pub fn seeded(config: OracleConfig, seed: u64) -> Result<Self, OracleError> {
        Self::with_config(OracleConfig {
            seed: Some(seed),
            ..config
        })
    }
}

impl Default for PrimalityOracle {
    fn default() -> Self {
        Self::from_parts(ErrorBudget::default(), StdRng::from_entropy())
    }
}

impl<L: ErrorLedger, R: Rng> PrimalityOracle<L, R> {
    pub fn from_parts(ledger: L, rng: R) -> Self {
        Self { ledger, rng }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn budget(&self) -> BudgetSnapshot {
        self.ledger.snapshot()
    }

    /// Is `n` prime?
    ///
    /// Never reports a prime as composite. Fails only when the randomized
    /// regime finds the error budget exhausted.
    pub fn is_prime(&mut self, n: impl Into<BigInt>) -> Result<bool, OracleError> {
        Ok(self.check(n)?.is_prime)
    }

    /// Like [`is_prime`](Self::is_prime), with details of how the answer was
    /// reached.
    pub fn check(&mut self, n: impl Into<BigInt>) -> Result<Verdict, OracleError> {
        let n: BigInt = n.into();
        let Some(n) = n.to_biguint() else {
            return Ok(Verdict::trivial(false));
        };
        if n == BigUint::from(2u32) {
            return Ok(Verdict::trivial(true));
        }
        if n <= BigUint::one() || n.is_even() {
            return Ok(Verdict::trivial(false));
        }

        let (d, r) = decompose(&n);
        if n < BigUint::from(DETERMINISTIC_LIMIT) {
            Ok(check_deterministic(&n, &d, r))
        } else {
            self.check_randomized(&n, &d, r)
        }
    }

    /// Allocate, test, and settle as one step: the allowance is opened
    /// before any witness runs and settled exactly once on the single exit.
    fn check_randomized(
        &mut self,
        n: &BigUint,
        d: &BigUint,
        r: u64,
    ) -> Result<Verdict, OracleError> {
        let allowance = self.ledger.open().inspect_err(|err| {
            tracing::warn!(%n, error = %err, "refusing randomized primality check");
        })?;
        let planned = allowance.witness_count();
        let probability = allowance.probability();

        let low = BigUint::one();
        let rng = &mut self.rng;
        let mut bases = (0..planned).map(|_| rng.gen_biguint_range(&low, n));
        let mut witnesses_run = 0;
        let is_prime = bases.all(|base| {
            witnesses_run += 1;
            !is_definitely_composite(&base, n, d, r)
        });

        self.ledger.settle(allowance, is_prime);
        tracing::debug!(
            %n,
            allowance = probability,
            witnesses_planned = planned,
            witnesses_run,
            is_prime,
            "randomized primality check"
        );

        Ok(Verdict {
            is_prime,
            regime: Regime::Randomized,
            witnesses_run,
            witnesses_planned: planned,
            allowance: Some(probability),
        })
    }
}

fn check_deterministic(n: &BigUint, d: &BigUint, r: u64) -> Verdict {
    let bases: Vec<BigUint> = DETERMINISTIC_BASES
        .iter()
        .map(|&base| BigUint::from(base))
        .filter(|base| base < n)
        .collect();
    let planned = bases.len() as u32;
    let mut witnesses_run = 0;
    let is_prime = bases.iter().all(|base| {
        witnesses_run += 1;
        !is_definitely_composite(base, n, d, r)
    });
    Verdict {
        is_prime,
        regime: Regime::Deterministic,
        witnesses_run,
        witnesses_planned: planned,
        allowance: None,
    }
}

/// An oracle that can be shared across threads.
///
/// Each call holds the lock from allocation through settlement, so calls
/// are linearized and the budget bound holds under contention.
pub struct SharedOracle<L = ErrorBudget, R = StdRng> {
    inner: Mutex<PrimalityOracle<L, R>>,
}

impl<L: ErrorLedger, R: Rng> SharedOracle<L, R> {
    pub fn new(oracle: PrimalityOracle<L, R>) -> Self {
        Self {
            inner: Mutex::new(oracle),
        }
    }

    pub fn is_prime(&self, n: impl Into<BigInt>) -> Result<bool, OracleError> {
        self.lock().is_prime(n)
    }

    pub fn check(&self, n: impl Into<BigInt>) -> Result<Verdict, OracleError> {
        self.lock().check(n)
    }

    pub fn budget(&self) -> BudgetSnapshot {
        self.lock().budget()
    }

    pub fn into_inner(self) -> PrimalityOracle<L, R> {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    // Ledger state is only written by `settle`, after the witnesses ran, so
    // a poisoned lock still holds a consistent budget.
    fn lock(&self) -> std::sync::MutexGuard<'_, PrimalityOracle<L, R>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
