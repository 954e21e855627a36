//! Integration tests: error-budget bookkeeping across many calls.

use num_bigint::BigUint;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::cell::Cell;
use truncprime_oracle::{
    Allowance, BudgetSnapshot, ErrorBudget, ErrorLedger, OracleConfig, OracleError,
    PrimalityOracle,
};

const M61: u64 = 2_305_843_009_213_693_951;

/// Wraps a real budget and records every open/settle it sees.
struct CountingLedger {
    inner: ErrorBudget,
    opened: Cell<usize>,
    settled: Vec<(f64, bool)>,
}

impl CountingLedger {
    fn new() -> Self {
        Self {
            inner: ErrorBudget::default(),
            opened: Cell::new(0),
            settled: Vec::new(),
        }
    }
}

impl ErrorLedger for CountingLedger {
    fn open(&self) -> Result<Allowance, OracleError> {
        self.opened.set(self.opened.get() + 1);
        self.inner.open()
    }

    fn settle(&mut self, allowance: Allowance, is_prime: bool) {
        self.settled.push((allowance.probability(), is_prime));
        self.inner.settle(allowance, is_prime);
    }

    fn snapshot(&self) -> BudgetSnapshot {
        self.inner.snapshot()
    }
}

/// A ledger whose budget is always gone.
struct ExhaustedLedger {
    settled: usize,
}

impl ErrorLedger for ExhaustedLedger {
    fn open(&self) -> Result<Allowance, OracleError> {
        Err(OracleError::BudgetExhausted {
            remaining: 0.0,
            opportunity_count: 100,
        })
    }

    fn settle(&mut self, _allowance: Allowance, _is_prime: bool) {
        self.settled += 1;
    }

    fn snapshot(&self) -> BudgetSnapshot {
        ErrorBudget::default().snapshot()
    }
}

fn counting_oracle() -> PrimalityOracle<CountingLedger, StdRng> {
    PrimalityOracle::from_parts(CountingLedger::new(), StdRng::seed_from_u64(11))
}

#[test]
fn one_report_per_randomized_call() {
    let mut oracle = counting_oracle();
    let m61 = BigUint::from(M61);
    let inputs = [
        m61.clone(),
        &m61 * &m61,
        BigUint::from(3_215_031_751u64),
        BigUint::from(4_294_967_311u64),
        BigUint::from(4_294_967_297u64),
    ];
    let mut verdicts = Vec::new();
    for n in &inputs {
        verdicts.push(oracle.is_prime(n.clone()).unwrap());
    }
    assert_eq!(verdicts, vec![true, false, false, true, false]);

    let ledger = oracle.ledger();
    assert_eq!(ledger.opened.get(), inputs.len());
    assert_eq!(ledger.settled.len(), inputs.len());
    let reported: Vec<bool> = ledger.settled.iter().map(|(_, p)| *p).collect();
    assert_eq!(reported, verdicts);
}

#[test]
fn deterministic_and_trivial_calls_never_consult_the_ledger() {
    let mut oracle = counting_oracle();
    for n in [0u64, 1, 2, 4, 9, 17, 2_047, 1_000_000_007, 3_215_031_749, 3_215_031_750] {
        oracle.is_prime(n).unwrap();
    }
    assert_eq!(oracle.ledger().opened.get(), 0);
    assert!(oracle.ledger().settled.is_empty());
}

#[test]
fn settled_allowance_is_the_one_used_for_sizing() {
    let mut oracle = counting_oracle();
    let verdict = oracle.check(M61).unwrap();
    let (settled, is_prime) = oracle.ledger().settled[0];
    assert!(is_prime);
    assert_eq!(verdict.allowance, Some(settled));
    assert_eq!(oracle.budget().cumulative_error_so_far, settled);
}

#[test]
fn exhausted_budget_fails_without_settling() {
    let mut oracle =
        PrimalityOracle::from_parts(ExhaustedLedger { settled: 0 }, StdRng::seed_from_u64(3));
    let err = oracle.is_prime(M61).unwrap_err();
    assert!(matches!(err, OracleError::BudgetExhausted { .. }));
    assert_eq!(oracle.ledger().settled, 0);

    // Below the limit nothing is charged, so nothing can be exhausted.
    assert!(oracle.is_prime(1_000_000_007u64).unwrap());
}

#[test]
fn allowances_shrink_and_stay_within_ceiling() {
    let config = OracleConfig::with_max_cumulative_error(1e-9);
    let mut oracle = PrimalityOracle::seeded(config, 99).unwrap();
    let mut previous = oracle.budget().next_allowance;
    for _ in 0..300 {
        let verdict = oracle.check(M61).unwrap();
        let allowance = verdict.allowance.unwrap();
        assert!(allowance <= previous);
        previous = allowance;

        let budget = oracle.budget();
        assert!(budget.cumulative_error_so_far <= budget.max_cumulative_error);
        assert!(budget.next_allowance <= allowance);
    }
    let budget = oracle.budget();
    assert_eq!(budget.error_opportunity_count, 300);
    assert!(budget.cumulative_error_so_far > 0.0);
}

#[test]
fn witness_count_grows_as_budget_is_spent() {
    let mut oracle = PrimalityOracle::seeded(OracleConfig::default(), 5).unwrap();
    let first = oracle.check(M61).unwrap().witnesses_planned;
    for _ in 0..500 {
        oracle.is_prime(M61).unwrap();
    }
    let later = oracle.check(M61).unwrap().witnesses_planned;
    assert_eq!(first, 24);
    assert!(later > first, "{later} <= {first}");
}

#[test]
fn independent_oracles_keep_independent_budgets() {
    let config = OracleConfig::default();
    let mut a = PrimalityOracle::seeded(config.clone(), 1).unwrap();
    let mut b = PrimalityOracle::seeded(config, 2).unwrap();

    for n in [M61, 4_294_967_311, 3_215_031_751, 17] {
        assert_eq!(a.is_prime(n).unwrap(), b.is_prime(n).unwrap());
    }
    assert_eq!(a.budget(), b.budget());

    a.is_prime(M61).unwrap();
    assert_eq!(a.budget().error_opportunity_count, 3);
    assert_eq!(b.budget().error_opportunity_count, 2);
    assert!(a.budget().cumulative_error_so_far > b.budget().cumulative_error_so_far);
}

#[test]
fn snapshot_serializes_field_names() {
    let oracle = PrimalityOracle::seeded(OracleConfig::default(), 1).unwrap();
    let json = serde_json::to_value(oracle.budget()).unwrap();
    assert_eq!(json["max_cumulative_error"], 1e-12);
    assert_eq!(json["cumulative_error_so_far"], 0.0);
    assert_eq!(json["error_opportunity_count"], 0);
    assert_eq!(json["opportunity_floor"], 100);
}
