//! Width-by-width enumeration of left-truncatable primes.
//!
//! A prime is left-truncatable when deleting leading digits one at a time
//! always leaves a prime. Starting from the one-digit primes, each round
//! prepends every nonzero digit to every survivor and keeps the candidates
//! the oracle accepts. The search ends at the first width with no survivors.

use crate::error::SearchError;
use num_bigint::BigUint;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use truncprime_oracle::{BudgetSnapshot, ErrorLedger, OracleError, PrimalityOracle};

/// Which candidates survive a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Keep every prime candidate.
    #[default]
    Plain,

    /// A leading 8 "truncates to 3": the candidate `8·p` survives only if
    /// `3·p` is prime as well.
    EightBecomesThree,
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::EightBecomesThree => write!(f, "eight-becomes-three"),
        }
    }
}

impl std::str::FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" => Ok(Self::Plain),
            "eight-becomes-three" | "eight_becomes_three" | "8to3" => Ok(Self::EightBecomesThree),
            _ => Err(format!("unknown search variant: {s}")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub variant: Variant,
    /// Stop after reporting this width even if survivors remain.
    pub max_width: Option<usize>,
}

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// A width produced no survivors.
    Exhausted,
    /// `max_width` was reached.
    MaxWidth,
}

/// All truncatable primes of one digit width, ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidthGroup {
    pub width: usize,
    #[serde(with = "crate::decimal")]
    pub primes: Vec<BigUint>,
}

impl WidthGroup {
    pub fn len(&self) -> usize {
        self.primes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primes.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchReport {
    pub variant: Variant,
    pub widths: Vec<WidthGroup>,
    pub total: usize,
    pub stopped: StopReason,
    /// Oracle budget after the run.
    pub budget: BudgetSnapshot,
}

impl SearchReport {
    pub fn largest(&self) -> Option<&BigUint> {
        self.widths.last().and_then(|group| group.primes.last())
    }
}

/// Run a search to completion.
pub fn search<L: ErrorLedger, R: Rng>(
    oracle: &mut PrimalityOracle<L, R>,
    options: &SearchOptions,
) -> Result<SearchReport, SearchError> {
    search_with(oracle, options, |_| {})
}

/// Run a search, calling `on_width` as each width is completed.
pub fn search_with<L: ErrorLedger, R: Rng, F: FnMut(&WidthGroup)>(
    oracle: &mut PrimalityOracle<L, R>,
    options: &SearchOptions,
    mut on_width: F,
) -> Result<SearchReport, SearchError> {
    let mut current = BTreeSet::new();
    for digit in 2u32..10 {
        if oracle.is_prime(digit).map_err(|source| at_width(1, source))? {
            current.insert(BigUint::from(digit));
        }
    }

    let mut widths = Vec::new();
    let mut width = 1usize;
    let stopped = loop {
        if current.is_empty() {
            break StopReason::Exhausted;
        }
        let group = WidthGroup {
            width,
            primes: current.iter().cloned().collect(),
        };
        tracing::info!(width, count = group.len(), variant = %options.variant, "width complete");
        on_width(&group);
        widths.push(group);

        if options.max_width.is_some_and(|max| width >= max) {
            break StopReason::MaxWidth;
        }

        current = extend(oracle, options.variant, &current, width)
            .map_err(|source| at_width(width + 1, source))?;
        width += 1;
    };

    let total = widths.iter().map(WidthGroup::len).sum();
    Ok(SearchReport {
        variant: options.variant,
        widths,
        total,
        stopped,
        budget: oracle.budget(),
    })
}

/// Prepend each digit 1..=9 to every `width`-digit survivor.
fn extend<L: ErrorLedger, R: Rng>(
    oracle: &mut PrimalityOracle<L, R>,
    variant: Variant,
    survivors: &BTreeSet<BigUint>,
    width: usize,
) -> Result<BTreeSet<BigUint>, OracleError> {
    let scale = BigUint::from(10u32).pow(width as u32);
    let mut next = BTreeSet::new();
    for suffix in survivors {
        for digit in 1u32..10 {
            let candidate = prepend(digit, &scale, suffix);
            let keep = oracle.is_prime(candidate.clone())?
                && (variant == Variant::Plain
                    || digit != 8
                    || oracle.is_prime(prepend(3, &scale, suffix))?);
            if keep {
                next.insert(candidate);
            }
        }
    }
    Ok(next)
}

fn prepend(digit: u32, scale: &BigUint, suffix: &BigUint) -> BigUint {
    scale * digit + suffix
}

fn at_width(width: usize, source: OracleError) -> SearchError {
    SearchError::Oracle { width, source }
}
