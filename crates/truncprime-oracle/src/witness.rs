//! Miller–Rabin witness rounds.

use num_bigint::BigUint;
use num_traits::One;

/// Below this bound the bases {2, 3, 5, 7} decide primality exactly.
///
/// 3,215,031,751 = 151 · 751 · 28351 is the smallest strong pseudoprime to
/// all four bases.
pub const DETERMINISTIC_LIMIT: u64 = 3_215_031_751;

/// Fixed bases for the deterministic regime.
pub const DETERMINISTIC_BASES: [u32; 4] = [2, 3, 5, 7];

/// Split an odd `n >= 3` as `n - 1 = 2^r · d` with `d` odd.
pub fn decompose(n: &BigUint) -> (BigUint, u64) {
    let n_minus_one = n - 1u32;
    let r = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> r;
    (d, r)
}

/// One compositeness round for `base`.
///
/// Returns `true` only when `base` proves `n` composite. A `false` is not
/// evidence of primality on its own.
pub fn is_definitely_composite(base: &BigUint, n: &BigUint, d: &BigUint, r: u64) -> bool {
    let n_minus_one = n - 1u32;
    let mut x = base.modpow(d, n);
    if x.is_one() {
        return false;
    }
    for _ in 0..r {
        if x == n_minus_one {
            return false;
        }
        x = &x * &x % n;
    }
    true
}
