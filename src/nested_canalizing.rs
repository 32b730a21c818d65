//! Exact counting of activation-only nested canalizing functions.
//!
//! A nested canalizing function on `n` activating inputs is fully described by an ordered
//! sequence of layers: the inputs of the first layer canalize the output to their own
//! canalizing value, the next layer uses the opposite value, and so on. The ensemble used
//! for unknown logic is the (uniform) set of all such distinct functions.
//!
//! The counts grow super-exponentially, so all arithmetic is done with `BigInt` and results
//! are memoized. The same counter can be shared by every node of every network, because
//! it is a pure function of two small integers.

use fxhash::FxHashMap;
use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::sync::{Mutex, MutexGuard};

/// Counts above this many bits are rescaled before conversion to `f64`.
const MAX_FLOAT_BITS: u64 = 1000;

lazy_static! {
    static ref SHARED_COUNTER: NestedCanalizingCounter = NestedCanalizingCounter::new();
}

/// The process-wide counter instance.
pub fn shared_counter() -> &'static NestedCanalizingCounter {
    &SHARED_COUNTER
}

/// A memoizing counter of activation-only nested canalizing functions.
///
/// All methods take `&self`. The memo tables are guarded by a mutex which is never held
/// across a recursive call, so the counter can be used from multiple threads.
#[derive(Debug, Default)]
pub struct NestedCanalizingCounter {
    totals: Mutex<FxHashMap<usize, BigInt>>,
    counts: Mutex<FxHashMap<(usize, usize), BigInt>>,
    binomials: Mutex<FxHashMap<(usize, usize), BigInt>>,
}

impl NestedCanalizingCounter {
    pub fn new() -> NestedCanalizingCounter {
        NestedCanalizingCounter::default()
    }

    /// The number `T(n)` of distinct nested canalizing functions on `n` activating inputs.
    ///
    /// `T(0) = T(1) = 1` and `T(n) = sum_{i=1..n} (-1)^(i+1) * C(n, i) * 2 * T(n - i)`.
    pub fn total(&self, n: usize) -> BigInt {
        if n <= 1 {
            return BigInt::one();
        }
        if let Some(known) = lock(&self.totals).get(&n) {
            return known.clone();
        }

        let mut result = BigInt::zero();
        for i in 1..=n {
            let term = self.binomial(n, i) * 2 * self.total(n - i);
            if i % 2 == 1 {
                result += term;
            } else {
                result -= term;
            }
        }

        lock(&self.totals).insert(n, result.clone());
        result
    }

    /// The number of nested canalizing functions on `n` activating inputs that output `1`
    /// for a fixed input vector in which exactly `k` inputs are `1`.
    ///
    /// The recursion is an inclusion-exclusion over the size `j` of the outermost layer,
    /// distinguishing layers made only of active inputs, only of inactive inputs, and mixed
    /// layers (which canalize for exactly one of the two canalizing values).
    pub fn count_with_ones(&self, n: usize, k: usize) -> BigInt {
        assert!(k <= n, "Cannot have {} active inputs out of {}.", k, n);
        if k == 0 {
            return BigInt::zero();
        }
        if k == n {
            return self.total(n);
        }
        if let Some(known) = lock(&self.counts).get(&(n, k)) {
            return known.clone();
        }

        let mut result = BigInt::zero();
        for j in 1..=n {
            let active = if j <= k {
                self.binomial(k, j)
            } else {
                BigInt::zero()
            };
            let inactive = if j <= n - k {
                self.binomial(n - k, j)
            } else {
                BigInt::zero()
            };
            let rest = self.total(n - j);

            let mut step = BigInt::zero();
            if j <= k {
                step += &active * &rest;
                step += &active * self.count_with_ones(n - j, k - j);
            }
            if j <= n - k {
                step += &inactive * self.count_with_ones(n - j, k);
            }
            step += (self.binomial(n, j) - &active - &inactive) * &rest;

            if j % 2 == 1 {
                result += step;
            } else {
                result -= step;
            }
        }

        lock(&self.counts).insert((n, k), result.clone());
        result
    }

    /// Memoized binomial coefficient.
    fn binomial(&self, n: usize, k: usize) -> BigInt {
        if let Some(known) = lock(&self.binomials).get(&(n, k)) {
            return known.clone();
        }
        let result = binomial(n, k);
        lock(&self.binomials).insert((n, k), result.clone());
        result
    }

    /// The fraction of the ensemble on `n` inputs that outputs `1` when `k` inputs are `1`.
    pub fn probability_of_one(&self, n: usize, k: usize) -> f64 {
        ratio_to_f64(&self.count_with_ones(n, k), &self.total(n))
    }

    /// The same as `probability_of_one`, but reads `n` and `k` from a polarity-normalized
    /// input vector.
    pub fn probability_for_state(&self, state: &[bool]) -> f64 {
        let ones = state.iter().filter(|it| **it).count();
        self.probability_of_one(state.len(), ones)
    }
}

/// **(internal)** Lock a memo table. A poisoned table still holds valid (immutable) entries.
fn lock<T>(table: &Mutex<T>) -> MutexGuard<'_, T> {
    table.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// **(internal)** Binomial coefficient `C(n, k)` for `k <= n`.
fn binomial(n: usize, k: usize) -> BigInt {
    let k = k.min(n - k);
    let mut result = BigInt::one();
    for i in 0..k {
        result *= n - i;
        result /= i + 1;
    }
    result
}

/// **(internal)** Convert `numerator / denominator` to `f64` without overflowing to infinity.
fn ratio_to_f64(numerator: &BigInt, denominator: &BigInt) -> f64 {
    if denominator.is_zero() {
        return 0.0;
    }
    let shift = denominator.bits().saturating_sub(MAX_FLOAT_BITS);
    let numerator = numerator.abs() >> shift;
    let denominator = denominator.abs() >> shift;
    match (numerator.to_f64(), denominator.to_f64()) {
        (Some(n), Some(d)) if d > 0.0 => n / d,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use crate::nested_canalizing::{binomial, ratio_to_f64, shared_counter, NestedCanalizingCounter};
    use num_bigint::BigInt;
    use std::collections::HashSet;

    /// Truth tables (bit `s` = output on input state `s`) of all activation-only nested
    /// canalizing functions over the given input indices.
    fn brute_force_functions(inputs: &[usize]) -> HashSet<u16> {
        if inputs.len() == 1 {
            let x = inputs[0];
            return HashSet::from([identity_table(x)]);
        }
        let mut result = HashSet::new();
        for (position, x) in inputs.iter().enumerate() {
            let mut rest = inputs.to_vec();
            rest.remove(position);
            for inner in brute_force_functions(&rest) {
                for value in [false, true] {
                    let mut table = 0u16;
                    for state in 0..16usize {
                        let input = (state >> x) & 1 == 1;
                        let output = if input == value {
                            value
                        } else {
                            (inner >> state) & 1 == 1
                        };
                        if output {
                            table |= 1 << state;
                        }
                    }
                    result.insert(table);
                }
            }
        }
        result
    }

    fn identity_table(x: usize) -> u16 {
        let mut table = 0u16;
        for state in 0..16usize {
            if (state >> x) & 1 == 1 {
                table |= 1 << state;
            }
        }
        table
    }

    #[test]
    fn totals_match_known_values() {
        let counter = NestedCanalizingCounter::new();
        let expected = [1, 1, 2, 8, 46, 332, 2874, 29024];
        for (n, value) in expected.iter().enumerate() {
            assert_eq!(counter.total(n), BigInt::from(*value), "T({})", n);
        }
    }

    #[test]
    fn counts_match_brute_force() {
        let counter = NestedCanalizingCounter::new();
        for n in 1..=4usize {
            let inputs: Vec<usize> = (0..n).collect();
            let functions = brute_force_functions(&inputs);
            assert_eq!(counter.total(n), BigInt::from(functions.len()), "T({})", n);

            for k in 0..=n {
                // The first `k` inputs are active.
                let state = (1usize << k) - 1;
                let ones = functions
                    .iter()
                    .filter(|table| (**table >> state) & 1 == 1)
                    .count();
                assert_eq!(
                    counter.count_with_ones(n, k),
                    BigInt::from(ones),
                    "count({}, {})",
                    n,
                    k
                );
            }
        }
    }

    #[test]
    fn counts_are_symmetric() {
        let counter = NestedCanalizingCounter::new();
        for n in 1..=12usize {
            for k in 0..=n {
                let sum = counter.count_with_ones(n, k) + counter.count_with_ones(n, n - k);
                assert_eq!(sum, counter.total(n));
            }
        }
    }

    #[test]
    fn probabilities() {
        let counter = shared_counter();
        for n in 1..=20usize {
            assert_eq!(counter.probability_of_one(n, 0), 0.0);
            assert_eq!(counter.probability_of_one(n, n), 1.0);
            let mut previous = 0.0;
            for k in 0..=n {
                let p = counter.probability_of_one(n, k);
                assert!(p >= previous, "p({}, {}) decreased", n, k);
                assert!((0.0..=1.0).contains(&p));
                previous = p;
            }
        }
        assert_eq!(counter.probability_of_one(2, 1), 0.5);
        assert_eq!(counter.probability_for_state(&[true, false]), 0.5);
        assert_eq!(counter.probability_for_state(&[true]), 1.0);
        assert_eq!(counter.probability_for_state(&[false, false, false]), 0.0);
    }

    #[test]
    fn large_counts_stay_finite() {
        let counter = NestedCanalizingCounter::new();
        assert!(counter.total(200).bits() > 1000);
        let p = counter.probability_of_one(200, 100);
        assert!(p.is_finite());
        assert!(p > 0.0 && p < 1.0);
    }

    #[test]
    fn helpers() {
        assert_eq!(binomial(5, 2), BigInt::from(10));
        assert_eq!(binomial(5, 0), BigInt::from(1));
        assert_eq!(binomial(6, 6), BigInt::from(1));
        let big: BigInt = BigInt::from(1) << 3000usize;
        assert_eq!(ratio_to_f64(&(big.clone() >> 1), &big), 0.5);
    }
}
