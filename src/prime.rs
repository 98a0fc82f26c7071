//! Prime engine - incremental prime cache with factorization.
//!
//! The cache starts with the primes below 10 and grows on demand. For every
//! `n <= prime_max` the cache is complete: `n` is prime iff it is cached.
//!
//! # Factor order
//!
//! [`PrimeSet::factorize`] does not sort. It takes the largest prime divisor
//! not exceeding `n/2`, then recurses on the quotient, so `12` becomes
//! `[3, 2, 2]`. The first factor is the outer ring of the picture, so this
//! order decides the shape that gets drawn.

use crate::error::{FactorError, FactorResult};

/// Growing cache of known primes.
#[derive(Debug, Clone)]
pub struct PrimeSet {
    /// Sorted ascending.
    primes: Vec<u64>,
    /// Every integer up to here has been classified.
    prime_max: u64,
}

impl Default for PrimeSet {
    fn default() -> Self {
        Self::new()
    }
}

impl PrimeSet {
    pub fn new() -> Self {
        Self {
            primes: vec![2, 3, 5, 7],
            prime_max: 10,
        }
    }

    /// High-water mark below which the cache is complete.
    pub fn prime_max(&self) -> u64 {
        self.prime_max
    }

    /// Cached primes, ascending.
    pub fn primes(&self) -> &[u64] {
        &self.primes
    }

    /// Primality test backed by the cache.
    ///
    /// `1`, `2` and `3` are reported prime without touching the cache.
    pub fn is_prime(&mut self, n: u64) -> FactorResult<bool> {
        if n == 0 {
            return Err(FactorError::assertion("primality check of 0"));
        }

        if n <= 3 {
            return Ok(true);
        }

        self.extend_coverage(n);

        Ok(self.primes.binary_search(&n).is_ok())
    }

    /// Classify every integer up to `n`.
    pub fn extend_coverage(&mut self, n: u64) {
        if n <= self.prime_max {
            return;
        }

        for i in (self.prime_max + 1)..=n {
            if self.check_prime(i) {
                self.primes.push(i);
            }
        }

        self.prime_max = n;
    }

    /// Trial division of `n` by the cached primes up to `√n`.
    ///
    /// Stopping at the square root gives the same answer as dividing by every
    /// cached prime; only the cost differs.
    fn check_prime(&self, n: u64) -> bool {
        self.primes
            .iter()
            .take_while(|&&p| p.saturating_mul(p) <= n)
            .all(|&p| n % p != 0)
    }

    /// Factor `n` into primes, largest divisor first.
    ///
    /// `factorize(1) == [1]` and `factorize(p) == [p]` for a prime `p`.
    pub fn factorize(&mut self, n: u64) -> FactorResult<Vec<u64>> {
        let mut factors = Vec::new();
        let mut rest = n;

        // The recursion in "divisor, then factors of the quotient" is a tail
        // call, so walk it as a loop.
        loop {
            if self.is_prime(rest)? {
                factors.push(rest);
                return Ok(factors);
            }

            let mut found = None;
            let mut i = rest / 2;
            while i >= 2 {
                if self.is_prime(i)? && rest % i == 0 {
                    found = Some(i);
                    break;
                }
                i -= 1;
            }

            match found {
                Some(divisor) => {
                    factors.push(divisor);
                    rest /= divisor;
                }
                // Composite numbers always have a divisor in [2, n/2].
                None => {
                    return Err(FactorError::assertion(format!(
                        "no prime divisor found for composite {}",
                        rest
                    )));
                }
            }
        }
    }
}

/// Label text for a factor list: `"3x2x2"`, or `"Prime"` for a single factor.
pub fn factors_text(factors: &[u64]) -> String {
    if factors.len() > 1 {
        factors
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join("x")
    } else {
        "Prime".to_string()
    }
}

// =============================================================================
// Tests
// =============================================================================
