//! Property tests for the prime engine.
//!
//! Run with: cargo test --test factorization

use factor_circles::{factors_text, PrimeSet};
use proptest::prelude::*;

fn is_prime_reference(n: u64) -> bool {
    n >= 2 && (2..).take_while(|d| d * d <= n).all(|d| n % d != 0)
}

proptest! {
    #[test]
    fn product_of_factors_is_n(n in 2u64..=4096) {
        let mut primes = PrimeSet::new();
        let factors = primes.factorize(n).unwrap();

        prop_assert_eq!(factors.iter().product::<u64>(), n);
        for &f in &factors {
            prop_assert!(is_prime_reference(f), "{} is not prime", f);
        }
    }

    #[test]
    fn factors_are_non_increasing(n in 2u64..=4096) {
        let mut primes = PrimeSet::new();
        let factors = primes.factorize(n).unwrap();
        prop_assert!(factors.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn single_factor_iff_prime(n in 2u64..=4096) {
        let mut primes = PrimeSet::new();
        let factors = primes.factorize(n).unwrap();
        prop_assert_eq!(factors == vec![n], primes.is_prime(n).unwrap());
        prop_assert_eq!(primes.is_prime(n).unwrap(), is_prime_reference(n));
    }

    #[test]
    fn cache_order_does_not_matter(a in 2u64..=2000, b in 2u64..=2000) {
        let mut shared = PrimeSet::new();
        let first = shared.factorize(a).unwrap();
        let second = shared.factorize(b).unwrap();

        prop_assert_eq!(first, PrimeSet::new().factorize(a).unwrap());
        prop_assert_eq!(second, PrimeSet::new().factorize(b).unwrap());
    }
}

#[test]
fn test_one_is_its_own_factor() {
    let mut primes = PrimeSet::new();
    let factors = primes.factorize(1).unwrap();
    assert_eq!(factors, vec![1]);
    assert_eq!(factors_text(&factors), "Prime");
}

#[test]
fn test_zero_is_rejected() {
    let mut primes = PrimeSet::new();
    assert!(primes.factorize(0).is_err());
    assert!(primes.is_prime(0).is_err());
}
