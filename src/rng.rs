//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct wraps the `rand` crate's `StdRng` and
//! exposes the handful of draws the evolutionary operators need: random
//! indices, index pairs, coin flips, shuffles, and uniform or Gaussian reals.
//!
//! ## Example
//!
//! ```rust
//! use genetics::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(42);
//! let (first, second) = rng.random_indices(10, false);
//! assert!(first < second && second < 10);
//! ```

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::error::{GeneticError, Result};

/// A wrapper around the `rand` crate's `StdRng`.
#[derive(Clone, Debug)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is useful for reproducible tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns a uniform real in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Returns `true` with the given probability.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.unit() < probability
    }

    /// Fair coin flip.
    pub fn coin(&mut self) -> bool {
        self.chance(0.5)
    }

    /// Returns a uniform index in `0..upper`. `upper` must be non-zero.
    pub fn index(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }

    /// Draws two random indices below `size` and returns them in ascending order.
    ///
    /// # Arguments
    ///
    /// * `size` - The exclusive upper bound for both indices.
    /// * `replacement` - When `false` the two indices are distinct, which needs
    ///   `size >= 2`. When `true` they may coincide.
    ///
    /// # Returns
    ///
    /// A sorted `(first, second)` pair, or `(0, 0)` when the request cannot be met.
    pub fn random_indices(&mut self, size: usize, replacement: bool) -> (usize, usize) {
        if size == 0 || (!replacement && size < 2) {
            return (0, 0);
        }

        let (a, b) = if replacement {
            (self.index(size), self.index(size))
        } else {
            let picked = rand::seq::index::sample(&mut self.rng, size, 2);
            (picked.index(0), picked.index(1))
        };

        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// Samples `amount` distinct indices below `length`, in random order.
    ///
    /// Callers must ensure `amount <= length`.
    pub fn sample_indices(&mut self, length: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.rng, length, amount).into_vec()
    }

    /// Shuffles a slice in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    /// Picks a random element, or `None` for an empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    /// Returns a uniform real in `[lower, upper)`, or `lower` when the range is empty.
    pub fn uniform(&mut self, lower: f64, upper: f64) -> f64 {
        if lower < upper {
            self.rng.gen_range(lower..upper)
        } else {
            lower
        }
    }

    /// Returns a uniform integer in `[lower, upper]`, or `lower` when the range is empty.
    pub fn integer(&mut self, lower: i64, upper: i64) -> i64 {
        if lower <= upper {
            self.rng.gen_range(lower..=upper)
        } else {
            lower
        }
    }

    /// Draws from the normal distribution with the given mean and standard
    /// deviation.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the deviation is negative or NaN.
    pub fn gaussian(&mut self, mean: f64, deviation: f64) -> Result<f64> {
        let normal = Normal::new(mean, deviation).map_err(|err| {
            GeneticError::Configuration(format!(
                "normal distribution with mean {} and deviation {}: {}",
                mean, deviation, err
            ))
        })?;
        Ok(normal.sample(&mut self.rng))
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_indices_distinct() {
        let mut rng = RandomNumberGenerator::from_seed(7);
        for _ in 0..200 {
            let (first, second) = rng.random_indices(5, false);
            assert!(first < second);
            assert!(second < 5);
        }
    }

    #[test]
    fn test_random_indices_with_replacement() {
        let mut rng = RandomNumberGenerator::from_seed(7);
        for _ in 0..200 {
            let (first, second) = rng.random_indices(3, true);
            assert!(first <= second);
            assert!(second < 3);
        }
    }

    #[test]
    fn test_random_indices_degenerate() {
        let mut rng = RandomNumberGenerator::from_seed(7);
        assert_eq!(rng.random_indices(0, true), (0, 0));
        assert_eq!(rng.random_indices(1, false), (0, 0));
        assert_eq!(rng.random_indices(1, true), (0, 0));
    }

    #[test]
    fn test_sample_indices_are_distinct() {
        let mut rng = RandomNumberGenerator::from_seed(11);
        let mut picked = rng.sample_indices(20, 20);
        picked.sort_unstable();
        assert_eq!(picked, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_uniform_and_integer_ranges() {
        let mut rng = RandomNumberGenerator::from_seed(3);
        for _ in 0..100 {
            let x = rng.uniform(-1.0, 1.0);
            assert!((-1.0..1.0).contains(&x));
            let n = rng.integer(-1, 1);
            assert!((-1..=1).contains(&n));
        }
        assert_eq!(rng.uniform(2.0, 2.0), 2.0);
        assert_eq!(rng.integer(5, 4), 5);
    }

    #[test]
    fn test_gaussian_is_centred() {
        let mut rng = RandomNumberGenerator::from_seed(99);
        let draws: Vec<f64> = (0..10_000)
            .map(|_| rng.gaussian(3.0, 0.5).unwrap())
            .collect();
        let mean = draws.iter().sum::<f64>() / draws.len() as f64;
        assert!((mean - 3.0).abs() < 0.05);
        assert!(draws.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn test_gaussian_rejects_bad_deviation() {
        let mut rng = RandomNumberGenerator::from_seed(99);
        assert!(matches!(
            rng.gaussian(0.0, -1.0),
            Err(GeneticError::Configuration(_))
        ));
        assert!(rng.gaussian(0.0, f64::NAN).is_err());
        assert_eq!(rng.gaussian(4.0, 0.0).unwrap(), 4.0);
    }

    #[test]
    fn test_clone() {
        let mut rng1 = RandomNumberGenerator::from_seed(42);
        let mut rng2 = rng1.clone();

        let nums1: Vec<f64> = (0..5).map(|_| rng1.unit()).collect();
        let nums2: Vec<f64> = (0..5).map(|_| rng2.unit()).collect();

        assert_eq!(nums1, nums2);
    }
}
