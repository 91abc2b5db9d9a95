//! # Rank-based sampling
//!
//! Ranking selectors sort organisms by fitness, fittest first, and weigh
//! them by position alone. The weight vector only depends on the pressure
//! and the number of organisms, so it is computed once per population size.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::{GeneticError, Result};
use crate::evolution::challenge::SharedChallenge;
use crate::organism::Organism;
use crate::phenotype::Phenotype;
use crate::selection::evaluator::FitnessEvaluator;
use crate::selection::sampling::{SamplingSelector, Scale};

/// Weight of each rank for a given number of organisms.
pub trait RankWeights: Debug + Send + Sync {
    fn pressure(&self) -> f64;

    /// One weight per rank. Entry `k` belongs to rank `i = k + 1`, and rank 1
    /// is the fittest organism.
    fn weights(&self, size: usize) -> Vec<f64>;
}

/// `P(i) = (2 - pressure) / N + 2i(pressure - 1) / (N(N - 1))`.
///
/// A single organism weighs 1.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRanking {
    pressure: f64,
}

impl LinearRanking {
    pub const DEFAULT_PRESSURE: f64 = 1.5;

    /// # Errors
    ///
    /// Returns `Configuration` unless `pressure` is within `[1, 2]`.
    pub fn new(pressure: f64) -> Result<Self> {
        if !(1.0..=2.0).contains(&pressure) {
            return Err(GeneticError::Configuration(format!(
                "Linear ranking pressure must be within [1, 2], got {}",
                pressure
            )));
        }
        Ok(Self { pressure })
    }
}

impl Default for LinearRanking {
    fn default() -> Self {
        Self {
            pressure: Self::DEFAULT_PRESSURE,
        }
    }
}

impl RankWeights for LinearRanking {
    fn pressure(&self) -> f64 {
        self.pressure
    }

    fn weights(&self, size: usize) -> Vec<f64> {
        if size == 1 {
            return vec![1.0];
        }
        let n = size as f64;
        (1..=size)
            .map(|i| {
                let i = i as f64;
                (2.0 - self.pressure) / n + 2.0 * i * (self.pressure - 1.0) / (n * (n - 1.0))
            })
            .collect()
    }
}

/// `P(i) = (1 - e^-i) / pressure`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialRanking {
    pressure: f64,
}

impl ExponentialRanking {
    pub const DEFAULT_PRESSURE: f64 = 0.9;

    /// # Errors
    ///
    /// Returns `Configuration` unless `pressure` is a positive number.
    pub fn new(pressure: f64) -> Result<Self> {
        if !pressure.is_finite() || pressure <= 0.0 {
            return Err(GeneticError::Configuration(format!(
                "Exponential ranking pressure must be positive, got {}",
                pressure
            )));
        }
        Ok(Self { pressure })
    }
}

impl Default for ExponentialRanking {
    fn default() -> Self {
        Self {
            pressure: Self::DEFAULT_PRESSURE,
        }
    }
}

impl RankWeights for ExponentialRanking {
    fn pressure(&self) -> f64 {
        self.pressure
    }

    fn weights(&self, size: usize) -> Vec<f64> {
        (1..=size)
            .map(|i| (1.0 - (-(i as f64)).exp()) / self.pressure)
            .collect()
    }
}

/// Sorts organisms by descending fitness and weighs them by rank.
#[derive(Debug)]
pub struct Ranking<P: Phenotype, W> {
    evaluator: FitnessEvaluator<P>,
    weights: W,
    cache: Mutex<HashMap<(u64, usize), Arc<[f64]>>>,
}

impl<P: Phenotype, W: RankWeights> Ranking<P, W> {
    pub fn new(challenge: SharedChallenge<P>, weights: W) -> Self {
        Self {
            evaluator: FitnessEvaluator::new(challenge),
            weights,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn rank_weights(&self) -> &W {
        &self.weights
    }

    /// Rank weights for `size` organisms, computed on first use.
    pub fn probabilities(&self, size: usize) -> Arc<[f64]> {
        let key = (self.weights.pressure().to_bits(), size);
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            cache
                .entry(key)
                .or_insert_with(|| self.weights.weights(size).into()),
        )
    }

    #[cfg(test)]
    fn cached_sizes(&self) -> usize {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl<P: Phenotype, W: RankWeights> Scale<P> for Ranking<P, W> {
    fn arrange(&self, organisms: &[Arc<Organism<P>>]) -> Result<Vec<Arc<Organism<P>>>> {
        Ok(self
            .evaluator
            .rank(organisms)?
            .into_iter()
            .map(|(organism, _)| organism)
            .collect())
    }

    fn scale(&self, organisms: &[Arc<Organism<P>>]) -> Result<Vec<f64>> {
        Ok(self.probabilities(organisms.len()).to_vec())
    }
}

/// Stochastic universal sampling over linearly weighted ranks.
pub type LinearRankingSelector<P> = SamplingSelector<Ranking<P, LinearRanking>>;

/// Stochastic universal sampling over exponentially weighted ranks.
pub type ExponentialRankingSelector<P> = SamplingSelector<Ranking<P, ExponentialRanking>>;

impl<P: Phenotype> SamplingSelector<Ranking<P, LinearRanking>> {
    pub fn new(challenge: SharedChallenge<P>) -> Self {
        Self::from_scaler(Ranking::new(challenge, LinearRanking::default()))
    }

    /// # Errors
    ///
    /// Returns `Configuration` unless `pressure` is within `[1, 2]`.
    pub fn with_pressure(self, pressure: f64) -> Result<Self> {
        let Ranking { evaluator, .. } = self.into_scaler();
        Ok(Self::from_scaler(Ranking {
            evaluator,
            weights: LinearRanking::new(pressure)?,
            cache: Mutex::new(HashMap::new()),
        }))
    }
}

impl<P: Phenotype> SamplingSelector<Ranking<P, ExponentialRanking>> {
    pub fn new(challenge: SharedChallenge<P>) -> Self {
        Self::from_scaler(Ranking::new(challenge, ExponentialRanking::default()))
    }

    /// # Errors
    ///
    /// Returns `Configuration` unless `pressure` is positive.
    pub fn with_pressure(self, pressure: f64) -> Result<Self> {
        let Ranking { evaluator, .. } = self.into_scaler();
        Ok(Self::from_scaler(Ranking {
            evaluator,
            weights: ExponentialRanking::new(pressure)?,
            cache: Mutex::new(HashMap::new()),
        }))
    }
}

impl<P: Phenotype, W: RankWeights> SamplingSelector<Ranking<P, W>> {
    pub fn with_parallel_threshold(self, parallel_threshold: usize) -> Self {
        let mut scaler = self.into_scaler();
        scaler.evaluator = scaler.evaluator.with_parallel_threshold(parallel_threshold);
        Self::from_scaler(scaler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RandomNumberGenerator;
    use crate::selection::Selector;
    use crate::test_support::{challenge, kind, organisms, values};

    fn close(left: &[f64], right: &[f64]) -> bool {
        left.len() == right.len() && left.iter().zip(right).all(|(a, b)| (a - b).abs() < 1e-12)
    }

    #[test]
    fn test_linear_weights() {
        let weights = LinearRanking::default().weights(4);
        // 0.5 / 4 + i / 12
        let expected: Vec<f64> = (1..=4).map(|i| 0.125 + i as f64 / 12.0).collect();
        assert!(close(&weights, &expected));

        let uniform = LinearRanking::new(1.0).unwrap().weights(5);
        assert!(close(&uniform, &[0.2; 5]));

        assert_eq!(LinearRanking::default().weights(1), vec![1.0]);
        assert!(LinearRanking::default().weights(0).is_empty());
    }

    #[test]
    fn test_exponential_weights() {
        let weights = ExponentialRanking::default().weights(3);
        let expected: Vec<f64> = (1..=3)
            .map(|i| (1.0 - (-(i as f64)).exp()) / 0.9)
            .collect();
        assert!(close(&weights, &expected));
        assert!(weights.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_invalid_pressure() {
        assert!(LinearRanking::new(0.5).is_err());
        assert!(LinearRanking::new(2.5).is_err());
        assert!(ExponentialRanking::new(0.0).is_err());
        assert!(ExponentialRanking::new(f64::INFINITY).is_err());
        assert!(LinearRankingSelector::new(challenge())
            .with_pressure(3.0)
            .is_err());
    }

    #[test]
    fn test_arranges_fittest_first() {
        let kind = kind();
        let population = organisms(&kind, &[3, 8, 1, 5]);
        let ranking = Ranking::new(challenge(), LinearRanking::default());
        let arranged = ranking.arrange(&population).unwrap();
        assert_eq!(values(&arranged), vec![8, 5, 3, 1]);
    }

    #[test]
    fn test_probabilities_are_cached_per_size() {
        let kind = kind();
        let mut rng = RandomNumberGenerator::from_seed(6);
        let selector = ExponentialRankingSelector::new(challenge());
        let ten = organisms(&kind, &(0..10).collect::<Vec<_>>());
        let four = organisms(&kind, &[1, 2, 3, 4]);

        assert_eq!(selector.select(2, &ten, &mut rng).unwrap().len(), 2);
        assert_eq!(selector.select(7, &ten, &mut rng).unwrap().len(), 7);
        assert_eq!(selector.scaler().cached_sizes(), 1);
        assert_eq!(selector.select(3, &four, &mut rng).unwrap().len(), 3);
        assert_eq!(selector.scaler().cached_sizes(), 2);

        let first = selector.scaler().probabilities(10);
        let second = selector.scaler().probabilities(10);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_selects_with_replacement() {
        let kind = kind();
        let population = organisms(&kind, &[1, 2]);
        let mut rng = RandomNumberGenerator::from_seed(6);
        let selected = LinearRankingSelector::new(challenge())
            .select(5, &population, &mut rng)
            .unwrap();
        assert_eq!(selected.len(), 5);
    }
}
