use std::sync::Arc;

use crate::error::{GeneticError, Result};
use crate::evolution::challenge::SharedChallenge;
use crate::organism::Organism;
use crate::phenotype::Phenotype;
use crate::selection::evaluator::FitnessEvaluator;
use crate::selection::sampling::{SamplingSelector, Scale};
use crate::stats::FitnessStatistics;

/// Sigma-scaled fitness weights.
///
/// Each organism weighs `max(0, f - (mean - pressure * stddev))`, normalized
/// by the total. Organisms more than `pressure` deviations below the mean
/// are never picked. A population without fitness variance scales to no
/// weights at all.
#[derive(Debug, Clone)]
pub struct SigmaScaling<P: Phenotype> {
    evaluator: FitnessEvaluator<P>,
    pressure: f64,
}

impl<P: Phenotype> SigmaScaling<P> {
    pub const DEFAULT_PRESSURE: f64 = 2.0;

    pub fn new(challenge: SharedChallenge<P>) -> Self {
        Self {
            evaluator: FitnessEvaluator::new(challenge),
            pressure: Self::DEFAULT_PRESSURE,
        }
    }

    pub fn pressure(&self) -> f64 {
        self.pressure
    }
}

impl<P: Phenotype> Scale<P> for SigmaScaling<P> {
    fn scale(&self, organisms: &[Arc<Organism<P>>]) -> Result<Vec<f64>> {
        let fitness = self.evaluator.evaluate(organisms)?;
        let stats = FitnessStatistics::from_fitness(&fitness);
        let floor = stats.mean() - self.pressure * stats.stddev();

        let scaled: Vec<f64> = fitness.iter().map(|f| (f - floor).max(0.0)).collect();
        let total: f64 = scaled.iter().sum();
        if total <= 0.0 {
            return Ok(Vec::new());
        }
        Ok(scaled.into_iter().map(|s| s / total).collect())
    }
}

/// Fitness proportional selection with sigma scaling and stochastic
/// universal sampling.
pub type FitnessProportionalSelector<P> = SamplingSelector<SigmaScaling<P>>;

impl<P: Phenotype> SamplingSelector<SigmaScaling<P>> {
    pub fn new(challenge: SharedChallenge<P>) -> Self {
        Self::from_scaler(SigmaScaling::new(challenge))
    }

    /// # Errors
    ///
    /// Returns `Configuration` for a negative or non-finite pressure.
    pub fn with_pressure(self, pressure: f64) -> Result<Self> {
        if !pressure.is_finite() || pressure < 0.0 {
            return Err(GeneticError::Configuration(format!(
                "Sigma scaling pressure must be a non-negative number, got {}",
                pressure
            )));
        }
        let mut scaler = self.into_scaler();
        scaler.pressure = pressure;
        Ok(Self::from_scaler(scaler))
    }

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

    #[test]
    fn test_no_variance_scales_to_nothing() {
        let kind = kind();
        let population = organisms(&kind, &[7; 10]);
        let scaling = SigmaScaling::new(challenge());
        assert!(scaling.scale(&population).unwrap().is_empty());

        let mut rng = RandomNumberGenerator::from_seed(3);
        let selector = FitnessProportionalSelector::new(challenge());
        assert_eq!(selector.select(2, &population, &mut rng).unwrap().len(), 2);
    }

    #[test]
    fn test_weights_are_normalized() {
        let kind = kind();
        let population = organisms(&kind, &[2, 4, 4, 4, 5, 5, 7, 9]);
        let weights = SigmaScaling::new(challenge()).scale(&population).unwrap();
        assert_eq!(weights.len(), population.len());
        assert!((weights.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        // mean 5, stddev 2: floor is 1, so 2 weighs 1 and 9 weighs 8
        assert!((weights[7] / weights[0] - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_pressure_cuts_off_the_weak() {
        let kind = kind();
        let population = organisms(&kind, &[0, 0, 0, 100]);
        let mut rng = RandomNumberGenerator::from_seed(3);
        let selector = FitnessProportionalSelector::new(challenge())
            .with_pressure(0.0)
            .unwrap();
        let selected = selector.select(6, &population, &mut rng).unwrap();
        assert_eq!(values(&selected), vec![100; 6]);
    }

    #[test]
    fn test_invalid_pressure() {
        assert!(FitnessProportionalSelector::new(challenge())
            .with_pressure(-1.0)
            .is_err());
        assert!(FitnessProportionalSelector::new(challenge())
            .with_pressure(f64::NAN)
            .is_err());
    }
}
