//! # Fitness statistics
//!
//! Mean and standard deviation of a population's fitness, as used by sigma
//! scaling. The deviation is the population deviation (divides by `N`).

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessStatistics {
    mean: f64,
    stddev: f64,
}

impl FitnessStatistics {
    /// Statistics over already computed fitness values.
    ///
    /// The mean of no values is 0.0, and the deviation of fewer than two
    /// values is 0.0.
    pub fn from_fitness(values: &[f64]) -> Self {
        let count = values.len() as f64;
        let mean = if values.is_empty() {
            0.0
        } else {
            values.iter().sum::<f64>() / count
        };
        let stddev = if values.len() <= 1 {
            0.0
        } else {
            let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count;
            variance.sqrt()
        };
        Self { mean, stddev }
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn stddev(&self) -> f64 {
        self.stddev
    }
}
