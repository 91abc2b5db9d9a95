use tracing::debug;

use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// Parameters of the two float mutation operators.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatBounds {
    /// Mean of the Gaussian draw.
    pub mean: f64,
    /// Standard deviation of the Gaussian draw.
    pub deviation: f64,
    /// Lower bound of the bounded uniform draw (inclusive).
    pub lower: f64,
    /// Upper bound of the bounded uniform draw (exclusive).
    pub upper: f64,
}

impl FloatBounds {
    /// # Errors
    ///
    /// Returns `Configuration` if `lower > upper` or the deviation is negative
    /// or not finite.
    pub fn new(mean: f64, deviation: f64, lower: f64, upper: f64) -> Result<Self> {
        if lower > upper {
            return Err(GeneticError::Configuration(format!(
                "lower bound ({}) > upper bound ({})",
                lower, upper
            )));
        }
        if !(deviation >= 0.0 && deviation.is_finite()) {
            return Err(GeneticError::Configuration(format!(
                "deviation must be finite and not negative, got {}",
                deviation
            )));
        }
        Ok(Self {
            mean,
            deviation,
            lower,
            upper,
        })
    }
}

impl Default for FloatBounds {
    fn default() -> Self {
        Self {
            mean: 0.0,
            deviation: 1.0,
            lower: -1.0,
            upper: 1.0,
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FloatMutation {
    /// Gaussian around `mean` with `deviation`.
    #[default]
    Uniform,
    /// Uniform in `[lower, upper)`.
    NonUniform,
}

/// A single real-valued allele.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct FloatChromosome {
    allele: f64,
    bounds: FloatBounds,
    mutation: FloatMutation,
}

impl FloatChromosome {
    pub fn new(allele: f64, bounds: FloatBounds) -> Self {
        Self {
            allele,
            bounds,
            mutation: FloatMutation::default(),
        }
    }

    /// A chromosome drawn uniformly within the bounds.
    pub fn random(bounds: FloatBounds, rng: &mut RandomNumberGenerator) -> Self {
        Self::new(rng.uniform(bounds.lower, bounds.upper), bounds)
    }

    pub fn with_mutation(mut self, mutation: FloatMutation) -> Self {
        self.mutation = mutation;
        self
    }

    pub fn allele(&self) -> f64 {
        self.allele
    }

    pub fn bounds(&self) -> &FloatBounds {
        &self.bounds
    }

    /// Replaces the allele with a Gaussian draw. Bounds with an invalid
    /// deviation leave the allele unchanged.
    pub fn mutate_uniform(&self, rng: &mut RandomNumberGenerator) -> Self {
        match rng.gaussian(self.bounds.mean, self.bounds.deviation) {
            Ok(allele) => Self { allele, ..self.clone() },
            Err(err) => {
                debug!(%err, "gaussian mutation skipped");
                self.clone()
            }
        }
    }

    pub fn mutate_nonuniform(&self, rng: &mut RandomNumberGenerator) -> Self {
        let allele = rng.uniform(self.bounds.lower, self.bounds.upper);
        Self { allele, ..self.clone() }
    }
}

impl Chromosome for FloatChromosome {
    fn size(&self) -> usize {
        1
    }

    fn mutate(&self, rng: &mut RandomNumberGenerator) -> Self {
        match self.mutation {
            FloatMutation::Uniform => self.mutate_uniform(rng),
            FloatMutation::NonUniform => self.mutate_nonuniform(rng),
        }
    }
}

impl PartialOrd for FloatChromosome {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.allele.partial_cmp(&other.allele)
    }
}
