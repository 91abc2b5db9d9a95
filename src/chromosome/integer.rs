use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// Inclusive range of the creep added by [`IntegerChromosome::mutate_creep`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntegerBounds {
    pub lower: i64,
    pub upper: i64,
}

impl IntegerBounds {
    /// # Errors
    ///
    /// Returns `Configuration` if `lower > upper`.
    pub fn new(lower: i64, upper: i64) -> Result<Self> {
        if lower > upper {
            return Err(GeneticError::Configuration(format!(
                "lower bound ({}) > upper bound ({})",
                lower, upper
            )));
        }
        Ok(Self { lower, upper })
    }
}

impl Default for IntegerBounds {
    fn default() -> Self {
        Self { lower: -1, upper: 1 }
    }
}

/// A single integer allele that mutates by creeping.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntegerChromosome {
    allele: i64,
    bounds: IntegerBounds,
}

impl IntegerChromosome {
    pub fn new(allele: i64, bounds: IntegerBounds) -> Self {
        Self { allele, bounds }
    }

    pub fn allele(&self) -> i64 {
        self.allele
    }

    pub fn bounds(&self) -> &IntegerBounds {
        &self.bounds
    }

    /// Adds a uniform integer from `[lower, upper]` to the allele.
    pub fn mutate_creep(&self, rng: &mut RandomNumberGenerator) -> Self {
        let creep = rng.integer(self.bounds.lower, self.bounds.upper);
        Self {
            allele: self.allele.saturating_add(creep),
            bounds: self.bounds,
        }
    }
}

impl Chromosome for IntegerChromosome {
    fn size(&self) -> usize {
        1
    }

    fn mutate(&self, rng: &mut RandomNumberGenerator) -> Self {
        self.mutate_creep(rng)
    }
}
