use std::any::Any;
use std::fmt::Debug;

use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// A chromosome with its concrete type erased, as stored in a genotype.
///
/// Every [`Chromosome`] is a `Gene`. Crossover between two genes checks that
/// both hold the same concrete chromosome type.
pub trait Gene: Debug + Send + Sync {
    fn mutate_gene(&self, rng: &mut RandomNumberGenerator) -> Box<dyn Gene>;

    /// # Errors
    ///
    /// Returns `TypeMismatch` if `other` is a different chromosome type, and
    /// propagates the chromosome's own crossover errors.
    fn crossover_gene(
        &self,
        other: &dyn Gene,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(Box<dyn Gene>, Box<dyn Gene>)>;

    fn clone_gene(&self) -> Box<dyn Gene>;

    fn type_label(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;
}

impl<C: Chromosome> Gene for C {
    fn mutate_gene(&self, rng: &mut RandomNumberGenerator) -> Box<dyn Gene> {
        Box::new(self.mutate(rng))
    }

    fn crossover_gene(
        &self,
        other: &dyn Gene,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(Box<dyn Gene>, Box<dyn Gene>)> {
        let other = other
            .as_any()
            .downcast_ref::<C>()
            .ok_or_else(|| GeneticError::TypeMismatch {
                expected: self.type_label().to_string(),
                found: other.type_label().to_string(),
            })?;
        let (child1, child2) = self.crossover(other, rng)?;
        Ok((Box::new(child1), Box::new(child2)))
    }

    fn clone_gene(&self) -> Box<dyn Gene> {
        Box::new(self.clone())
    }

    fn type_label(&self) -> &'static str {
        std::any::type_name::<C>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Clone for Box<dyn Gene> {
    fn clone(&self) -> Self {
        self.clone_gene()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chromosome::{BitStringChromosome, IntegerBounds, IntegerChromosome};

    #[test]
    fn test_crossover_type_mismatch() {
        let mut rng = RandomNumberGenerator::from_seed(1);
        let bits: Box<dyn Gene> = Box::new(BitStringChromosome::new(vec![true, false]));
        let number: Box<dyn Gene> =
            Box::new(IntegerChromosome::new(3, IntegerBounds::default()));

        let err = bits.crossover_gene(number.as_ref(), &mut rng).unwrap_err();
        assert!(matches!(err, GeneticError::TypeMismatch { .. }));
    }

    #[test]
    fn test_crossover_same_type() {
        let mut rng = RandomNumberGenerator::from_seed(1);
        let left: Box<dyn Gene> = Box::new(BitStringChromosome::new(vec![true; 4]));
        let right: Box<dyn Gene> = Box::new(BitStringChromosome::new(vec![false; 4]));

        let (child1, child2) = left.crossover_gene(right.as_ref(), &mut rng).unwrap();
        let child1 = child1.as_any().downcast_ref::<BitStringChromosome>().unwrap();
        let child2 = child2.as_any().downcast_ref::<BitStringChromosome>().unwrap();
        assert_eq!(child1.count_ones() + child2.count_ones(), 4);
    }
}
