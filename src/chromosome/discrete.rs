use std::fmt::Debug;

use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// A single allele drawn from a finite set of accepted values.
///
/// # Examples
///
/// ```
/// use genetics::chromosome::{Chromosome, DiscreteChromosome};
/// use genetics::rng::RandomNumberGenerator;
///
/// let mut rng = RandomNumberGenerator::from_seed(1);
/// let colour = DiscreteChromosome::new("red", vec!["red", "green", "blue"])?;
/// let mutated = colour.mutate(&mut rng);
/// assert!(mutated.values().contains(mutated.allele()));
///
/// assert!(DiscreteChromosome::new("pink", vec!["red", "green"]).is_err());
/// # Ok::<(), genetics::error::GeneticError>(())
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct DiscreteChromosome<A> {
    allele: A,
    values: Vec<A>,
}

impl<A> DiscreteChromosome<A>
where
    A: Clone + PartialEq + Debug,
{
    /// # Errors
    ///
    /// Returns `InvariantViolation` if `allele` is not one of `values`.
    pub fn new(allele: A, values: Vec<A>) -> Result<Self> {
        if !values.contains(&allele) {
            return Err(GeneticError::InvariantViolation(format!(
                "{:?} is not an accepted allele value",
                allele
            )));
        }
        Ok(Self { allele, values })
    }

    /// Picks a random allele from `values`.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if `values` is empty.
    pub fn random(values: Vec<A>, rng: &mut RandomNumberGenerator) -> Result<Self> {
        let allele = rng.choose(&values).cloned().ok_or_else(|| {
            GeneticError::Configuration("discrete chromosome needs at least one value".to_string())
        })?;
        Ok(Self { allele, values })
    }

    pub fn allele(&self) -> &A {
        &self.allele
    }

    pub fn values(&self) -> &[A] {
        &self.values
    }

    /// Replaces the allele with a random accepted value.
    pub fn mutate_reset(&self, rng: &mut RandomNumberGenerator) -> Self {
        let allele = rng
            .choose(&self.values)
            .cloned()
            .unwrap_or_else(|| self.allele.clone());
        Self {
            allele,
            values: self.values.clone(),
        }
    }
}

impl<A> Chromosome for DiscreteChromosome<A>
where
    A: Clone + PartialEq + Debug + Send + Sync + 'static,
{
    fn size(&self) -> usize {
        1
    }

    fn mutate(&self, rng: &mut RandomNumberGenerator) -> Self {
        self.mutate_reset(rng)
    }
}

impl<A: PartialEq> PartialEq for DiscreteChromosome<A> {
    fn eq(&self, other: &Self) -> bool {
        self.allele == other.allele
    }
}

impl<A: PartialOrd> PartialOrd for DiscreteChromosome<A> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.allele.partial_cmp(&other.allele)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_stays_in_values() {
        let mut rng = RandomNumberGenerator::from_seed(2);
        let chromosome = DiscreteChromosome::new(3, vec![1, 2, 3, 4]).unwrap();
        for _ in 0..50 {
            let mutated = chromosome.mutate(&mut rng);
            assert!([1, 2, 3, 4].contains(mutated.allele()));
        }
    }

    #[test]
    fn test_random_requires_values() {
        let mut rng = RandomNumberGenerator::from_seed(2);
        assert!(DiscreteChromosome::<i32>::random(vec![], &mut rng).is_err());
        let chromosome = DiscreteChromosome::random(vec!['a', 'b'], &mut rng).unwrap();
        assert!(['a', 'b'].contains(chromosome.allele()));
    }

    #[test]
    fn test_has_no_crossover() {
        let mut rng = RandomNumberGenerator::from_seed(2);
        let a = DiscreteChromosome::new(1, vec![1, 2]).unwrap();
        let b = DiscreteChromosome::new(2, vec![1, 2]).unwrap();
        assert!(matches!(
            a.crossover(&b, &mut rng),
            Err(GeneticError::NotImplemented(_))
        ));
        assert!(a < b);
    }
}
