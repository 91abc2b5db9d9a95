use std::cmp::Ordering;
use std::fmt::Debug;

use crate::chromosome::sequence::{self, ensure_same_size, SequenceMutation};
use crate::chromosome::Chromosome;
use crate::error::Result;
use crate::rng::RandomNumberGenerator;

/// Positional crossover operators for unconstrained sequences.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TupleCrossover {
    #[default]
    OnePoint,
    Uniform,
}

/// A fixed-length sequence of arbitrary alleles.
///
/// The only invariant is that every operator preserves `size`. Children
/// inherit the operator choices of the chromosome that produced them.
///
/// # Examples
///
/// ```
/// use genetics::chromosome::{Chromosome, SequenceMutation, TupleChromosome};
/// use genetics::rng::RandomNumberGenerator;
///
/// let mut rng = RandomNumberGenerator::from_seed(3);
/// let tuple = TupleChromosome::new(vec!['a', 'b', 'c', 'd'])
///     .with_mutation(SequenceMutation::Invert);
///
/// let mutated = tuple.mutate(&mut rng);
/// assert_eq!(mutated.size(), 4);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct TupleChromosome<A> {
    alleles: Vec<A>,
    mutation: SequenceMutation,
    crossover: TupleCrossover,
}

impl<A> TupleChromosome<A> {
    pub fn new(alleles: Vec<A>) -> Self {
        Self {
            alleles,
            mutation: SequenceMutation::default(),
            crossover: TupleCrossover::default(),
        }
    }

    pub fn with_mutation(mut self, mutation: SequenceMutation) -> Self {
        self.mutation = mutation;
        self
    }

    pub fn with_crossover(mut self, crossover: TupleCrossover) -> Self {
        self.crossover = crossover;
        self
    }

    pub fn alleles(&self) -> &[A] {
        &self.alleles
    }

    pub fn into_alleles(self) -> Vec<A> {
        self.alleles
    }

    fn derive(&self, alleles: Vec<A>) -> Self {
        Self {
            alleles,
            mutation: self.mutation,
            crossover: self.crossover,
        }
    }
}

impl<A: Clone> TupleChromosome<A> {
    pub fn mutate_swap(&self, rng: &mut RandomNumberGenerator) -> Self {
        self.derive(sequence::swap(&self.alleles, rng))
    }

    pub fn mutate_insert(&self, rng: &mut RandomNumberGenerator) -> Self {
        self.derive(sequence::insert(&self.alleles, rng))
    }

    pub fn mutate_scramble(&self, rng: &mut RandomNumberGenerator) -> Self {
        self.derive(sequence::scramble(&self.alleles, rng))
    }

    pub fn mutate_invert(&self, rng: &mut RandomNumberGenerator) -> Self {
        self.derive(sequence::invert(&self.alleles, rng))
    }

    /// One-point crossover: the children exchange tails after a random cut.
    ///
    /// # Errors
    ///
    /// Returns `SizeMismatch` if the parents differ in size.
    pub fn crossover_one_point(
        &self,
        other: &Self,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(Self, Self)> {
        self.recombine(other, |left, right| sequence::one_point(left, right, rng))
    }

    /// Uniform crossover: each position is exchanged on a coin flip.
    ///
    /// # Errors
    ///
    /// Returns `SizeMismatch` if the parents differ in size.
    pub fn crossover_uniform(
        &self,
        other: &Self,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(Self, Self)> {
        self.recombine(other, |left, right| sequence::uniform(left, right, rng))
    }

    fn recombine<F>(&self, other: &Self, operator: F) -> Result<(Self, Self)>
    where
        F: FnOnce(&[A], &[A]) -> (Vec<A>, Vec<A>),
    {
        ensure_same_size(self.alleles.len(), other.alleles.len())?;
        if self.alleles.len() <= 1 {
            return Ok((self.clone(), other.clone()));
        }
        let (child1, child2) = operator(&self.alleles, &other.alleles);
        Ok((self.derive(child1), self.derive(child2)))
    }
}

impl<A> Chromosome for TupleChromosome<A>
where
    A: Clone + Debug + Send + Sync + 'static,
{
    fn size(&self) -> usize {
        self.alleles.len()
    }

    fn mutate(&self, rng: &mut RandomNumberGenerator) -> Self {
        self.derive(self.mutation.apply(&self.alleles, rng))
    }

    fn crossover(&self, other: &Self, rng: &mut RandomNumberGenerator) -> Result<(Self, Self)> {
        match self.crossover {
            TupleCrossover::OnePoint => self.crossover_one_point(other, rng),
            TupleCrossover::Uniform => self.crossover_uniform(other, rng),
        }
    }
}

impl<A: PartialEq> PartialEq for TupleChromosome<A> {
    fn eq(&self, other: &Self) -> bool {
        self.alleles == other.alleles
    }
}

impl<A: Eq> Eq for TupleChromosome<A> {}

impl<A: PartialOrd> PartialOrd for TupleChromosome<A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.alleles.partial_cmp(&other.alleles)
    }
}

impl<A: Ord> Ord for TupleChromosome<A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.alleles.cmp(&other.alleles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeneticError;

    #[test]
    fn test_mutations_preserve_size() {
        let mut rng = RandomNumberGenerator::from_seed(10);
        let tuple = TupleChromosome::new(vec![1, 1, 2, 3, 5, 8]);
        for mutated in [
            tuple.mutate_swap(&mut rng),
            tuple.mutate_insert(&mut rng),
            tuple.mutate_scramble(&mut rng),
            tuple.mutate_invert(&mut rng),
            tuple.mutate(&mut rng),
        ] {
            assert_eq!(mutated.size(), 6);
        }
    }

    #[test]
    fn test_mutation_of_single_allele_is_identity() {
        let mut rng = RandomNumberGenerator::from_seed(10);
        let tuple = TupleChromosome::new(vec![42]);
        assert_eq!(tuple.mutate_swap(&mut rng), tuple);
        assert_eq!(tuple.mutate_insert(&mut rng), tuple);
        assert_eq!(tuple.mutate_scramble(&mut rng), tuple);
        assert_eq!(tuple.mutate_invert(&mut rng), tuple);
    }

    #[test]
    fn test_crossover_size_mismatch() {
        let mut rng = RandomNumberGenerator::from_seed(10);
        let left = TupleChromosome::new(vec![1, 2, 3]);
        let right = TupleChromosome::new(vec![1, 2]);
        assert_eq!(
            left.crossover_one_point(&right, &mut rng),
            Err(GeneticError::SizeMismatch { left: 3, right: 2 })
        );
        assert!(left.crossover_uniform(&right, &mut rng).is_err());
    }

    #[test]
    fn test_crossover_of_single_allele_copies_parents() {
        let mut rng = RandomNumberGenerator::from_seed(10);
        let left = TupleChromosome::new(vec![1]);
        let right = TupleChromosome::new(vec![2]);
        let (child1, child2) = left.crossover(&right, &mut rng).unwrap();
        assert_eq!(child1, left);
        assert_eq!(child2, right);
    }

    #[test]
    fn test_uniform_crossover_children_are_complementary() {
        let mut rng = RandomNumberGenerator::from_seed(12);
        let left = TupleChromosome::new(vec!['x'; 16]).with_crossover(TupleCrossover::Uniform);
        let right = TupleChromosome::new(vec!['o'; 16]);
        let (child1, child2) = left.crossover(&right, &mut rng).unwrap();
        for (a, b) in child1.alleles().iter().zip(child2.alleles()) {
            assert_ne!(a, b);
        }
    }

    #[test]
    fn test_children_inherit_operators() {
        let mut rng = RandomNumberGenerator::from_seed(12);
        let left = TupleChromosome::new(vec![1, 2, 3])
            .with_mutation(SequenceMutation::Invert)
            .with_crossover(TupleCrossover::Uniform);
        let right = TupleChromosome::new(vec![4, 5, 6]);
        let (child, _) = left.crossover(&right, &mut rng).unwrap();
        assert_eq!(child.mutation, SequenceMutation::Invert);
        assert_eq!(child.crossover, TupleCrossover::Uniform);
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let a = TupleChromosome::new(vec![1, 2, 3]);
        let b = TupleChromosome::new(vec![1, 3, 0]);
        assert!(a < b);
    }
}
