use crate::chromosome::sequence::{self, ensure_same_size, SequenceMutation};
use crate::chromosome::tuple::TupleCrossover;
use crate::chromosome::Chromosome;
use crate::error::Result;
use crate::rng::RandomNumberGenerator;

/// Mutation operators for bit strings: flipping a bit, or any positional
/// operator shared with other sequences.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BitStringMutation {
    #[default]
    Flip,
    Sequence(SequenceMutation),
}

/// A fixed-length string of bits.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitStringChromosome {
    bits: Vec<bool>,
    mutation: BitStringMutation,
    crossover: TupleCrossover,
}

impl BitStringChromosome {
    pub fn new(bits: Vec<bool>) -> Self {
        Self {
            bits,
            mutation: BitStringMutation::default(),
            crossover: TupleCrossover::default(),
        }
    }

    /// A bit string of `size` fair coin flips.
    pub fn random(size: usize, rng: &mut RandomNumberGenerator) -> Self {
        Self::new((0..size).map(|_| rng.coin()).collect())
    }

    pub fn with_mutation(mut self, mutation: BitStringMutation) -> Self {
        self.mutation = mutation;
        self
    }

    pub fn with_crossover(mut self, crossover: TupleCrossover) -> Self {
        self.crossover = crossover;
        self
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&bit| bit).count()
    }

    fn derive(&self, bits: Vec<bool>) -> Self {
        Self {
            bits,
            mutation: self.mutation,
            crossover: self.crossover,
        }
    }

    /// Flips one random bit.
    pub fn mutate_flip(&self, rng: &mut RandomNumberGenerator) -> Self {
        let mut bits = self.bits.clone();
        if !bits.is_empty() {
            let index = rng.index(bits.len());
            bits[index] = !bits[index];
        }
        self.derive(bits)
    }

    pub fn crossover_one_point(
        &self,
        other: &Self,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(Self, Self)> {
        self.recombine(other, |left, right| sequence::one_point(left, right, rng))
    }

    pub fn crossover_uniform(
        &self,
        other: &Self,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(Self, Self)> {
        self.recombine(other, |left, right| sequence::uniform(left, right, rng))
    }

    fn recombine<F>(&self, other: &Self, operator: F) -> Result<(Self, Self)>
    where
        F: FnOnce(&[bool], &[bool]) -> (Vec<bool>, Vec<bool>),
    {
        ensure_same_size(self.bits.len(), other.bits.len())?;
        if self.bits.len() <= 1 {
            return Ok((self.clone(), other.clone()));
        }
        let (child1, child2) = operator(&self.bits, &other.bits);
        Ok((self.derive(child1), self.derive(child2)))
    }
}

impl Chromosome for BitStringChromosome {
    fn size(&self) -> usize {
        self.bits.len()
    }

    fn mutate(&self, rng: &mut RandomNumberGenerator) -> Self {
        match self.mutation {
            BitStringMutation::Flip => self.mutate_flip(rng),
            BitStringMutation::Sequence(operator) => self.derive(operator.apply(&self.bits, rng)),
        }
    }

    fn crossover(&self, other: &Self, rng: &mut RandomNumberGenerator) -> Result<(Self, Self)> {
        match self.crossover {
            TupleCrossover::OnePoint => self.crossover_one_point(other, rng),
            TupleCrossover::Uniform => self.crossover_uniform(other, rng),
        }
    }
}
