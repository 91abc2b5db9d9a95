//! # Chromosomes
//!
//! Chromosomes are immutable genetic representations. Every operator takes
//! `&self` and returns new chromosomes, so a parent is never changed by
//! producing offspring.
//!
//! Each representation exposes its operators individually (`mutate_swap`,
//! `crossover_cycle`, ...) and binds exactly one mutation and one crossover
//! operator to the [`Chromosome`] entry points through an operator-choice enum
//! carried by the value itself.
//!
//! | Type | Alleles | Mutation | Crossover |
//! |---|---|---|---|
//! | [`TupleChromosome`] | any sequence | swap, insert, scramble, invert | one-point, uniform |
//! | [`PermutationChromosome`] | distinct sequence | swap, insert, scramble, invert | PMX, edge-3, order, cycle |
//! | [`BitStringChromosome`] | `bool` sequence | flip + sequence operators | one-point, uniform |
//! | [`DiscreteChromosome`] | one value from a set | reset | none |
//! | [`FloatChromosome`] | one `f64` | Gaussian, bounded uniform | none |
//! | [`IntegerChromosome`] | one `i64` | creep | none |
//!
//! ## Example
//!
//! ```rust
//! use genetics::chromosome::{Chromosome, PermutationChromosome, PermutationCrossover};
//! use genetics::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(1);
//! let left = PermutationChromosome::new(vec![0, 1, 2, 3, 4])?
//!     .with_crossover(PermutationCrossover::Order);
//! let right = PermutationChromosome::new(vec![4, 3, 2, 1, 0])?;
//!
//! let (child1, child2) = left.crossover(&right, &mut rng)?;
//! assert_eq!(child1.size(), 5);
//! assert_eq!(child2.size(), 5);
//! # Ok::<(), genetics::error::GeneticError>(())
//! ```

pub mod bitstring;
pub mod discrete;
pub mod float;
pub mod integer;
pub mod permutation;
pub mod sequence;
pub mod tuple;

use std::fmt::Debug;

use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

pub use bitstring::{BitStringChromosome, BitStringMutation};
pub use discrete::DiscreteChromosome;
pub use float::{FloatBounds, FloatChromosome, FloatMutation};
pub use integer::{IntegerBounds, IntegerChromosome};
pub use permutation::{PermutationChromosome, PermutationCrossover};
pub use sequence::SequenceMutation;
pub use tuple::{TupleChromosome, TupleCrossover};

/// The capability shared by all genetic representations.
///
/// `mutate` must be implemented. `crossover` is optional: representations
/// holding a single value have nothing to recombine and keep the default,
/// which reports [`GeneticError::NotImplemented`].
pub trait Chromosome: Clone + Debug + Send + Sync + 'static {
    /// Number of alleles held by the chromosome.
    fn size(&self) -> usize;

    /// Returns a mutated copy using the bound mutation operator.
    fn mutate(&self, rng: &mut RandomNumberGenerator) -> Self;

    /// Recombines `self` with `other` using the bound crossover operator.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::SizeMismatch`] when the operands differ in size,
    /// or [`GeneticError::NotImplemented`] for representations without crossover.
    fn crossover(&self, _other: &Self, _rng: &mut RandomNumberGenerator) -> Result<(Self, Self)> {
        Err(GeneticError::NotImplemented(format!(
            "crossover for {}",
            std::any::type_name::<Self>()
        )))
    }
}
