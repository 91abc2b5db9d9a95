//! # BreedStrategy
//!
//! The `BreedStrategy` trait defines how a population turns its mating pool
//! into offspring. A population hands the strategy the parents drawn by its
//! mating pool selector and appends whatever children come back.
//!
//! | Strategy | Offspring |
//! |---|---|
//! | [`CrossoverWithMutation`] | random pairs crossed over, each child mutated with the mutation rate |
//! | [`MutationOnly`] | every parent mutated once |
//! | [`CrossoverOnly`] | consecutive pairs crossed over, no mutation |
pub mod crossover;
pub mod mutation;

use std::fmt::Debug;
use std::sync::Arc;

use crate::error::{GeneticError, Result};
use crate::organism::Organism;
use crate::phenotype::Phenotype;
use crate::rng::RandomNumberGenerator;

pub use crossover::{CrossoverOnly, CrossoverWithMutation};
pub use mutation::MutationOnly;

/// Produces offspring from a mating pool.
pub trait BreedStrategy<P: Phenotype>: Debug + Send + Sync {
    /// Breeds children from `parents`. Parents are consumed; the population
    /// still holds its own references to them.
    ///
    /// ## Errors
    ///
    /// Returns `Configuration` if a strategy that uses `mutation` gets a rate
    /// outside `[0, 1]`, and propagates crossover errors.
    fn breed(
        &self,
        parents: Vec<Arc<Organism<P>>>,
        mutation: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Arc<Organism<P>>>>;
}

pub(crate) fn ensure_mutation_rate(mutation: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&mutation) {
        return Err(GeneticError::Configuration(format!(
            "Mutation rate must be within [0, 1], got {}",
            mutation
        )));
    }
    Ok(())
}
