//! # Selection
//!
//! Selectors pick organisms out of a population. A population uses one to
//! draw its mating pool and another to cut the grown population back down to
//! size after variation.
//!
//! | Selector | Picks | Repeats |
//! |---|---|---|
//! | [`RandomSelector`] | uniformly at random | no |
//! | [`AgeSelector`] | the youngest | no |
//! | [`FitnessSelector`] | the fittest | no |
//! | [`TournamentSelector`] | winners of random tournaments | yes |
//! | [`FitnessProportionalSelector`] | by sigma-scaled fitness (SUS) | yes |
//! | [`LinearRankingSelector`] | by linear rank weight (SUS) | yes |
//! | [`ExponentialRankingSelector`] | by exponential rank weight (SUS) | yes |
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use genetics::chromosome::{IntegerBounds, IntegerChromosome};
//! use genetics::evolution::{Challenge, SharedChallenge};
//! use genetics::organism::{Organism, OrganismKind};
//! use genetics::rng::RandomNumberGenerator;
//! use genetics::selection::{FitnessSelector, Selector};
//!
//! struct Value;
//! impl Challenge<i64> for Value {}
//!
//! let kind = OrganismKind::<i64>::builder("value")
//!     .chromosome("x", |rng| Ok(IntegerChromosome::new(rng.integer(0, 9), IntegerBounds::default())))
//!     .decoder::<Value, _>(|o| Ok(o.chromosome::<IntegerChromosome>("x")?.allele()))
//!     .build()?;
//!
//! let mut rng = RandomNumberGenerator::from_seed(2);
//! let organisms = (0..10)
//!     .map(|_| Organism::new(&kind, &mut rng).map(Arc::new))
//!     .collect::<Result<Vec<_>, _>>()?;
//!
//! let challenge: SharedChallenge<i64> = Arc::new(Value);
//! let best = FitnessSelector::new(challenge).select(3, &organisms, &mut rng)?;
//! assert_eq!(best.len(), 3);
//! # Ok::<(), genetics::error::GeneticError>(())
//! ```

pub mod age;
pub mod evaluator;
pub mod fitness;
pub mod proportional;
pub mod random;
pub mod ranking;
pub mod sampling;
pub mod tournament;

use std::fmt::Debug;
use std::sync::Arc;

use crate::error::Result;
use crate::organism::Organism;
use crate::phenotype::Phenotype;
use crate::rng::RandomNumberGenerator;

pub use age::AgeSelector;
pub use evaluator::{FitnessEvaluator, DEFAULT_PARALLEL_THRESHOLD};
pub use fitness::FitnessSelector;
pub use proportional::{FitnessProportionalSelector, SigmaScaling};
pub use random::RandomSelector;
pub use ranking::{
    ExponentialRanking, ExponentialRankingSelector, LinearRanking, LinearRankingSelector,
    Ranking, RankWeights,
};
pub use sampling::{stochastic_universal_sampling, SamplingSelector, Scale};
pub use tournament::{compete, TournamentSelector};

/// A strategy for choosing organisms.
pub trait Selector<P: Phenotype>: Debug + Send + Sync {
    /// Selects `n` organisms from `organisms`.
    ///
    /// # Errors
    ///
    /// Selectors drawing without replacement return `SelectionImpossible`
    /// when `n` exceeds the number of organisms. Fitness-based selectors
    /// propagate challenge errors.
    fn select(
        &self,
        n: usize,
        organisms: &[Arc<Organism<P>>],
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Arc<Organism<P>>>>;
}

pub(crate) fn ensure_available(requested: usize, available: usize) -> Result<()> {
    if requested > available {
        return Err(crate::error::GeneticError::SelectionImpossible {
            requested,
            available,
        });
    }
    Ok(())
}
