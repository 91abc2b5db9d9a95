use std::sync::Arc;

use crate::error::Result;
use crate::evolution::challenge::SharedChallenge;
use crate::organism::Organism;
use crate::phenotype::Phenotype;
use crate::rng::RandomNumberGenerator;
use crate::selection::evaluator::FitnessEvaluator;
use crate::selection::{ensure_available, Selector};

/// Keeps the `n` fittest organisms, fittest first.
#[derive(Debug, Clone)]
pub struct FitnessSelector<P: Phenotype> {
    evaluator: FitnessEvaluator<P>,
}

impl<P: Phenotype> FitnessSelector<P> {
    pub fn new(challenge: SharedChallenge<P>) -> Self {
        Self {
            evaluator: FitnessEvaluator::new(challenge),
        }
    }

    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.evaluator = self.evaluator.with_parallel_threshold(parallel_threshold);
        self
    }

    pub fn challenge(&self) -> &SharedChallenge<P> {
        self.evaluator.challenge()
    }

    /// The `n` fittest of `organisms`, fittest first. Same as `select`,
    /// without a random number generator since nothing is drawn at random.
    ///
    /// # Errors
    ///
    /// Returns `SelectionImpossible` if `n` exceeds the number of organisms,
    /// and propagates challenge errors.
    pub fn fittest(
        &self,
        n: usize,
        organisms: &[Arc<Organism<P>>],
    ) -> Result<Vec<Arc<Organism<P>>>> {
        ensure_available(n, organisms.len())?;
        Ok(self
            .evaluator
            .rank(organisms)?
            .into_iter()
            .take(n)
            .map(|(organism, _)| organism)
            .collect())
    }
}

impl<P: Phenotype> Selector<P> for FitnessSelector<P> {
    fn select(
        &self,
        n: usize,
        organisms: &[Arc<Organism<P>>],
        _rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Arc<Organism<P>>>> {
        self.fittest(n, organisms)
    }
}
