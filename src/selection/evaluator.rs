use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use rayon::prelude::*;

use crate::error::{GeneticError, Result};
use crate::evolution::challenge::SharedChallenge;
use crate::organism::Organism;
use crate::phenotype::Phenotype;

/// Default population length from which fitness is evaluated in parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1000;

/// Scores organisms against a bound challenge.
///
/// Populations at least `parallel_threshold` long are scored with rayon;
/// smaller ones sequentially. Results are always in input order.
#[derive(Clone)]
pub struct FitnessEvaluator<P: Phenotype> {
    challenge: SharedChallenge<P>,
    parallel_threshold: usize,
}

impl<P: Phenotype> FitnessEvaluator<P> {
    pub fn new(challenge: SharedChallenge<P>) -> Self {
        Self {
            challenge,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    pub fn challenge(&self) -> &SharedChallenge<P> {
        &self.challenge
    }

    /// Fitness of every organism, in order.
    ///
    /// # Errors
    ///
    /// Propagates challenge errors, and returns `FitnessCalculation` for
    /// non-finite fitness values.
    pub fn evaluate(&self, organisms: &[Arc<Organism<P>>]) -> Result<Vec<f64>> {
        let score = |organism: &Arc<Organism<P>>| -> Result<f64> {
            let fitness = self.challenge.fitness(organism)?;
            if !fitness.is_finite() {
                return Err(GeneticError::FitnessCalculation(format!(
                    "Non-finite fitness score encountered: {}",
                    fitness
                )));
            }
            Ok(fitness)
        };

        if organisms.len() >= self.parallel_threshold {
            organisms.par_iter().map(score).collect()
        } else {
            organisms.iter().map(score).collect()
        }
    }

    /// Organisms paired with their fitness, fittest first. Ties keep their
    /// input order.
    pub fn rank(&self, organisms: &[Arc<Organism<P>>]) -> Result<Vec<(Arc<Organism<P>>, f64)>> {
        let fitness = self.evaluate(organisms)?;
        let mut ranked: Vec<_> = organisms.iter().cloned().zip(fitness).collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        Ok(ranked)
    }
}

impl<P: Phenotype> fmt::Debug for FitnessEvaluator<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FitnessEvaluator")
            .field("challenge", &self.challenge.key())
            .field("parallel_threshold", &self.parallel_threshold)
            .finish()
    }
}
