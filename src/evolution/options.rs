//! # PopulationOptions
//!
//! The `PopulationOptions` struct holds the fixed configuration of a
//! [`Population`](crate::evolution::Population): how many organisms it keeps,
//! how its mating pool and survivors are selected, how offspring are bred and
//! how often they mutate.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use genetics::evolution::PopulationOptions;
//! use genetics::selection::{AgeSelector, TournamentSelector};
//!
//! let options = PopulationOptions::<f64>::builder()
//!     .with_size(50)
//!     .with_mutation(0.1)
//!     .with_mating_pool_selector(Arc::new(TournamentSelector::new(3)?))
//!     .with_mating_pool_size(20)
//!     .with_survivor_selector(Arc::new(AgeSelector))
//!     .build()?;
//!
//! assert_eq!(options.size(), 50);
//! # Ok::<(), genetics::error::GeneticError>(())
//! ```

use std::fmt;
use std::sync::Arc;

use crate::error::{GeneticError, Result};
use crate::phenotype::Phenotype;
use crate::selection::{Selector, DEFAULT_PARALLEL_THRESHOLD};
use crate::strategy::{ensure_mutation_rate, BreedStrategy, CrossoverWithMutation};

pub struct PopulationOptions<P: Phenotype> {
    size: usize,
    mutation: f64,
    mating_pool_selector: Arc<dyn Selector<P>>,
    mating_pool_size: usize,
    survivor_selector: Arc<dyn Selector<P>>,
    breed_strategy: Arc<dyn BreedStrategy<P>>,
    parallel_threshold: usize,
}

impl<P: Phenotype> PopulationOptions<P> {
    pub fn builder() -> PopulationOptionsBuilder<P> {
        PopulationOptionsBuilder::default()
    }

    /// Number of organisms kept after every cycle.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn mutation(&self) -> f64 {
        self.mutation
    }

    pub fn mating_pool_selector(&self) -> &Arc<dyn Selector<P>> {
        &self.mating_pool_selector
    }

    pub fn mating_pool_size(&self) -> usize {
        self.mating_pool_size
    }

    pub fn survivor_selector(&self) -> &Arc<dyn Selector<P>> {
        &self.survivor_selector
    }

    pub fn breed_strategy(&self) -> &Arc<dyn BreedStrategy<P>> {
        &self.breed_strategy
    }

    /// Returns the minimum number of organisms to evaluate in parallel.
    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }
}

impl<P: Phenotype> Clone for PopulationOptions<P> {
    fn clone(&self) -> Self {
        Self {
            size: self.size,
            mutation: self.mutation,
            mating_pool_selector: Arc::clone(&self.mating_pool_selector),
            mating_pool_size: self.mating_pool_size,
            survivor_selector: Arc::clone(&self.survivor_selector),
            breed_strategy: Arc::clone(&self.breed_strategy),
            parallel_threshold: self.parallel_threshold,
        }
    }
}

impl<P: Phenotype> fmt::Debug for PopulationOptions<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PopulationOptions")
            .field("size", &self.size)
            .field("mutation", &self.mutation)
            .field("mating_pool_selector", &self.mating_pool_selector)
            .field("mating_pool_size", &self.mating_pool_size)
            .field("survivor_selector", &self.survivor_selector)
            .field("breed_strategy", &self.breed_strategy)
            .field("parallel_threshold", &self.parallel_threshold)
            .finish()
    }
}

/// Builder for `PopulationOptions`.
///
/// The size, the mating pool size and both selectors are required. The
/// mutation rate defaults to 0, the breed strategy to
/// [`CrossoverWithMutation`] and the parallel threshold to
/// [`DEFAULT_PARALLEL_THRESHOLD`].
pub struct PopulationOptionsBuilder<P: Phenotype> {
    size: Option<usize>,
    mutation: Option<f64>,
    mating_pool_selector: Option<Arc<dyn Selector<P>>>,
    mating_pool_size: Option<usize>,
    survivor_selector: Option<Arc<dyn Selector<P>>>,
    breed_strategy: Option<Arc<dyn BreedStrategy<P>>>,
    parallel_threshold: Option<usize>,
}

impl<P: Phenotype> Default for PopulationOptionsBuilder<P> {
    fn default() -> Self {
        Self {
            size: None,
            mutation: None,
            mating_pool_selector: None,
            mating_pool_size: None,
            survivor_selector: None,
            breed_strategy: None,
            parallel_threshold: None,
        }
    }
}

impl<P: Phenotype> PopulationOptionsBuilder<P> {
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_mutation(mut self, mutation: f64) -> Self {
        self.mutation = Some(mutation);
        self
    }

    pub fn with_mating_pool_selector(mut self, selector: Arc<dyn Selector<P>>) -> Self {
        self.mating_pool_selector = Some(selector);
        self
    }

    pub fn with_mating_pool_size(mut self, size: usize) -> Self {
        self.mating_pool_size = Some(size);
        self
    }

    pub fn with_survivor_selector(mut self, selector: Arc<dyn Selector<P>>) -> Self {
        self.survivor_selector = Some(selector);
        self
    }

    pub fn with_breed_strategy(mut self, strategy: Arc<dyn BreedStrategy<P>>) -> Self {
        self.breed_strategy = Some(strategy);
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = Some(threshold);
        self
    }

    pub fn build(self) -> Result<PopulationOptions<P>> {
        let size = self.size.ok_or_else(|| {
            GeneticError::Configuration("Population size not specified".to_string())
        })?;
        if size < 1 {
            return Err(GeneticError::Configuration(
                "Population size must be at least 1".to_string(),
            ));
        }

        let mutation = self.mutation.unwrap_or(0.0);
        ensure_mutation_rate(mutation)?;

        let mating_pool_selector = self.mating_pool_selector.ok_or_else(|| {
            GeneticError::Configuration("Mating pool selector not specified".to_string())
        })?;

        let mating_pool_size = self.mating_pool_size.ok_or_else(|| {
            GeneticError::Configuration("Mating pool size not specified".to_string())
        })?;
        if mating_pool_size < 1 {
            return Err(GeneticError::Configuration(
                "Mating pool size must be at least 1".to_string(),
            ));
        }

        let survivor_selector = self.survivor_selector.ok_or_else(|| {
            GeneticError::Configuration("Survivor selector not specified".to_string())
        })?;

        Ok(PopulationOptions {
            size,
            mutation,
            mating_pool_selector,
            mating_pool_size,
            survivor_selector,
            breed_strategy: self
                .breed_strategy
                .unwrap_or_else(|| Arc::new(CrossoverWithMutation)),
            parallel_threshold: self
                .parallel_threshold
                .unwrap_or(DEFAULT_PARALLEL_THRESHOLD),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{AgeSelector, RandomSelector};

    fn complete() -> PopulationOptionsBuilder<i64> {
        PopulationOptions::builder()
            .with_size(10)
            .with_mating_pool_selector(Arc::new(RandomSelector))
            .with_mating_pool_size(6)
            .with_survivor_selector(Arc::new(AgeSelector))
    }

    #[test]
    fn test_defaults() {
        let options = complete().build().unwrap();
        assert_eq!(options.size(), 10);
        assert_eq!(options.mutation(), 0.0);
        assert_eq!(options.mating_pool_size(), 6);
        assert_eq!(options.parallel_threshold(), DEFAULT_PARALLEL_THRESHOLD);
    }

    #[test]
    fn test_missing_fields() {
        let missing_size = PopulationOptions::<i64>::builder()
            .with_mating_pool_selector(Arc::new(RandomSelector))
            .with_survivor_selector(Arc::new(AgeSelector))
            .build();
        assert!(matches!(missing_size, Err(GeneticError::Configuration(_))));

        let missing_survivors = PopulationOptions::<i64>::builder()
            .with_size(10)
            .with_mating_pool_selector(Arc::new(RandomSelector))
            .build();
        assert!(matches!(missing_survivors, Err(GeneticError::Configuration(_))));

        let missing_mating = PopulationOptions::<i64>::builder()
            .with_size(10)
            .with_survivor_selector(Arc::new(AgeSelector))
            .build();
        assert!(matches!(missing_mating, Err(GeneticError::Configuration(_))));

        let missing_pool_size = PopulationOptions::<i64>::builder()
            .with_size(10)
            .with_mating_pool_selector(Arc::new(RandomSelector))
            .with_survivor_selector(Arc::new(AgeSelector))
            .build();
        assert!(matches!(missing_pool_size, Err(GeneticError::Configuration(_))));
    }

    #[test]
    fn test_invalid_values() {
        assert!(complete().with_size(0).build().is_err());
        assert!(complete().with_mating_pool_size(0).build().is_err());
        assert!(complete().with_mutation(-0.1).build().is_err());
        assert!(complete().with_mutation(1.1).build().is_err());
        assert!(complete().with_mutation(1.0).build().is_ok());
    }
}
