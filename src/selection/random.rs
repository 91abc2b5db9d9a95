use std::sync::Arc;

use crate::error::Result;
use crate::organism::Organism;
use crate::phenotype::Phenotype;
use crate::rng::RandomNumberGenerator;
use crate::selection::{ensure_available, Selector};

/// Uniform sampling without replacement.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSelector;

impl RandomSelector {
    pub fn new() -> Self {
        Self
    }
}

impl<P: Phenotype> Selector<P> for RandomSelector {
    fn select(
        &self,
        n: usize,
        organisms: &[Arc<Organism<P>>],
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Arc<Organism<P>>>> {
        ensure_available(n, organisms.len())?;
        Ok(rng
            .sample_indices(organisms.len(), n)
            .into_iter()
            .map(|i| Arc::clone(&organisms[i]))
            .collect())
    }
}
