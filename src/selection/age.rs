use std::sync::Arc;

use crate::error::Result;
use crate::organism::Organism;
use crate::phenotype::Phenotype;
use crate::rng::RandomNumberGenerator;
use crate::selection::{ensure_available, Selector};

/// Keeps the `n` youngest organisms. Among equal ages the earlier organism wins.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct AgeSelector;

impl AgeSelector {
    pub fn new() -> Self {
        Self
    }
}

impl<P: Phenotype> Selector<P> for AgeSelector {
    fn select(
        &self,
        n: usize,
        organisms: &[Arc<Organism<P>>],
        _rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Arc<Organism<P>>>> {
        ensure_available(n, organisms.len())?;
        let mut by_age = organisms.to_vec();
        by_age.sort_by_key(|organism| organism.age());
        by_age.truncate(n);
        Ok(by_age)
    }
}
