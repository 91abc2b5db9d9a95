use std::sync::Arc;

use super::BreedStrategy;
use crate::error::Result;
use crate::organism::Organism;
use crate::phenotype::Phenotype;
use crate::rng::RandomNumberGenerator;

/// # MutationOnly
///
/// Every parent produces exactly one mutated child. The mutation rate is
/// ignored, and so is crossover, which makes this strategy usable with
/// chromosomes that have no crossover operator.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct MutationOnly;

impl<P: Phenotype> BreedStrategy<P> for MutationOnly {
    fn breed(
        &self,
        parents: Vec<Arc<Organism<P>>>,
        _mutation: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Arc<Organism<P>>>> {
        Ok(parents
            .iter()
            .map(|parent| Arc::new(parent.mutate(rng)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{kind, organisms};

    #[test]
    fn test_one_child_per_parent() {
        let kind = kind();
        let mut rng = RandomNumberGenerator::from_seed(2);
        let parents = organisms(&kind, &[10, 20, 30]);
        let ids: Vec<u64> = parents.iter().map(|o| o.id()).collect();

        let children = MutationOnly.breed(parents, 0.0, &mut rng).unwrap();
        assert_eq!(children.len(), 3);
        assert!(children.iter().all(|c| !ids.contains(&c.id())));
        assert!(children.iter().all(|c| c.age() == 1));
    }
}
