use std::sync::Arc;

use tracing::debug;

use super::{ensure_mutation_rate, BreedStrategy};
use crate::error::Result;
use crate::organism::Organism;
use crate::phenotype::Phenotype;
use crate::rng::RandomNumberGenerator;

/// # CrossoverWithMutation
///
/// Removes two random parents from the pool at a time and crosses them over.
/// Each of the two children is then mutated with probability `mutation`.
/// With an odd pool the last parent is left unmated and produces nothing.
///
/// This is the default strategy of a population.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossoverWithMutation;

impl<P: Phenotype> BreedStrategy<P> for CrossoverWithMutation {
    fn breed(
        &self,
        mut parents: Vec<Arc<Organism<P>>>,
        mutation: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Arc<Organism<P>>>> {
        ensure_mutation_rate(mutation)?;

        let mut children = Vec::with_capacity(parents.len());
        while !parents.is_empty() {
            let first = parents.swap_remove(rng.index(parents.len()));
            if parents.is_empty() {
                debug!(organism = first.id(), "odd parent left unmated");
                break;
            }
            let second = parents.swap_remove(rng.index(parents.len()));

            let (left, right) = first.crossover(&second, rng)?;
            for child in [left, right] {
                let child = if rng.chance(mutation) {
                    child.mutate(rng)
                } else {
                    child
                };
                children.push(Arc::new(child));
            }
        }
        Ok(children)
    }
}

/// # CrossoverOnly
///
/// Crosses consecutive parents, first with second, third with fourth and so
/// on. Children are not mutated and an odd last parent is left unmated.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossoverOnly;

impl<P: Phenotype> BreedStrategy<P> for CrossoverOnly {
    fn breed(
        &self,
        parents: Vec<Arc<Organism<P>>>,
        _mutation: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Arc<Organism<P>>>> {
        let mut children = Vec::with_capacity(parents.len());
        for pair in parents.chunks_exact(2) {
            let (left, right) = pair[0].crossover(&pair[1], rng)?;
            children.push(Arc::new(left));
            children.push(Arc::new(right));
        }
        if parents.len() % 2 == 1 {
            debug!(pool = parents.len(), "odd parent left unmated");
        }
        Ok(children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeneticError;
    use crate::test_support::{kind, organisms, random_organisms, tuple_kind};
    use std::collections::HashSet;

    #[test]
    fn test_pairs_produce_two_children_each() {
        let kind = tuple_kind();
        let mut rng = RandomNumberGenerator::from_seed(31);
        let parents = random_organisms(&kind, 6, &mut rng);
        let parent_ids: HashSet<u64> = parents.iter().map(|o| o.id()).collect();

        let children = CrossoverWithMutation.breed(parents, 0.5, &mut rng).unwrap();
        assert_eq!(children.len(), 6);
        assert!(children.iter().all(|c| c.age() == 1));
        assert!(children.iter().all(|c| !parent_ids.contains(&c.id())));
    }

    #[test]
    fn test_odd_parent_is_dropped() {
        let kind = tuple_kind();
        let mut rng = RandomNumberGenerator::from_seed(31);
        let parents = random_organisms(&kind, 3, &mut rng);
        let children = CrossoverWithMutation.breed(parents, 0.0, &mut rng).unwrap();
        assert_eq!(children.len(), 2);

        let parents = random_organisms(&kind, 1, &mut rng);
        let children = CrossoverWithMutation.breed(parents, 0.0, &mut rng).unwrap();
        assert!(children.is_empty());

        let parents = random_organisms(&kind, 5, &mut rng);
        let children = CrossoverOnly.breed(parents, 0.0, &mut rng).unwrap();
        assert_eq!(children.len(), 4);
    }

    #[test]
    fn test_rejects_invalid_mutation_rate() {
        let kind = tuple_kind();
        let mut rng = RandomNumberGenerator::from_seed(31);
        let parents = random_organisms(&kind, 2, &mut rng);
        let result = CrossoverWithMutation.breed(parents, 1.5, &mut rng);
        assert!(matches!(result, Err(GeneticError::Configuration(_))));
    }

    #[test]
    fn test_scalar_chromosomes_cannot_cross() {
        // integer chromosomes have no crossover operator
        let kind = kind();
        let mut rng = RandomNumberGenerator::from_seed(31);
        let result = CrossoverOnly.breed(organisms(&kind, &[1, 2]), 0.0, &mut rng);
        assert!(matches!(result, Err(GeneticError::NotImplemented(_))));
    }
}
