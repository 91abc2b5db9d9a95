use std::sync::Arc;

use genetics::{
    chromosome::{PermutationChromosome, PermutationCrossover, SequenceMutation},
    error::Result,
    evolution::{Challenge, Population, PopulationOptions, SharedChallenge},
    organism::{Organism, OrganismKind},
    rng::RandomNumberGenerator,
    selection::{AgeSelector, ExponentialRankingSelector, FitnessSelector},
};

/// Fitness is the number of attacking queen pairs, negated.
struct Queens;

impl Challenge<i64> for Queens {
    fn fitness(&self, organism: &Organism<i64>) -> Result<f64> {
        Ok(-(organism.decode(self)? as f64))
    }

    fn solved(&self, organism: &Organism<i64>) -> Result<bool> {
        Ok(organism.decode(self)? == 0)
    }
}

fn board(organism: &Organism<i64>) -> Result<&[usize]> {
    Ok(organism
        .chromosome::<PermutationChromosome<usize>>("board")?
        .alleles())
}

/// Queens share a row only if the permutation is broken, so only diagonals
/// are counted.
fn conflicts(rows: &[usize]) -> i64 {
    let mut pairs = 0;
    for i in 0..rows.len() {
        for j in i + 1..rows.len() {
            if rows[i].abs_diff(rows[j]) == j - i {
                pairs += 1;
            }
        }
    }
    pairs
}

fn board_solver(size: usize) -> Arc<OrganismKind<i64>> {
    OrganismKind::builder("board_solver")
        .chromosome("board", move |rng| {
            Ok(PermutationChromosome::shuffled((0..size).collect::<Vec<usize>>(), rng)?
                .with_mutation(SequenceMutation::Swap)
                .with_crossover(PermutationCrossover::Cycle))
        })
        .decoder::<Queens, _>(|organism| Ok(conflicts(board(organism)?)))
        .build()
        .unwrap()
}

#[test]
fn test_conflicts() {
    assert_eq!(conflicts(&[0, 1, 2, 3]), 6);
    assert_eq!(conflicts(&[1, 3, 0, 2]), 0);
    assert_eq!(conflicts(&[0, 4, 7, 5, 2, 6, 1, 3]), 0);
}

#[test]
fn test_eight_queens_never_gets_worse_with_elitist_survivors() {
    let kind = board_solver(8);
    let challenge: SharedChallenge<i64> = Arc::new(Queens);
    let options = PopulationOptions::builder()
        .with_size(100)
        .with_mutation(0.5)
        .with_mating_pool_selector(Arc::new(ExponentialRankingSelector::new(Arc::clone(
            &challenge,
        ))))
        .with_mating_pool_size(10)
        .with_survivor_selector(Arc::new(FitnessSelector::new(Arc::clone(&challenge))))
        .build()
        .unwrap();

    let mut rng = RandomNumberGenerator::from_seed(8);
    let population = Population::new(&kind, options, &mut rng).unwrap();
    let initial = population.fittest(&challenge).unwrap().decode(&Queens).unwrap();

    let best = population.solve(&challenge, 500, &mut rng).unwrap();
    let remaining = best.decode(&Queens).unwrap();
    assert!(remaining <= initial);
    assert_eq!(remaining, conflicts(board(&best).unwrap()));

    let mut rows = board(&best).unwrap().to_vec();
    rows.sort_unstable();
    assert_eq!(rows, (0..8).collect::<Vec<_>>());

    if remaining == 0 {
        assert!(population.age() < 500);
    }
}

#[test]
fn test_five_queens_is_solved() {
    let kind = board_solver(5);
    let challenge: SharedChallenge<i64> = Arc::new(Queens);
    let options = PopulationOptions::builder()
        .with_size(40)
        .with_mutation(0.5)
        .with_mating_pool_selector(Arc::new(ExponentialRankingSelector::new(Arc::clone(
            &challenge,
        ))))
        .with_mating_pool_size(10)
        .with_survivor_selector(Arc::new(AgeSelector))
        .build()
        .unwrap();

    let mut rng = RandomNumberGenerator::from_seed(5);
    let population = Population::new(&kind, options, &mut rng).unwrap();
    let best = population.solve(&challenge, 2000, &mut rng).unwrap();

    assert!(challenge.solved(&best).unwrap());
    assert_eq!(conflicts(board(&best).unwrap()), 0);
}
