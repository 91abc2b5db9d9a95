use std::cmp::Ordering;
use std::sync::Arc;

use crate::error::{GeneticError, Result};
use crate::organism::Organism;
use crate::phenotype::Phenotype;
use crate::rng::RandomNumberGenerator;
use crate::selection::random::RandomSelector;
use crate::selection::Selector;

/// A selection strategy that picks each organism as the winner of a tournament.
///
/// Every slot draws `size` distinct organisms at random and eliminates them
/// pairwise with the ordering declared on their [`OrganismKind`](crate::organism::OrganismKind)
/// until one remains. No fitness is evaluated. The same organism can win
/// several slots.
///
/// Larger tournaments favour the best organisms more strongly; a tournament
/// of size 1 is random selection with replacement.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct TournamentSelector {
    size: usize,
    random: RandomSelector,
}

impl TournamentSelector {
    /// # Errors
    ///
    /// Returns `Configuration` if `size` is 0.
    pub fn new(size: usize) -> Result<Self> {
        if size < 1 {
            return Err(GeneticError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            size,
            random: RandomSelector,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl<P: Phenotype> Selector<P> for TournamentSelector {
    fn select(
        &self,
        n: usize,
        organisms: &[Arc<Organism<P>>],
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Arc<Organism<P>>>> {
        (0..n)
            .map(|_| {
                let contestants = self.random.select(self.size, organisms, rng)?;
                compete(contestants, |a, b| a.compare(b))
            })
            .collect()
    }
}

/// Reduces `contestants` to one winner in rounds of pairwise matches.
///
/// Adjacent contestants are paired; the first of a pair advances only if it
/// compares greater, otherwise the second does. An unpaired last contestant
/// advances unopposed.
///
/// # Errors
///
/// Returns `EmptyPopulation` for no contestants and propagates comparison errors.
///
/// ```
/// use genetics::selection::compete;
///
/// let winner = compete(vec![3, 9, 4, 1, 7], |a, b| Ok(a.cmp(b)))?;
/// assert_eq!(winner, 9);
/// # Ok::<(), genetics::error::GeneticError>(())
/// ```
pub fn compete<T, F>(mut contestants: Vec<T>, mut compare: F) -> Result<T>
where
    F: FnMut(&T, &T) -> Result<Ordering>,
{
    while contestants.len() > 1 {
        let mut advancing = Vec::with_capacity(contestants.len() / 2 + 1);
        let mut round = contestants.into_iter();
        while let Some(first) = round.next() {
            match round.next() {
                Some(second) => {
                    if compare(&first, &second)? == Ordering::Greater {
                        advancing.push(first);
                    } else {
                        advancing.push(second);
                    }
                }
                None => advancing.push(first),
            }
        }
        contestants = advancing;
    }
    contestants.pop().ok_or(GeneticError::EmptyPopulation)
}
