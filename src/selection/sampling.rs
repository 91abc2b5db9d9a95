//! # Stochastic universal sampling
//!
//! [`SamplingSelector`] draws `n` organisms in a single spin of an `n`-armed
//! roulette wheel. The wheel is laid out by a [`Scale`], which may reorder
//! the organisms before weighing them.

use std::fmt::Debug;
use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::organism::Organism;
use crate::phenotype::Phenotype;
use crate::rng::RandomNumberGenerator;
use crate::selection::random::RandomSelector;
use crate::selection::Selector;

/// Lays out the roulette wheel of a [`SamplingSelector`].
pub trait Scale<P: Phenotype>: Debug + Send + Sync {
    /// The organisms in wheel order. Identity unless overridden.
    fn arrange(&self, organisms: &[Arc<Organism<P>>]) -> Result<Vec<Arc<Organism<P>>>> {
        Ok(organisms.to_vec())
    }

    /// One non-negative weight per arranged organism. An empty result means
    /// the organisms cannot be told apart.
    fn scale(&self, organisms: &[Arc<Organism<P>>]) -> Result<Vec<f64>>;
}

/// Selects organisms with probability proportional to their scaled weight.
///
/// An organism may be selected more than once. When the scale yields no
/// usable weights the selector falls back to [`RandomSelector`].
#[derive(Debug, Clone)]
pub struct SamplingSelector<S> {
    scaler: S,
    random: RandomSelector,
}

impl<S> SamplingSelector<S> {
    pub fn from_scaler(scaler: S) -> Self {
        Self {
            scaler,
            random: RandomSelector,
        }
    }

    pub fn scaler(&self) -> &S {
        &self.scaler
    }

    pub(crate) fn into_scaler(self) -> S {
        self.scaler
    }
}

impl<P, S> Selector<P> for SamplingSelector<S>
where
    P: Phenotype,
    S: Scale<P>,
{
    fn select(
        &self,
        n: usize,
        organisms: &[Arc<Organism<P>>],
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Arc<Organism<P>>>> {
        if n == 0 {
            return Ok(Vec::new());
        }

        let arranged = self.scaler.arrange(organisms)?;
        let weights = self.scaler.scale(&arranged)?;
        let total: f64 = weights.iter().sum();
        if weights.len() != arranged.len() || total <= 0.0 || !total.is_finite() {
            debug!(
                requested = n,
                available = organisms.len(),
                "no usable sampling weights, selecting at random"
            );
            return self.random.select(n, &arranged, rng);
        }

        Ok(stochastic_universal_sampling(&arranged, &weights, n, rng))
    }
}

/// Picks `n` items with one spin of `n` equally spaced pointers.
///
/// Weights are normalized by their total, so they need not sum to 1. Each
/// item is picked either `floor(n * p)` or `ceil(n * p)` times, where `p`
/// is its normalized weight. Rounding shortfalls are made up with the last
/// item.
///
/// Returns no items if `items` is empty or `weights` has a different length.
///
/// ```
/// use genetics::rng::RandomNumberGenerator;
/// use genetics::selection::stochastic_universal_sampling;
///
/// let mut rng = RandomNumberGenerator::from_seed(8);
/// let picked = stochastic_universal_sampling(&['a', 'b'], &[3.0, 1.0], 4, &mut rng);
/// assert_eq!(picked, vec!['a', 'a', 'a', 'b']);
/// ```
pub fn stochastic_universal_sampling<T: Clone>(
    items: &[T],
    weights: &[f64],
    n: usize,
    rng: &mut RandomNumberGenerator,
) -> Vec<T> {
    if items.is_empty() || items.len() != weights.len() || n == 0 {
        return Vec::new();
    }

    let total: f64 = weights.iter().sum();
    let increment = 1.0 / n as f64;
    let mut pointer = rng.unit() * increment;
    let mut cumulative = 0.0;
    let mut selected = Vec::with_capacity(n);

    for (item, weight) in items.iter().zip(weights) {
        cumulative += weight / total;
        while selected.len() < n && pointer < cumulative {
            selected.push(item.clone());
            pointer += increment;
        }
        if selected.len() == n {
            break;
        }
    }

    // rounding can leave the last pointers past the final cumulative weight
    if let Some(last) = last_weighted(items, weights) {
        selected.resize(n, last.clone());
    }
    selected
}

/// The last item with a positive weight, or the last item if none has one.
fn last_weighted<'a, T>(items: &'a [T], weights: &[f64]) -> Option<&'a T> {
    items
        .iter()
        .zip(weights)
        .rev()
        .find(|(_, weight)| **weight > 0.0)
        .map(|(item, _)| item)
        .or_else(|| items.last())
}
