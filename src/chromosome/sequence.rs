//! Position-only operators shared by every sequence representation.
//!
//! These functions only move alleles around, so the multiset of alleles is
//! always preserved. That is what lets permutations reuse them without
//! re-checking uniqueness.

use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// Mutation operators available to sequence chromosomes.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SequenceMutation {
    #[default]
    Swap,
    Insert,
    Scramble,
    Invert,
}

impl SequenceMutation {
    pub(crate) fn apply<A: Clone>(self, alleles: &[A], rng: &mut RandomNumberGenerator) -> Vec<A> {
        match self {
            SequenceMutation::Swap => swap(alleles, rng),
            SequenceMutation::Insert => insert(alleles, rng),
            SequenceMutation::Scramble => scramble(alleles, rng),
            SequenceMutation::Invert => invert(alleles, rng),
        }
    }
}

/// Exchanges the alleles at two distinct random positions.
pub fn swap<A: Clone>(alleles: &[A], rng: &mut RandomNumberGenerator) -> Vec<A> {
    let mut result = alleles.to_vec();
    if result.len() > 1 {
        let (first, second) = rng.random_indices(result.len(), false);
        result.swap(first, second);
    }
    result
}

/// Takes the alleles at two distinct positions `first < second` and places
/// them side by side, either where `first` was or just before the tail that
/// followed `second`.
///
/// ```text
/// 0 (1) 2 3 (4) 5  ->  0 1 4 2 3 5   or   0 2 3 1 4 5
/// ```
pub fn insert<A: Clone>(alleles: &[A], rng: &mut RandomNumberGenerator) -> Vec<A> {
    if alleles.len() <= 2 {
        return alleles.to_vec();
    }

    let (first, second) = rng.random_indices(alleles.len(), false);
    let before = &alleles[..first];
    let pair = [alleles[first].clone(), alleles[second].clone()];
    let between = &alleles[first + 1..second];
    let after = &alleles[second + 1..];

    let mut result = Vec::with_capacity(alleles.len());
    result.extend_from_slice(before);
    if rng.coin() {
        result.extend_from_slice(&pair);
        result.extend_from_slice(between);
    } else {
        result.extend_from_slice(between);
        result.extend_from_slice(&pair);
    }
    result.extend_from_slice(after);
    result
}

/// Shuffles a random inclusive range of positions.
pub fn scramble<A: Clone>(alleles: &[A], rng: &mut RandomNumberGenerator) -> Vec<A> {
    let mut result = alleles.to_vec();
    if result.len() > 1 {
        let (first, second) = rng.random_indices(result.len(), false);
        rng.shuffle(&mut result[first..=second]);
    }
    result
}

/// Reverses a random inclusive range of positions.
pub fn invert<A: Clone>(alleles: &[A], rng: &mut RandomNumberGenerator) -> Vec<A> {
    let mut result = alleles.to_vec();
    if result.len() > 1 {
        let (first, second) = rng.random_indices(result.len(), false);
        result[first..=second].reverse();
    }
    result
}

/// Splits both parents at one random cut and exchanges the tails.
pub fn one_point<A: Clone>(
    left: &[A],
    right: &[A],
    rng: &mut RandomNumberGenerator,
) -> (Vec<A>, Vec<A>) {
    let cut = rng.index(left.len());
    let child1 = left[..cut].iter().chain(&right[cut..]).cloned().collect();
    let child2 = right[..cut].iter().chain(&left[cut..]).cloned().collect();
    (child1, child2)
}

/// Decides for each position on a coin flip whether the children keep or
/// exchange the parents' alleles.
pub fn uniform<A: Clone>(
    left: &[A],
    right: &[A],
    rng: &mut RandomNumberGenerator,
) -> (Vec<A>, Vec<A>) {
    let mut child1 = Vec::with_capacity(left.len());
    let mut child2 = Vec::with_capacity(left.len());
    for (a, b) in left.iter().zip(right) {
        if rng.coin() {
            child1.push(a.clone());
            child2.push(b.clone());
        } else {
            child1.push(b.clone());
            child2.push(a.clone());
        }
    }
    (child1, child2)
}

/// Fails unless both operands have the same number of alleles.
pub(crate) fn ensure_same_size(left: usize, right: usize) -> Result<()> {
    if left != right {
        return Err(GeneticError::SizeMismatch { left, right });
    }
    Ok(())
}
