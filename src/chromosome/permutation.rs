//! # Permutation chromosomes
//!
//! A permutation is a sequence whose alleles are all distinct. The
//! positional operators of [`sequence`](super::sequence) keep that property
//! for free; the one-point and uniform crossovers do not, so permutations
//! recombine through four order-aware operators instead:
//!
//! - **PMX** (partially mapped) keeps a segment of one parent in place and
//!   resolves conflicts by following the index mapping between parents.
//! - **Edge-3** rebuilds a tour from the adjacency of both parents, preferring
//!   edges they share.
//! - **Order** keeps a segment of one parent and fills the rest with the
//!   other parent's alleles in their relative order.
//! - **Cycle** splits positions into cycles and alternates which parent each
//!   cycle comes from, preserving absolute positions.
//!
//! All operators only rearrange alleles, so their children skip the
//! uniqueness check performed by [`PermutationChromosome::new`].

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

use crate::chromosome::sequence::{ensure_same_size, SequenceMutation};
use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// Crossover operators that keep every allele exactly once.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PermutationCrossover {
    PartiallyMapped,
    Edge,
    Order,
    #[default]
    Cycle,
}

/// Adjacency lists keyed by allele.
pub type EdgeTable<A> = HashMap<A, Vec<A>>;

/// A sequence of distinct alleles.
///
/// # Examples
///
/// ```
/// use genetics::chromosome::{Chromosome, PermutationChromosome};
/// use genetics::rng::RandomNumberGenerator;
///
/// let mut rng = RandomNumberGenerator::from_seed(9);
/// let left = PermutationChromosome::new(vec![4, 5, 6])?;
/// let right = PermutationChromosome::new(vec![0, 1, 2])?;
///
/// let (child1, child2) = left.crossover_cycle(&right, &mut rng)?;
/// assert_eq!(child1.alleles(), &[4, 1, 6]);
/// assert_eq!(child2.alleles(), &[0, 5, 2]);
///
/// assert!(PermutationChromosome::new(vec![1, 1, 2]).is_err());
/// # Ok::<(), genetics::error::GeneticError>(())
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct PermutationChromosome<A> {
    alleles: Vec<A>,
    mutation: SequenceMutation,
    crossover: PermutationCrossover,
}

impl<A> PermutationChromosome<A>
where
    A: Clone + Eq + Hash + Debug,
{
    /// Builds a permutation, rejecting duplicate alleles.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` naming the first repeated allele.
    pub fn new(alleles: Vec<A>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(alleles.len());
        for allele in &alleles {
            if !seen.insert(allele) {
                return Err(GeneticError::InvariantViolation(format!(
                    "alleles in a permutation must be unique, {:?} repeats",
                    allele
                )));
            }
        }
        Ok(Self::trusted(alleles))
    }

    /// Builds a permutation of `alleles` in random order.
    pub fn shuffled(alleles: Vec<A>, rng: &mut RandomNumberGenerator) -> Result<Self> {
        let mut permutation = Self::new(alleles)?;
        rng.shuffle(&mut permutation.alleles);
        Ok(permutation)
    }

    fn trusted(alleles: Vec<A>) -> Self {
        Self {
            alleles,
            mutation: SequenceMutation::default(),
            crossover: PermutationCrossover::default(),
        }
    }

    fn derive(&self, alleles: Vec<A>) -> Self {
        Self {
            alleles,
            mutation: self.mutation,
            crossover: self.crossover,
        }
    }

    pub fn with_mutation(mut self, mutation: SequenceMutation) -> Self {
        self.mutation = mutation;
        self
    }

    pub fn with_crossover(mut self, crossover: PermutationCrossover) -> Self {
        self.crossover = crossover;
        self
    }

    pub fn alleles(&self) -> &[A] {
        &self.alleles
    }

    pub fn into_alleles(self) -> Vec<A> {
        self.alleles
    }

    pub fn mutate_swap(&self, rng: &mut RandomNumberGenerator) -> Self {
        self.derive(SequenceMutation::Swap.apply(&self.alleles, rng))
    }

    pub fn mutate_insert(&self, rng: &mut RandomNumberGenerator) -> Self {
        self.derive(SequenceMutation::Insert.apply(&self.alleles, rng))
    }

    pub fn mutate_scramble(&self, rng: &mut RandomNumberGenerator) -> Self {
        self.derive(SequenceMutation::Scramble.apply(&self.alleles, rng))
    }

    pub fn mutate_invert(&self, rng: &mut RandomNumberGenerator) -> Self {
        self.derive(SequenceMutation::Invert.apply(&self.alleles, rng))
    }

    /// Partially mapped crossover over a random segment of distinct bounds.
    pub fn crossover_pmx(
        &self,
        other: &Self,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(Self, Self)> {
        self.recombine(other, |left, right| {
            let (first, second) = rng.random_indices(left.len(), false);
            (
                pmx_child(left, right, first, second),
                pmx_child(right, left, first, second),
            )
        })
    }

    /// Edge-3 crossover.
    ///
    /// Each child starts from a random allele of its own parent and repeatedly
    /// moves to an unvisited neighbour, preferring edges both parents share.
    /// When no neighbour is left it restarts from a random unvisited allele.
    pub fn crossover_edge(
        &self,
        other: &Self,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(Self, Self)> {
        self.recombine(other, |left, right| {
            let mine = edge_table(left);
            let theirs = edge_table(right);
            let shared = double_edge_table(left, right);
            (
                edge_child(left, &mine, &theirs, &shared, rng),
                edge_child(right, &mine, &theirs, &shared, rng),
            )
        })
    }

    /// Order crossover over a random segment whose bounds may coincide.
    pub fn crossover_order(
        &self,
        other: &Self,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(Self, Self)> {
        self.recombine(other, |left, right| {
            let (first, second) = rng.random_indices(left.len(), true);
            (
                order_child(left, right, first, second),
                order_child(right, left, first, second),
            )
        })
    }

    /// Cycle crossover. Deterministic: the random generator is not consulted.
    pub fn crossover_cycle(
        &self,
        other: &Self,
        _rng: &mut RandomNumberGenerator,
    ) -> Result<(Self, Self)> {
        self.recombine(other, |left, right| {
            let mut child1 = left.to_vec();
            let mut child2 = right.to_vec();
            for cycle in cycles(left, right).iter().skip(1).step_by(2) {
                for &i in cycle {
                    std::mem::swap(&mut child1[i], &mut child2[i]);
                }
            }
            (child1, child2)
        })
    }

    fn recombine<F>(&self, other: &Self, operator: F) -> Result<(Self, Self)>
    where
        F: FnOnce(&[A], &[A]) -> (Vec<A>, Vec<A>),
    {
        ensure_same_size(self.alleles.len(), other.alleles.len())?;
        if self.alleles.len() <= 1 {
            return Ok((self.clone(), other.clone()));
        }
        let (child1, child2) = operator(&self.alleles, &other.alleles);
        Ok((self.derive(child1), self.derive(child2)))
    }
}

/// Builds one PMX child: `first..=second` comes from `p1`, everything else
/// from `p2`, and every allele of `p2`'s segment that was displaced is moved
/// along the `p1 -> p2` index mapping to the first free position.
pub fn pmx_child<A>(p1: &[A], p2: &[A], first: usize, second: usize) -> Vec<A>
where
    A: Clone + Eq + Hash,
{
    let mut child: Vec<A> = p2[..first]
        .iter()
        .chain(&p1[first..=second])
        .chain(&p2[second + 1..])
        .cloned()
        .collect();

    let mut copied: HashSet<&A> = p1[first..=second].iter().collect();
    let mut occupied: HashSet<usize> = (first..=second).collect();
    let p2_index = index_by_value(p2);

    for i in first..=second {
        let allele = &p2[i];
        if copied.contains(allele) {
            continue;
        }

        let mut j = i;
        // the mapping is injective, so a free slot is reached within len steps
        for _ in 0..p1.len() {
            let Some(&next) = p2_index.get(&p1[j]) else {
                break;
            };
            j = next;
            if occupied.insert(j) {
                child[j] = allele.clone();
                break;
            }
        }
        copied.insert(allele);
    }

    child
}

/// Builds one order-crossover child: `p1[first..=second]` followed by the
/// alleles of `p2` not yet used, read from just after `second` and wrapping
/// around. The slots before `first` are filled last and the result is
/// rotated so the segment keeps its position.
pub fn order_child<A>(p1: &[A], p2: &[A], first: usize, second: usize) -> Vec<A>
where
    A: Clone + Eq,
{
    let size = p1.len();
    let mut middle: Vec<A> = p1[first..=second].to_vec();
    let mut queue = p2[second + 1..].iter().chain(&p2[..=second]);

    for _ in 0..size - second - 1 {
        if let Some(item) = queue.by_ref().find(|item| !middle.contains(item)) {
            middle.push(item.clone());
        }
    }

    let mut start = Vec::with_capacity(first);
    for _ in 0..first {
        if let Some(item) = queue.by_ref().find(|item| !middle.contains(item)) {
            start.push(item.clone());
        }
    }

    start.extend(middle);
    start
}

/// Maps each allele to both of its neighbours on the cyclic sequence.
///
/// ```
/// use genetics::chromosome::permutation::edge_table;
///
/// let table = edge_table(&[4, 5, 6]);
/// assert_eq!(table[&4], vec![6, 5]);
/// assert_eq!(table[&5], vec![4, 6]);
/// assert_eq!(table[&6], vec![4, 5]);
/// ```
pub fn edge_table<A>(alleles: &[A]) -> EdgeTable<A>
where
    A: Clone + Eq + Hash,
{
    let n = alleles.len();
    let mut table: EdgeTable<A> = HashMap::with_capacity(n);
    for (i, allele) in alleles.iter().enumerate() {
        let previous = &alleles[(i + n - 1) % n];
        table
            .entry(allele.clone())
            .or_default()
            .push(previous.clone());
        table
            .entry(previous.clone())
            .or_default()
            .push(allele.clone());
    }
    table
}

/// Keeps only the edges of `left` that also appear in `right`.
pub fn double_edge_table<A>(left: &[A], right: &[A]) -> EdgeTable<A>
where
    A: Clone + Eq + Hash,
{
    let theirs = edge_table(right);
    let mut shared: EdgeTable<A> = HashMap::new();
    for (allele, adjacents) in edge_table(left) {
        let Some(other_adjacents) = theirs.get(&allele) else {
            continue;
        };
        let common: Vec<A> = adjacents
            .into_iter()
            .filter(|adjacent| other_adjacents.contains(adjacent))
            .collect();
        if !common.is_empty() {
            shared.insert(allele, common);
        }
    }
    shared
}

fn edge_child<A>(
    parent: &[A],
    mine: &EdgeTable<A>,
    theirs: &EdgeTable<A>,
    shared: &EdgeTable<A>,
    rng: &mut RandomNumberGenerator,
) -> Vec<A>
where
    A: Clone + Eq + Hash,
{
    let mut unseen: Vec<A> = parent.to_vec();
    let mut remaining: HashSet<A> = parent.iter().cloned().collect();
    let mut child = Vec::with_capacity(parent.len());
    let mut current: Option<A> = None;

    for _ in 0..parent.len() {
        let allele = match current.take() {
            Some(allele) => allele,
            None => match rng.choose(&unseen) {
                Some(allele) => allele.clone(),
                None => break,
            },
        };

        if let Some(position) = unseen.iter().position(|a| *a == allele) {
            unseen.swap_remove(position);
        }
        remaining.remove(&allele);

        let unvisited = |table: &EdgeTable<A>| -> Vec<A> {
            table
                .get(&allele)
                .map(|edges| {
                    edges
                        .iter()
                        .filter(|a| remaining.contains(*a))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default()
        };

        let double = unvisited(shared);
        current = if !double.is_empty() {
            rng.choose(&double).cloned()
        } else {
            let mut single = unvisited(mine);
            single.extend(unvisited(theirs));
            rng.choose(&single).cloned()
        };

        child.push(allele);
    }

    child
}

/// Partitions positions into the cycles used by cycle crossover.
///
/// From each unvisited index `i` the walk jumps to the position in `left`
/// holding `right[i]`. A walk also ends when `right[i]` does not occur in
/// `left` at all.
pub fn cycles<A>(left: &[A], right: &[A]) -> Vec<Vec<usize>>
where
    A: Eq + Hash,
{
    let left_index = index_by_value(left);
    let mut seen = vec![false; left.len()];
    let mut cycles = Vec::new();

    for start in 0..left.len() {
        let mut cycle = Vec::new();
        let mut i = start;
        while !seen[i] {
            cycle.push(i);
            seen[i] = true;
            match left_index.get(&right[i]) {
                Some(&next) => i = next,
                None => break,
            }
        }
        if !cycle.is_empty() {
            cycles.push(cycle);
        }
    }

    cycles
}

fn index_by_value<A: Eq + Hash>(alleles: &[A]) -> HashMap<&A, usize> {
    alleles.iter().enumerate().map(|(i, a)| (a, i)).collect()
}

impl<A> Chromosome for PermutationChromosome<A>
where
    A: Clone + Eq + Hash + Debug + Send + Sync + 'static,
{
    fn size(&self) -> usize {
        self.alleles.len()
    }

    fn mutate(&self, rng: &mut RandomNumberGenerator) -> Self {
        self.derive(self.mutation.apply(&self.alleles, rng))
    }

    fn crossover(&self, other: &Self, rng: &mut RandomNumberGenerator) -> Result<(Self, Self)> {
        match self.crossover {
            PermutationCrossover::PartiallyMapped => self.crossover_pmx(other, rng),
            PermutationCrossover::Edge => self.crossover_edge(other, rng),
            PermutationCrossover::Order => self.crossover_order(other, rng),
            PermutationCrossover::Cycle => self.crossover_cycle(other, rng),
        }
    }
}

impl<A: PartialEq> PartialEq for PermutationChromosome<A> {
    fn eq(&self, other: &Self) -> bool {
        self.alleles == other.alleles
    }
}

impl<A: Eq> Eq for PermutationChromosome<A> {}
