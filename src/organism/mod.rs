//! # Organisms
//!
//! An organism is one candidate solution: a genotype of named chromosomes, an
//! identity unique within its [`OrganismKind`], an age, and a cache of the
//! phenotypes it has been decoded into.
//!
//! Organisms are never modified by variation. `mutate` and `crossover`
//! return new organisms with fresh identities and age 1. Only the age and the
//! phenotype cache change over an organism's lifetime, both behind interior
//! mutability so organisms can be shared as `Arc<Organism<P>>` between a
//! population and the selections drawn from it.

mod gene;
mod kind;

pub use gene::Gene;
pub use kind::{Comparator, Decoder, OrganismKind, OrganismKindBuilder};

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::trace;

use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::evolution::challenge::{Challenge, ChallengeKey};
use crate::phenotype::Phenotype;
use crate::rng::RandomNumberGenerator;

/// Named chromosomes making up an organism.
pub type Genotype = BTreeMap<String, Box<dyn Gene>>;

pub struct Organism<P: Phenotype> {
    kind: Arc<OrganismKind<P>>,
    genotype: Genotype,
    id: u64,
    age: AtomicU64,
    phenotypes: Mutex<HashMap<ChallengeKey, P>>,
}

impl<P: Phenotype> Organism<P> {
    /// Creates an organism with every declared chromosome drawn at random.
    ///
    /// # Errors
    ///
    /// Propagates errors from the chromosome factories.
    pub fn new(kind: &Arc<OrganismKind<P>>, rng: &mut RandomNumberGenerator) -> Result<Self> {
        let genotype = kind
            .genotype()
            .iter()
            .map(|(name, factory)| Ok((name.clone(), factory(rng)?)))
            .collect::<Result<Genotype>>()?;
        Ok(Self::assemble(kind, genotype))
    }

    /// Creates an organism from explicit chromosomes.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` unless `genotype` holds exactly the
    /// chromosomes the kind declares.
    pub fn with_genotype(kind: &Arc<OrganismKind<P>>, genotype: Genotype) -> Result<Self> {
        let declared = kind.chromosome_names().count();
        let matches = genotype.len() == declared
            && kind
                .chromosome_names()
                .all(|name| genotype.contains_key(name));
        if !matches {
            return Err(GeneticError::InvariantViolation(format!(
                "genotype {:?} does not match the chromosomes of `{}` ({:?})",
                genotype.keys().collect::<Vec<_>>(),
                kind.name(),
                kind.chromosome_names().collect::<Vec<_>>()
            )));
        }
        Ok(Self::assemble(kind, genotype))
    }

    fn assemble(kind: &Arc<OrganismKind<P>>, genotype: Genotype) -> Self {
        Self {
            kind: Arc::clone(kind),
            genotype,
            id: kind.next_id(),
            age: AtomicU64::new(1),
            phenotypes: Mutex::new(HashMap::new()),
        }
    }

    /// Sets the starting age.
    pub fn with_age(self, age: u64) -> Self {
        self.age.store(age, AtomicOrdering::Relaxed);
        self
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn age(&self) -> u64 {
        self.age.load(AtomicOrdering::Relaxed)
    }

    pub(crate) fn grow_older(&self) {
        self.age.fetch_add(1, AtomicOrdering::Relaxed);
    }

    pub fn kind(&self) -> &Arc<OrganismKind<P>> {
        &self.kind
    }

    pub fn genotype(&self) -> &Genotype {
        &self.genotype
    }

    /// Typed access to a named chromosome, for use inside decoders.
    ///
    /// # Errors
    ///
    /// Returns `NoSuchChromosome` for an undeclared name and `TypeMismatch`
    /// if the chromosome is not a `C`.
    pub fn chromosome<C: Chromosome>(&self, name: &str) -> Result<&C> {
        let gene = self
            .genotype
            .get(name)
            .ok_or_else(|| GeneticError::NoSuchChromosome(name.to_string()))?;
        gene.as_any()
            .downcast_ref::<C>()
            .ok_or_else(|| GeneticError::TypeMismatch {
                expected: std::any::type_name::<C>().to_string(),
                found: gene.type_label().to_string(),
            })
    }

    /// Decodes the organism for `challenge`.
    ///
    /// The decoder runs on the first call for a given challenge; later calls
    /// return the cached phenotype.
    ///
    /// # Errors
    ///
    /// Returns `NoDecoder` if the kind registers no decoder for the challenge
    /// instance or its type, and propagates decoder errors.
    pub fn decode<C: Challenge<P> + ?Sized>(&self, challenge: &C) -> Result<P> {
        let key = challenge.key();
        if let Some(phenotype) = self.cached(&key) {
            return Ok(phenotype);
        }

        // the lock is released while decoding so a decoder may decode
        // this organism for another challenge
        let decoder = Arc::clone(self.kind.decoder(&key)?);
        let phenotype = decoder(self)?;
        trace!(organism = self.id, challenge = %key, "decoded phenotype");

        let mut cache = self.phenotypes.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(cache.entry(key).or_insert(phenotype).clone())
    }

    fn cached(&self, key: &ChallengeKey) -> Option<P> {
        self.phenotypes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// A new organism with every chromosome mutated by its bound operator.
    pub fn mutate(&self, rng: &mut RandomNumberGenerator) -> Self {
        let genotype = self
            .genotype
            .iter()
            .map(|(name, gene)| (name.clone(), gene.mutate_gene(rng)))
            .collect();
        Self::assemble(&self.kind, genotype)
    }

    /// Crosses every chromosome with its namesake in `other`. The first
    /// child takes the first result of each pair, the second child the second.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` if `other` is of another kind, and propagates
    /// chromosome crossover errors.
    pub fn crossover(
        &self,
        other: &Self,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(Self, Self)> {
        self.ensure_same_kind(other)?;

        let mut first = Genotype::new();
        let mut second = Genotype::new();
        for (name, gene) in &self.genotype {
            let partner = other
                .genotype
                .get(name)
                .ok_or_else(|| GeneticError::NoSuchChromosome(name.clone()))?;
            let (child1, child2) = gene.crossover_gene(partner.as_ref(), rng)?;
            first.insert(name.clone(), child1);
            second.insert(name.clone(), child2);
        }

        Ok((
            Self::assemble(&self.kind, first),
            Self::assemble(&self.kind, second),
        ))
    }

    /// Compares two organisms with the ordering declared on their kind.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` across kinds and `NotImplemented` if the kind
    /// declares no ordering.
    pub fn compare(&self, other: &Self) -> Result<Ordering> {
        self.ensure_same_kind(other)?;
        let comparator = self.kind.comparator().ok_or_else(|| {
            GeneticError::NotImplemented(format!(
                "ordering for organisms of `{}`",
                self.kind.name()
            ))
        })?;
        Ok(comparator(self, other))
    }

    fn ensure_same_kind(&self, other: &Self) -> Result<()> {
        if !Arc::ptr_eq(&self.kind, &other.kind) {
            return Err(GeneticError::TypeMismatch {
                expected: self.kind.name().to_string(),
                found: other.kind.name().to_string(),
            });
        }
        Ok(())
    }
}

impl<P: Phenotype> fmt::Debug for Organism<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Organism")
            .field("kind", &self.kind.name())
            .field("id", &self.id)
            .field("age", &self.age())
            .field("genotype", &self.genotype)
            .finish()
    }
}
