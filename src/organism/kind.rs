use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;

use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::evolution::challenge::{Challenge, ChallengeKey};
use crate::organism::gene::Gene;
use crate::organism::Organism;
use crate::phenotype::Phenotype;
use crate::rng::RandomNumberGenerator;

pub(crate) type GeneFactory =
    Arc<dyn Fn(&mut RandomNumberGenerator) -> Result<Box<dyn Gene>> + Send + Sync>;

/// Decodes an organism into its phenotype for one challenge.
pub type Decoder<P> = Arc<dyn Fn(&Organism<P>) -> Result<P> + Send + Sync>;

/// The ordering relation used by tournament selection.
pub type Comparator<P> = Arc<dyn Fn(&Organism<P>, &Organism<P>) -> Ordering + Send + Sync>;

/// The declaration of one kind of organism.
///
/// A kind names the chromosomes every organism of that kind carries (and how
/// to create them at random), the decoders that turn an organism into a
/// phenotype for each challenge, and optionally the ordering relation
/// between organisms. It also owns the identity counter, so organism ids are
/// unique within a kind.
///
/// Kinds are immutable once built and shared through `Arc`.
///
/// # Examples
///
/// ```
/// use genetics::chromosome::{BitStringChromosome, Chromosome};
/// use genetics::evolution::Challenge;
/// use genetics::organism::{Organism, OrganismKind};
/// use genetics::rng::RandomNumberGenerator;
///
/// struct OneMax;
/// impl Challenge<usize> for OneMax {}
///
/// let kind = OrganismKind::<usize>::builder("one-max")
///     .chromosome("bits", |rng| Ok(BitStringChromosome::random(16, rng)))
///     .decoder::<OneMax, _>(|organism| {
///         Ok(organism.chromosome::<BitStringChromosome>("bits")?.count_ones())
///     })
///     .build()?;
///
/// let mut rng = RandomNumberGenerator::from_seed(5);
/// let organism = Organism::new(&kind, &mut rng)?;
/// assert!(organism.decode(&OneMax)? <= 16);
/// # Ok::<(), genetics::error::GeneticError>(())
/// ```
pub struct OrganismKind<P: Phenotype> {
    name: String,
    genotype: Vec<(String, GeneFactory)>,
    instance_decoders: HashMap<ChallengeKey, Decoder<P>>,
    type_decoders: HashMap<&'static str, Decoder<P>>,
    comparator: Option<Comparator<P>>,
    last_id: AtomicU64,
}

impl<P: Phenotype> OrganismKind<P> {
    pub fn builder(name: impl Into<String>) -> OrganismKindBuilder<P> {
        OrganismKindBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of the declared chromosomes, in declaration order.
    pub fn chromosome_names(&self) -> impl Iterator<Item = &str> {
        self.genotype.iter().map(|(name, _)| name.as_str())
    }

    pub(crate) fn genotype(&self) -> &[(String, GeneFactory)] {
        &self.genotype
    }

    pub(crate) fn comparator(&self) -> Option<&Comparator<P>> {
        self.comparator.as_ref()
    }

    /// Finds the decoder for `key`: first registered for that exact
    /// challenge instance, then for its type.
    pub(crate) fn decoder(&self, key: &ChallengeKey) -> Result<&Decoder<P>> {
        self.instance_decoders
            .get(key)
            .or_else(|| self.type_decoders.get(key.kind()))
            .ok_or_else(|| GeneticError::NoDecoder {
                organism: self.name.clone(),
                challenge: key.to_string(),
            })
    }

    /// Hands out the next identity. The first organism of a kind gets 1.
    pub(crate) fn next_id(&self) -> u64 {
        self.last_id.fetch_add(1, AtomicOrdering::SeqCst) + 1
    }
}

impl<P: Phenotype> fmt::Debug for OrganismKind<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrganismKind")
            .field("name", &self.name)
            .field("chromosomes", &self.chromosome_names().collect::<Vec<_>>())
            .field("instance_decoders", &self.instance_decoders.len())
            .field("type_decoders", &self.type_decoders.len())
            .field("ordered", &self.comparator.is_some())
            .finish()
    }
}

/// Builder for [`OrganismKind`].
pub struct OrganismKindBuilder<P: Phenotype> {
    name: String,
    genotype: Vec<(String, GeneFactory)>,
    instance_decoders: HashMap<ChallengeKey, Decoder<P>>,
    type_decoders: HashMap<&'static str, Decoder<P>>,
    comparator: Option<Comparator<P>>,
    rejected: Option<GeneticError>,
}

impl<P: Phenotype> OrganismKindBuilder<P> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            genotype: Vec::new(),
            instance_decoders: HashMap::new(),
            type_decoders: HashMap::new(),
            comparator: None,
            rejected: None,
        }
    }

    /// Declares a chromosome and the factory producing a random instance of it.
    pub fn chromosome<C, F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        C: Chromosome,
        F: Fn(&mut RandomNumberGenerator) -> Result<C> + Send + Sync + 'static,
    {
        let factory: GeneFactory =
            Arc::new(move |rng| factory(rng).map(|chromosome| Box::new(chromosome) as Box<dyn Gene>));
        self.genotype.push((name.into(), factory));
        self
    }

    /// Registers a decoder for every challenge of type `C`.
    pub fn decoder<C, F>(mut self, decoder: F) -> Self
    where
        C: Challenge<P>,
        F: Fn(&Organism<P>) -> Result<P> + Send + Sync + 'static,
    {
        self.type_decoders
            .insert(std::any::type_name::<C>(), Arc::new(decoder));
        self
    }

    /// Registers a decoder for one challenge instance. It takes precedence
    /// over a decoder registered for the instance's type.
    ///
    /// A challenge instance is identified by its type and its
    /// [`name`](Challenge::name), so the challenge must be named, and no two
    /// instances registered here may share a name. Otherwise `build` fails.
    pub fn decoder_for<C, F>(mut self, challenge: &C, decoder: F) -> Self
    where
        C: Challenge<P> + ?Sized,
        F: Fn(&Organism<P>) -> Result<P> + Send + Sync + 'static,
    {
        let key = challenge.key();
        if key.name().is_empty() {
            self.reject(format!(
                "instance decoder on `{}` for unnamed challenge `{}`",
                self.name, key
            ));
        } else if self.instance_decoders.contains_key(&key) {
            self.reject(format!(
                "challenge instance `{}` registered twice on `{}`",
                key, self.name
            ));
        } else {
            self.instance_decoders.insert(key, Arc::new(decoder));
        }
        self
    }

    /// Sets the ordering relation used when organisms compete in tournaments.
    pub fn ordering<F>(mut self, comparator: F) -> Self
    where
        F: Fn(&Organism<P>, &Organism<P>) -> Ordering + Send + Sync + 'static,
    {
        self.comparator = Some(Arc::new(comparator));
        self
    }

    fn reject(&mut self, message: String) {
        self.rejected
            .get_or_insert(GeneticError::Configuration(message));
    }

    /// # Errors
    ///
    /// Returns `Configuration` if no chromosome is declared, a name is
    /// declared twice, or an instance decoder was registered for an unnamed
    /// or already registered challenge.
    pub fn build(self) -> Result<Arc<OrganismKind<P>>> {
        if let Some(err) = self.rejected {
            return Err(err);
        }
        if self.genotype.is_empty() {
            return Err(GeneticError::Configuration(format!(
                "organism kind `{}` declares no chromosomes",
                self.name
            )));
        }

        let mut names = HashSet::new();
        for (name, _) in &self.genotype {
            if !names.insert(name.as_str()) {
                return Err(GeneticError::Configuration(format!(
                    "chromosome `{}` declared twice on `{}`",
                    name, self.name
                )));
            }
        }

        Ok(Arc::new(OrganismKind {
            name: self.name,
            genotype: self.genotype,
            instance_decoders: self.instance_decoders,
            type_decoders: self.type_decoders,
            comparator: self.comparator,
            last_id: AtomicU64::new(0),
        }))
    }
}
