//! # Population
//!
//! A `Population` owns a fixed number of organisms of one kind and evolves
//! them generation by generation. One [`cycle`](Population::cycle) ages every
//! organism, breeds offspring from a mating pool and lets the survivor
//! selector cut the grown population back to its configured size.
//! [`solve`](Population::solve) repeats cycles until a challenge is solved or
//! the iteration budget runs out.
//!
//! All generational operations hold the population's lock for their whole
//! duration, so a population can be shared between threads and cycled from
//! any of them.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use genetics::chromosome::BitStringChromosome;
//! use genetics::evolution::{Challenge, Population, PopulationOptions, SharedChallenge};
//! use genetics::organism::{Organism, OrganismKind};
//! use genetics::rng::RandomNumberGenerator;
//! use genetics::selection::{FitnessProportionalSelector, FitnessSelector};
//!
//! /// Counts set bits.
//! struct OneMax;
//!
//! impl Challenge<usize> for OneMax {
//!     fn solved(&self, organism: &Organism<usize>) -> genetics::error::Result<bool> {
//!         Ok(organism.decode(self)? == 16)
//!     }
//! }
//!
//! let kind = OrganismKind::<usize>::builder("bits")
//!     .chromosome("bits", |rng| Ok(BitStringChromosome::random(16, rng)))
//!     .decoder::<OneMax, _>(|o| Ok(o.chromosome::<BitStringChromosome>("bits")?.count_ones()))
//!     .build()?;
//!
//! let challenge: SharedChallenge<usize> = Arc::new(OneMax);
//! let options = PopulationOptions::builder()
//!     .with_size(30)
//!     .with_mutation(0.3)
//!     .with_mating_pool_selector(Arc::new(FitnessProportionalSelector::new(Arc::clone(&challenge))))
//!     .with_mating_pool_size(20)
//!     .with_survivor_selector(Arc::new(FitnessSelector::new(Arc::clone(&challenge))))
//!     .build()?;
//!
//! let mut rng = RandomNumberGenerator::from_seed(42);
//! let population = Population::new(&kind, options, &mut rng)?;
//! let best = population.solve(&challenge, 200, &mut rng)?;
//! assert!(best.decode(challenge.as_ref())? <= 16);
//! # Ok::<(), genetics::error::GeneticError>(())
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use crate::error::{GeneticError, OptionExt, Result};
use crate::evolution::challenge::SharedChallenge;
use crate::evolution::options::PopulationOptions;
use crate::organism::{Organism, OrganismKind};
use crate::phenotype::Phenotype;
use crate::rng::RandomNumberGenerator;
use crate::selection::{FitnessSelector, RandomSelector, Selector};

struct Generation<P: Phenotype> {
    organisms: Vec<Arc<Organism<P>>>,
    age: u64,
}

pub struct Population<P: Phenotype> {
    kind: Arc<OrganismKind<P>>,
    options: PopulationOptions<P>,
    state: Mutex<Generation<P>>,
    // one per challenge instance, matched by pointer
    fitness_selectors: Mutex<Vec<FitnessSelector<P>>>,
}

impl<P: Phenotype> Population<P> {
    /// Creates a population of `options.size()` random organisms.
    ///
    /// # Errors
    ///
    /// Propagates errors from the chromosome factories of `kind`.
    pub fn new(
        kind: &Arc<OrganismKind<P>>,
        options: PopulationOptions<P>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Self> {
        let organisms = (0..options.size())
            .map(|_| Organism::new(kind, rng).map(Arc::new))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::assemble(kind, options, organisms))
    }

    /// Creates a population from a prepared first generation.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` unless exactly `options.size()` organisms
    /// are given, and `TypeMismatch` if one of them is of another kind.
    pub fn with_organisms(
        kind: &Arc<OrganismKind<P>>,
        options: PopulationOptions<P>,
        organisms: Vec<Arc<Organism<P>>>,
    ) -> Result<Self> {
        if organisms.len() != options.size() {
            return Err(GeneticError::InvariantViolation(format!(
                "initial generation holds {} organisms, the population size is {}",
                organisms.len(),
                options.size()
            )));
        }
        if let Some(stranger) = organisms
            .iter()
            .find(|organism| !Arc::ptr_eq(organism.kind(), kind))
        {
            return Err(GeneticError::TypeMismatch {
                expected: kind.name().to_string(),
                found: stranger.kind().name().to_string(),
            });
        }
        Ok(Self::assemble(kind, options, organisms))
    }

    fn assemble(
        kind: &Arc<OrganismKind<P>>,
        options: PopulationOptions<P>,
        organisms: Vec<Arc<Organism<P>>>,
    ) -> Self {
        Self {
            kind: Arc::clone(kind),
            options,
            state: Mutex::new(Generation { organisms, age: 1 }),
            fitness_selectors: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Generation<P>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn kind(&self) -> &Arc<OrganismKind<P>> {
        &self.kind
    }

    pub fn options(&self) -> &PopulationOptions<P> {
        &self.options
    }

    /// Number of generations since creation or the last `solve`, starting at 1.
    pub fn age(&self) -> u64 {
        self.lock().age
    }

    /// Number of live organisms. Equals the configured size except between
    /// a [`vary`](Self::vary) and the next cycle.
    pub fn len(&self) -> usize {
        self.lock().organisms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().organisms.is_empty()
    }

    /// A snapshot of the live organisms.
    pub fn organisms(&self) -> Vec<Arc<Organism<P>>> {
        self.lock().organisms.clone()
    }

    /// Breeds offspring from a freshly selected mating pool and adds them to
    /// the live organisms, without selecting survivors. Returns the number of
    /// children added.
    ///
    /// # Errors
    ///
    /// Propagates errors from the mating pool selector and the breed strategy.
    pub fn vary(&self, rng: &mut RandomNumberGenerator) -> Result<usize> {
        let mut state = self.lock();
        self.vary_generation(&mut state, rng)
    }

    /// Runs one generation: ages every organism, varies, and keeps the
    /// survivors.
    ///
    /// # Errors
    ///
    /// Propagates selector and breed strategy errors. The organisms have
    /// already aged when an error is returned, but the generation is unchanged.
    pub fn cycle(&self, rng: &mut RandomNumberGenerator) -> Result<()> {
        let mut state = self.lock();
        self.cycle_generation(&mut state, rng)
    }

    /// Cycles until the fittest organism solves `challenge`, or at most
    /// `iterations - 1` times, and returns the fittest organism found last.
    ///
    /// Resets the population age to 1. With fewer than two iterations the
    /// population is not cycled at all.
    ///
    /// # Errors
    ///
    /// Propagates challenge, selector and breed strategy errors.
    pub fn solve(
        &self,
        challenge: &SharedChallenge<P>,
        iterations: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Arc<Organism<P>>> {
        let mut state = self.lock();
        state.age = 1;
        info!(challenge = %challenge.key(), iterations, "solving");

        let mut best = None;
        for _ in 1..iterations {
            let fittest = self.fittest_of(challenge, &state.organisms)?;
            if challenge.solved(&fittest)? {
                info!(
                    generation = state.age,
                    organism = fittest.id(),
                    "challenge solved"
                );
                return Ok(fittest);
            }
            best = Some(fittest);
            self.cycle_generation(&mut state, rng)?;
        }

        match best {
            Some(best) => {
                info!(generation = state.age, "iteration budget exhausted");
                Ok(best)
            }
            None => self.fittest_of(challenge, &state.organisms),
        }
    }

    /// The `n` fittest live organisms, fittest first.
    ///
    /// # Errors
    ///
    /// Returns `SelectionImpossible` if `n` exceeds the number of organisms,
    /// and propagates challenge errors.
    pub fn best(&self, challenge: &SharedChallenge<P>, n: usize) -> Result<Vec<Arc<Organism<P>>>> {
        let state = self.lock();
        self.best_of(challenge, n, &state.organisms)
    }

    /// The fittest live organism.
    ///
    /// # Errors
    ///
    /// Returns `EmptyPopulation` if there are no organisms, and propagates
    /// challenge errors.
    pub fn fittest(&self, challenge: &SharedChallenge<P>) -> Result<Arc<Organism<P>>> {
        let state = self.lock();
        self.fittest_of(challenge, &state.organisms)
    }

    /// The `n` fittest of `organisms`, ranked with this population's cached
    /// fitness selector for the `challenge` instance.
    ///
    /// # Errors
    ///
    /// Returns `SelectionImpossible` if `n` exceeds the number of organisms,
    /// and propagates challenge errors.
    pub fn best_of(
        &self,
        challenge: &SharedChallenge<P>,
        n: usize,
        organisms: &[Arc<Organism<P>>],
    ) -> Result<Vec<Arc<Organism<P>>>> {
        self.fitness_selector(challenge).fittest(n, organisms)
    }

    /// `n` distinct live organisms drawn uniformly at random.
    ///
    /// # Errors
    ///
    /// Returns `SelectionImpossible` if `n` exceeds the number of organisms.
    pub fn random(
        &self,
        n: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Arc<Organism<P>>>> {
        let state = self.lock();
        RandomSelector.select(n, &state.organisms, rng)
    }

    fn fittest_of(
        &self,
        challenge: &SharedChallenge<P>,
        organisms: &[Arc<Organism<P>>],
    ) -> Result<Arc<Organism<P>>> {
        if organisms.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }
        self.best_of(challenge, 1, organisms)?
            .pop()
            .ok_or_else_genetic(|| GeneticError::EmptyPopulation)
    }

    fn fitness_selector(&self, challenge: &SharedChallenge<P>) -> FitnessSelector<P> {
        let mut selectors = self
            .fitness_selectors
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(selector) = selectors
            .iter()
            .find(|selector| Arc::ptr_eq(selector.challenge(), challenge))
        {
            return selector.clone();
        }

        let selector = FitnessSelector::new(Arc::clone(challenge))
            .with_parallel_threshold(self.options.parallel_threshold());
        selectors.push(selector.clone());
        selector
    }

    fn offspring(
        &self,
        organisms: &[Arc<Organism<P>>],
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Arc<Organism<P>>>> {
        let parents = self.options.mating_pool_selector().select(
            self.options.mating_pool_size(),
            organisms,
            rng,
        )?;
        self.options
            .breed_strategy()
            .breed(parents, self.options.mutation(), rng)
    }

    fn vary_generation(
        &self,
        state: &mut Generation<P>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<usize> {
        let children = self.offspring(&state.organisms, rng)?;
        let count = children.len();
        state.organisms.extend(children);
        Ok(count)
    }

    fn cycle_generation(
        &self,
        state: &mut Generation<P>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<()> {
        for organism in &state.organisms {
            organism.grow_older();
        }

        let children = self.offspring(&state.organisms, rng)?;
        let offspring = children.len();
        let mut grown = Vec::with_capacity(state.organisms.len() + offspring);
        grown.extend(state.organisms.iter().cloned());
        grown.extend(children);

        state.organisms = self
            .options
            .survivor_selector()
            .select(self.options.size(), &grown, rng)?;
        state.age += 1;

        debug!(
            generation = state.age,
            offspring,
            size = state.organisms.len(),
            "cycled population"
        );
        Ok(())
    }
}

impl<P: Phenotype> fmt::Debug for Population<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("Population")
            .field("kind", &self.kind.name())
            .field("age", &state.age)
            .field("organisms", &state.organisms.len())
            .field("options", &self.options)
            .finish()
    }
}
