//! # genetics
//!
//! A generic evolutionary algorithm engine. Candidate solutions are
//! [organisms](organism) made of named [chromosomes](chromosome). A
//! [challenge](evolution::Challenge) decodes and scores them, and a
//! [population](evolution::Population) evolves them through
//! [selection] and [breeding](strategy).
pub mod chromosome;
pub mod error;
pub mod evolution;
pub mod organism;
pub mod phenotype;
pub mod rng;
pub mod selection;
pub mod stats;
pub mod strategy;

#[cfg(test)]
mod test_support;

// Re-export commonly used types for convenience
pub use chromosome::Chromosome;
pub use error::{GeneticError, OptionExt, Result};
pub use evolution::{Challenge, Population, PopulationOptions, SharedChallenge};
pub use organism::{Organism, OrganismKind};
pub use phenotype::Phenotype;
pub use rng::RandomNumberGenerator;
pub use selection::Selector;
pub use strategy::BreedStrategy;
