//! # Evolution
//!
//! Challenges score organisms; populations evolve them against a challenge
//! according to their [`PopulationOptions`].
pub mod challenge;
pub mod options;
pub mod population;

pub use challenge::{Challenge, ChallengeKey, SharedChallenge};
pub use options::{PopulationOptions, PopulationOptionsBuilder};
pub use population::Population;
