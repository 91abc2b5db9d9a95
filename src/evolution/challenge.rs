//! # Challenge
//!
//! A challenge is the objective an organism is scored against. It is pure:
//! the same organism scored against the same challenge always yields the same
//! fitness, which is what makes the per-organism phenotype cache sound.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::organism::Organism;
use crate::phenotype::Phenotype;

/// Stable identifier of a challenge: its concrete type plus an optional
/// instance name. Decoders are registered against it and phenotypes cached by it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChallengeKey {
    kind: &'static str,
    name: String,
}

impl ChallengeKey {
    pub fn new(kind: &'static str, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    /// Key for every instance of challenge type `C` that carries no name.
    pub fn of<C: ?Sized>() -> Self {
        Self::new(std::any::type_name::<C>(), "")
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ChallengeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}({})", self.kind, self.name)
        }
    }
}

/// Scoring policy for organisms whose decoders produce `P`.
///
/// Only `fitness` is commonly overridden. By default it decodes the organism
/// for this challenge and uses [`Phenotype::score`].
///
/// # Examples
///
/// ```
/// use genetics::evolution::Challenge;
/// use genetics::error::Result;
/// use genetics::organism::Organism;
///
/// /// Number of attacking queen pairs; zero conflicts is a solution.
/// struct Queens;
///
/// impl Challenge<i64> for Queens {
///     fn fitness(&self, organism: &Organism<i64>) -> Result<f64> {
///         Ok(-(organism.decode(self)? as f64))
///     }
///
///     fn solved(&self, organism: &Organism<i64>) -> Result<bool> {
///         Ok(organism.decode(self)? == 0)
///     }
/// }
/// ```
pub trait Challenge<P: Phenotype>: Send + Sync {
    /// Instance name. The type and the name together identify a challenge
    /// instance for per-instance decoders and the phenotype cache, so two
    /// instances of one type that decode differently must have different
    /// names.
    fn name(&self) -> &str {
        ""
    }

    fn key(&self) -> ChallengeKey {
        ChallengeKey::new(std::any::type_name::<Self>(), self.name())
    }

    /// Fitness of `organism`. Higher is better.
    fn fitness(&self, organism: &Organism<P>) -> Result<f64> {
        Ok(organism.decode(self)?.score())
    }

    /// Whether `organism` solves the challenge. Never, unless overridden.
    fn solved(&self, _organism: &Organism<P>) -> Result<bool> {
        Ok(false)
    }
}

/// A challenge shared between selectors and populations.
pub type SharedChallenge<P> = Arc<dyn Challenge<P>>;
