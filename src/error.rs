//! # Error Types
//!
//! This module defines the error type shared by every fallible operation in
//! the library. All errors are local contract violations: a bad configuration,
//! a chromosome built from invalid alleles, operands that cannot be combined,
//! or a selection that asks for more organisms than exist.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use genetics::error::{GeneticError, Result};
//!
//! fn validate_size(size: usize) -> Result<usize> {
//!     if size < 1 {
//!         return Err(GeneticError::Configuration(
//!             "Population size must be at least 1".to_string(),
//!         ));
//!     }
//!     Ok(size)
//! }
//!
//! assert!(validate_size(0).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use genetics::error::{GeneticError, OptionExt};
//!
//! fn youngest(ages: &[u64]) -> genetics::error::Result<u64> {
//!     ages.iter().min().cloned().ok_or_else_genetic(|| GeneticError::EmptyPopulation)
//! }
//! ```

use thiserror::Error;

/// Represents errors that can occur in the evolutionary engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneticError {
    /// An invalid configuration was provided: bad sizes, missing selectors,
    /// a mutation rate outside `[0, 1]`, or inverted bounds.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A value was constructed from input that breaks its invariant, such as a
    /// permutation with duplicate alleles.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// The operands of a crossover or comparison are not of the same type.
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// The operands of a crossover have different sizes.
    #[error("Size mismatch: {left} != {right}")]
    SizeMismatch { left: usize, right: usize },

    /// An operation has no implementation for the receiver.
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// No decoder is registered for the challenge, neither by name nor by type.
    #[error("No decoder registered on organism `{organism}` for challenge `{challenge}`")]
    NoDecoder { organism: String, challenge: String },

    /// A decoder asked for a chromosome the genotype does not declare.
    #[error("No chromosome named `{0}` in genotype")]
    NoSuchChromosome(String),

    /// More organisms were requested than can be drawn without replacement.
    #[error("Cannot select {requested} organisms from {available}")]
    SelectionImpossible { requested: usize, available: usize },

    /// An operation that needs at least one organism got none.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// A challenge produced a fitness value that cannot be ranked.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),
}

/// A specialized Result type for evolutionary operations.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, GeneticError>` using
    /// a closure to generate the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = GeneticError::SizeMismatch { left: 3, right: 4 };
        assert_eq!(err.to_string(), "Size mismatch: 3 != 4");

        let err = GeneticError::SelectionImpossible {
            requested: 5,
            available: 2,
        };
        assert_eq!(err.to_string(), "Cannot select 5 organisms from 2");
    }

    #[test]
    fn test_option_ext() {
        let value: Option<i32> = None;
        let result = value.ok_or_else_genetic(|| GeneticError::EmptyPopulation);
        assert_eq!(result, Err(GeneticError::EmptyPopulation));

        let value = Some(7);
        assert_eq!(value.ok_or_else_genetic(|| GeneticError::EmptyPopulation), Ok(7));
    }
}
