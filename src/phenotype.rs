//! # Phenotype Trait
//!
//! A phenotype is the value an organism decodes to for a particular
//! challenge: a tour length, a count of conflicts, a decoded parameter
//! vector. The `Phenotype` trait bounds that value so it can be cached on the
//! organism and shared across threads, and projects it onto a number through
//! `score`, which the default [`Challenge::fitness`](crate::evolution::Challenge::fitness)
//! uses directly.
//!
//! ## Example
//!
//! ```rust
//! use genetics::phenotype::Phenotype;
//!
//! #[derive(Clone, Debug)]
//! struct Route {
//!     stops: Vec<usize>,
//!     length: f64,
//! }
//!
//! impl Phenotype for Route {
//!     fn score(&self) -> f64 {
//!         // shorter routes are fitter
//!         -self.length
//!     }
//! }
//!
//! assert_eq!(3_i64.score(), 3.0);
//! ```

use std::fmt::Debug;

pub trait Phenotype: Clone + Debug + Send + Sync + 'static {
    /// Numeric projection of the decoded value. Higher is better.
    fn score(&self) -> f64;
}

macro_rules! numeric_phenotype {
    ($($ty:ty),*) => {
        $(
            impl Phenotype for $ty {
                fn score(&self) -> f64 {
                    *self as f64
                }
            }
        )*
    };
}

numeric_phenotype!(f64, f32, i64, i32, u64, u32, usize);

impl Phenotype for bool {
    fn score(&self) -> f64 {
        if *self {
            1.0
        } else {
            0.0
        }
    }
}
