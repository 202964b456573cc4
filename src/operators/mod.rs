//! Recombination and mutation operators, keyed by enum.
//!
//! - [`permutation`]: cut-and-crossfill and cycle crossover, swap mutations
//! - [`real`]: uniform, arithmetic, intermediate and discrete recombination;
//!   Gaussian, uniform and self-adaptive mutation
//!
//! Parent selection lives with the engine in [`crate::engine::ParentSelection`].

pub mod permutation;
pub mod real;

pub use permutation::{PermutationMutation, PermutationRecombination};
pub use real::{RealMutation, RealRecombination};
