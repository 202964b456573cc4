//! Evolutionary solver core.
//!
//! A generic, step-driven population engine with two problem domains:
//!
//! - **Eight queens** ([`queens`]): permutation genome, diagonal-collision
//!   fitness, cut-and-crossfill / cycle crossover, swap mutations.
//! - **Benchmark functions** ([`functions`]): real-vector genome over Ackley,
//!   Rastrigin, Rosenbrock and Schwefel, with Gaussian, uniform and
//!   self-adaptive mutation.
//!
//! The [`engine::Solver`] runs either a steady-state genetic algorithm or a
//! (μ+λ)/(μ,λ) evolution strategy. Callers drive it one generation at a time
//! with [`engine::Solver::step`], or to completion with
//! [`engine::Solver::run`], and read per-generation statistics between steps.
//!
//! # Features
//!
//! - `serde`: serialization of configuration, problems and statistics
//! - `parallel`: batch runs on rayon's thread pool
//! - `wasm`: JavaScript bindings (`QueensSolverHandle`, `FunctionSolverHandle`)

pub mod engine;
pub mod error;
pub mod functions;
pub mod operators;
pub mod queens;
pub mod random;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::SolverError;
pub use random::{create_rng, EvoRng};
