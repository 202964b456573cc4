//! Generic evolutionary engine.
//!
//! The engine is domain-agnostic: a problem plugs in by implementing
//! [`Problem`] for its [`Genome`] type, and the same [`Solver`] drives both
//! the eight-queens board and the continuous benchmark functions.
//!
//! # Core Traits
//!
//! - [`Genome`]: an immutable candidate with eagerly computed fitness
//! - [`Problem`]: genome creation plus the selected recombination and
//!   mutation operators
//!
//! # Key Types
//!
//! - [`SolverConfig`]: frozen engine parameters (builder, presets, validation)
//! - [`Solver`]: state machine and generational loop
//! - [`SolverStatistics`]: per-generation time series
//! - [`experiment::run_batch`]: independent seeded runs
//!
//! # References
//!
//! - Eiben & Smith (2015), *Introduction to Evolutionary Computing*
//! - Beyer & Schwefel (2002), "Evolution strategies — A comprehensive
//!   introduction"

mod config;
pub mod experiment;
mod population;
mod selection;
mod solver;
mod statistics;
mod types;

pub use config::{CompletionCondition, InitialPopulation, Mechanism, SolverConfig, SurvivorSelection};
pub use population::Population;
pub use selection::{sample_candidates, ParentSelection, UNIFORM_RANDOM_MAX_ATTEMPTS};
pub use solver::{Solver, SolverState};
pub use statistics::{AgeSeries, ChanceCounter, FitnessSeries, SolverStatistics, SummarySeries};
pub use types::{Fitness, Genome, OptimumMetrics, Problem};
