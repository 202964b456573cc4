//! Core trait definitions for the solver engine.
//!
//! [`Genome`] and [`Problem`] define the contract between the generic
//! generational loop and a concrete problem domain. The engine never looks
//! inside a representation: it only sorts by fitness, asks whether a genome
//! satisfies the completion predicate, and hands genomes to the problem's
//! operators.

use super::config::InitialPopulation;
use crate::error::SolverError;
use crate::random::EvoRng;

/// Marker trait for fitness values.
///
/// Fitness must support comparison and be cheaply copyable.
/// Lower fitness is considered better (minimization).
///
/// Built-in implementations exist for `f64`, `f32` and `u32`.
pub trait Fitness: PartialOrd + Copy + Send + Sync + std::fmt::Debug + 'static {
    /// Converts the fitness to `f64` for statistics.
    fn to_f64(self) -> f64;
}

impl Fitness for f64 {
    fn to_f64(self) -> f64 {
        self
    }
}

impl Fitness for f32 {
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Fitness for u32 {
    fn to_f64(self) -> f64 {
        self as f64
    }
}

/// Distance and error of a genome relative to the known global optimum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimumMetrics {
    /// Euclidean distance to the optimum point.
    pub distance: f64,
    /// Relative (or absolute, for a zero optimum) error of the fitness.
    pub relative_error: f64,
}

/// A candidate solution held by the population.
///
/// Genomes are immutable values: fitness is computed once at construction
/// and every operator produces a new genome instead of editing one in place.
pub trait Genome: Clone + Send + Sync + std::fmt::Debug {
    /// The fitness type. Must implement [`Fitness`].
    type Fitness: Fitness;

    /// Returns the fitness computed at construction.
    fn fitness(&self) -> Self::Fitness;

    /// Generation in which this genome was created.
    fn iteration_born(&self) -> usize;

    /// Whether this genome satisfies the domain's solved predicate.
    ///
    /// Domains with an exact solved state (zero collisions) ignore
    /// `threshold`.
    fn is_converged(&self, threshold: f64) -> bool;

    /// Distance and error to the known optimum, for domains that have one.
    fn optimum_metrics(&self) -> Option<OptimumMetrics> {
        None
    }

    /// Self-adaptive mutation step sizes, when the genome carries them.
    fn step_sizes(&self) -> Option<&[f64]> {
        None
    }
}

/// Defines an optimization domain and its selected operators.
///
/// A problem value is moved into the solver at construction and never
/// mutated afterwards. It owns the operator identifiers (which recombination,
/// which mutation) and any domain knobs; the solver decides *when* operators
/// run, the problem decides *what* they do.
///
/// # Thread Safety
///
/// `Problem` must be `Send + Sync` so independent runs of the same problem
/// can be distributed across threads (see [`crate::engine::experiment`]).
pub trait Problem: Send + Sync {
    /// The genome type for this problem.
    type Genome: Genome;

    /// Checks the domain knobs. Called once by the solver constructor.
    fn validate(&self) -> Result<(), SolverError> {
        Ok(())
    }

    /// Checks that a caller-supplied genome belongs to this problem.
    fn check_genome(&self, _genome: &Self::Genome) -> Result<(), SolverError> {
        Ok(())
    }

    /// Creates one member of the initial population.
    fn create_genome(
        &self,
        method: InitialPopulation,
        generation: usize,
        rng: &mut EvoRng,
    ) -> Result<Self::Genome, SolverError>;

    /// Recombines two parents into two offspring born at `generation`.
    fn recombine(
        &self,
        parent1: &Self::Genome,
        parent2: &Self::Genome,
        generation: usize,
        rng: &mut EvoRng,
    ) -> Result<(Self::Genome, Self::Genome), SolverError>;

    /// Returns a mutated copy of `genome` born at `generation`.
    fn mutate(
        &self,
        genome: &Self::Genome,
        generation: usize,
        rng: &mut EvoRng,
    ) -> Result<Self::Genome, SolverError>;

    /// Copies `genome` with its birth generation reset to `generation`.
    fn reborn(&self, genome: &Self::Genome, generation: usize) -> Self::Genome;

    /// Whether genomes report [`Genome::optimum_metrics`].
    fn tracks_optimum(&self) -> bool {
        false
    }

    /// Whether genomes carry self-adaptive step sizes.
    fn tracks_step_sizes(&self) -> bool {
        false
    }
}
