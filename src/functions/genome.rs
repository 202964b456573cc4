//! Real-vector genome.

use super::benchmark::BenchmarkFunction;
use crate::engine::{Genome, OptimumMetrics};
use crate::error::SolverError;
use std::fmt;

/// The function being minimized and its dimensionality.
///
/// Two genomes can only be recombined when their objectives are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Objective {
    pub function: BenchmarkFunction,
    pub dimensions: usize,
}

impl Objective {
    pub const fn new(function: BenchmarkFunction, dimensions: usize) -> Self {
        Self {
            function,
            dimensions,
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}d)", self.function, self.dimensions)
    }
}

/// A point in the function's domain, with optional self-adaptive step sizes.
///
/// Fitness is the function value, evaluated once at construction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FunctionGenome {
    genes: Vec<f64>,
    step_sizes: Option<Vec<f64>>,
    fitness: f64,
    iteration_born: usize,
    objective: Objective,
}

impl FunctionGenome {
    /// Creates a genome without step sizes.
    ///
    /// # Errors
    /// [`SolverError::DimensionMismatch`] if `genes.len()` differs from
    /// `objective.dimensions`.
    pub fn new(genes: Vec<f64>, objective: Objective, iteration_born: usize) -> Result<Self, SolverError> {
        Self::with_step_sizes(genes, None, objective, iteration_born)
    }

    /// Creates a genome with optional step sizes.
    ///
    /// # Errors
    /// [`SolverError::DimensionMismatch`] if `genes` or `step_sizes` have a
    /// length other than `objective.dimensions`.
    pub fn with_step_sizes(
        genes: Vec<f64>,
        step_sizes: Option<Vec<f64>>,
        objective: Objective,
        iteration_born: usize,
    ) -> Result<Self, SolverError> {
        let expected = objective.dimensions;
        if genes.len() != expected {
            return Err(SolverError::DimensionMismatch {
                expected,
                actual: genes.len(),
            });
        }
        if let Some(steps) = &step_sizes {
            if steps.len() != expected {
                return Err(SolverError::DimensionMismatch {
                    expected,
                    actual: steps.len(),
                });
            }
        }

        let fitness = objective.function.evaluate(&genes);
        Ok(Self {
            genes,
            step_sizes,
            fitness,
            iteration_born,
            objective,
        })
    }

    pub fn genes(&self) -> &[f64] {
        &self.genes
    }

    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Euclidean distance to the function's global minimum.
    pub fn distance_to_global_minimum(&self) -> f64 {
        self.objective.function.distance_to_global_minimum(&self.genes)
    }

    /// Relative error of the fitness against the optimal value.
    pub fn relative_error(&self) -> f64 {
        self.objective.function.relative_error(self.fitness)
    }

    /// Fails unless both genomes share the same objective.
    pub fn check_compatible(&self, other: &FunctionGenome) -> Result<(), SolverError> {
        if self.objective != other.objective {
            return Err(SolverError::IncompatibleGenomes {
                left: self.objective.to_string(),
                right: other.objective.to_string(),
            });
        }
        Ok(())
    }

    /// Copy of this genome with a new birth generation.
    pub fn reborn(&self, generation: usize) -> Self {
        Self {
            iteration_born: generation,
            ..self.clone()
        }
    }
}

impl Genome for FunctionGenome {
    type Fitness = f64;

    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn iteration_born(&self) -> usize {
        self.iteration_born
    }

    fn is_converged(&self, threshold: f64) -> bool {
        self.relative_error() <= threshold
    }

    fn optimum_metrics(&self) -> Option<OptimumMetrics> {
        Some(OptimumMetrics {
            distance: self.distance_to_global_minimum(),
            relative_error: self.relative_error(),
        })
    }

    fn step_sizes(&self) -> Option<&[f64]> {
        self.step_sizes.as_deref()
    }
}
