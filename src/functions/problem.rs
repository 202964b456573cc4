//! Continuous benchmark minimization as a [`Problem`].

use super::benchmark::BenchmarkFunction;
use super::genome::{FunctionGenome, Objective};
use crate::engine::{Genome, InitialPopulation, Problem};
use crate::error::SolverError;
use crate::operators::real::{RealMutation, RealRecombination, Strand};
use crate::random::EvoRng;

/// Fraction of the domain width used as the default initial step size.
pub const DEFAULT_STEP_FRACTION: f64 = 0.1;

/// Minimizes a [`BenchmarkFunction`] over `dimensions` real coordinates.
///
/// # Examples
///
/// ```
/// use u_evolab::functions::{BenchmarkFunction, FunctionProblem};
/// use u_evolab::operators::RealMutation;
///
/// let problem = FunctionProblem::new(BenchmarkFunction::Rastrigin, 10)
///     .with_mutation(RealMutation::SelfAdaptiveGaussianMutation);
/// assert!(problem.validate_knobs().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionProblem {
    pub objective: Objective,
    pub recombination: RealRecombination,
    pub mutation: RealMutation,
    /// Starting step size for self-adaptive mutation.
    /// `None` uses [`DEFAULT_STEP_FRACTION`] of the domain width.
    pub initial_step_size: Option<f64>,
}

impl FunctionProblem {
    pub fn new(function: BenchmarkFunction, dimensions: usize) -> Self {
        Self {
            objective: Objective::new(function, dimensions),
            recombination: RealRecombination::default(),
            mutation: RealMutation::default(),
            initial_step_size: None,
        }
    }

    pub fn with_recombination(mut self, recombination: RealRecombination) -> Self {
        self.recombination = recombination;
        self
    }

    pub fn with_mutation(mut self, mutation: RealMutation) -> Self {
        self.mutation = mutation;
        self
    }

    pub fn with_initial_step_size(mut self, step: f64) -> Self {
        self.initial_step_size = Some(step);
        self
    }

    pub fn function(&self) -> BenchmarkFunction {
        self.objective.function
    }

    pub fn dimensions(&self) -> usize {
        self.objective.dimensions
    }

    /// Step size assigned to every coordinate of a fresh self-adaptive genome.
    pub fn effective_initial_step_size(&self) -> f64 {
        self.initial_step_size
            .unwrap_or_else(|| self.function().domain().width() * DEFAULT_STEP_FRACTION)
    }

    /// Checks dimensionality, mutation rate and step size.
    pub fn validate_knobs(&self) -> Result<(), SolverError> {
        if self.dimensions() == 0 {
            return Err(SolverError::InvalidParameters("dimensions must be at least 1".into()));
        }
        if let RealMutation::UniformMutation { rate } = self.mutation {
            if !(0.0..=1.0).contains(&rate) {
                return Err(SolverError::InvalidParameters(format!(
                    "uniform mutation rate must be in [0, 1], got {rate}"
                )));
            }
        }
        let step = self.effective_initial_step_size();
        if !step.is_finite() || step <= 0.0 {
            return Err(SolverError::InvalidParameters(format!(
                "initial step size must be positive, got {step}"
            )));
        }
        Ok(())
    }

    fn initial_steps(&self) -> Option<Vec<f64>> {
        self.mutation
            .is_self_adaptive()
            .then(|| vec![self.effective_initial_step_size(); self.dimensions()])
    }
}

impl Problem for FunctionProblem {
    type Genome = FunctionGenome;

    fn validate(&self) -> Result<(), SolverError> {
        self.validate_knobs()
    }

    fn check_genome(&self, genome: &FunctionGenome) -> Result<(), SolverError> {
        if genome.genes().len() != self.dimensions() {
            return Err(SolverError::DimensionMismatch {
                expected: self.dimensions(),
                actual: genome.genes().len(),
            });
        }
        if genome.objective() != self.objective {
            return Err(SolverError::IncompatibleGenomes {
                left: genome.objective().to_string(),
                right: self.objective.to_string(),
            });
        }
        Ok(())
    }

    fn create_genome(
        &self,
        method: InitialPopulation,
        generation: usize,
        rng: &mut EvoRng,
    ) -> Result<FunctionGenome, SolverError> {
        let domain = self.function().domain();
        let genes = match method {
            InitialPopulation::Random => (0..self.dimensions()).map(|_| domain.sample(rng)).collect(),
            InitialPopulation::Baseline => vec![domain.max; self.dimensions()],
        };
        FunctionGenome::with_step_sizes(genes, self.initial_steps(), self.objective, generation)
    }

    fn recombine(
        &self,
        parent1: &FunctionGenome,
        parent2: &FunctionGenome,
        generation: usize,
        rng: &mut EvoRng,
    ) -> Result<(FunctionGenome, FunctionGenome), SolverError> {
        parent1.check_compatible(parent2)?;
        let (a, b) = self.recombination.apply(strand(parent1), strand(parent2), rng);
        Ok((
            FunctionGenome::with_step_sizes(a.genes, a.step_sizes, self.objective, generation)?,
            FunctionGenome::with_step_sizes(b.genes, b.step_sizes, self.objective, generation)?,
        ))
    }

    fn mutate(&self, genome: &FunctionGenome, generation: usize, rng: &mut EvoRng) -> Result<FunctionGenome, SolverError> {
        let mutated = self.mutation.apply(
            strand(genome),
            self.function().domain(),
            self.effective_initial_step_size(),
            rng,
        );
        FunctionGenome::with_step_sizes(mutated.genes, mutated.step_sizes, self.objective, generation)
    }

    fn reborn(&self, genome: &FunctionGenome, generation: usize) -> FunctionGenome {
        genome.reborn(generation)
    }

    fn tracks_optimum(&self) -> bool {
        true
    }

    fn tracks_step_sizes(&self) -> bool {
        self.mutation.is_self_adaptive()
    }
}

fn strand(genome: &FunctionGenome) -> Strand<'_> {
    Strand {
        genes: genome.genes(),
        step_sizes: genome.step_sizes(),
    }
}
