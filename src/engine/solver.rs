//! Generational loop and solver state machine.
//!
//! [`Solver`] owns the problem, the frozen configuration, one random
//! generator and, once initialized, the population and its statistics.
//! Each call to [`Solver::step`] advances exactly one generation:
//!
//! - **Genetic algorithm** (steady state): sample candidates → select two
//!   parents → recombine → mutate each child → insert → truncate
//! - **Evolution strategy**: build λ children the same way (keeping the first
//!   child of each recombination) → (μ+λ) merge or (μ,λ) replace → truncate
//!
//! After insertion the completion condition is evaluated, one entry is
//! appended to every statistics series, and the generation counter advances.

use super::config::{CompletionCondition, Mechanism, SolverConfig, SurvivorSelection};
use super::population::Population;
use super::selection::sample_candidates;
use super::statistics::{ChanceCounter, SolverStatistics};
use super::types::{Fitness, Genome, Problem};
use crate::error::SolverError;
use crate::random::{create_rng, EvoRng};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Lifecycle of a [`Solver`].
///
/// `NotInitialized → InProgress → {Solved | ReachedMaxIterations}`.
/// Both terminal states are absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverState {
    #[default]
    NotInitialized,
    InProgress,
    Solved,
    ReachedMaxIterations,
}

impl SolverState {
    /// Whether no further step is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SolverState::Solved | SolverState::ReachedMaxIterations)
    }
}

impl fmt::Display for SolverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolverState::NotInitialized => "NotInitialized",
            SolverState::InProgress => "InProgress",
            SolverState::Solved => "Solved",
            SolverState::ReachedMaxIterations => "ReachedMaxIterations",
        };
        f.write_str(name)
    }
}

/// Everything created by `initialize()`.
#[derive(Debug, Clone)]
struct Progress<G: Genome> {
    population: Population<G>,
    statistics: SolverStatistics,
    generation: usize,
}

/// Drives one optimization run.
///
/// # Usage
///
/// ```
/// use u_evolab::engine::{Solver, SolverConfig, SolverState};
/// use u_evolab::queens::QueensProblem;
///
/// let config = SolverConfig::default().with_max_iterations(50).with_seed(1);
/// let mut solver = Solver::new(QueensProblem::default(), config).unwrap();
/// assert_eq!(solver.state(), SolverState::NotInitialized);
///
/// solver.initialize().unwrap();
/// assert_eq!(solver.current_generation(), Some(0));
///
/// while solver.state() == SolverState::InProgress {
///     solver.step().unwrap();
/// }
/// assert!(solver.state().is_terminal());
/// ```
#[derive(Debug, Clone)]
pub struct Solver<P: Problem> {
    problem: P,
    config: SolverConfig,
    rng: EvoRng,
    state: SolverState,
    progress: Option<Progress<P::Genome>>,
}

impl<P: Problem> Solver<P> {
    /// Creates a solver in the `NotInitialized` state.
    ///
    /// The generator is seeded from `config.seed`, or randomly when unset.
    ///
    /// # Errors
    /// [`SolverError::InvalidParameters`] if the configuration or the
    /// problem's own knobs fail validation.
    pub fn new(problem: P, config: SolverConfig) -> Result<Self, SolverError> {
        config.validate()?;
        problem.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        tracing::debug!(
            seed,
            population_size = config.population_size,
            max_iterations = config.max_iterations,
            mechanism = ?config.mechanism,
            "solver created"
        );

        Ok(Self {
            problem,
            config,
            rng: create_rng(seed),
            state: SolverState::NotInitialized,
            progress: None,
        })
    }

    /// Replaces the random generator.
    pub fn with_rng(mut self, rng: EvoRng) -> Self {
        self.rng = rng;
        self
    }

    /// Generates the initial population and enters `InProgress`.
    ///
    /// Completion is evaluated immediately, so a lucky initial population
    /// (or a budget of one generation) finishes here. Does nothing unless
    /// the solver is `NotInitialized`.
    pub fn initialize(&mut self) -> Result<(), SolverError> {
        if self.state != SolverState::NotInitialized {
            return Ok(());
        }

        let method = self.config.initial_population;
        let individuals = (0..self.config.population_size)
            .map(|_| self.problem.create_genome(method, 0, &mut self.rng))
            .collect::<Result<Vec<_>, _>>()?;
        self.start(individuals);
        Ok(())
    }

    /// Initializes from caller-provided individuals instead of generating
    /// them. Does nothing unless the solver is `NotInitialized`.
    ///
    /// # Errors
    /// [`SolverError::InvalidParameters`] if the number of individuals
    /// differs from the population size, or whatever
    /// [`Problem::check_genome`] reports for a foreign individual.
    pub fn initialize_with(&mut self, individuals: Vec<P::Genome>) -> Result<(), SolverError> {
        if self.state != SolverState::NotInitialized {
            return Ok(());
        }
        if individuals.len() != self.config.population_size {
            return Err(SolverError::InvalidParameters(format!(
                "expected {} individuals, got {}",
                self.config.population_size,
                individuals.len()
            )));
        }
        for genome in &individuals {
            self.problem.check_genome(genome)?;
        }
        self.start(individuals);
        Ok(())
    }

    fn start(&mut self, individuals: Vec<P::Genome>) {
        let population = Population::new(individuals, self.config.population_size);
        let statistics = SolverStatistics::new(self.problem.tracks_optimum(), self.problem.tracks_step_sizes());
        self.state = completion_state(&self.config, &population, 0);

        tracing::debug!(
            state = %self.state,
            best = ?population.best().map(Genome::fitness),
            "population initialized"
        );
        if self.state.is_terminal() {
            tracing::info!(state = %self.state, generation = 0, "solver finished");
        }

        self.progress = Some(Progress {
            population,
            statistics,
            generation: 0,
        });
    }

    /// Advances one generation.
    ///
    /// All offspring are built before the population is touched, so an
    /// error leaves population, statistics and generation unchanged.
    ///
    /// # Errors
    /// [`SolverError::NotInProgress`] outside the `InProgress` state, or any
    /// error raised by the problem's operators.
    pub fn step(&mut self) -> Result<(), SolverError> {
        let progress = match (self.progress.as_mut(), self.state) {
            (Some(progress), SolverState::InProgress) => progress,
            _ => return Err(SolverError::NotInProgress { state: self.state }),
        };

        let generation = progress.generation;
        let mut recombination = ChanceCounter::default();
        let mut mutation = ChanceCounter::default();
        let mut breeder = Breeder {
            problem: &self.problem,
            config: &self.config,
            parents: progress.population.as_slice(),
            generation,
            rng: &mut self.rng,
            recombination: &mut recombination,
            mutation: &mut mutation,
        };

        match self.config.mechanism {
            Mechanism::GeneticAlgorithm => {
                let offspring = breeder.genetic_offspring()?;
                progress.population.absorb(offspring);
            }
            Mechanism::EvolutionStrategy {
                offspring_size,
                survivor_selection,
            } => {
                let offspring = breeder.strategy_offspring(offspring_size)?;
                match survivor_selection {
                    SurvivorSelection::MuPlusLambda => progress.population.absorb(offspring),
                    SurvivorSelection::MuCommaLambda => progress.population.replace(offspring),
                }
            }
        }

        let next = completion_state(&self.config, &progress.population, generation);
        progress.statistics.recombination.merge(recombination);
        progress.statistics.mutation.merge(mutation);
        progress
            .statistics
            .record(progress.population.as_slice(), generation);
        progress.generation += 1;

        tracing::trace!(
            generation,
            best = ?progress.population.best().map(|g| g.fitness().to_f64()),
            worst = ?progress.population.worst().map(|g| g.fitness().to_f64()),
            "generation complete"
        );
        if next.is_terminal() {
            tracing::info!(state = %next, generation = progress.generation, "solver finished");
        }

        self.state = next;
        Ok(())
    }

    /// Initializes if needed, then steps until a terminal state.
    pub fn run(&mut self) -> Result<SolverState, SolverError> {
        self.run_with_cancel(None)
    }

    /// Like [`run`](Self::run), checking `cancel` before every step.
    ///
    /// When the flag is set the solver stops and stays `InProgress`; calling
    /// `run` again resumes it.
    pub fn run_with_cancel(&mut self, cancel: Option<Arc<AtomicBool>>) -> Result<SolverState, SolverError> {
        self.initialize()?;
        while self.state == SolverState::InProgress {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    tracing::info!(generation = ?self.current_generation(), "solver cancelled");
                    break;
                }
            }
            self.step()?;
        }
        Ok(self.state)
    }

    pub fn state(&self) -> SolverState {
        self.state
    }

    /// Number of completed generations, or `None` before initialization.
    pub fn current_generation(&self) -> Option<usize> {
        self.progress.as_ref().map(|p| p.generation)
    }

    /// Current individuals, best first. Empty before initialization.
    pub fn population(&self) -> &[P::Genome] {
        self.progress
            .as_ref()
            .map_or(&[], |p| p.population.as_slice())
    }

    pub fn statistics(&self) -> Option<&SolverStatistics> {
        self.progress.as_ref().map(|p| &p.statistics)
    }

    /// The best individual of the current population.
    pub fn best(&self) -> Option<&P::Genome> {
        self.progress.as_ref().and_then(|p| p.population.best())
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// Consumes the solver, returning its statistics.
    pub fn into_statistics(self) -> Option<SolverStatistics> {
        self.progress.map(|p| p.statistics)
    }
}

fn completion_state<G: Genome>(config: &SolverConfig, population: &Population<G>, generation: usize) -> SolverState {
    let target = match config.completion {
        CompletionCondition::ConvergeOne => population.best(),
        CompletionCondition::ConvergeAll => population.worst(),
    };

    if target.is_some_and(|g| g.is_converged(config.convergence_threshold)) {
        SolverState::Solved
    } else if generation + 1 >= config.max_iterations {
        SolverState::ReachedMaxIterations
    } else {
        SolverState::InProgress
    }
}

/// Borrowed state for building one generation's offspring.
struct Breeder<'a, P: Problem> {
    problem: &'a P,
    config: &'a SolverConfig,
    parents: &'a [P::Genome],
    generation: usize,
    rng: &'a mut EvoRng,
    recombination: &'a mut ChanceCounter,
    mutation: &'a mut ChanceCounter,
}

impl<'a, P: Problem> Breeder<'a, P> {
    /// Two children from one selected pair.
    ///
    /// A failed recombination roll passes the parents through unchanged.
    fn genetic_offspring(&mut self) -> Result<Vec<P::Genome>, SolverError> {
        let (parent1, parent2) = self.select_parents();
        let (child1, child2) = if self.roll_recombination() {
            self.problem
                .recombine(parent1, parent2, self.generation, self.rng)?
        } else {
            (parent1.clone(), parent2.clone())
        };

        let mut offspring = vec![child1, child2];
        for child in &mut offspring {
            if self.roll_mutation() {
                *child = self.problem.mutate(child, self.generation, self.rng)?;
            }
        }
        Ok(offspring)
    }

    /// `count` children, one per selected pair.
    fn strategy_offspring(&mut self, count: usize) -> Result<Vec<P::Genome>, SolverError> {
        let mut offspring = Vec::with_capacity(count);
        for _ in 0..count {
            let child = if self.parents.len() < 2 {
                self.clone_sole_parent()?
            } else {
                let (parent1, parent2) = self.select_parents();
                if self.roll_recombination() {
                    self.problem
                        .recombine(parent1, parent2, self.generation, self.rng)?
                        .0
                } else {
                    self.problem.reborn(parent1, self.generation)
                }
            };

            let child = if self.roll_mutation() {
                self.problem.mutate(&child, self.generation, self.rng)?
            } else {
                child
            };
            offspring.push(child);
        }
        Ok(offspring)
    }

    fn clone_sole_parent(&self) -> Result<P::Genome, SolverError> {
        self.parents
            .first()
            .map(|parent| self.problem.reborn(parent, self.generation))
            .ok_or_else(|| SolverError::InvalidParameters("population is empty".into()))
    }

    fn select_parents(&mut self) -> (&'a P::Genome, &'a P::Genome) {
        let parents = self.parents;
        let indices = sample_candidates(parents.len(), self.config.parent_candidates, self.rng);
        let candidates: Vec<&P::Genome> = indices.iter().map(|&i| &parents[i]).collect();
        let (a, b) = self.config.parent_selection.select(&candidates, self.rng);
        (candidates[a], candidates[b])
    }

    fn roll_recombination(&mut self) -> bool {
        match self.config.recombination_probability {
            Some(p) => self.recombination.roll(self.rng, p),
            None => true,
        }
    }

    fn roll_mutation(&mut self) -> bool {
        match self.config.mutation_probability {
            Some(p) => self.mutation.roll(self.rng, p),
            None => true,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
