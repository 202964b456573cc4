//! Solver configuration.
//!
//! [`SolverConfig`] holds the engine parameters that control the generational
//! loop. Domain operators (recombination, mutation, benchmark function) live
//! on the [`Problem`](super::Problem) value instead.

use super::selection::ParentSelection;
use crate::error::SolverError;

/// How the initial population is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitialPopulation {
    /// Random genomes: shuffled permutations or uniform points.
    #[default]
    Random,
    /// A fixed seed repeated for every individual: the ordered board, or the
    /// upper corner of a function's domain.
    Baseline,
}

/// Which individual must satisfy the solved predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompletionCondition {
    /// The best individual (index 0) is solved.
    #[default]
    ConvergeOne,
    /// The worst individual (last index) is solved, hence all are.
    ConvergeAll,
}

/// Survivor selection for the evolution-strategy mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SurvivorSelection {
    /// (μ+λ): parents and offspring compete for the μ slots.
    #[default]
    MuPlusLambda,
    /// (μ,λ): parents are discarded; the best μ offspring survive.
    MuCommaLambda,
}

/// Generational strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mechanism {
    /// Steady state: one pair of offspring per generation.
    #[default]
    GeneticAlgorithm,
    /// Batch of λ offspring per generation followed by survivor selection.
    EvolutionStrategy {
        /// Offspring batch size λ.
        offspring_size: usize,
        /// (μ+λ) or (μ,λ).
        survivor_selection: SurvivorSelection,
    },
}

/// Configuration for the solver.
///
/// Frozen once the solver is constructed.
///
/// # Defaults
///
/// ```
/// use u_evolab::engine::SolverConfig;
///
/// let config = SolverConfig::default();
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.parent_candidates, 5);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_evolab::engine::{CompletionCondition, ParentSelection, SolverConfig};
///
/// let config = SolverConfig::default()
///     .with_population_size(100)
///     .with_parent_selection(ParentSelection::TournamentOfThree)
///     .with_recombination_probability(0.9)
///     .with_completion(CompletionCondition::ConvergeAll)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    /// Number of individuals kept after every generation (μ).
    pub population_size: usize,

    /// Number of distinct individuals sampled as parent candidates.
    ///
    /// Must not exceed `population_size`. When equal, the whole population
    /// is used without sampling.
    pub parent_candidates: usize,

    /// How two parents are picked from the candidates.
    pub parent_selection: ParentSelection,

    /// How the initial population is generated.
    pub initial_population: InitialPopulation,

    /// Probability of recombining a selected pair.
    ///
    /// `None` applies recombination unconditionally. When the roll fails the
    /// offspring are copies of the parents.
    pub recombination_probability: Option<f64>,

    /// Probability of mutating each offspring.
    ///
    /// `None` applies mutation unconditionally.
    pub mutation_probability: Option<f64>,

    /// Which individual must be solved to finish.
    pub completion: CompletionCondition,

    /// Generation budget. The run stops once `generation + 1` reaches it.
    pub max_iterations: usize,

    /// Maximum relative error for a real-vector genome to count as solved.
    pub convergence_threshold: f64,

    /// Steady-state GA or batch evolution strategy.
    pub mechanism: Mechanism,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            parent_candidates: 5,
            parent_selection: ParentSelection::default(),
            initial_population: InitialPopulation::default(),
            recombination_probability: None,
            mutation_probability: None,
            completion: CompletionCondition::default(),
            max_iterations: 1000,
            convergence_threshold: 0.01,
            mechanism: Mechanism::default(),
            seed: None,
        }
    }
}

impl SolverConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the parent-candidate sample size.
    pub fn with_parent_candidates(mut self, n: usize) -> Self {
        self.parent_candidates = n;
        self
    }

    /// Sets the parent-selection operator.
    pub fn with_parent_selection(mut self, selection: ParentSelection) -> Self {
        self.parent_selection = selection;
        self
    }

    /// Sets the initial-population generator.
    pub fn with_initial_population(mut self, method: InitialPopulation) -> Self {
        self.initial_population = method;
        self
    }

    /// Gates recombination behind a Bernoulli trial.
    pub fn with_recombination_probability(mut self, p: f64) -> Self {
        self.recombination_probability = Some(p.clamp(0.0, 1.0));
        self
    }

    /// Gates mutation behind a Bernoulli trial.
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = Some(p.clamp(0.0, 1.0));
        self
    }

    /// Applies both operators unconditionally.
    pub fn with_operators_always_applied(mut self) -> Self {
        self.recombination_probability = None;
        self.mutation_probability = None;
        self
    }

    /// Sets the completion condition.
    pub fn with_completion(mut self, completion: CompletionCondition) -> Self {
        self.completion = completion;
        self
    }

    /// Sets the generation budget.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the convergence threshold.
    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold.clamp(0.0, f64::INFINITY);
        self
    }

    /// Switches to the evolution-strategy mechanism.
    pub fn with_evolution_strategy(
        mut self,
        offspring_size: usize,
        survivor_selection: SurvivorSelection,
    ) -> Self {
        self.mechanism = Mechanism::EvolutionStrategy {
            offspring_size,
            survivor_selection,
        };
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset for the eight-queens board.
    ///
    /// - Population: 100, Candidates: 5, Best-of-candidates selection
    /// - Recombination 0.9, Mutation 0.4, Budget: 1000
    pub fn eight_queens() -> Self {
        Self {
            population_size: 100,
            parent_candidates: 5,
            parent_selection: ParentSelection::BestFitness,
            recombination_probability: Some(0.9),
            mutation_probability: Some(0.4),
            max_iterations: 1000,
            ..Self::default()
        }
    }

    /// Preset for a (μ+λ) evolution strategy with uniform parent selection
    /// over the whole population.
    pub fn evolution_strategy(mu: usize, lambda: usize) -> Self {
        Self {
            population_size: mu,
            parent_candidates: mu,
            parent_selection: ParentSelection::UniformRandom,
            max_iterations: 500,
            mechanism: Mechanism::EvolutionStrategy {
                offspring_size: lambda,
                survivor_selection: SurvivorSelection::MuPlusLambda,
            },
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// Returns [`SolverError::InvalidParameters`] describing the first
    /// invalid parameter.
    pub fn validate(&self) -> Result<(), SolverError> {
        let invalid = |msg: &str| Err(SolverError::InvalidParameters(msg.into()));

        if self.population_size == 0 {
            return invalid("population_size must be at least 1");
        }
        if self.mechanism == Mechanism::GeneticAlgorithm && self.population_size < 2 {
            return invalid("population_size must be at least 2 for the genetic algorithm");
        }
        if self.parent_candidates == 0 {
            return invalid("parent_candidates must be at least 1");
        }
        if self.parent_candidates > self.population_size {
            return invalid("parent_candidates must not exceed population_size");
        }
        if self.max_iterations == 0 {
            return invalid("max_iterations must be at least 1");
        }
        if self.convergence_threshold.is_nan() || self.convergence_threshold < 0.0 {
            return invalid("convergence_threshold must be non-negative");
        }
        for p in [self.recombination_probability, self.mutation_probability]
            .into_iter()
            .flatten()
        {
            if !(0.0..=1.0).contains(&p) {
                return invalid("operator probabilities must lie in [0, 1]");
            }
        }
        if let Mechanism::EvolutionStrategy {
            offspring_size,
            survivor_selection,
        } = self.mechanism
        {
            if offspring_size == 0 {
                return invalid("offspring_size must be at least 1");
            }
            if survivor_selection == SurvivorSelection::MuCommaLambda
                && offspring_size < self.population_size
            {
                return invalid("(μ,λ) survivor selection requires offspring_size >= population_size");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SolverConfig::default();
        assert_eq!(config.population_size, 50);
        assert_eq!(config.parent_candidates, 5);
        assert_eq!(config.parent_selection, ParentSelection::BestFitness);
        assert_eq!(config.initial_population, InitialPopulation::Random);
        assert!(config.recombination_probability.is_none());
        assert!(config.mutation_probability.is_none());
        assert_eq!(config.completion, CompletionCondition::ConvergeOne);
        assert_eq!(config.max_iterations, 1000);
        assert_eq!(config.mechanism, Mechanism::GeneticAlgorithm);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = SolverConfig::default()
            .with_population_size(200)
            .with_parent_candidates(10)
            .with_parent_selection(ParentSelection::Random)
            .with_initial_population(InitialPopulation::Baseline)
            .with_recombination_probability(0.8)
            .with_mutation_probability(0.05)
            .with_completion(CompletionCondition::ConvergeAll)
            .with_max_iterations(5000)
            .with_convergence_threshold(0.001)
            .with_seed(42);

        assert_eq!(config.population_size, 200);
        assert_eq!(config.parent_candidates, 10);
        assert_eq!(config.parent_selection, ParentSelection::Random);
        assert_eq!(config.initial_population, InitialPopulation::Baseline);
        assert_eq!(config.recombination_probability, Some(0.8));
        assert_eq!(config.mutation_probability, Some(0.05));
        assert_eq!(config.completion, CompletionCondition::ConvergeAll);
        assert_eq!(config.max_iterations, 5000);
        assert!((config.convergence_threshold - 0.001).abs() < 1e-15);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_validate_ok() {
        assert!(SolverConfig::default().validate().is_ok());
        assert!(SolverConfig::eight_queens().validate().is_ok());
        assert!(SolverConfig::evolution_strategy(10, 70).validate().is_ok());
    }

    #[test]
    fn test_clamp_rates() {
        let config = SolverConfig::default()
            .with_recombination_probability(-0.5)
            .with_mutation_probability(2.0)
            .with_convergence_threshold(-1.0);

        assert_eq!(config.recombination_probability, Some(0.0));
        assert_eq!(config.mutation_probability, Some(1.0));
        assert!((config.convergence_threshold - 0.0).abs() < 1e-15);
    }

    #[test]
    fn test_operators_always_applied() {
        let config = SolverConfig::eight_queens().with_operators_always_applied();
        assert!(config.recombination_probability.is_none());
        assert!(config.mutation_probability.is_none());
    }

    #[test]
    fn test_validate_candidates_exceed_population() {
        let config = SolverConfig::default()
            .with_population_size(4)
            .with_parent_candidates(5);
        assert!(matches!(
            config.validate(),
            Err(SolverError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_validate_zero_candidates() {
        let config = SolverConfig::default().with_parent_candidates(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_iterations() {
        let config = SolverConfig::default().with_max_iterations(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_ga_needs_two_individuals() {
        let config = SolverConfig::default()
            .with_population_size(1)
            .with_parent_candidates(1);
        assert!(config.validate().is_err());

        // a single-parent evolution strategy is fine
        let config = config.with_evolution_strategy(5, SurvivorSelection::MuPlusLambda);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_comma_needs_enough_offspring() {
        let config = SolverConfig::evolution_strategy(10, 5);
        assert!(config.validate().is_ok());

        let config = config.with_evolution_strategy(5, SurvivorSelection::MuCommaLambda);
        assert!(config.validate().is_err());

        let config = config.with_evolution_strategy(10, SurvivorSelection::MuCommaLambda);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_offspring() {
        let config = SolverConfig::evolution_strategy(10, 0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_out_of_range_probability_field() {
        let mut config = SolverConfig::default();
        config.mutation_probability = Some(1.5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_nan_threshold() {
        let mut config = SolverConfig::default();
        config.convergence_threshold = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nan_threshold_from_builder_rejected() {
        let config = SolverConfig::default().with_convergence_threshold(f64::NAN);
        assert!(config.convergence_threshold.is_nan());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_preset_chainable() {
        let config = SolverConfig::eight_queens()
            .with_population_size(75)
            .with_seed(42);
        assert_eq!(config.population_size, 75);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.recombination_probability, Some(0.9));
    }

    #[test]
    fn test_evolution_strategy_preset() {
        let config = SolverConfig::evolution_strategy(15, 100);
        assert_eq!(config.population_size, 15);
        assert_eq!(config.parent_candidates, 15);
        assert_eq!(config.parent_selection, ParentSelection::UniformRandom);
        assert_eq!(
            config.mechanism,
            Mechanism::EvolutionStrategy {
                offspring_size: 100,
                survivor_selection: SurvivorSelection::MuPlusLambda,
            }
        );
    }
}
