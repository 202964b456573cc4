//! End-to-end runs on the benchmark functions.

use u_evolab::engine::experiment::{run_batch, success_rate};
use u_evolab::engine::{Genome, InitialPopulation, Solver, SolverConfig, SolverState, SurvivorSelection};
use u_evolab::functions::{BenchmarkFunction, FunctionProblem};
use u_evolab::operators::{RealMutation, RealRecombination};

fn ackley_problem() -> FunctionProblem {
    FunctionProblem::new(BenchmarkFunction::Ackley, 5)
        .with_recombination(RealRecombination::ArithmeticCrossover)
        .with_mutation(RealMutation::GaussianMutation)
}

fn ackley_config() -> SolverConfig {
    SolverConfig::default()
        .with_population_size(30)
        .with_convergence_threshold(0.01)
        .with_max_iterations(2000)
}

#[test]
fn best_relative_error_never_increases() {
    let runs = run_batch(&ackley_problem(), &ackley_config(), &[1, 2, 3, 4, 5]).unwrap();
    assert_eq!(runs.len(), 5);

    for run in &runs {
        assert!(run.state.is_terminal());
        let errors = &run.statistics.relative_error.as_ref().unwrap().min;
        assert_eq!(errors.len(), run.generations);
        assert!(
            errors.windows(2).all(|w| w[1] <= w[0]),
            "seed {}: best relative error increased",
            run.seed
        );
        if run.state == SolverState::Solved {
            assert!(run.best.as_ref().unwrap().relative_error() <= 0.01);
        }
    }
    assert!((0.0..=1.0).contains(&success_rate(&runs)));
}

#[test]
fn every_function_and_operator_stays_in_domain() {
    let recombinations = [
        RealRecombination::UniformCrossover,
        RealRecombination::ArithmeticCrossover,
        RealRecombination::IntermediateRecombination,
        RealRecombination::DiscreteRecombination,
    ];
    let mutations = [
        RealMutation::GaussianMutation,
        RealMutation::uniform(),
        RealMutation::SelfAdaptiveGaussianMutation,
    ];

    for function in BenchmarkFunction::ALL {
        let domain = function.domain();
        for recombination in recombinations {
            for mutation in mutations {
                let problem = FunctionProblem::new(function, 4)
                    .with_recombination(recombination)
                    .with_mutation(mutation);
                let config = ackley_config().with_max_iterations(40).with_seed(17);
                let mut solver = Solver::new(problem, config).unwrap();
                solver.run().unwrap();

                for genome in solver.population() {
                    assert!(genome.genes().iter().all(|&x| domain.contains(x)));
                    assert_eq!(genome.step_sizes().is_some(), mutation.is_self_adaptive());
                }
            }
        }
    }
}

#[test]
fn evolution_strategy_improves_on_baseline() {
    let problem = FunctionProblem::new(BenchmarkFunction::Rastrigin, 3)
        .with_recombination(RealRecombination::IntermediateRecombination)
        .with_mutation(RealMutation::SelfAdaptiveGaussianMutation);

    for survivor in [SurvivorSelection::MuPlusLambda, SurvivorSelection::MuCommaLambda] {
        let config = SolverConfig::evolution_strategy(10, 40)
            .with_evolution_strategy(40, survivor)
            .with_initial_population(InitialPopulation::Baseline)
            .with_convergence_threshold(0.0)
            .with_max_iterations(100)
            .with_seed(21);
        let mut solver = Solver::new(problem.clone(), config).unwrap();
        solver.initialize().unwrap();
        let start = solver.best().unwrap().fitness();

        assert_eq!(solver.run().unwrap(), SolverState::ReachedMaxIterations);
        assert!(solver.best().unwrap().fitness() < start, "{survivor:?}");
        assert_eq!(solver.population().len(), 10);
    }
}
