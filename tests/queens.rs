//! End-to-end runs on the eight-queens board.

use u_evolab::engine::{
    CompletionCondition, Genome, InitialPopulation, ParentSelection, Solver, SolverConfig, SolverState,
};
use u_evolab::operators::{PermutationMutation, PermutationRecombination};
use u_evolab::queens::{Board, QueensProblem};
use u_evolab::SolverError;

fn reference_config(seed: u64) -> SolverConfig {
    SolverConfig::default()
        .with_population_size(50)
        .with_parent_candidates(5)
        .with_completion(CompletionCondition::ConvergeOne)
        .with_max_iterations(5000)
        .with_seed(seed)
}

#[test]
fn reference_run_terminates() {
    let problem = QueensProblem::new(PermutationRecombination::CutAndCrossfill, PermutationMutation::SwapAny);

    for seed in 0..5 {
        let mut solver = Solver::new(problem, reference_config(seed)).unwrap();
        let state = solver.run().unwrap();

        assert!(state.is_terminal(), "seed {seed}: {state}");
        assert_eq!(solver.population().len(), 50);
        if state == SolverState::Solved {
            assert_eq!(solver.best().unwrap().fitness(), 0);
        } else {
            assert_eq!(solver.current_generation(), Some(5000));
        }
    }
}

#[test]
fn every_operator_pair_keeps_permutations() {
    for recombination in [PermutationRecombination::CutAndCrossfill, PermutationRecombination::CycleCrossover] {
        for mutation in [PermutationMutation::SwapAny, PermutationMutation::SwapCollision] {
            for selection in [
                ParentSelection::Random,
                ParentSelection::BestFitness,
                ParentSelection::TournamentOfThree,
                ParentSelection::UniformRandom,
            ] {
                let config = reference_config(11)
                    .with_parent_selection(selection)
                    .with_max_iterations(200);
                let mut solver = Solver::new(QueensProblem::new(recombination, mutation), config).unwrap();
                solver.initialize().unwrap();

                while solver.state() == SolverState::InProgress {
                    solver.step().unwrap();
                    let population = solver.population();
                    assert_eq!(population.len(), 50);
                    assert!(population.iter().all(Board::is_permutation));
                    assert!(population.windows(2).all(|w| w[0].fitness() <= w[1].fitness()));
                }
            }
        }
    }
}

#[test]
fn baseline_population_starts_from_identity_board() {
    let config = reference_config(3).with_initial_population(InitialPopulation::Baseline);
    let mut solver = Solver::new(QueensProblem::default(), config).unwrap();
    solver.initialize().unwrap();

    assert!(solver.population().iter().all(|b| b.fitness() == 28));
    solver.step().unwrap();
    assert!(solver.best().unwrap().fitness() <= 28);
}

#[test]
fn statistics_track_every_generation() {
    let mut solver = Solver::new(QueensProblem::default(), reference_config(8).with_max_iterations(60)).unwrap();
    solver.run().unwrap();

    let generations = solver.current_generation().unwrap();
    let stats = solver.statistics().unwrap();
    assert_eq!(stats.generations(), generations);
    assert_eq!(stats.fitness.median.len(), generations);
    assert_eq!(stats.age.oldest.len(), generations);
    assert!(stats.distance_to_optimum.is_none());
    assert!(stats.step_size.is_none());
}

#[test]
fn step_outside_progress_is_rejected() {
    let mut solver = Solver::new(QueensProblem::default(), reference_config(1).with_max_iterations(2)).unwrap();
    assert!(matches!(
        solver.step(),
        Err(SolverError::NotInProgress {
            state: SolverState::NotInitialized
        })
    ));

    let state = solver.run().unwrap();
    assert!(matches!(
        solver.step(),
        Err(SolverError::NotInProgress { state: s }) if s == state
    ));
}
