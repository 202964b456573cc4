//! Independent seeded runs of one problem.
//!
//! Each seed gets its own [`Solver`] and therefore its own generator, so a
//! batch is reproducible whether it runs sequentially or, with the
//! `parallel` feature, on rayon's thread pool.

use super::config::SolverConfig;
use super::solver::{Solver, SolverState};
use super::statistics::SolverStatistics;
use super::types::Problem;
use crate::error::SolverError;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Outcome of one run within a batch.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RunSummary<G> {
    pub seed: u64,
    /// Final state: `Solved` or `ReachedMaxIterations`.
    pub state: SolverState,
    /// Completed generations.
    pub generations: usize,
    /// Best individual of the final population.
    pub best: Option<G>,
    pub statistics: SolverStatistics,
}

impl<G> RunSummary<G> {
    pub fn is_solved(&self) -> bool {
        self.state == SolverState::Solved
    }
}

/// Runs `problem` once per seed, each to completion.
///
/// `config.seed` is overridden by every entry of `seeds`. Results keep the
/// order of `seeds`.
///
/// # Errors
/// Fails if the configuration is invalid or any run fails; with the
/// `parallel` feature the reported error is from one of the failed runs.
pub fn run_batch<P>(
    problem: &P,
    config: &SolverConfig,
    seeds: &[u64],
) -> Result<Vec<RunSummary<P::Genome>>, SolverError>
where
    P: Problem + Clone,
{
    config.validate()?;
    problem.validate()?;
    tracing::debug!(runs = seeds.len(), "starting batch");

    #[cfg(feature = "parallel")]
    let runs = seeds
        .par_iter()
        .map(|&seed| run_one(problem.clone(), config.clone().with_seed(seed)))
        .collect::<Result<Vec<_>, _>>()?;

    #[cfg(not(feature = "parallel"))]
    let runs = seeds
        .iter()
        .map(|&seed| run_one(problem.clone(), config.clone().with_seed(seed)))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        runs = runs.len(),
        solved = runs.iter().filter(|r| r.is_solved()).count(),
        "batch finished"
    );
    Ok(runs)
}

/// Fraction of runs that ended `Solved`; 0 for an empty batch.
pub fn success_rate<G>(runs: &[RunSummary<G>]) -> f64 {
    if runs.is_empty() {
        return 0.0;
    }
    runs.iter().filter(|r| r.is_solved()).count() as f64 / runs.len() as f64
}

fn run_one<P: Problem>(problem: P, config: SolverConfig) -> Result<RunSummary<P::Genome>, SolverError> {
    let seed = config.seed.unwrap_or_default();
    let mut solver = Solver::new(problem, config)?;
    let state = solver.run()?;
    let generations = solver.current_generation().unwrap_or(0);
    let best = solver.best().cloned();
    let statistics = solver.into_statistics().unwrap_or_default();

    Ok(RunSummary {
        seed,
        state,
        generations,
        best,
        statistics,
    })
}
