//! Per-generation statistics.
//!
//! [`SolverStatistics`] is a set of append-only parallel time series. One
//! entry is appended to every series after each completed generation, so all
//! series share the same length: the number of generations stepped since
//! initialization.

use super::types::{Fitness, Genome};
use crate::random::EvoRng;

/// Counts Bernoulli rolls for a probabilistically gated operator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChanceCounter {
    /// Trials attempted.
    pub rolled: u64,
    /// Trials that succeeded.
    pub hit: u64,
}

impl ChanceCounter {
    /// Rolls a trial with success probability `p` and records the outcome.
    pub fn roll(&mut self, rng: &mut EvoRng, p: f64) -> bool {
        let hit = rng.chance(p);
        self.rolled += 1;
        if hit {
            self.hit += 1;
        }
        hit
    }

    /// Observed hit rate, or `None` before the first roll.
    pub fn probability(&self) -> Option<f64> {
        if self.rolled == 0 {
            None
        } else {
            Some(self.hit as f64 / self.rolled as f64)
        }
    }

    /// Adds another counter's rolls to this one.
    pub fn merge(&mut self, other: ChanceCounter) {
        self.rolled += other.rolled;
        self.hit += other.hit;
    }
}

/// Fitness distribution over generations.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitnessSeries {
    pub mean: Vec<f64>,
    pub best: Vec<f64>,
    pub worst: Vec<f64>,
    pub median: Vec<f64>,
    /// Population (not sample) standard deviation.
    pub standard_deviation: Vec<f64>,
}

/// Age distribution over generations.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgeSeries {
    /// Mean of `generation - iteration_born`.
    pub mean: Vec<f64>,
    /// Largest age in the population.
    pub oldest: Vec<usize>,
    /// Smallest birth generation still alive.
    pub earliest_born: Vec<usize>,
}

/// Mean, minimum and maximum of a per-individual metric.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SummarySeries {
    pub mean: Vec<f64>,
    pub min: Vec<f64>,
    pub max: Vec<f64>,
}

impl SummarySeries {
    fn push(&mut self, values: impl Iterator<Item = f64>) {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values {
            count += 1;
            sum += v;
            min = min.min(v);
            max = max.max(v);
        }
        if count == 0 {
            self.mean.push(f64::NAN);
            self.min.push(f64::NAN);
            self.max.push(f64::NAN);
        } else {
            self.mean.push(sum / count as f64);
            self.min.push(min);
            self.max.push(max);
        }
    }

    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }
}

/// Time series collected by the solver, one entry per completed generation.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverStatistics {
    pub fitness: FitnessSeries,
    pub age: AgeSeries,

    /// Distance to the known optimum; present for real-vector problems.
    pub distance_to_optimum: Option<SummarySeries>,

    /// Relative error of the fitness; present for real-vector problems.
    pub relative_error: Option<SummarySeries>,

    /// Distribution of all step sizes; present under self-adaptive mutation.
    pub step_size: Option<SummarySeries>,

    /// Recombination rolls (stays zero when recombination is unconditional).
    pub recombination: ChanceCounter,

    /// Mutation rolls (stays zero when mutation is unconditional).
    pub mutation: ChanceCounter,
}

impl SolverStatistics {
    /// Creates empty statistics with the optional series enabled as requested.
    pub fn new(tracks_optimum: bool, tracks_step_sizes: bool) -> Self {
        Self {
            distance_to_optimum: tracks_optimum.then(SummarySeries::default),
            relative_error: tracks_optimum.then(SummarySeries::default),
            step_size: tracks_step_sizes.then(SummarySeries::default),
            ..Self::default()
        }
    }

    /// Number of generations recorded.
    pub fn generations(&self) -> usize {
        self.fitness.best.len()
    }

    /// Appends one entry to every series.
    ///
    /// `population` must be sorted ascending by fitness and non-empty.
    pub fn record<G: Genome>(&mut self, population: &[G], generation: usize) {
        if population.is_empty() {
            return;
        }

        self.record_fitness(population);
        self.record_age(population, generation);

        if self.distance_to_optimum.is_some() || self.relative_error.is_some() {
            let metrics: Vec<_> = population
                .iter()
                .filter_map(|g| g.optimum_metrics())
                .collect();
            if let Some(series) = self.distance_to_optimum.as_mut() {
                series.push(metrics.iter().map(|m| m.distance));
            }
            if let Some(series) = self.relative_error.as_mut() {
                series.push(metrics.iter().map(|m| m.relative_error));
            }
        }

        if let Some(series) = self.step_size.as_mut() {
            series.push(
                population
                    .iter()
                    .filter_map(|g| g.step_sizes())
                    .flat_map(|s| s.iter().copied()),
            );
        }
    }

    fn record_fitness<G: Genome>(&mut self, population: &[G]) {
        let values: Vec<f64> = population.iter().map(|g| g.fitness().to_f64()).collect();
        let n = values.len();
        let mean = values.iter().sum::<f64>() / n as f64;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
        let mid = n / 2;
        let median = if n % 2 == 0 {
            (values[mid - 1] + values[mid]) / 2.0
        } else {
            values[mid]
        };

        self.fitness.mean.push(mean);
        self.fitness.best.push(values[0]);
        self.fitness.worst.push(values[n - 1]);
        self.fitness.median.push(median);
        self.fitness.standard_deviation.push(variance.sqrt());
    }

    fn record_age<G: Genome>(&mut self, population: &[G], generation: usize) {
        let ages: Vec<usize> = population
            .iter()
            .map(|g| generation.saturating_sub(g.iteration_born()))
            .collect();
        let mean = ages.iter().sum::<usize>() as f64 / ages.len() as f64;

        self.age.mean.push(mean);
        self.age.oldest.push(ages.iter().copied().max().unwrap_or(0));
        self.age.earliest_born.push(
            population
                .iter()
                .map(|g| g.iteration_born())
                .min()
                .unwrap_or(generation),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::OptimumMetrics;
    use crate::random::create_rng;

    #[derive(Clone, Debug)]
    struct Probe {
        fit: f64,
        born: usize,
        steps: Option<Vec<f64>>,
    }

    impl Genome for Probe {
        type Fitness = f64;
        fn fitness(&self) -> f64 {
            self.fit
        }
        fn iteration_born(&self) -> usize {
            self.born
        }
        fn is_converged(&self, threshold: f64) -> bool {
            self.fit <= threshold
        }
        fn optimum_metrics(&self) -> Option<OptimumMetrics> {
            Some(OptimumMetrics {
                distance: self.fit * 2.0,
                relative_error: self.fit,
            })
        }
        fn step_sizes(&self) -> Option<&[f64]> {
            self.steps.as_deref()
        }
    }

    fn probe(fit: f64, born: usize) -> Probe {
        Probe {
            fit,
            born,
            steps: None,
        }
    }

    #[test]
    fn test_fitness_summary_even_length() {
        let pop = vec![probe(1.0, 0), probe(2.0, 0), probe(3.0, 0), probe(6.0, 0)];
        let mut stats = SolverStatistics::new(false, false);
        stats.record(&pop, 0);

        assert_eq!(stats.fitness.best, vec![1.0]);
        assert_eq!(stats.fitness.worst, vec![6.0]);
        assert_eq!(stats.fitness.mean, vec![3.0]);
        assert_eq!(stats.fitness.median, vec![2.5]);
        // population variance: (4 + 1 + 0 + 9) / 4 = 3.5
        assert!((stats.fitness.standard_deviation[0] - 3.5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_fitness_median_odd_length() {
        let pop = vec![probe(1.0, 0), probe(4.0, 0), probe(9.0, 0)];
        let mut stats = SolverStatistics::new(false, false);
        stats.record(&pop, 0);
        assert_eq!(stats.fitness.median, vec![4.0]);
    }

    #[test]
    fn test_age_summary() {
        let pop = vec![probe(1.0, 3), probe(2.0, 10), probe(3.0, 7)];
        let mut stats = SolverStatistics::new(false, false);
        stats.record(&pop, 10);

        // ages: 7, 0, 3
        assert!((stats.age.mean[0] - 10.0 / 3.0).abs() < 1e-12);
        assert_eq!(stats.age.oldest, vec![7]);
        assert_eq!(stats.age.earliest_born, vec![3]);
    }

    #[test]
    fn test_optional_series_follow_flags() {
        let pop = vec![probe(0.5, 0), probe(1.5, 0)];

        let mut plain = SolverStatistics::new(false, false);
        plain.record(&pop, 0);
        assert!(plain.distance_to_optimum.is_none());
        assert!(plain.relative_error.is_none());
        assert!(plain.step_size.is_none());

        let mut full = SolverStatistics::new(true, true);
        full.record(&pop, 0);
        let distance = full.distance_to_optimum.as_ref().unwrap();
        assert_eq!(distance.mean, vec![2.0]);
        assert_eq!(distance.min, vec![1.0]);
        assert_eq!(distance.max, vec![3.0]);
        let error = full.relative_error.as_ref().unwrap();
        assert_eq!(error.min, vec![0.5]);
        assert_eq!(error.max, vec![1.5]);
        // no genome carries step sizes: entry is still appended
        assert_eq!(full.step_size.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_step_sizes_flattened() {
        let pop = vec![
            Probe {
                fit: 0.0,
                born: 0,
                steps: Some(vec![0.1, 0.3]),
            },
            Probe {
                fit: 1.0,
                born: 0,
                steps: Some(vec![0.2, 0.6]),
            },
        ];
        let mut stats = SolverStatistics::new(true, true);
        stats.record(&pop, 0);
        let steps = stats.step_size.as_ref().unwrap();
        assert!((steps.mean[0] - 0.3).abs() < 1e-12);
        assert_eq!(steps.min, vec![0.1]);
        assert_eq!(steps.max, vec![0.6]);
    }

    #[test]
    fn test_series_lengths_match_generations() {
        let pop = vec![probe(0.5, 0), probe(1.5, 0)];
        let mut stats = SolverStatistics::new(true, true);
        for generation in 0..5 {
            stats.record(&pop, generation);
        }
        assert_eq!(stats.generations(), 5);
        assert_eq!(stats.fitness.standard_deviation.len(), 5);
        assert_eq!(stats.age.earliest_born.len(), 5);
        assert_eq!(stats.relative_error.as_ref().unwrap().len(), 5);
        assert_eq!(stats.step_size.as_ref().unwrap().len(), 5);
    }

    #[test]
    fn test_chance_counter() {
        let mut counter = ChanceCounter::default();
        assert_eq!(counter.probability(), None);

        let mut rng = create_rng(42);
        for _ in 0..1000 {
            counter.roll(&mut rng, 0.25);
        }
        assert_eq!(counter.rolled, 1000);
        let p = counter.probability().unwrap();
        assert!((p - 0.25).abs() < 0.05, "observed {p}");

        let mut total = ChanceCounter::default();
        total.merge(counter);
        total.merge(counter);
        assert_eq!(total.rolled, 2000);
        assert_eq!(total.hit, counter.hit * 2);
    }
}
