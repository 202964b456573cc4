//! Parent selection and candidate sampling.
//!
//! Each generation first samples a subset of the population as parent
//! candidates (kept in population order, so still sorted by fitness), then a
//! [`ParentSelection`] picks exactly two parents from that subset.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Eiben & Smith (2015), *Introduction to Evolutionary Computing*, ch. 5

use super::types::Genome;
use crate::random::EvoRng;
use rand::seq::{index, SliceRandom};
use rand::Rng;

/// Retries allowed for [`ParentSelection::UniformRandom`] to find a second
/// parent different from the first.
pub const UNIFORM_RANDOM_MAX_ATTEMPTS: usize = 10;

/// Parent selection strategy.
///
/// All strategies assume **minimization** (lower fitness = better) and a
/// candidate slice sorted ascending by fitness.
///
/// # Examples
///
/// ```
/// use u_evolab::engine::ParentSelection;
///
/// // The two best candidates
/// let sel = ParentSelection::BestFitness;
///
/// // Best two out of three shuffled candidates
/// let sel = ParentSelection::TournamentOfThree;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParentSelection {
    /// Shuffle the candidates and take the first two.
    Random,

    /// Take the first two of the already-sorted candidates.
    ///
    /// With a small candidate sample this behaves like a tournament of size
    /// `parent_candidates`.
    #[default]
    BestFitness,

    /// Shuffle, take three, keep the best two.
    TournamentOfThree,

    /// Draw two candidates independently and uniformly.
    ///
    /// The second draw is retried up to [`UNIFORM_RANDOM_MAX_ATTEMPTS`] times
    /// to avoid picking the same candidate twice; identical parents are
    /// accepted once the attempts run out.
    UniformRandom,
}

impl ParentSelection {
    /// Selects two parents, returned as indices into `candidates`.
    ///
    /// A single candidate is returned twice.
    ///
    /// # Panics
    /// Panics if `candidates` is empty.
    pub fn select<G: Genome>(&self, candidates: &[&G], rng: &mut EvoRng) -> (usize, usize) {
        assert!(!candidates.is_empty(), "cannot select from empty candidates");

        let n = candidates.len();
        if n == 1 {
            return (0, 0);
        }

        match self {
            ParentSelection::Random => {
                let mut order: Vec<usize> = (0..n).collect();
                order.shuffle(rng);
                (order[0], order[1])
            }
            ParentSelection::BestFitness => (0, 1),
            ParentSelection::TournamentOfThree => tournament_of_three(candidates, rng),
            ParentSelection::UniformRandom => uniform_random(n, rng),
        }
    }
}

fn tournament_of_three<G: Genome>(candidates: &[&G], rng: &mut EvoRng) -> (usize, usize) {
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.shuffle(rng);
    order.truncate(3);
    // stable: equal fitness keeps shuffled order
    order.sort_by(|&a, &b| {
        candidates[a]
            .fitness()
            .partial_cmp(&candidates[b].fitness())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    (order[0], order[1])
}

fn uniform_random(n: usize, rng: &mut EvoRng) -> (usize, usize) {
    let first = rng.random_range(0..n);
    let mut second = rng.random_range(0..n);
    let mut attempts = 0;
    while second == first && attempts < UNIFORM_RANDOM_MAX_ATTEMPTS {
        second = rng.random_range(0..n);
        attempts += 1;
    }
    (first, second)
}

/// Samples `amount` distinct indices out of `0..len`, sorted ascending.
///
/// When `amount >= len` every index is returned without drawing from `rng`.
pub fn sample_candidates(len: usize, amount: usize, rng: &mut EvoRng) -> Vec<usize> {
    if amount >= len {
        return (0..len).collect();
    }
    let mut picked = index::sample(rng, len, amount).into_vec();
    picked.sort_unstable();
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[derive(Clone, Debug)]
    struct TestGenome {
        fit: f64,
    }

    impl Genome for TestGenome {
        type Fitness = f64;
        fn fitness(&self) -> f64 {
            self.fit
        }
        fn iteration_born(&self) -> usize {
            0
        }
        fn is_converged(&self, threshold: f64) -> bool {
            self.fit <= threshold
        }
    }

    fn make_candidates(fitnesses: &[f64]) -> Vec<TestGenome> {
        fitnesses.iter().map(|&f| TestGenome { fit: f }).collect()
    }

    fn refs(genomes: &[TestGenome]) -> Vec<&TestGenome> {
        genomes.iter().collect()
    }

    #[test]
    fn test_best_fitness_takes_first_two() {
        let pop = make_candidates(&[1.0, 2.0, 3.0, 4.0]);
        let mut rng = create_rng(42);
        for _ in 0..20 {
            assert_eq!(ParentSelection::BestFitness.select(&refs(&pop), &mut rng), (0, 1));
        }
    }

    #[test]
    fn test_random_distinct_and_uniform() {
        let pop = make_candidates(&[1.0, 2.0, 3.0, 4.0]);
        let mut rng = create_rng(42);
        let mut counts = [0u32; 4];
        for _ in 0..10_000 {
            let (a, b) = ParentSelection::Random.select(&refs(&pop), &mut rng);
            assert_ne!(a, b);
            counts[a] += 1;
        }
        for &c in &counts {
            assert!(c > 2000, "expected uniform, got {counts:?}");
        }
    }

    #[test]
    fn test_tournament_of_three_never_picks_worst_of_three() {
        // with exactly three candidates the worst can never be selected
        let pop = make_candidates(&[1.0, 2.0, 3.0]);
        let mut rng = create_rng(7);
        for _ in 0..500 {
            let (a, b) = ParentSelection::TournamentOfThree.select(&refs(&pop), &mut rng);
            assert_eq!((a, b), (0, 1));
        }
    }

    #[test]
    fn test_tournament_of_three_orders_parents() {
        let pop = make_candidates(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let mut rng = create_rng(9);
        for _ in 0..500 {
            let (a, b) = ParentSelection::TournamentOfThree.select(&refs(&pop), &mut rng);
            assert!(pop[a].fit < pop[b].fit);
            assert_ne!(b, 5, "worst candidate must not win a slot as second-best of three");
        }
    }

    #[test]
    fn test_tournament_with_two_candidates() {
        let pop = make_candidates(&[5.0, 1.0]);
        let mut rng = create_rng(1);
        let (a, b) = ParentSelection::TournamentOfThree.select(&refs(&pop), &mut rng);
        assert_eq!((a, b), (1, 0));
    }

    #[test]
    fn test_uniform_random_mostly_distinct() {
        let pop = make_candidates(&[1.0, 2.0]);
        let mut rng = create_rng(42);
        let identical = (0..1000)
            .filter(|_| {
                let (a, b) = ParentSelection::UniformRandom.select(&refs(&pop), &mut rng);
                a == b
            })
            .count();
        // 11 failed coin flips in a row: ~0.05% per call
        assert!(identical < 10, "too many identical parents: {identical}");
    }

    #[test]
    fn test_single_candidate() {
        let pop = make_candidates(&[5.0]);
        let mut rng = create_rng(42);
        for sel in [
            ParentSelection::Random,
            ParentSelection::BestFitness,
            ParentSelection::TournamentOfThree,
            ParentSelection::UniformRandom,
        ] {
            assert_eq!(sel.select(&refs(&pop), &mut rng), (0, 0));
        }
    }

    #[test]
    #[should_panic(expected = "cannot select from empty candidates")]
    fn test_empty_candidates_panics() {
        let pop: Vec<TestGenome> = vec![];
        let mut rng = create_rng(42);
        ParentSelection::BestFitness.select(&refs(&pop), &mut rng);
    }

    #[test]
    fn test_sample_candidates_whole_population() {
        let mut rng = create_rng(42);
        assert_eq!(sample_candidates(5, 5, &mut rng), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_sample_candidates_distinct_sorted() {
        let mut rng = create_rng(42);
        for _ in 0..200 {
            let picked = sample_candidates(50, 5, &mut rng);
            assert_eq!(picked.len(), 5);
            assert!(picked.windows(2).all(|w| w[0] < w[1]));
            assert!(picked.iter().all(|&i| i < 50));
        }
    }
}
