//! Fitness-sorted, capacity-bounded population.

use super::types::Genome;
use std::cmp::Ordering;

/// An ordered collection of genomes, best (lowest fitness) first.
///
/// Every operation that changes the sequence re-sorts it with a stable sort,
/// so individuals with equal fitness keep their insertion order. After
/// [`absorb`](Self::absorb) or [`replace`](Self::replace) the length never
/// exceeds the capacity.
#[derive(Debug, Clone)]
pub struct Population<G: Genome> {
    individuals: Vec<G>,
    capacity: usize,
}

impl<G: Genome> Population<G> {
    /// Builds a population from `individuals`, sorted and truncated to
    /// `capacity`.
    pub fn new(individuals: Vec<G>, capacity: usize) -> Self {
        let mut population = Self {
            individuals,
            capacity,
        };
        population.sort_and_truncate();
        population
    }

    /// Maximum number of individuals kept after truncation.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Read-only view in fitness order.
    pub fn as_slice(&self) -> &[G] {
        &self.individuals
    }

    pub fn iter(&self) -> std::slice::Iter<'_, G> {
        self.individuals.iter()
    }

    /// The individual at index 0.
    pub fn best(&self) -> Option<&G> {
        self.individuals.first()
    }

    /// The individual at the last index.
    pub fn worst(&self) -> Option<&G> {
        self.individuals.last()
    }

    /// Appends `offspring`, re-sorts, and keeps the best `capacity`.
    ///
    /// Parents and offspring compete for the same slots (μ+λ).
    pub fn absorb(&mut self, offspring: Vec<G>) {
        self.individuals.extend(offspring);
        self.sort_and_truncate();
    }

    /// Discards the current individuals in favour of `offspring`, keeping the
    /// best `capacity` of them (μ,λ).
    pub fn replace(&mut self, offspring: Vec<G>) {
        self.individuals = offspring;
        self.sort_and_truncate();
    }

    /// Whether the sequence is sorted ascending by fitness.
    pub fn is_sorted(&self) -> bool {
        self.individuals
            .windows(2)
            .all(|w| w[0].fitness().partial_cmp(&w[1].fitness()) != Some(Ordering::Greater))
    }

    fn sort_and_truncate(&mut self) {
        // Vec::sort_by is stable
        self.individuals.sort_by(|a, b| {
            a.fitness()
                .partial_cmp(&b.fitness())
                .unwrap_or(Ordering::Equal)
        });
        self.individuals.truncate(self.capacity);
    }
}

impl<'a, G: Genome> IntoIterator for &'a Population<G> {
    type Item = &'a G;
    type IntoIter = std::slice::Iter<'a, G>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Tagged {
        fit: u32,
        tag: char,
    }

    impl Genome for Tagged {
        type Fitness = u32;
        fn fitness(&self) -> u32 {
            self.fit
        }
        fn iteration_born(&self) -> usize {
            0
        }
        fn is_converged(&self, _threshold: f64) -> bool {
            self.fit == 0
        }
    }

    fn t(fit: u32, tag: char) -> Tagged {
        Tagged { fit, tag }
    }

    #[test]
    fn test_new_sorts_and_truncates() {
        let pop = Population::new(vec![t(3, 'a'), t(1, 'b'), t(2, 'c'), t(0, 'd')], 3);
        let fits: Vec<u32> = pop.iter().map(|g| g.fit).collect();
        assert_eq!(fits, vec![0, 1, 2]);
        assert_eq!(pop.capacity(), 3);
        assert!(pop.is_sorted());
    }

    #[test]
    fn test_absorb_keeps_best() {
        let mut pop = Population::new(vec![t(1, 'a'), t(5, 'b')], 2);
        pop.absorb(vec![t(0, 'c'), t(9, 'd')]);
        let tags: Vec<char> = pop.iter().map(|g| g.tag).collect();
        assert_eq!(tags, vec!['c', 'a']);
        assert_eq!(pop.len(), 2);
    }

    #[test]
    fn test_replace_discards_parents() {
        let mut pop = Population::new(vec![t(0, 'a'), t(1, 'b')], 2);
        pop.replace(vec![t(7, 'c'), t(4, 'd'), t(5, 'e')]);
        let tags: Vec<char> = pop.iter().map(|g| g.tag).collect();
        assert_eq!(tags, vec!['d', 'e']);
    }

    #[test]
    fn test_stable_for_equal_fitness() {
        let mut pop = Population::new(vec![t(1, 'a'), t(1, 'b')], 4);
        pop.absorb(vec![t(1, 'c'), t(0, 'd')]);
        let tags: Vec<char> = pop.iter().map(|g| g.tag).collect();
        assert_eq!(tags, vec!['d', 'a', 'b', 'c']);
    }

    #[test]
    fn test_best_and_worst() {
        let pop = Population::new(vec![t(4, 'a'), t(2, 'b'), t(8, 'c')], 3);
        assert_eq!(pop.best().map(|g| g.tag), Some('b'));
        assert_eq!(pop.worst().map(|g| g.tag), Some('c'));

        let empty: Population<Tagged> = Population::new(vec![], 3);
        assert!(empty.is_empty());
        assert!(empty.best().is_none());
    }
}
