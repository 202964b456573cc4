//! Eight-queens puzzle as a [`Problem`].

use super::board::{to_positions, Board};
use crate::engine::{InitialPopulation, Problem};
use crate::error::SolverError;
use crate::operators::permutation::{PermutationMutation, PermutationRecombination};
use crate::random::EvoRng;

/// The eight-queens puzzle with a chosen pair of permutation operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueensProblem {
    pub recombination: PermutationRecombination,
    pub mutation: PermutationMutation,
}

impl QueensProblem {
    pub fn new(recombination: PermutationRecombination, mutation: PermutationMutation) -> Self {
        Self {
            recombination,
            mutation,
        }
    }
}

impl Problem for QueensProblem {
    type Genome = Board;

    fn create_genome(&self, method: InitialPopulation, generation: usize, rng: &mut EvoRng) -> Result<Board, SolverError> {
        Ok(match method {
            InitialPopulation::Random => Board::random(generation, rng),
            InitialPopulation::Baseline => Board::ordered(generation),
        })
    }

    fn recombine(
        &self,
        parent1: &Board,
        parent2: &Board,
        generation: usize,
        rng: &mut EvoRng,
    ) -> Result<(Board, Board), SolverError> {
        let (a, b) = self
            .recombination
            .apply(parent1.positions(), parent2.positions(), rng);
        Ok((
            Board::new(to_positions(a)?, generation),
            Board::new(to_positions(b)?, generation),
        ))
    }

    fn mutate(&self, genome: &Board, generation: usize, rng: &mut EvoRng) -> Result<Board, SolverError> {
        let mut positions = *genome.positions();
        self.mutation
            .apply(&mut positions, &genome.colliding_positions(), rng);
        Ok(Board::new(positions, generation))
    }

    fn reborn(&self, genome: &Board, generation: usize) -> Board {
        genome.reborn(generation)
    }
}
