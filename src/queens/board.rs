//! Eight-queens board genome.

use crate::engine::Genome;
use crate::error::SolverError;
use crate::random::EvoRng;
use rand::seq::SliceRandom;
use std::fmt;

/// Number of queens (and rows) on the board.
pub const BOARD_SIZE: usize = 8;

/// Row of one queen, encoded as three bits (most significant first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueenPosition(pub [bool; 3]);

impl QueenPosition {
    /// Encodes `row`, or `None` if it is off the board.
    pub const fn from_row(row: usize) -> Option<Self> {
        if row >= BOARD_SIZE {
            return None;
        }
        Some(Self([row & 0b100 != 0, row & 0b010 != 0, row & 0b001 != 0]))
    }

    pub const fn row(&self) -> usize {
        let [a, b, c] = self.0;
        ((a as usize) << 2) | ((b as usize) << 1) | (c as usize)
    }

    pub const fn bits(&self) -> [bool; 3] {
        self.0
    }
}

impl fmt::Display for QueenPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Every position code in row order.
pub const ORDERED_POSITIONS: [QueenPosition; BOARD_SIZE] = [
    QueenPosition([false, false, false]),
    QueenPosition([false, false, true]),
    QueenPosition([false, true, false]),
    QueenPosition([false, true, true]),
    QueenPosition([true, false, false]),
    QueenPosition([true, false, true]),
    QueenPosition([true, true, false]),
    QueenPosition([true, true, true]),
];

/// One queen per column; `positions[i]` is the row of the queen in column `i`.
///
/// Fitness is the number of queen pairs sharing a diagonal, each pair counted
/// once. A board built from a permutation never has row or column conflicts,
/// so fitness 0 means solved.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Board {
    positions: [QueenPosition; BOARD_SIZE],
    fitness: u32,
    collisions: Vec<Vec<usize>>,
    iteration_born: usize,
}

impl Board {
    pub fn new(positions: [QueenPosition; BOARD_SIZE], iteration_born: usize) -> Self {
        let rows = positions.map(|p| p.row());
        let mut collisions = vec![Vec::new(); BOARD_SIZE];
        let mut fitness = 0;
        for i in 0..BOARD_SIZE {
            for j in (i + 1)..BOARD_SIZE {
                if rows[i].abs_diff(rows[j]) == j - i {
                    collisions[i].push(j);
                    collisions[j].push(i);
                    fitness += 1;
                }
            }
        }
        Self {
            positions,
            fitness,
            collisions,
            iteration_born,
        }
    }

    /// Builds a board from row numbers.
    ///
    /// # Errors
    /// [`SolverError::DimensionMismatch`] if `rows` does not have
    /// [`BOARD_SIZE`] entries, [`SolverError::InvalidParameters`] if a row is
    /// off the board.
    pub fn from_rows(rows: &[usize], iteration_born: usize) -> Result<Self, SolverError> {
        let positions = rows
            .iter()
            .map(|&row| {
                QueenPosition::from_row(row)
                    .ok_or_else(|| SolverError::InvalidParameters(format!("row {row} is off the board")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let positions = to_positions(positions)?;
        Ok(Self::new(positions, iteration_born))
    }

    /// The identity board: every queen on the main diagonal (fitness 28).
    pub fn ordered(iteration_born: usize) -> Self {
        Self::new(ORDERED_POSITIONS, iteration_born)
    }

    /// Uniformly random permutation (Fisher–Yates).
    pub fn random(iteration_born: usize, rng: &mut EvoRng) -> Self {
        let mut positions = ORDERED_POSITIONS;
        positions.shuffle(rng);
        Self::new(positions, iteration_born)
    }

    pub fn positions(&self) -> &[QueenPosition; BOARD_SIZE] {
        &self.positions
    }

    pub fn rows(&self) -> [usize; BOARD_SIZE] {
        self.positions.map(|p| p.row())
    }

    /// Columns whose queen collides with the queen in `column`.
    pub fn collisions_of(&self, column: usize) -> &[usize] {
        self.collisions.get(column).map_or(&[], Vec::as_slice)
    }

    /// Columns involved in at least one collision, ascending.
    pub fn colliding_positions(&self) -> Vec<usize> {
        (0..BOARD_SIZE).filter(|&i| !self.collisions[i].is_empty()).collect()
    }

    /// Whether every row appears exactly once.
    pub fn is_permutation(&self) -> bool {
        let mut seen = [false; BOARD_SIZE];
        for row in self.rows() {
            if std::mem::replace(&mut seen[row], true) {
                return false;
            }
        }
        true
    }

    pub fn reborn(&self, generation: usize) -> Self {
        Self {
            iteration_born: generation,
            ..self.clone()
        }
    }
}

/// Converts operator output back into a fixed-size board.
pub(crate) fn to_positions(positions: Vec<QueenPosition>) -> Result<[QueenPosition; BOARD_SIZE], SolverError> {
    let actual = positions.len();
    positions.try_into().map_err(|_| SolverError::DimensionMismatch {
        expected: BOARD_SIZE,
        actual,
    })
}

impl Genome for Board {
    type Fitness = u32;

    fn fitness(&self) -> u32 {
        self.fitness
    }

    fn iteration_born(&self) -> usize {
        self.iteration_born
    }

    fn is_converged(&self, _threshold: f64) -> bool {
        self.fitness == 0
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, position) in self.positions.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{position}")?;
        }
        Ok(())
    }
}
