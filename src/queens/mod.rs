//! The eight-queens puzzle as a permutation problem.
//!
//! A [`Board`] places one queen per column; its genome is a permutation of
//! the eight row codes, so row and column conflicts are impossible by
//! construction and only diagonal collisions count toward fitness.
//!
//! # Usage
//!
//! ```
//! use u_evolab::engine::{Genome, Solver, SolverConfig, SolverState};
//! use u_evolab::queens::QueensProblem;
//!
//! let config = SolverConfig::eight_queens().with_seed(42);
//! let mut solver = Solver::new(QueensProblem::default(), config).unwrap();
//!
//! if solver.run().unwrap() == SolverState::Solved {
//!     assert_eq!(solver.best().unwrap().fitness(), 0);
//! }
//! ```

mod board;
mod problem;

pub use board::{Board, QueenPosition, BOARD_SIZE, ORDERED_POSITIONS};
pub use problem::QueensProblem;
