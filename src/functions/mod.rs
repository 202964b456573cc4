//! Continuous minimization of benchmark functions.
//!
//! A [`FunctionGenome`] is a point in the function's search domain. Its
//! fitness is the function value, and it reports distance and relative error
//! against the known global minimum so the solver can track convergence.
//!
//! # Usage
//!
//! ```
//! use u_evolab::engine::{Solver, SolverConfig};
//! use u_evolab::functions::{BenchmarkFunction, FunctionProblem};
//!
//! let problem = FunctionProblem::new(BenchmarkFunction::Ackley, 5);
//! let config = SolverConfig::default()
//!     .with_population_size(30)
//!     .with_max_iterations(200)
//!     .with_seed(7);
//!
//! let mut solver = Solver::new(problem, config).unwrap();
//! let state = solver.run().unwrap();
//! assert!(state.is_terminal());
//! ```

mod benchmark;
mod genome;
mod problem;

pub use benchmark::{BenchmarkFunction, Domain, ZERO_OPTIMUM_TOLERANCE};
pub use genome::{FunctionGenome, Objective};
pub use problem::{FunctionProblem, DEFAULT_STEP_FRACTION};
