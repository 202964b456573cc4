//! Benchmark functions for continuous minimization.
//!
//! Each function has a documented search domain and a known global minimum,
//! which lets the solver report distance-to-optimum and relative error.
//!
//! | Function   | Domain              | Minimum point     | Value |
//! |------------|---------------------|-------------------|-------|
//! | Ackley     | [-32.768, 32.768]   | (0, …, 0)         | 0     |
//! | Rastrigin  | [-5.12, 5.12]       | (0, …, 0)         | 0     |
//! | Rosenbrock | [-2.048, 2.048]     | (1, …, 1)         | 0     |
//! | Schwefel   | [-500, 500]         | (420.9687, …)     | 0     |
//!
//! # References
//!
//! - Surjanovic & Bingham, *Virtual Library of Simulation Experiments:
//!   Test Functions and Datasets* (optimization test problems)

use crate::random::EvoRng;
use rand::Rng;
use std::f64::consts::{E, PI};
use std::fmt;

/// Optimal values closer to zero than this use absolute error.
pub const ZERO_OPTIMUM_TOLERANCE: f64 = 1e-10;

/// Per-dimension offset of the Schwefel function.
const SCHWEFEL_OFFSET: f64 = 418.982_887_272_433_9;

/// Coordinate of the Schwefel minimum in every dimension.
const SCHWEFEL_OPTIMUM: f64 = 420.9687;

/// Closed interval every coordinate must lie in.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

impl Domain {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, x: f64) -> bool {
        (self.min..=self.max).contains(&x)
    }

    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }

    /// Uniform sample in `[min, max)`.
    pub fn sample(&self, rng: &mut EvoRng) -> f64 {
        self.min + rng.random::<f64>() * self.width()
    }
}

/// Benchmark objective functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BenchmarkFunction {
    /// Nearly flat outer region with a deep central funnel.
    #[default]
    Ackley,
    /// Highly multimodal, regularly spaced local minima.
    Rastrigin,
    /// Narrow curved valley between adjacent dimensions.
    Rosenbrock,
    /// Deceptive: the second-best minimum is far from the global one.
    Schwefel,
}

impl BenchmarkFunction {
    /// All functions, in declaration order.
    pub const ALL: [BenchmarkFunction; 4] = [
        BenchmarkFunction::Ackley,
        BenchmarkFunction::Rastrigin,
        BenchmarkFunction::Rosenbrock,
        BenchmarkFunction::Schwefel,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BenchmarkFunction::Ackley => "Ackley",
            BenchmarkFunction::Rastrigin => "Rastrigin",
            BenchmarkFunction::Rosenbrock => "Rosenbrock",
            BenchmarkFunction::Schwefel => "Schwefel",
        }
    }

    /// Search domain for every coordinate.
    pub fn domain(&self) -> Domain {
        match self {
            BenchmarkFunction::Ackley => Domain::new(-32.768, 32.768),
            BenchmarkFunction::Rastrigin => Domain::new(-5.12, 5.12),
            BenchmarkFunction::Rosenbrock => Domain::new(-2.048, 2.048),
            BenchmarkFunction::Schwefel => Domain::new(-500.0, 500.0),
        }
    }

    /// Value at the global minimum.
    pub fn optimal_value(&self) -> f64 {
        0.0
    }

    /// Coordinates of the global minimum in `dimensions` dimensions.
    pub fn global_minimum(&self, dimensions: usize) -> Vec<f64> {
        let coordinate = match self {
            BenchmarkFunction::Ackley | BenchmarkFunction::Rastrigin => 0.0,
            BenchmarkFunction::Rosenbrock => 1.0,
            BenchmarkFunction::Schwefel => SCHWEFEL_OPTIMUM,
        };
        vec![coordinate; dimensions]
    }

    /// Evaluates the function at `x`.
    pub fn evaluate(&self, x: &[f64]) -> f64 {
        let n = x.len() as f64;
        match self {
            BenchmarkFunction::Ackley => {
                if x.is_empty() {
                    return 0.0;
                }
                let (a, b, c) = (20.0, 0.2, 2.0 * PI);
                let sum_squares: f64 = x.iter().map(|xi| xi * xi).sum();
                let sum_cosines: f64 = x.iter().map(|xi| (c * xi).cos()).sum();
                -a * (-b * (sum_squares / n).sqrt()).exp() - (sum_cosines / n).exp() + a + E
            }
            BenchmarkFunction::Rastrigin => {
                let a = 10.0;
                a * n
                    + x.iter()
                        .map(|xi| xi * xi - a * (2.0 * PI * xi).cos())
                        .sum::<f64>()
            }
            BenchmarkFunction::Rosenbrock => x
                .windows(2)
                .map(|w| 100.0 * (w[1] - w[0] * w[0]).powi(2) + (1.0 - w[0]).powi(2))
                .sum(),
            BenchmarkFunction::Schwefel => {
                SCHWEFEL_OFFSET * n - x.iter().map(|xi| xi * xi.abs().sqrt().sin()).sum::<f64>()
            }
        }
    }

    /// Euclidean distance from `x` to the global minimum.
    pub fn distance_to_global_minimum(&self, x: &[f64]) -> f64 {
        self.global_minimum(x.len())
            .iter()
            .zip(x)
            .map(|(opt, xi)| (xi - opt).powi(2))
            .sum::<f64>()
            .sqrt()
    }

    /// Error of `value` relative to the optimal value.
    ///
    /// Falls back to absolute error when the optimum is (numerically) zero,
    /// which holds for every function in this table.
    pub fn relative_error(&self, value: f64) -> f64 {
        let optimum = self.optimal_value();
        let diff = (value - optimum).abs();
        if optimum.abs() < ZERO_OPTIMUM_TOLERANCE {
            diff
        } else {
            diff / optimum.abs()
        }
    }
}

impl fmt::Display for BenchmarkFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
