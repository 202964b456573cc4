//! Real-vector recombination and mutation operators.
//!
//! Operators take gene slices (plus optional self-adaptive step sizes) and
//! return fresh vectors; nothing is modified in place. Every mutation clamps
//! genes into the function's [`Domain`].
//!
//! # References
//!
//! - Eiben & Smith (2015), *Introduction to Evolutionary Computing*, §4.4
//! - Beyer & Schwefel (2002), "Evolution strategies — A comprehensive
//!   introduction"

use crate::functions::Domain;
use crate::random::EvoRng;
use rand::Rng;

/// Standard deviation of [`RealMutation::GaussianMutation`].
pub const GAUSSIAN_SIGMA: f64 = 0.1;

/// Default per-coordinate rate of [`RealMutation::UniformMutation`].
pub const UNIFORM_MUTATION_RATE: f64 = 0.1;

/// Lower bound for self-adaptive step sizes.
pub const MIN_STEP_SIZE: f64 = 1e-6;

/// Genes with optional step sizes, borrowed from a parent.
#[derive(Debug, Clone, Copy)]
pub struct Strand<'a> {
    pub genes: &'a [f64],
    pub step_sizes: Option<&'a [f64]>,
}

/// Genes with optional step sizes produced by an operator.
#[derive(Debug, Clone, PartialEq)]
pub struct Offspring {
    pub genes: Vec<f64>,
    pub step_sizes: Option<Vec<f64>>,
}

/// Recombination operators for real-vector genomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RealRecombination {
    /// Each coordinate swaps between the two children with probability 0.5.
    UniformCrossover,
    /// One shared α ∈ [0, 1]; children are the two complementary blends.
    #[default]
    ArithmeticCrossover,
    /// Both children are the elementwise mean (identical twins).
    IntermediateRecombination,
    /// Each coordinate of each child is drawn independently from either
    /// parent.
    DiscreteRecombination,
}

impl RealRecombination {
    /// Recombines two parents into two children.
    ///
    /// Step sizes follow the same rule as genes when both parents carry
    /// them. Otherwise each child inherits whichever parent's step sizes
    /// exist (child 1 prefers parent 1, child 2 prefers parent 2).
    ///
    /// # Panics
    /// Panics if the gene vectors (or paired step-size vectors) differ in
    /// length.
    pub fn apply(self, parent1: Strand<'_>, parent2: Strand<'_>, rng: &mut EvoRng) -> (Offspring, Offspring) {
        let n = parent1.genes.len();
        assert_eq!(n, parent2.genes.len(), "parents must have equal length");

        let paired = match (parent1.step_sizes, parent2.step_sizes) {
            (Some(s1), Some(s2)) => {
                assert_eq!(s1.len(), s2.len(), "step sizes must have equal length");
                Some((s1, s2))
            }
            _ => None,
        };

        let (mut child1, mut child2) = match self {
            RealRecombination::UniformCrossover => uniform_crossover(parent1.genes, parent2.genes, paired, rng),
            RealRecombination::ArithmeticCrossover => {
                let alpha = rng.random::<f64>();
                (
                    Offspring {
                        genes: blend(parent1.genes, parent2.genes, alpha),
                        step_sizes: paired.map(|(s1, s2)| blend(s1, s2, alpha)),
                    },
                    Offspring {
                        genes: blend(parent1.genes, parent2.genes, 1.0 - alpha),
                        step_sizes: paired.map(|(s1, s2)| blend(s1, s2, 1.0 - alpha)),
                    },
                )
            }
            RealRecombination::IntermediateRecombination => {
                let child = Offspring {
                    genes: blend(parent1.genes, parent2.genes, 0.5),
                    step_sizes: paired.map(|(s1, s2)| blend(s1, s2, 0.5)),
                };
                (child.clone(), child)
            }
            RealRecombination::DiscreteRecombination => (
                discrete_child(parent1.genes, parent2.genes, paired, rng),
                discrete_child(parent1.genes, parent2.genes, paired, rng),
            ),
        };

        if paired.is_none() {
            child1.step_sizes = parent1.step_sizes.or(parent2.step_sizes).map(<[f64]>::to_vec);
            child2.step_sizes = parent2.step_sizes.or(parent1.step_sizes).map(<[f64]>::to_vec);
        }
        (child1, child2)
    }
}

/// `alpha * a + (1 - alpha) * b`, elementwise.
fn blend(a: &[f64], b: &[f64], alpha: f64) -> Vec<f64> {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| alpha * x + (1.0 - alpha) * y)
        .collect()
}

type Paired<'a> = Option<(&'a [f64], &'a [f64])>;

fn uniform_crossover(p1: &[f64], p2: &[f64], paired: Paired<'_>, rng: &mut EvoRng) -> (Offspring, Offspring) {
    let n = p1.len();
    let mut genes1 = Vec::with_capacity(n);
    let mut genes2 = Vec::with_capacity(n);
    let mut steps = paired.map(|_| (Vec::with_capacity(n), Vec::with_capacity(n)));

    for i in 0..n {
        let keep = rng.random_bool(0.5);
        let (a, b) = if keep { (p1[i], p2[i]) } else { (p2[i], p1[i]) };
        genes1.push(a);
        genes2.push(b);
        if let (Some((s1, s2)), Some((out1, out2))) = (paired, steps.as_mut()) {
            let (a, b) = if keep { (s1[i], s2[i]) } else { (s2[i], s1[i]) };
            out1.push(a);
            out2.push(b);
        }
    }

    let (steps1, steps2) = match steps {
        Some((a, b)) => (Some(a), Some(b)),
        None => (None, None),
    };
    (
        Offspring {
            genes: genes1,
            step_sizes: steps1,
        },
        Offspring {
            genes: genes2,
            step_sizes: steps2,
        },
    )
}

fn discrete_child(p1: &[f64], p2: &[f64], paired: Paired<'_>, rng: &mut EvoRng) -> Offspring {
    let n = p1.len();
    let mut genes = Vec::with_capacity(n);
    let mut steps = paired.map(|_| Vec::with_capacity(n));

    for i in 0..n {
        let from_first = rng.random_bool(0.5);
        genes.push(if from_first { p1[i] } else { p2[i] });
        if let (Some((s1, s2)), Some(out)) = (paired, steps.as_mut()) {
            out.push(if from_first { s1[i] } else { s2[i] });
        }
    }

    Offspring {
        genes,
        step_sizes: steps,
    }
}

/// Mutation operators for real-vector genomes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RealMutation {
    /// Adds N(0, [`GAUSSIAN_SIGMA`]²) to every coordinate.
    #[default]
    GaussianMutation,
    /// Replaces each coordinate with probability `rate` by a uniform draw
    /// over the domain.
    UniformMutation { rate: f64 },
    /// Log-normal self-adaptation of per-gene step sizes, then Gaussian
    /// perturbation with the updated step sizes.
    SelfAdaptiveGaussianMutation,
}

impl RealMutation {
    /// Uniform mutation with the default rate.
    pub const fn uniform() -> Self {
        RealMutation::UniformMutation {
            rate: UNIFORM_MUTATION_RATE,
        }
    }

    /// Whether this operator evolves step sizes.
    pub fn is_self_adaptive(&self) -> bool {
        matches!(self, RealMutation::SelfAdaptiveGaussianMutation)
    }

    /// Mutates a strand, returning new genes and step sizes.
    ///
    /// Non-adaptive operators pass step sizes through unchanged. The
    /// self-adaptive operator starts from `initial_step_size` in every
    /// coordinate when the strand carries none.
    pub fn apply(self, strand: Strand<'_>, domain: Domain, initial_step_size: f64, rng: &mut EvoRng) -> Offspring {
        match self {
            RealMutation::GaussianMutation => Offspring {
                genes: gaussian_mutation(strand.genes, domain, GAUSSIAN_SIGMA, rng),
                step_sizes: strand.step_sizes.map(<[f64]>::to_vec),
            },
            RealMutation::UniformMutation { rate } => Offspring {
                genes: uniform_mutation(strand.genes, domain, rate, rng),
                step_sizes: strand.step_sizes.map(<[f64]>::to_vec),
            },
            RealMutation::SelfAdaptiveGaussianMutation => {
                let fallback;
                let steps = match strand.step_sizes {
                    Some(s) => s,
                    None => {
                        fallback = vec![initial_step_size; strand.genes.len()];
                        &fallback
                    }
                };
                let (genes, steps) = self_adaptive_mutation(strand.genes, steps, domain, rng);
                Offspring {
                    genes,
                    step_sizes: Some(steps),
                }
            }
        }
    }
}

/// Adds `N(0, sigma²)` to every gene and clamps into the domain.
pub fn gaussian_mutation(genes: &[f64], domain: Domain, sigma: f64, rng: &mut EvoRng) -> Vec<f64> {
    genes
        .iter()
        .map(|&x| domain.clamp(x + rng.normal(0.0, sigma)))
        .collect()
}

/// Replaces each gene with probability `rate` by a uniform domain sample.
pub fn uniform_mutation(genes: &[f64], domain: Domain, rate: f64, rng: &mut EvoRng) -> Vec<f64> {
    genes
        .iter()
        .map(|&x| {
            if rng.chance(rate) {
                domain.sample(rng)
            } else {
                x
            }
        })
        .collect()
}

/// Self-adaptive Gaussian mutation ((1,λ)-ES log-normal rule).
///
/// With `n` coordinates, `τ0 = 1/√(2n)` and `τ = 1/√(2√n)`:
///
/// ```text
/// σ'ᵢ = clamp(σᵢ · exp(τ0·N(0,1) + τ·Nᵢ(0,1)), 1e-6, (max − min)/2)
/// x'ᵢ = clamp(xᵢ + σ'ᵢ · N'ᵢ(0,1), min, max)
/// ```
///
/// The first normal draw is shared by every coordinate of this call.
///
/// # Panics
/// Panics if `genes` and `step_sizes` differ in length.
pub fn self_adaptive_mutation(
    genes: &[f64],
    step_sizes: &[f64],
    domain: Domain,
    rng: &mut EvoRng,
) -> (Vec<f64>, Vec<f64>) {
    let n = genes.len();
    assert_eq!(n, step_sizes.len(), "one step size per gene");
    if n == 0 {
        return (Vec::new(), Vec::new());
    }

    let dims = n as f64;
    let tau0 = 1.0 / (2.0 * dims).sqrt();
    let tau = 1.0 / (2.0 * dims.sqrt()).sqrt();
    let max_step = domain.width() / 2.0;

    let global = rng.gaussian();
    let mut new_genes = Vec::with_capacity(n);
    let mut new_steps = Vec::with_capacity(n);
    for (&x, &sigma) in genes.iter().zip(step_sizes) {
        let sigma = (sigma * (tau0 * global + tau * rng.gaussian()).exp()).clamp(MIN_STEP_SIZE, max_step);
        new_genes.push(domain.clamp(x + sigma * rng.gaussian()));
        new_steps.push(sigma);
    }
    (new_genes, new_steps)
}
