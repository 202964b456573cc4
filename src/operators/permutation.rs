//! Permutation crossover and mutation operators.
//!
//! These operate on slices of any `Copy + PartialEq` gene type and are
//! domain-agnostic: the eight-queens board uses them on position codes, but
//! any permutation encoding can.
//!
//! # Crossover Operators
//!
//! - [`cut_and_crossfill`]: prefix from one parent, remainder in the other
//!   parent's order, O(n²)
//! - [`cycle_crossover`] (CX): Oliver, Smith & Holland (1987), preserves
//!   absolute positions, O(n²)
//!
//! # Mutation Operators
//!
//! - [`swap_any`]: exchange two distinct random positions, O(1)
//! - [`swap_collision`]: move a gene that is currently in conflict, O(1)
//!
//! # References
//!
//! - Eiben & Smith (2015), *Introduction to Evolutionary Computing*, §4.5
//! - Oliver, Smith & Holland (1987), "A Study of Permutation Crossover
//!   Operators on the Traveling Salesman Problem"

use rand::Rng;

/// Recombination operators for permutation genomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PermutationRecombination {
    /// See [`cut_and_crossfill`].
    #[default]
    CutAndCrossfill,
    /// See [`cycle_crossover`].
    CycleCrossover,
}

impl PermutationRecombination {
    /// Applies the selected operator to two parents.
    pub fn apply<T: Copy + PartialEq, R: Rng + ?Sized>(
        self,
        parent1: &[T],
        parent2: &[T],
        rng: &mut R,
    ) -> (Vec<T>, Vec<T>) {
        match self {
            PermutationRecombination::CutAndCrossfill => cut_and_crossfill(parent1, parent2, rng),
            PermutationRecombination::CycleCrossover => cycle_crossover(parent1, parent2),
        }
    }
}

/// Mutation operators for permutation genomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PermutationMutation {
    /// See [`swap_any`].
    #[default]
    SwapAny,
    /// See [`swap_collision`].
    SwapCollision,
}

impl PermutationMutation {
    /// Applies the selected operator in place.
    ///
    /// `colliding` lists the positions currently in conflict; only
    /// [`PermutationMutation::SwapCollision`] reads it.
    pub fn apply<T, R: Rng + ?Sized>(self, perm: &mut [T], colliding: &[usize], rng: &mut R) {
        match self {
            PermutationMutation::SwapAny => swap_any(perm, rng),
            PermutationMutation::SwapCollision => swap_collision(perm, colliding, rng),
        }
    }
}

// ============================================================================
// Crossover operators
// ============================================================================

/// Cut-and-crossfill crossover.
///
/// # Algorithm
///
/// 1. Pick a random cut point `c` in `0..n`
/// 2. Child 1 = `parent1[..c]` followed by the genes of `parent2` that are not
///    in that prefix, in `parent2`'s order
/// 3. Child 2 is built the same way with the parents swapped
///
/// # Panics
/// Panics if parents have different lengths.
pub fn cut_and_crossfill<T: Copy + PartialEq, R: Rng + ?Sized>(
    parent1: &[T],
    parent2: &[T],
    rng: &mut R,
) -> (Vec<T>, Vec<T>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");

    if n == 0 {
        return (Vec::new(), Vec::new());
    }

    let cut = rng.random_range(0..n);
    (
        crossfill(&parent1[..cut], parent2),
        crossfill(&parent2[..cut], parent1),
    )
}

fn crossfill<T: Copy + PartialEq>(prefix: &[T], donor: &[T]) -> Vec<T> {
    let mut child = Vec::with_capacity(donor.len());
    child.extend_from_slice(prefix);
    child.extend(donor.iter().copied().filter(|gene| !prefix.contains(gene)));
    child
}

/// Cycle crossover (CX).
///
/// # Algorithm (Oliver, Smith & Holland, 1987)
///
/// 1. Start at position 0 and follow the cycle: take `parent2`'s gene at the
///    current position, find where that gene sits in `parent1`, move there,
///    until the walk returns to position 0
/// 2. Positions on the cycle copy straight across (child 1 from `parent1`,
///    child 2 from `parent2`)
/// 3. All other positions swap (child 1 from `parent2`, child 2 from
///    `parent1`)
///
/// Deterministic: the result depends only on the parents.
///
/// # Panics
/// Panics if parents have different lengths or are not permutations of the
/// same genes.
pub fn cycle_crossover<T: Copy + PartialEq>(parent1: &[T], parent2: &[T]) -> (Vec<T>, Vec<T>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");

    let mut in_cycle = vec![false; n];
    let mut pos = 0;
    while n > 0 && !in_cycle[pos] {
        in_cycle[pos] = true;
        let gene = parent2[pos];
        pos = parent1
            .iter()
            .position(|&g| g == gene)
            .expect("parents must be permutations of the same genes");
    }

    let mut child1 = Vec::with_capacity(n);
    let mut child2 = Vec::with_capacity(n);
    for i in 0..n {
        if in_cycle[i] {
            child1.push(parent1[i]);
            child2.push(parent2[i]);
        } else {
            child1.push(parent2[i]);
            child2.push(parent1[i]);
        }
    }
    (child1, child2)
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Swap mutation: exchange two distinct random positions.
///
/// No-op for fewer than two genes.
pub fn swap_any<T, R: Rng + ?Sized>(perm: &mut [T], rng: &mut R) {
    let n = perm.len();
    if n < 2 {
        return;
    }
    let i = rng.random_range(0..n);
    perm.swap(i, other_position(n, i, rng));
}

/// Collision-directed swap: pick one of the `colliding` positions at random
/// and swap it with a different random position.
///
/// No-op when `colliding` is empty (nothing to repair) or for fewer than two
/// genes.
pub fn swap_collision<T, R: Rng + ?Sized>(perm: &mut [T], colliding: &[usize], rng: &mut R) {
    let n = perm.len();
    if n < 2 || colliding.is_empty() {
        return;
    }
    let i = colliding[rng.random_range(0..colliding.len())];
    perm.swap(i, other_position(n, i, rng));
}

/// Uniform random position in `0..n` different from `exclude`.
fn other_position<R: Rng + ?Sized>(n: usize, exclude: usize, rng: &mut R) -> usize {
    let j = rng.random_range(0..n - 1);
    if j >= exclude {
        j + 1
    } else {
        j
    }
}

// ============================================================================
// Tests
// ============================================================================
