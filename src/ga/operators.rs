//! Permutation operators used by the genetic search.
//!
//! - [`ordered_crossover`]: copy a slice of one parent, fill from the other
//! - [`reverse_segment`]: 2-opt style segment reversal mutation
//! - [`random_permutation`]: uniformly shuffled ordering
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"

use rand::seq::SliceRandom;
use rand::Rng;

/// Ordered crossover producing a single child.
///
/// 1. Pick a random contiguous slice `[start, end)` of `parent1`
/// 2. Start the child with that slice
/// 3. Append the cities of `parent2` in their order, skipping any already
///    present
///
/// Parents are permutations of `0..n`; the child is too.
///
/// # Complexity
/// O(n) time, O(n) space
pub fn ordered_crossover<R: Rng>(parent1: &[usize], parent2: &[usize], rng: &mut R) -> Vec<usize> {
    let n = parent1.len();
    if n == 0 {
        return Vec::new();
    }

    let start = rng.random_range(0..n);
    let end = rng.random_range(start..=n);

    let mut taken = vec![false; n];
    let mut child = Vec::with_capacity(n);

    for &city in &parent1[start..end] {
        taken[city] = true;
        child.push(city);
    }
    for &city in parent2 {
        if !taken[city] {
            taken[city] = true;
            child.push(city);
        }
    }

    child
}

/// Reverses the segment between two distinct random cut points.
///
/// # Complexity
/// O(n)
pub fn reverse_segment<R: Rng>(perm: &mut [usize], rng: &mut R) {
    let n = perm.len();
    if n < 2 {
        return;
    }
    let i = rng.random_range(0..n);
    let j = (i + 1 + rng.random_range(0..n - 1)) % n;
    let (lo, hi) = if i < j { (i, j) } else { (j, i) };
    perm[lo..hi].reverse();
}

/// A uniformly random ordering of `0..n`.
pub fn random_permutation<R: Rng>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..n).collect();
    perm.shuffle(rng);
    perm
}
