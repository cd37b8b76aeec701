//! Permutation operators for the evolutionary search.
//!
//! The chromosome is an index tour — a permutation of positions into the
//! point arena. Both operators preserve the permutation property by
//! construction: crossover fills every child slot exactly once from
//! values not yet present, and mutation only swaps slots. A naive
//! "overwrite positions from the second parent" crossover does not have
//! this property (it can duplicate and drop points) and must not be used.
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//!   (order crossover)
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use rand::Rng;
use rand::seq::SliceRandom;

/// Order crossover: one child from two parent tours.
///
/// A random segment `[start, end]` of `parent_a` is copied into the child
/// at the same positions; the remaining positions are filled left to
/// right with `parent_b`'s values in their `parent_b` order, skipping any
/// value the segment already placed.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn order_crossover<R: Rng + ?Sized>(
    parent_a: &[usize],
    parent_b: &[usize],
    rng: &mut R,
) -> Vec<usize> {
    let n = parent_a.len();
    assert_eq!(n, parent_b.len(), "parents must have equal length");
    if n <= 1 {
        return parent_a.to_vec();
    }

    let (start, end) = random_segment(n, rng);

    let cap = parent_a.iter().max().map_or(0, |&m| m + 1);
    let mut taken = vec![false; cap];
    let mut child = vec![usize::MAX; n];

    for i in start..=end {
        child[i] = parent_a[i];
        taken[parent_a[i]] = true;
    }

    let mut donor = parent_b.iter().copied().filter(|&v| !taken[v]);
    for slot in child.iter_mut() {
        if *slot == usize::MAX {
            *slot = donor
                .next()
                .expect("parents are permutations of the same set");
        }
    }

    child
}

/// Swap mutation: exchange two random positions.
pub fn swap_mutation<R: Rng + ?Sized>(tour: &mut [usize], rng: &mut R) {
    let n = tour.len();
    if n < 2 {
        return;
    }
    let i = rng.random_range(0..n);
    let j = rng.random_range(0..n);
    tour.swap(i, j);
}

/// Fisher–Yates shuffle of a base tour into a random permutation.
pub fn random_permutation<R: Rng + ?Sized>(base: &[usize], rng: &mut R) -> Vec<usize> {
    let mut tour = base.to_vec();
    tour.shuffle(rng);
    tour
}

/// Random inclusive segment `[start, end]` within `0..n`.
fn random_segment<R: Rng + ?Sized>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    fn is_permutation_of(child: &[usize], parent: &[usize]) -> bool {
        let mut a = child.to_vec();
        let mut b = parent.to_vec();
        a.sort_unstable();
        b.sort_unstable();
        a == b
    }

    #[test]
    fn test_ox_child_is_permutation() {
        let mut rng = create_rng(42);
        let a: Vec<usize> = (0..12).collect();
        let b: Vec<usize> = (0..12).rev().collect();
        for _ in 0..200 {
            let child = order_crossover(&a, &b, &mut rng);
            assert!(is_permutation_of(&child, &a), "invalid child: {child:?}");
        }
    }

    #[test]
    fn test_ox_on_sparse_values() {
        // Pinned-start tours are permutations of 1..n; values need not
        // start at 0.
        let mut rng = create_rng(7);
        let a = vec![5, 1, 9, 3, 7];
        let b = vec![3, 7, 5, 9, 1];
        for _ in 0..100 {
            let child = order_crossover(&a, &b, &mut rng);
            assert!(is_permutation_of(&child, &a), "invalid child: {child:?}");
        }
    }

    #[test]
    fn test_ox_identical_parents_is_identity() {
        let mut rng = create_rng(42);
        let p = vec![3, 0, 2, 4, 1];
        for _ in 0..50 {
            assert_eq!(order_crossover(&p, &p, &mut rng), p);
        }
    }

    #[test]
    fn test_ox_degenerate_lengths() {
        let mut rng = create_rng(42);
        assert!(order_crossover(&[], &[], &mut rng).is_empty());
        assert_eq!(order_crossover(&[4], &[4], &mut rng), vec![4]);
    }

    #[test]
    fn test_swap_preserves_permutation() {
        let mut rng = create_rng(42);
        for _ in 0..100 {
            let mut tour: Vec<usize> = (0..10).collect();
            swap_mutation(&mut tour, &mut rng);
            assert!(is_permutation_of(&tour, &(0..10).collect::<Vec<_>>()));
        }
    }

    #[test]
    fn test_swap_short_tours_untouched() {
        let mut rng = create_rng(42);
        let mut tour = vec![3];
        swap_mutation(&mut tour, &mut rng);
        assert_eq!(tour, vec![3]);
    }

    #[test]
    fn test_random_permutation_is_permutation() {
        let mut rng = create_rng(42);
        let base: Vec<usize> = (0..20).collect();
        let shuffled = random_permutation(&base, &mut rng);
        assert!(is_permutation_of(&shuffled, &base));
    }

    #[test]
    fn test_random_segment_bounds() {
        let mut rng = create_rng(42);
        for _ in 0..1000 {
            let (start, end) = random_segment(10, &mut rng);
            assert!(start <= end && end < 10);
        }
    }

    proptest! {
        #[test]
        fn prop_ox_always_yields_permutation(n in 2usize..40, seed in any::<u64>()) {
            let mut rng = create_rng(seed);
            let base: Vec<usize> = (0..n).collect();
            let a = random_permutation(&base, &mut rng);
            let b = random_permutation(&base, &mut rng);
            let child = order_crossover(&a, &b, &mut rng);
            prop_assert!(is_permutation_of(&child, &base));
        }

        #[test]
        fn prop_swap_then_ox_pipeline_stays_valid(n in 2usize..30, seed in any::<u64>()) {
            let mut rng = create_rng(seed);
            let base: Vec<usize> = (0..n).collect();
            let a = random_permutation(&base, &mut rng);
            let b = random_permutation(&base, &mut rng);
            let mut child = order_crossover(&a, &b, &mut rng);
            swap_mutation(&mut child, &mut rng);
            prop_assert!(is_permutation_of(&child, &base));
        }
    }
}
