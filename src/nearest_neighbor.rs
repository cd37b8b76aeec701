//! Nearest-neighbor tour construction.
//!
//! Greedy construction heuristic: starting from a given point, repeatedly
//! move to the closest unvisited point until none remain. Quality is
//! modest (typically within 25% of optimal on random instances) but the
//! O(n²) bound makes it the universal fallback for large inputs and the
//! seed for every refinement strategy in this crate.
//!
//! # Reference
//!
//! Rosenkrantz, Stearns & Lewis (1977), "An Analysis of Several Heuristics
//! for the Traveling Salesman Problem"

use crate::distance::DistanceMatrix;

/// Builds a full tour starting at `start`.
///
/// Ties on the minimum distance are broken by scan order, so the result
/// is deterministic for a given matrix. Inputs of 0 or 1 points return
/// the identity tour.
///
/// # Panics
/// Panics if `start` is out of range for a non-empty matrix.
pub fn nearest_neighbor_tour(matrix: &DistanceMatrix, start: usize) -> Vec<usize> {
    let n = matrix.len();
    if n == 0 {
        return Vec::new();
    }
    assert!(start < n, "start index {start} out of range for {n} points");
    if n == 1 {
        return vec![0];
    }

    let mut tour = Vec::with_capacity(n);
    let mut visited = vec![false; n];

    let mut current = start;
    visited[current] = true;
    tour.push(current);

    for _ in 1..n {
        let mut next = usize::MAX;
        let mut best = f64::INFINITY;
        for candidate in 0..n {
            if visited[candidate] {
                continue;
            }
            let d = matrix.get(current, candidate);
            // Strict < keeps the first-encountered candidate on ties.
            if d < best {
                best = d;
                next = candidate;
            }
        }
        // NaN distances compare false against INFINITY; fall back to the
        // first unvisited point so the tour stays a full permutation.
        if next == usize::MAX {
            next = (0..n).find(|&c| !visited[c]).unwrap_or(current);
        }
        visited[next] = true;
        tour.push(next);
        current = next;
    }

    tour
}
