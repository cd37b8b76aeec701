//! 2-opt local search.
//!
//! Edge-exchange refinement of an existing tour: for a pair of positions
//! `(i, j)` the segment `tour[i..=j]` is reversed, which replaces the two
//! edges entering position `i` and leaving position `j` with their
//! crossing-free alternative. The search applies the **first** improving
//! move found in a pass and restarts the scan — a deliberate
//! performance/quality tradeoff against best-improvement — and stops when
//! a full pass finds nothing or the pass budget runs out.
//!
//! Position 0 is pinned: it is never included in a reversal, so a fixed
//! start point survives refinement. Reversal rearranges indices in place
//! and can neither drop nor duplicate a point.
//!
//! # Reference
//!
//! Croes (1958), "A method for solving traveling-salesman problems",
//! *Operations Research* 6(6)

use crate::distance::{tour_length, DistanceMatrix};
use std::time::Instant;

/// Improvements smaller than this are treated as noise.
const EPSILON: f64 = 1e-10;

/// Outcome of a 2-opt run.
#[derive(Debug, Clone)]
pub struct TwoOptOutcome {
    /// Refined tour; a permutation of the input tour.
    pub tour: Vec<usize>,

    /// Scan passes executed (including restarts after improving moves).
    pub passes: usize,

    /// Best tour length after each pass.
    pub history: Vec<f64>,
}

/// Refines `tour` with first-improvement 2-opt.
///
/// `max_passes` bounds the number of scans; `deadline` is a soft
/// wall-clock cutoff checked between passes. Tours of length ≤ 3 are
/// returned unchanged — with the first position pinned no valid move
/// exists. The result never has a greater length than the input.
pub fn improve(
    tour: &[usize],
    matrix: &DistanceMatrix,
    round_trip: bool,
    max_passes: usize,
    deadline: Option<Instant>,
) -> TwoOptOutcome {
    let n = tour.len();
    let mut current = tour.to_vec();

    if n <= 3 {
        return TwoOptOutcome {
            tour: current,
            passes: 0,
            history: Vec::new(),
        };
    }

    let mut passes = 0usize;
    let mut history = Vec::new();

    while passes < max_passes {
        if let Some(limit) = deadline {
            if Instant::now() >= limit {
                break;
            }
        }
        passes += 1;

        let mut improved = false;
        'scan: for i in 1..n - 1 {
            for j in i + 1..n {
                if reversal_delta(&current, matrix, round_trip, i, j) < -EPSILON {
                    current[i..=j].reverse();
                    improved = true;
                    break 'scan;
                }
            }
        }

        history.push(tour_length(&current, matrix, round_trip));
        if !improved {
            break;
        }
    }

    TwoOptOutcome {
        tour: current,
        passes,
        history,
    }
}

/// Length change from reversing `tour[i..=j]`.
///
/// Only the boundary edges change: `(i-1, i)` and `(j, j+1)` become
/// `(i-1, j)` and `(i, j+1)`. For an open tour the edge after the last
/// position does not exist; for a round trip it wraps to position 0.
fn reversal_delta(
    tour: &[usize],
    matrix: &DistanceMatrix,
    round_trip: bool,
    i: usize,
    j: usize,
) -> f64 {
    let n = tour.len();
    let before = tour[i - 1];

    let (removed_tail, added_tail) = if j == n - 1 {
        if round_trip {
            (matrix.get(tour[j], tour[0]), matrix.get(tour[i], tour[0]))
        } else {
            (0.0, 0.0)
        }
    } else {
        (
            matrix.get(tour[j], tour[j + 1]),
            matrix.get(tour[i], tour[j + 1]),
        )
    };

    let removed = matrix.get(before, tour[i]) + removed_tail;
    let added = matrix.get(before, tour[j]) + added_tail;
    added - removed
}
