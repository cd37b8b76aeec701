//! Ant colony optimization.
//!
//! Ant System in its plain form: each iteration, every ant builds a full
//! tour by repeatedly choosing the next unvisited point with probability
//! proportional to `τ[i][j]^α · (1/d(i,j))^β` (a roulette-wheel draw over
//! the normalized weights). After all ants have built their tours the
//! pheromone matrix evaporates by `(1 − ρ)` and every ant deposits
//! `1/length` on each edge it used, symmetrically. The globally best tour
//! across all ants and iterations is the result — not the last
//! iteration's output.
//!
//! Each iteration costs O(ants · n²), which is why the default iteration
//! budget is half the genetic algorithm's.
//!
//! # Reference
//!
//! Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//! Colony of Cooperating Agents", *IEEE Trans. SMC-B* 26(1)

use crate::distance::{tour_length, DistanceMatrix};
use rand::Rng;
use std::time::Instant;

/// Floor applied to distances in the heuristic term so coincident points
/// do not produce infinite weights.
const MIN_DISTANCE_KM: f64 = 1e-10;

/// Tuning knobs for one colony run.
#[derive(Debug, Clone)]
pub struct AntColonyParams {
    /// Number of ants per iteration.
    pub ant_count: usize,

    /// Number of construction/update iterations.
    pub iterations: usize,

    /// Pheromone decay factor ρ in `[0, 1]`.
    pub evaporation_rate: f64,

    /// Pheromone importance α.
    pub alpha: f64,

    /// Heuristic (inverse-distance) importance β.
    pub beta: f64,

    /// Whether tour length includes the closing leg.
    pub round_trip: bool,

    /// Fixed start index for every ant; `None` lets each ant start at a
    /// random point.
    pub start: Option<usize>,
}

impl AntColonyParams {
    /// Spec defaults: 20 ants, 50 iterations, ρ=0.1, α=1, β=2.
    pub fn new(round_trip: bool, start: Option<usize>) -> Self {
        Self {
            ant_count: 20,
            iterations: 50,
            evaporation_rate: 0.1,
            alpha: 1.0,
            beta: 2.0,
            round_trip,
            start,
        }
    }
}

/// Outcome of a colony run.
#[derive(Debug, Clone)]
pub struct AntColonyOutcome {
    /// Globally best tour across all ants and iterations.
    pub tour: Vec<usize>,

    /// Iterations actually executed.
    pub iterations: usize,

    /// Best tour length after each iteration.
    pub history: Vec<f64>,
}

/// Runs the colony over the full point set of `matrix`.
///
/// Inputs of ≤ 1 point return the identity tour immediately.
pub fn run<R: Rng + ?Sized>(
    matrix: &DistanceMatrix,
    params: &AntColonyParams,
    deadline: Option<Instant>,
    rng: &mut R,
) -> AntColonyOutcome {
    let n = matrix.len();
    if n <= 1 {
        return AntColonyOutcome {
            tour: (0..n).collect(),
            iterations: 0,
            history: Vec::new(),
        };
    }

    let mut pheromone = vec![1.0f64; n * n];
    let mut best_tour: Option<Vec<usize>> = None;
    let mut best_length = f64::INFINITY;
    let mut history = Vec::with_capacity(params.iterations);
    let mut executed = 0usize;

    for _ in 0..params.iterations {
        if let Some(limit) = deadline {
            if Instant::now() >= limit {
                break;
            }
        }
        executed += 1;

        let mut tours: Vec<(Vec<usize>, f64)> = Vec::with_capacity(params.ant_count);
        for _ in 0..params.ant_count {
            let start = params.start.unwrap_or_else(|| rng.random_range(0..n));
            let tour = construct(matrix, &pheromone, params, start, rng);
            let length = tour_length(&tour, matrix, params.round_trip);
            if length < best_length {
                best_length = length;
                best_tour = Some(tour.clone());
            }
            tours.push((tour, length));
        }

        // Evaporation, then symmetric deposits.
        for tau in pheromone.iter_mut() {
            *tau *= 1.0 - params.evaporation_rate;
        }
        for (tour, length) in &tours {
            if !length.is_finite() || *length <= 0.0 {
                continue;
            }
            let deposit = 1.0 / length;
            for w in tour.windows(2) {
                pheromone[w[0] * n + w[1]] += deposit;
                pheromone[w[1] * n + w[0]] += deposit;
            }
            if params.round_trip {
                let (a, b) = (tour[n - 1], tour[0]);
                pheromone[a * n + b] += deposit;
                pheromone[b * n + a] += deposit;
            }
        }

        history.push(best_length);
    }

    AntColonyOutcome {
        tour: best_tour.unwrap_or_else(|| (0..n).collect()),
        iterations: executed,
        history,
    }
}

/// Builds one ant's tour from `start` by repeated roulette draws.
fn construct<R: Rng + ?Sized>(
    matrix: &DistanceMatrix,
    pheromone: &[f64],
    params: &AntColonyParams,
    start: usize,
    rng: &mut R,
) -> Vec<usize> {
    let n = matrix.len();
    let mut tour = Vec::with_capacity(n);
    let mut visited = vec![false; n];

    let mut current = start;
    visited[current] = true;
    tour.push(current);

    let mut weights = vec![0.0f64; n];
    for _ in 1..n {
        let mut total = 0.0;
        for candidate in 0..n {
            weights[candidate] = if visited[candidate] {
                0.0
            } else {
                let tau = pheromone[current * n + candidate];
                let d = matrix.get(current, candidate).max(MIN_DISTANCE_KM);
                let w = tau.powf(params.alpha) * (1.0 / d).powf(params.beta);
                if w.is_finite() {
                    w
                } else {
                    0.0
                }
            };
            total += weights[candidate];
        }

        let next = if total > 0.0 {
            roulette(&weights, total, rng)
        } else {
            // All weights degenerate (NaN distances or total underflow);
            // keep the tour a permutation by taking the first unvisited.
            (0..n).position(|c| !visited[c]).unwrap_or(current)
        };

        visited[next] = true;
        tour.push(next);
        current = next;
    }

    tour
}

/// Roulette-wheel draw over non-negative weights summing to `total`.
fn roulette<R: Rng + ?Sized>(weights: &[f64], total: f64, rng: &mut R) -> usize {
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }
    // Floating-point fallback: last candidate with any weight.
    weights
        .iter()
        .rposition(|&w| w > 0.0)
        .unwrap_or(weights.len() - 1)
}
