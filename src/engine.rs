//! Optimization entry points.
//!
//! [`optimize`] is the single call surface: it resolves the strategy
//! (running the size-tiered selector for [`Algorithm::Auto`]), executes
//! it over a distance matrix built from the input, and assembles an
//! [`OptimizationResult`] with sequenced point copies. The input slice is
//! never mutated; every invocation is independent and safe to run
//! concurrently with others.
//!
//! [`compare_algorithms`] is a read-only diagnostic that runs every
//! strategy on the identical input and reports improvement relative to
//! the nearest-neighbor baseline.

use crate::ant_colony::{self, AntColonyParams};
use crate::distance::{tour_length, DistanceMatrix};
use crate::genetic::{self, GeneticParams};
use crate::model::{
    Algorithm, Improvement, OptimizationOptions, OptimizationResult, RoutePoint, SequencedPoint,
};
use crate::nearest_neighbor::nearest_neighbor_tour;
use crate::random::create_rng;
use crate::two_opt;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Fixed travel-time proxy: minutes per kilometer at 30 km/h.
const MINUTES_PER_KM: f64 = 2.0;

/// Fixed proxy factor for the harness's time-saved figure.
const TIME_SAVED_MIN_PER_KM: f64 = 0.1;

/// Default pass budget for 2-opt refinement.
const DEFAULT_TWO_OPT_PASSES: usize = 100;

/// Default generation count for a standalone genetic run.
const DEFAULT_GENERATIONS: usize = 100;

/// Generation count when the selector dispatches to the genetic
/// algorithm; kept smaller to bound latency on the mid-size tier.
const AUTO_GENERATIONS: usize = 50;

/// Default iteration count for the ant colony.
const DEFAULT_ACO_ITERATIONS: usize = 50;

/// Point-count ceiling for the small tier of the selector.
const AUTO_SMALL_MAX: usize = 5;

/// Point-count ceiling for the genetic tier of the selector.
const AUTO_GENETIC_MAX: usize = 20;

/// Optimizes the visiting order of `points`.
///
/// Never fails: empty input yields an empty route with zero distance, a
/// single point yields a one-element route. NaN coordinates propagate
/// into the distance totals; use [`validate_points`] first for a strict
/// contract.
pub fn optimize(points: &[RoutePoint], options: &OptimizationOptions) -> OptimizationResult {
    run(points, options, options.algorithm)
}

/// Runs every strategy on the identical input and reports improvement
/// against the nearest-neighbor baseline.
///
/// The returned map has exactly the five keys `nearest_neighbor`,
/// `two_opt`, `genetic`, `ant_colony` and `auto`; every entry carries a
/// filled [`Improvement`], with `percent_improvement == 0` for the
/// baseline itself. Performs no optimization logic of its own.
pub fn compare_algorithms(
    points: &[RoutePoint],
    options: &OptimizationOptions,
) -> HashMap<String, OptimizationResult> {
    let baseline = run(points, options, Algorithm::NearestNeighbor);
    let baseline_km = baseline.total_distance_km;

    let mut results = HashMap::with_capacity(5);
    for algorithm in [
        Algorithm::NearestNeighbor,
        Algorithm::TwoOpt,
        Algorithm::Genetic,
        Algorithm::AntColony,
        Algorithm::Auto,
    ] {
        let mut result = if algorithm == Algorithm::NearestNeighbor {
            baseline.clone()
        } else {
            run(points, options, algorithm)
        };

        let saved = baseline_km - result.total_distance_km;
        result.improvement = Some(Improvement {
            distance_saved_km: saved,
            time_saved_min: saved * TIME_SAVED_MIN_PER_KM,
            percent_improvement: if baseline_km > 0.0 {
                saved / baseline_km * 100.0
            } else {
                0.0
            },
        });
        results.insert(algorithm.as_str().to_string(), result);
    }
    results
}

/// Strict input validation for callers that want it.
///
/// Checks for non-finite or out-of-range coordinates and duplicate ids.
/// The engine itself never calls this: by design malformed coordinates
/// degrade to nonsensical distances rather than errors.
pub fn validate_points(points: &[RoutePoint]) -> Result<(), String> {
    let mut seen = std::collections::HashSet::with_capacity(points.len());
    for p in points {
        if !p.lat.is_finite() || !(-90.0..=90.0).contains(&p.lat) {
            return Err(format!("point '{}': latitude {} out of range", p.id, p.lat));
        }
        if !p.lng.is_finite() || !(-180.0..=180.0).contains(&p.lng) {
            return Err(format!("point '{}': longitude {} out of range", p.id, p.lng));
        }
        if !seen.insert(p.id.as_str()) {
            return Err(format!("duplicate point id '{}'", p.id));
        }
    }
    Ok(())
}

fn run(
    points: &[RoutePoint],
    options: &OptimizationOptions,
    algorithm: Algorithm,
) -> OptimizationResult {
    let started = Instant::now();
    let deadline = options
        .time_limit_ms
        .map(|ms| started + Duration::from_millis(ms));

    let mut rng = match options.seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    };

    let n = points.len();
    let matrix = DistanceMatrix::from_points(points);

    // The start point is matched by id; an id absent from the input is
    // ignored rather than injected.
    let start_index = options
        .start_point
        .as_ref()
        .and_then(|sp| points.iter().position(|p| p.id == sp.id));
    let pin_start = start_index.is_some();
    let start = start_index.unwrap_or(0);

    let (tour, tag, iterations, history) = match algorithm {
        Algorithm::NearestNeighbor => {
            let tour = nearest_neighbor_tour(&matrix, start.min(n.saturating_sub(1)));
            (tour, "nearest_neighbor".to_string(), 0, Vec::new())
        }
        Algorithm::TwoOpt => {
            let seed = nearest_neighbor_tour(&matrix, start.min(n.saturating_sub(1)));
            let passes = options.max_iterations.unwrap_or(DEFAULT_TWO_OPT_PASSES);
            let out = two_opt::improve(&seed, &matrix, options.round_trip, passes, deadline);
            (out.tour, "two_opt".to_string(), out.passes, out.history)
        }
        Algorithm::Genetic => {
            let seed = nearest_neighbor_tour(&matrix, start.min(n.saturating_sub(1)));
            let params = GeneticParams {
                population_size: options.population_size.unwrap_or_else(|| 50.min(2 * n).max(2)),
                generations: options.max_iterations.unwrap_or(DEFAULT_GENERATIONS),
                mutation_rate: options.mutation_rate.unwrap_or(0.1),
                round_trip: options.round_trip,
                pin_start,
            };
            let out = genetic::evolve(&seed, &matrix, &params, deadline, &mut rng);
            (out.tour, "genetic".to_string(), out.generations, out.history)
        }
        Algorithm::AntColony => {
            let mut params = AntColonyParams::new(options.round_trip, start_index);
            if let Some(ants) = options.ant_count {
                params.ant_count = ants;
            }
            if let Some(rate) = options.evaporation_rate {
                params.evaporation_rate = rate;
            }
            params.iterations = options.max_iterations.unwrap_or(DEFAULT_ACO_ITERATIONS);
            let out = ant_colony::run(&matrix, &params, deadline, &mut rng);
            (out.tour, "ant_colony".to_string(), out.iterations, out.history)
        }
        Algorithm::Auto => {
            if n > AUTO_SMALL_MAX && n <= AUTO_GENETIC_MAX {
                // Mid-size tier: the GA's fixed generation budget scales
                // predictably where iterated 2-opt would get expensive.
                let seed = nearest_neighbor_tour(&matrix, start.min(n.saturating_sub(1)));
                let params = GeneticParams {
                    population_size: options.population_size.unwrap_or_else(|| 50.min(2 * n)),
                    generations: options.max_iterations.unwrap_or(AUTO_GENERATIONS),
                    mutation_rate: options.mutation_rate.unwrap_or(0.1),
                    round_trip: options.round_trip,
                    pin_start,
                };
                let out = genetic::evolve(&seed, &matrix, &params, deadline, &mut rng);
                (out.tour, "genetic".to_string(), out.generations, out.history)
            } else {
                // Tiny instances where 2-opt converges to the optimum
                // cheaply, and large ones where it is the bounded-latency
                // fallback.
                let seed = nearest_neighbor_tour(&matrix, start.min(n.saturating_sub(1)));
                let passes = options.max_iterations.unwrap_or(DEFAULT_TWO_OPT_PASSES);
                let out = two_opt::improve(&seed, &matrix, options.round_trip, passes, deadline);
                (
                    out.tour,
                    "nearest_neighbor+two_opt".to_string(),
                    out.passes,
                    out.history,
                )
            }
        }
    };

    let total_km = tour_length(&tour, &matrix, options.round_trip);
    let route: Vec<SequencedPoint> = tour
        .iter()
        .enumerate()
        .map(|(i, &idx)| SequencedPoint {
            sequence: i + 1,
            point: points[idx].clone(),
        })
        .collect();

    OptimizationResult {
        route,
        total_distance_km: total_km,
        total_duration_estimate_min: total_km * MINUTES_PER_KM,
        algorithm: tag,
        processing_time_ms: started.elapsed().as_secs_f64() * 1000.0,
        iterations,
        cost_history: history,
        improvement: None,
    }
}
