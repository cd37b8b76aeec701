//! Evolutionary search over the tour permutation space.
//!
//! A compact genetic algorithm specialized to route sequencing:
//!
//! - **Population**: one individual seeded from nearest-neighbor
//!   construction, the rest random permutations of the input.
//! - **Fitness**: `1 / (1 + length)` — strictly positive, higher is
//!   better, no division by zero on degenerate tours.
//! - **Selection**: tournament of size 3.
//! - **Crossover**: order crossover in the duplicate-skipping form (see
//!   [`operators`]).
//! - **Mutation**: per-offspring swap of two random positions.
//! - **Elitism**: top 20% carried over unchanged each generation.
//!
//! The run is a fixed number of generations (soft wall-clock deadline
//! permitting) and returns the best individual observed across the whole
//! run, not the final generation's best.
//!
//! When the caller pins the route start, position 0 is held fixed and the
//! operators work on the tail slice only, so every individual keeps the
//! start point in front.
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"

pub mod operators;

use self::operators::{order_crossover, random_permutation, swap_mutation};
use crate::distance::{tour_length, DistanceMatrix};
use rand::Rng;
use std::time::Instant;

/// Tournament size for parent selection.
const TOURNAMENT_SIZE: usize = 3;

/// Fraction of the population preserved unchanged each generation.
const ELITE_RATIO: f64 = 0.2;

/// Tuning knobs for one evolutionary run.
#[derive(Debug, Clone)]
pub struct GeneticParams {
    /// Number of individuals.
    pub population_size: usize,

    /// Fixed generation count.
    pub generations: usize,

    /// Per-offspring swap-mutation probability.
    pub mutation_rate: f64,

    /// Whether tour length includes the closing leg.
    pub round_trip: bool,

    /// Hold position 0 fixed across all operators.
    pub pin_start: bool,
}

/// Outcome of an evolutionary run.
#[derive(Debug, Clone)]
pub struct GeneticOutcome {
    /// Best tour observed across all generations.
    pub tour: Vec<usize>,

    /// Generations actually executed.
    pub generations: usize,

    /// Best tour length after each generation.
    pub history: Vec<f64>,
}

#[derive(Clone)]
struct Individual {
    tour: Vec<usize>,
    length: f64,
    fitness: f64,
}

impl Individual {
    fn from_tour(tour: Vec<usize>, matrix: &DistanceMatrix, round_trip: bool) -> Self {
        let length = tour_length(&tour, matrix, round_trip);
        Self {
            tour,
            length,
            fitness: 1.0 / (1.0 + length),
        }
    }
}

/// Evolves the population from a construction-heuristic seed.
///
/// `seed_tour` must be a valid tour over `matrix`; it joins the initial
/// population unchanged, so the result is never worse than the seed.
/// Tours of ≤ 3 points are returned as-is.
pub fn evolve<R: Rng + ?Sized>(
    seed_tour: &[usize],
    matrix: &DistanceMatrix,
    params: &GeneticParams,
    deadline: Option<Instant>,
    rng: &mut R,
) -> GeneticOutcome {
    let n = seed_tour.len();
    if n <= 3 {
        return GeneticOutcome {
            tour: seed_tour.to_vec(),
            generations: 0,
            history: Vec::new(),
        };
    }

    let pop_size = params.population_size.max(2);
    let lo = usize::from(params.pin_start);

    // Initial population: the seed plus random permutations of it.
    let mut population: Vec<Individual> = Vec::with_capacity(pop_size);
    population.push(Individual::from_tour(
        seed_tour.to_vec(),
        matrix,
        params.round_trip,
    ));
    while population.len() < pop_size {
        let mut tour = seed_tour[..lo].to_vec();
        tour.extend(random_permutation(&seed_tour[lo..], rng));
        population.push(Individual::from_tour(tour, matrix, params.round_trip));
    }

    let mut best = best_of(&population).clone();
    let mut history = Vec::with_capacity(params.generations);
    let mut executed = 0usize;

    for _ in 0..params.generations {
        if let Some(limit) = deadline {
            if Instant::now() >= limit {
                break;
            }
        }
        executed += 1;

        // Best fitness first; ties keep their relative order.
        population.sort_by(|a, b| {
            b.fitness
                .partial_cmp(&a.fitness)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let elite_count = ((pop_size as f64 * ELITE_RATIO) as usize).max(1);
        let mut next_gen: Vec<Individual> = population[..elite_count].to_vec();

        while next_gen.len() < pop_size {
            let pa = &population[tournament(&population, rng)];
            let pb = &population[tournament(&population, rng)];

            let mut tour = pa.tour[..lo].to_vec();
            tour.extend(order_crossover(&pa.tour[lo..], &pb.tour[lo..], rng));
            if rng.random_range(0.0..1.0) < params.mutation_rate {
                swap_mutation(&mut tour[lo..], rng);
            }
            next_gen.push(Individual::from_tour(tour, matrix, params.round_trip));
        }

        population = next_gen;

        let gen_best = best_of(&population);
        if gen_best.fitness > best.fitness {
            best = gen_best.clone();
        }
        history.push(best.length);
    }

    GeneticOutcome {
        tour: best.tour,
        generations: executed,
        history,
    }
}

/// Tournament selection: sample `TOURNAMENT_SIZE` individuals with
/// replacement, keep the fittest.
fn tournament<R: Rng + ?Sized>(population: &[Individual], rng: &mut R) -> usize {
    let n = population.len();
    let mut best_idx = rng.random_range(0..n);
    for _ in 1..TOURNAMENT_SIZE {
        let idx = rng.random_range(0..n);
        if population[idx].fitness > population[best_idx].fitness {
            best_idx = idx;
        }
    }
    best_idx
}

fn best_of(population: &[Individual]) -> &Individual {
    population
        .iter()
        .max_by(|a, b| {
            a.fitness
                .partial_cmp(&b.fitness)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .expect("population is never empty")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RoutePoint;
    use crate::nearest_neighbor::nearest_neighbor_tour;
    use crate::random::create_rng;

    fn matrix(coords: &[(f64, f64)]) -> DistanceMatrix {
        let points: Vec<RoutePoint> = coords
            .iter()
            .enumerate()
            .map(|(i, &(lat, lng))| RoutePoint::new(format!("p{i}"), lat, lng))
            .collect();
        DistanceMatrix::from_points(&points)
    }

    fn params(n: usize) -> GeneticParams {
        GeneticParams {
            population_size: 50.min(2 * n),
            generations: 60,
            mutation_rate: 0.1,
            round_trip: false,
            pin_start: false,
        }
    }

    fn scatter() -> DistanceMatrix {
        matrix(&[
            (0.0, 0.0),
            (0.3, 2.1),
            (-1.2, 0.7),
            (2.0, 1.5),
            (0.9, -0.8),
            (-0.5, 2.8),
            (1.7, 0.2),
            (-2.0, 1.9),
        ])
    }

    #[test]
    fn test_short_tours_unchanged() {
        let m = matrix(&[(0.0, 0.0), (0.0, 1.0), (0.0, 2.0)]);
        let mut rng = create_rng(42);
        let out = evolve(&[2, 0, 1], &m, &params(3), None, &mut rng);
        assert_eq!(out.tour, vec![2, 0, 1]);
        assert_eq!(out.generations, 0);
    }

    #[test]
    fn test_result_is_permutation() {
        let m = scatter();
        let seed = nearest_neighbor_tour(&m, 0);
        let mut rng = create_rng(42);
        let out = evolve(&seed, &m, &params(8), None, &mut rng);
        let mut sorted = out.tour.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn test_never_worse_than_seed() {
        // The seed joins the population and the best-ever tour is
        // returned, so the GA cannot lose to its own seed.
        let m = scatter();
        let seed = nearest_neighbor_tour(&m, 0);
        let seed_len = tour_length(&seed, &m, false);
        let mut rng = create_rng(42);
        let out = evolve(&seed, &m, &params(8), None, &mut rng);
        assert!(tour_length(&out.tour, &m, false) <= seed_len + 1e-9);
    }

    #[test]
    fn test_pinned_start_stays_in_front() {
        let m = scatter();
        let seed = nearest_neighbor_tour(&m, 5);
        let mut rng = create_rng(42);
        let p = GeneticParams {
            pin_start: true,
            ..params(8)
        };
        let out = evolve(&seed, &m, &p, None, &mut rng);
        assert_eq!(out.tour[0], 5);
    }

    #[test]
    fn test_deterministic_under_seed() {
        let m = scatter();
        let seed = nearest_neighbor_tour(&m, 0);
        let a = evolve(&seed, &m, &params(8), None, &mut create_rng(7));
        let b = evolve(&seed, &m, &params(8), None, &mut create_rng(7));
        assert_eq!(a.tour, b.tour);
    }

    #[test]
    fn test_history_is_non_increasing() {
        let m = scatter();
        let seed = nearest_neighbor_tour(&m, 0);
        let mut rng = create_rng(42);
        let out = evolve(&seed, &m, &params(8), None, &mut rng);
        assert_eq!(out.history.len(), out.generations);
        for w in out.history.windows(2) {
            assert!(w[1] <= w[0] + 1e-9);
        }
    }

    #[test]
    fn test_expired_deadline_returns_seed_quality() {
        let m = scatter();
        let seed = nearest_neighbor_tour(&m, 0);
        let seed_len = tour_length(&seed, &m, false);
        let mut rng = create_rng(42);
        let out = evolve(&seed, &m, &params(8), Some(Instant::now()), &mut rng);
        assert_eq!(out.generations, 0);
        assert!(tour_length(&out.tour, &m, false) <= seed_len + 1e-9);
    }

    #[test]
    fn test_round_trip_cost_drives_search() {
        let m = scatter();
        let seed = nearest_neighbor_tour(&m, 0);
        let mut rng = create_rng(42);
        let p = GeneticParams {
            round_trip: true,
            ..params(8)
        };
        let out = evolve(&seed, &m, &p, None, &mut rng);
        let seed_len = tour_length(&seed, &m, true);
        assert!(tour_length(&out.tour, &m, true) <= seed_len + 1e-9);
    }
}
