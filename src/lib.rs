//! Route-sequencing engine for geographic stops.
//!
//! Given a list of latitude/longitude points, produces a visiting order
//! that approximately minimizes total great-circle travel distance, with
//! an optional fixed start point and optional round-trip closure. The
//! crate is the optimization core behind delivery-route and GPX-track
//! tooling; file parsing, geocoding and presentation live in its
//! consumers.
//!
//! # Strategies
//!
//! - **Nearest Neighbor**: greedy O(n²) construction, the universal
//!   fallback and the seed for everything else.
//! - **2-opt**: first-improvement edge-exchange refinement.
//! - **Genetic Algorithm**: population of tour permutations evolved with
//!   tournament selection, order crossover and swap mutation.
//! - **Ant Colony**: pheromone-guided probabilistic construction.
//! - **Auto**: picks a strategy by point count (≤5 and >20 →
//!   nearest-neighbor + 2-opt, 6–20 → genetic).
//!
//! # Usage
//!
//! ```
//! use geotour::{optimize, Algorithm, OptimizationOptions, RoutePoint};
//!
//! let stops = vec![
//!     RoutePoint::new("depot", 52.520, 13.405),
//!     RoutePoint::new("a", 52.531, 13.384),
//!     RoutePoint::new("b", 52.487, 13.426),
//!     RoutePoint::new("c", 52.511, 13.454),
//! ];
//!
//! let options = OptimizationOptions::default()
//!     .with_algorithm(Algorithm::Auto)
//!     .with_round_trip(true)
//!     .with_seed(42);
//!
//! let result = optimize(&stops, &options);
//! assert_eq!(result.route.len(), stops.len());
//! assert_eq!(result.route[0].sequence, 1);
//! ```
//!
//! # Guarantees
//!
//! - Every result route is a strict permutation of the input: no point is
//!   dropped or duplicated by any algorithm, including crossover and
//!   segment reversal.
//! - The input slice is never mutated; results carry copies annotated
//!   with 1-based sequence numbers.
//! - Degenerate inputs (0 or 1 points) return trivial results instead of
//!   errors; every code path yields a structurally valid result.
//! - All randomness flows through a seedable generator
//!   ([`OptimizationOptions::with_seed`]), so runs are reproducible.
//! - The engine is synchronous and single-threaded per invocation, with
//!   no shared state across calls.

pub mod ant_colony;
pub mod distance;
pub mod engine;
pub mod genetic;
pub mod model;
pub mod nearest_neighbor;
pub mod random;
pub mod two_opt;

pub use engine::{compare_algorithms, optimize, validate_points};
pub use model::{
    Algorithm, Improvement, OptimizationOptions, OptimizationResult, RoutePoint, SequencedPoint,
    TimeWindow,
};
