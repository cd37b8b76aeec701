//! Public data model of the route-sequencing engine.
//!
//! The engine works on plain value types: callers supply a slice of
//! [`RoutePoint`]s plus an [`OptimizationOptions`] bundle and receive an
//! [`OptimizationResult`] with a sequenced copy of the input. Nothing here
//! has a lifecycle beyond the call — every invocation is independent.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A delivery or service time window, in minutes from midnight.
///
/// Carried through to the output untouched; no algorithm in this crate
/// schedules against it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeWindow {
    pub start_min: u32,
    pub end_min: u32,
}

/// A geographic stop to be sequenced.
///
/// Coordinates are plain degrees. The engine never validates them: a NaN
/// or out-of-range coordinate propagates into the distance computations
/// (see [`validate_points`](crate::engine::validate_points) for callers
/// that want a strict contract). Ids must be unique and caller-assigned;
/// the engine matches the optional start point by id.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoutePoint {
    /// Unique caller-assigned identifier.
    pub id: String,

    /// Latitude in degrees.
    pub lat: f64,

    /// Longitude in degrees.
    pub lng: f64,

    /// Human-readable label for display; not used by any algorithm.
    pub label: String,

    /// Optional caller-side priority. Passed through untouched.
    pub priority: Option<u32>,

    /// Optional delivery window. Passed through untouched.
    pub time_window: Option<TimeWindow>,
}

impl RoutePoint {
    /// Creates a point with the given id and coordinates.
    ///
    /// The label defaults to the id.
    pub fn new(id: impl Into<String>, lat: f64, lng: f64) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            lat,
            lng,
            priority: None,
            time_window: None,
        }
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the caller-side priority.
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the delivery time window.
    pub fn with_time_window(mut self, start_min: u32, end_min: u32) -> Self {
        self.time_window = Some(TimeWindow { start_min, end_min });
        self
    }
}

/// A point annotated with its 1-based position in the optimized route.
///
/// The engine returns copies; consumers must not assume these are the
/// same instances as the input.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SequencedPoint {
    /// 1-based visiting position.
    pub sequence: usize,

    /// Copy of the input point.
    pub point: RoutePoint,
}

/// Optimization strategy.
///
/// [`Auto`](Algorithm::Auto) picks a strategy from the point count alone;
/// see [`OptimizationOptions`] for the tier table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Algorithm {
    /// Greedy construction: repeatedly visit the closest unvisited point.
    NearestNeighbor,

    /// Nearest-neighbor construction followed by 2-opt edge-exchange
    /// refinement.
    TwoOpt,

    /// Population-based evolutionary search over the permutation space.
    Genetic,

    /// Pheromone-guided probabilistic tour construction.
    AntColony,

    /// Size-tiered automatic selection.
    #[default]
    Auto,
}

impl Algorithm {
    /// Stable string tag, used as the key in comparison-harness output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::NearestNeighbor => "nearest_neighbor",
            Algorithm::TwoOpt => "two_opt",
            Algorithm::Genetic => "genetic",
            Algorithm::AntColony => "ant_colony",
            Algorithm::Auto => "auto",
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for a single optimization call.
///
/// Pure configuration with no lifecycle beyond the call. Unset tunables
/// fall back to per-algorithm defaults:
///
/// | Field | Nearest Neighbor | 2-opt | Genetic | Ant Colony |
/// |---|---|---|---|---|
/// | `max_iterations` | — | 100 passes | 100 generations | 50 iterations |
/// | `population_size` | — | — | `min(50, 2n)` | — |
/// | `mutation_rate` | — | — | 0.1 | — |
/// | `ant_count` | — | — | — | 20 |
/// | `evaporation_rate` | — | — | — | 0.1 |
///
/// # Builder Pattern
///
/// ```
/// use geotour::model::{Algorithm, OptimizationOptions};
///
/// let options = OptimizationOptions::default()
///     .with_algorithm(Algorithm::Genetic)
///     .with_max_iterations(200)
///     .with_mutation_rate(0.05)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OptimizationOptions {
    /// Strategy to run.
    pub algorithm: Algorithm,

    /// Iteration budget: 2-opt passes, GA generations, or ACO iterations.
    ///
    /// `None` uses the per-algorithm default.
    pub max_iterations: Option<usize>,

    /// Soft wall-clock deadline in milliseconds.
    ///
    /// Checked between passes/generations/iterations; when exceeded the
    /// algorithm returns the best tour found so far. The actual runtime may
    /// overshoot by one iteration's worth of work. `None` disables the
    /// deadline.
    pub time_limit_ms: Option<u64>,

    /// When set, the closing leg back to the first point is included in
    /// the total distance. The returned route remains a strict permutation
    /// of the input — the start point is never duplicated at the end.
    pub round_trip: bool,

    /// Optional fixed start, matched against the input by id.
    ///
    /// When set and present in the input, the returned route begins with
    /// this point for every strategy. An id with no match in the input is
    /// ignored.
    pub start_point: Option<RoutePoint>,

    /// GA population size override.
    pub population_size: Option<usize>,

    /// GA per-offspring swap-mutation probability (0.0–1.0).
    pub mutation_rate: Option<f64>,

    /// ACO colony size override.
    pub ant_count: Option<usize>,

    /// ACO per-iteration pheromone decay factor (0.0–1.0).
    pub evaporation_rate: Option<f64>,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl OptimizationOptions {
    /// Sets the strategy.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = Some(n);
        self
    }

    /// Sets the soft wall-clock deadline in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Enables or disables round-trip closure.
    pub fn with_round_trip(mut self, round_trip: bool) -> Self {
        self.round_trip = round_trip;
        self
    }

    /// Fixes the route start.
    pub fn with_start_point(mut self, start: RoutePoint) -> Self {
        self.start_point = Some(start);
        self
    }

    /// Sets the GA population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = Some(n);
        self
    }

    /// Sets the GA mutation rate, clamped into `[0, 1]`.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = Some(rate.clamp(0.0, 1.0));
        self
    }

    /// Sets the ACO colony size.
    pub fn with_ant_count(mut self, n: usize) -> Self {
        self.ant_count = Some(n);
        self
    }

    /// Sets the ACO evaporation rate, clamped into `[0, 1]`.
    pub fn with_evaporation_rate(mut self, rate: f64) -> Self {
        self.evaporation_rate = Some(rate.clamp(0.0, 1.0));
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset for bounded-latency use: halved iteration budgets and a
    /// one-second deadline.
    pub fn fast() -> Self {
        Self::default()
            .with_max_iterations(50)
            .with_time_limit_ms(1_000)
    }

    /// Preset for quality-leaning use: doubled iteration budgets and a
    /// ten-second deadline.
    pub fn quality() -> Self {
        Self::default()
            .with_max_iterations(200)
            .with_time_limit_ms(10_000)
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    /// The builder setters already clamp rates; this catches structs
    /// assembled by hand.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_iterations == Some(0) {
            return Err("max_iterations must be positive or None".into());
        }
        if self.time_limit_ms == Some(0) {
            return Err("time_limit_ms must be positive or None".into());
        }
        if let Some(pop) = self.population_size {
            if pop < 2 {
                return Err("population_size must be at least 2".into());
            }
        }
        if self.ant_count == Some(0) {
            return Err("ant_count must be positive or None".into());
        }
        if let Some(rate) = self.mutation_rate {
            if !(0.0..=1.0).contains(&rate) {
                return Err("mutation_rate must be within [0, 1]".into());
            }
        }
        if let Some(rate) = self.evaporation_rate {
            if !(0.0..=1.0).contains(&rate) {
                return Err("evaporation_rate must be within [0, 1]".into());
            }
        }
        Ok(())
    }
}

/// Improvement of a candidate strategy relative to the nearest-neighbor
/// baseline, as reported by the comparison harness.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Improvement {
    /// `baseline distance − candidate distance`; negative when the
    /// candidate is worse than the baseline.
    pub distance_saved_km: f64,

    /// Fixed proxy: `distance_saved_km × 0.1`.
    pub time_saved_min: f64,

    /// `distance_saved_km / baseline distance × 100`; `0` when the
    /// baseline distance is zero.
    pub percent_improvement: f64,
}

/// Result of one optimization call.
///
/// Structurally valid on every code path: degenerate inputs yield an
/// empty or single-element route with zero distance.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OptimizationResult {
    /// Optimized visiting order: input copies with 1-based sequence
    /// numbers.
    pub route: Vec<SequencedPoint>,

    /// Great-circle route length in kilometers, including the closing leg
    /// when round-trip was requested.
    pub total_distance_km: f64,

    /// Coarse duration estimate in minutes (fixed 30 km/h travel proxy).
    pub total_duration_estimate_min: f64,

    /// Tag of the strategy that produced the route. For `Auto` this names
    /// the resolved path, e.g. `"nearest_neighbor+two_opt"`.
    pub algorithm: String,

    /// Wall-clock time spent inside the engine, in milliseconds.
    pub processing_time_ms: f64,

    /// Passes/generations/iterations actually executed.
    pub iterations: usize,

    /// Best route length after each pass/generation/iteration; empty for
    /// plain nearest-neighbor runs.
    pub cost_history: Vec<f64>,

    /// Filled by the comparison harness; `None` for direct calls.
    pub improvement: Option<Improvement>,
}

impl OptimizationResult {
    /// Ids of the route in visiting order.
    pub fn ids(&self) -> Vec<&str> {
        self.route.iter().map(|s| s.point.id.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_builder() {
        let p = RoutePoint::new("a", 52.0, 13.0)
            .with_label("Depot")
            .with_priority(2)
            .with_time_window(540, 720);

        assert_eq!(p.id, "a");
        assert_eq!(p.label, "Depot");
        assert_eq!(p.priority, Some(2));
        assert_eq!(
            p.time_window,
            Some(TimeWindow {
                start_min: 540,
                end_min: 720
            })
        );
    }

    #[test]
    fn test_point_label_defaults_to_id() {
        let p = RoutePoint::new("stop-7", 0.0, 0.0);
        assert_eq!(p.label, "stop-7");
    }

    #[test]
    fn test_default_options() {
        let options = OptimizationOptions::default();
        assert_eq!(options.algorithm, Algorithm::Auto);
        assert!(options.max_iterations.is_none());
        assert!(options.time_limit_ms.is_none());
        assert!(!options.round_trip);
        assert!(options.start_point.is_none());
        assert!(options.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let options = OptimizationOptions::default()
            .with_algorithm(Algorithm::AntColony)
            .with_max_iterations(80)
            .with_time_limit_ms(2_000)
            .with_round_trip(true)
            .with_ant_count(30)
            .with_evaporation_rate(0.2)
            .with_seed(7);

        assert_eq!(options.algorithm, Algorithm::AntColony);
        assert_eq!(options.max_iterations, Some(80));
        assert_eq!(options.time_limit_ms, Some(2_000));
        assert!(options.round_trip);
        assert_eq!(options.ant_count, Some(30));
        assert_eq!(options.evaporation_rate, Some(0.2));
        assert_eq!(options.seed, Some(7));
    }

    #[test]
    fn test_rates_clamped() {
        let options = OptimizationOptions::default()
            .with_mutation_rate(1.5)
            .with_evaporation_rate(-0.5);
        assert_eq!(options.mutation_rate, Some(1.0));
        assert_eq!(options.evaporation_rate, Some(0.0));
    }

    #[test]
    fn test_validate_ok() {
        assert!(OptimizationOptions::default().validate().is_ok());
        assert!(OptimizationOptions::fast().validate().is_ok());
        assert!(OptimizationOptions::quality().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_iterations() {
        let options = OptimizationOptions {
            max_iterations: Some(0),
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_validate_zero_time_limit() {
        let options = OptimizationOptions {
            time_limit_ms: Some(0),
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_validate_population_too_small() {
        let options = OptimizationOptions {
            population_size: Some(1),
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_validate_out_of_range_rate() {
        let options = OptimizationOptions {
            mutation_rate: Some(1.5),
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_algorithm_tags() {
        assert_eq!(Algorithm::NearestNeighbor.as_str(), "nearest_neighbor");
        assert_eq!(Algorithm::TwoOpt.as_str(), "two_opt");
        assert_eq!(Algorithm::Genetic.as_str(), "genetic");
        assert_eq!(Algorithm::AntColony.as_str(), "ant_colony");
        assert_eq!(Algorithm::Auto.as_str(), "auto");
        assert_eq!(Algorithm::Auto.to_string(), "auto");
    }

    #[test]
    fn test_presets() {
        let fast = OptimizationOptions::fast();
        assert_eq!(fast.max_iterations, Some(50));
        assert_eq!(fast.time_limit_ms, Some(1_000));

        let quality = OptimizationOptions::quality();
        assert_eq!(quality.max_iterations, Some(200));
        assert_eq!(quality.time_limit_ms, Some(10_000));
    }
}
