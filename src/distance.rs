//! Great-circle distance model.
//!
//! All algorithms in this crate work on index tours over an immutable
//! point slice, with pairwise distances served from a precomputed
//! symmetric [`DistanceMatrix`]. Distances are haversine great-circle
//! kilometers — a deliberate proxy for drivable distance; road networks
//! and traffic are out of scope.
//!
//! Inputs are plain degrees and are not validated: NaN or out-of-range
//! coordinates propagate into the totals rather than panicking.

use crate::model::RoutePoint;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine great-circle distance between two points, in kilometers.
///
/// `haversine_km(a, a) == 0` and the function is symmetric in its
/// arguments.
pub fn haversine_km(a: &RoutePoint, b: &RoutePoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Precomputed symmetric pairwise distance matrix.
///
/// Built once per optimization call; O(n²) space. Row/column indices are
/// positions in the point slice the matrix was built from.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Builds the matrix from a point slice.
    pub fn from_points(points: &[RoutePoint]) -> Self {
        let n = points.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in i + 1..n {
                let d = haversine_km(&points[i], &points[j]);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Self { n, data }
    }

    /// Distance between points `i` and `j` in kilometers.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    /// Number of points the matrix was built from.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Whether the matrix is empty.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }
}

/// Total length of an index tour in kilometers.
///
/// Sums consecutive legs; tours of length ≤ 1 have length 0. With
/// `round_trip` the closing leg from the last point back to the first is
/// included.
pub fn tour_length(tour: &[usize], matrix: &DistanceMatrix, round_trip: bool) -> f64 {
    if tour.len() <= 1 {
        return 0.0;
    }
    let mut total: f64 = tour.windows(2).map(|w| matrix.get(w[0], w[1])).sum();
    if round_trip {
        total += matrix.get(tour[tour.len() - 1], tour[0]);
    }
    total
}
