//! Coordinate helpers for building distance matrices.
//!
//! The optimizer itself only consumes a matrix. These helpers cover the
//! common case of turning latitude/longitude stops into one; any other
//! distance function with the same signature can be injected instead.

use crate::error::{TourError, TourResult};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A `(latitude, longitude)` pair in decimal degrees.
pub type Coordinate = (f64, f64);

/// Great-circle distance between two coordinates, in kilometres (haversine).
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let (lat1, lon1) = (a.0.to_radians(), a.1.to_radians());
    let (lat2, lon2) = (b.0.to_radians(), b.1.to_radians());

    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * h.sqrt().min(1.0).asin() * EARTH_RADIUS_KM
}

/// Returns `true` when latitude is in `[-90, 90]` and longitude in `[-180, 180]`.
pub fn validate_coordinate(latitude: f64, longitude: f64) -> bool {
    (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude)
}

/// Builds a symmetric matrix by evaluating `distance` once per unordered pair.
///
/// Rejects any coordinate outside the valid latitude/longitude range.
pub fn distance_matrix<F>(coords: &[Coordinate], distance: F) -> TourResult<Vec<Vec<f64>>>
where
    F: Fn(Coordinate, Coordinate) -> f64,
{
    for (index, &(latitude, longitude)) in coords.iter().enumerate() {
        if !validate_coordinate(latitude, longitude) {
            return Err(TourError::InvalidCoordinate {
                index,
                latitude,
                longitude,
            });
        }
    }

    let n = coords.len();
    let mut matrix = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in i + 1..n {
            let d = distance(coords[i], coords[j]);
            matrix[i][j] = d;
            matrix[j][i] = d;
        }
    }
    Ok(matrix)
}

/// Human-readable distance: metres below one kilometre, otherwise kilometres.
pub fn format_distance(distance_km: f64) -> String {
    if distance_km < 1.0 {
        format!("{:.0} m", distance_km * 1000.0)
    } else {
        format!("{distance_km:.2} km")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_zero_for_same_point() {
        assert!(haversine_km((37.5, 127.0), (37.5, 127.0)).abs() < 1e-12);
    }

    #[test]
    fn test_haversine_one_degree_of_latitude() {
        // One degree along a meridian is ~111.19 km.
        let d = haversine_km((0.0, 0.0), (1.0, 0.0));
        assert!((d - 111.19).abs() < 0.01, "got {d}");
    }

    #[test]
    fn test_haversine_symmetric() {
        let a = (48.8566, 2.3522);
        let b = (51.5074, -0.1278);
        assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
    }

    #[test]
    fn test_validate_coordinate_bounds() {
        assert!(validate_coordinate(90.0, -180.0));
        assert!(!validate_coordinate(90.1, 0.0));
        assert!(!validate_coordinate(0.0, 180.5));
        assert!(!validate_coordinate(f64::NAN, 0.0));
    }

    #[test]
    fn test_distance_matrix_symmetric_zero_diagonal() {
        let coords = [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)];
        let m = distance_matrix(&coords, haversine_km).expect("valid coordinates");
        for i in 0..3 {
            assert_eq!(m[i][i], 0.0);
            for j in 0..3 {
                assert_eq!(m[i][j], m[j][i]);
            }
        }
        assert!(m[0][2] > m[0][1]);
    }

    #[test]
    fn test_distance_matrix_rejects_bad_coordinate() {
        let coords = [(0.0, 0.0), (95.0, 0.0)];
        let err = distance_matrix(&coords, haversine_km).unwrap_err();
        assert!(matches!(err, TourError::InvalidCoordinate { index: 1, .. }));
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(0.85), "850 m");
        assert_eq!(format_distance(1.254), "1.25 km");
    }
}
