//! Great-circle distance and initial bearing.
//!
//! Uses a spherical Earth: haversine for distance and the forward-azimuth
//! formula for bearing. Accurate to within about 0.5% of the ellipsoidal
//! answer, which is plenty for pointing an antenna.

use crate::domain::Coordinate;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Statute miles per kilometre.
pub const MILES_PER_KM: f64 = 0.621371;

/// Distance and initial bearing between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geodesic {
    pub distance_km: f64,
    pub distance_miles: f64,
    /// Initial bearing in degrees clockwise from true North, in `[0, 360)`.
    pub bearing_deg: f64,
}

/// Compute the great-circle distance and initial bearing from `origin`
/// to `destination`.
///
/// Coincident points give a distance of 0 and a bearing of 0.
///
/// ```
/// use ham_radio_server::domain::Coordinate;
/// use ham_radio_server::geodesic::compute;
///
/// let g = compute(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 90.0));
/// assert!((g.bearing_deg - 90.0).abs() < 1e-9);
/// assert!((g.distance_km - 10007.543).abs() < 0.01);
/// ```
pub fn compute(origin: Coordinate, destination: Coordinate) -> Geodesic {
    let lat1 = origin.latitude.to_radians();
    let lat2 = destination.latitude.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (destination.longitude - origin.longitude).to_radians();

    // Rounding can push `a` just past 1 for near-antipodal points
    let a = ((d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2))
        .min(1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    let distance_km = EARTH_RADIUS_KM * c;

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

    Geodesic {
        distance_km,
        distance_miles: distance_km * MILES_PER_KM,
        bearing_deg: normalize_bearing(y.atan2(x).to_degrees()),
    }
}

/// Fold a bearing from `atan2` (`[-180, 180]`) into `[0, 360)`.
fn normalize_bearing(deg: f64) -> f64 {
    let deg = if deg < 0.0 { deg + 360.0 } else { deg };
    // -0.0 and tiny negative inputs can round up to exactly 360
    if deg >= 360.0 { deg - 360.0 } else { deg }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn quarter_circumference_along_equator() {
        let g = compute(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 90.0));
        let quarter = std::f64::consts::PI * EARTH_RADIUS_KM / 2.0;

        assert!(approx(g.distance_km, quarter, 1e-6));
        assert!(approx(g.distance_km, 10007.5, 0.1));
        assert!(approx(g.bearing_deg, 90.0, 1e-9));
        assert!(approx(g.distance_miles, quarter * MILES_PER_KM, 1e-6));
    }

    #[test]
    fn identical_points() {
        let p = Coordinate::new(41.714775, -72.72726);
        let g = compute(p, p);

        assert_eq!(g.distance_km, 0.0);
        assert_eq!(g.distance_miles, 0.0);
        assert!(!g.bearing_deg.is_nan());
        assert_eq!(g.bearing_deg, 0.0);
    }

    #[test]
    fn due_north_and_south() {
        let g = compute(Coordinate::new(0.0, 10.0), Coordinate::new(45.0, 10.0));
        assert!(approx(g.bearing_deg, 0.0, 1e-9));

        let g = compute(Coordinate::new(45.0, 10.0), Coordinate::new(0.0, 10.0));
        assert!(approx(g.bearing_deg, 180.0, 1e-9));
    }

    #[test]
    fn westward_is_normalized() {
        let g = compute(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, -90.0));
        assert!(approx(g.bearing_deg, 270.0, 1e-9));
    }

    #[test]
    fn newington_to_london() {
        // W1AW (Newington, CT) to London
        let g = compute(
            Coordinate::new(41.714775, -72.72726),
            Coordinate::new(51.5074, -0.1278),
        );
        assert!(approx(g.distance_km, 5417.2, 1.0));
        assert!(approx(g.bearing_deg, 52.2, 0.1));
    }

    #[test]
    fn antipodal_points_have_finite_distance() {
        let half = std::f64::consts::PI * EARTH_RADIUS_KM;
        for (lat, lon) in [(0.0, 0.0), (41.714775, -72.72726), (-33.8688, 151.2093), (89.9, 12.5)] {
            let g = compute(
                Coordinate::new(lat, lon),
                Coordinate::new(-lat, lon - 180.0),
            );
            assert!(g.distance_km.is_finite(), "NaN distance from ({lat}, {lon})");
            assert!(approx(g.distance_km, half, 1e-3));
            assert!(!g.bearing_deg.is_nan());
        }
    }

    #[test]
    fn normalize_bearing_range() {
        assert_eq!(normalize_bearing(-90.0), 270.0);
        assert_eq!(normalize_bearing(180.0), 180.0);
        assert_eq!(normalize_bearing(-180.0), 180.0);
        assert_eq!(normalize_bearing(-0.0), 0.0);
        assert!(normalize_bearing(-1e-20) < 360.0);
    }
}
