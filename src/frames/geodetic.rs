use super::types::{EarthFixedVector, Geodetic};

// WGS-84 constants
pub const EQUATORIAL_RADIUS_KM: f64 = 6378.137;
pub const FLATTENING: f64 = 1.0 / 298.257_223_563;
pub const ECCENTRICITY_SQ: f64 = FLATTENING * (2.0 - FLATTENING);

/// Fixed-point iterations for the latitude solution. Converges below 1e-9 rad
/// from the ground up to geostationary altitude with the WGS-84 constants.
const LATITUDE_ITERATIONS: usize = 3;

/// Prime-vertical radius of curvature at a geodetic latitude, in kilometers.
pub fn prime_vertical_radius_km(lat_rad: f64) -> f64 {
    let sin_lat = lat_rad.sin();
    EQUATORIAL_RADIUS_KM / (1.0 - ECCENTRICITY_SQ * sin_lat * sin_lat).sqrt()
}

pub fn geodetic_to_earth_fixed(
    latitude_deg: f64,
    longitude_deg: f64,
    altitude_m: f64,
) -> EarthFixedVector {
    let lat = latitude_deg.to_radians();
    let lon = longitude_deg.to_radians();
    let sin_lat = lat.sin();
    let cos_lat = lat.cos();
    let n = prime_vertical_radius_km(lat);
    let alt_km = altitude_m / 1000.0;

    EarthFixedVector {
        x: (n + alt_km) * cos_lat * lon.cos(),
        y: (n + alt_km) * cos_lat * lon.sin(),
        z: (n * (1.0 - ECCENTRICITY_SQ) + alt_km) * sin_lat,
    }
}

pub fn earth_fixed_to_geodetic(v: &EarthFixedVector) -> Geodetic {
    let lon = v.y.atan2(v.x);
    let p = (v.x * v.x + v.y * v.y).sqrt();
    let lat = solve_latitude(p, v.z, LATITUDE_ITERATIONS);

    // Closed form in the converged latitude, well-conditioned at the poles too.
    let sin_lat = lat.sin();
    let alt_km = p * lat.cos() + v.z * sin_lat
        - EQUATORIAL_RADIUS_KM * (1.0 - ECCENTRICITY_SQ * sin_lat * sin_lat).sqrt();

    Geodetic {
        latitude_deg: lat.to_degrees(),
        longitude_deg: lon.to_degrees(),
        altitude_m: alt_km * 1000.0,
    }
}

fn solve_latitude(p: f64, z: f64, iterations: usize) -> f64 {
    let mut lat = z.atan2(p * (1.0 - ECCENTRICITY_SQ));
    for _ in 0..iterations {
        let n = prime_vertical_radius_km(lat);
        lat = (z + ECCENTRICITY_SQ * n * lat.sin()).atan2(p);
    }
    lat
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_round_trip(lat: f64, lon: f64, alt_m: f64) {
        let back = earth_fixed_to_geodetic(&geodetic_to_earth_fixed(lat, lon, alt_m));
        assert!(
            (back.latitude_deg - lat).abs() < 1e-4,
            "lat {} -> {}",
            lat,
            back.latitude_deg
        );
        assert!(
            (back.altitude_m - alt_m).abs() < 1.0,
            "alt {} -> {} at lat {}",
            alt_m,
            back.altitude_m,
            lat
        );
        if lat.abs() < 90.0 {
            assert!(
                (back.longitude_deg - lon).abs() < 1e-4,
                "lon {} -> {}",
                lon,
                back.longitude_deg
            );
        }
    }

    #[test]
    fn equator_prime_meridian_is_on_x_axis() {
        let v = geodetic_to_earth_fixed(0.0, 0.0, 0.0);
        assert!((v.x - EQUATORIAL_RADIUS_KM).abs() < 1e-9);
        assert!(v.y.abs() < 1e-9);
        assert!(v.z.abs() < 1e-9);
    }

    #[test]
    fn north_pole_sits_on_polar_radius() {
        let v = geodetic_to_earth_fixed(90.0, 0.0, 0.0);
        let polar_radius = EQUATORIAL_RADIUS_KM * (1.0 - FLATTENING);
        assert!((v.z - polar_radius).abs() < 1e-6);
    }

    #[test]
    fn altitude_is_taken_in_meters() {
        let ground = geodetic_to_earth_fixed(0.0, 90.0, 0.0);
        let raised = geodetic_to_earth_fixed(0.0, 90.0, 1000.0);
        assert!((raised.y - ground.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn round_trips_across_latitudes_and_altitudes() {
        for lat in [-90.0, -89.9, -60.0, -33.87, -1.0, 0.0, 12.5, 45.0, 52.52, 80.0, 90.0] {
            for lon in [-179.9, -120.0, -0.5, 0.0, 13.405, 90.0, 180.0] {
                for alt in [0.0, 34.0, 8_848.0, 400_000.0, 35_786_000.0] {
                    assert_round_trip(lat, lon, alt);
                }
            }
        }
    }

    #[test]
    fn three_iterations_reach_sub_nanoradian_precision() {
        // Reference solution with many more iterations; the three-step result
        // differs by less than 1e-9 rad for ground stations and LEO/GEO objects.
        for lat_deg in [0.5_f64, 30.0, 45.0, 60.0, 85.0] {
            for alt_m in [0.0, 400_000.0, 35_786_000.0] {
                let v = geodetic_to_earth_fixed(lat_deg, 10.0, alt_m);
                let p = (v.x * v.x + v.y * v.y).sqrt();
                let three = solve_latitude(p, v.z, 3);
                let reference = solve_latitude(p, v.z, 50);
                assert!(
                    (three - reference).abs() < 1e-9,
                    "lat {} alt {}: error {}",
                    lat_deg,
                    alt_m,
                    (three - reference).abs()
                );
            }
        }
    }
}
