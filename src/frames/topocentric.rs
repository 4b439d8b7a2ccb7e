use super::geodetic::earth_fixed_to_geodetic;
use super::types::{EarthFixedVector, TopocentricFix};

/// South-East-Zenith frame anchored at an observer. Build it once per tick and
/// reuse it for every target.
#[derive(Debug, Clone, Copy)]
pub struct LocalFrame {
    origin: EarthFixedVector,
    sin_lat: f64,
    cos_lat: f64,
    sin_lon: f64,
    cos_lon: f64,
}

impl LocalFrame {
    pub fn at(observer: EarthFixedVector) -> Self {
        let geodetic = earth_fixed_to_geodetic(&observer);
        let lat = geodetic.latitude_deg.to_radians();
        let lon = geodetic.longitude_deg.to_radians();
        Self {
            origin: observer,
            sin_lat: lat.sin(),
            cos_lat: lat.cos(),
            sin_lon: lon.sin(),
            cos_lon: lon.cos(),
        }
    }

    pub fn origin(&self) -> EarthFixedVector {
        self.origin
    }

    /// Rotates an Earth-fixed offset into (south, east, zenith) components.
    pub fn to_sez(&self, d: &EarthFixedVector) -> (f64, f64, f64) {
        let south = self.sin_lat * self.cos_lon * d.x + self.sin_lat * self.sin_lon * d.y
            - self.cos_lat * d.z;
        let east = -self.sin_lon * d.x + self.cos_lon * d.y;
        let zenith = self.cos_lat * self.cos_lon * d.x
            + self.cos_lat * self.sin_lon * d.y
            + self.sin_lat * d.z;
        (south, east, zenith)
    }

    pub fn look_at(&self, target: &EarthFixedVector) -> TopocentricFix {
        let d = target.sub(&self.origin);
        let range_km = d.norm();
        let (south, east, zenith) = self.to_sez(&d);

        // Measured from the south axis towards east: due south reads 0 and
        // due north reads 180.
        let mut azimuth_deg = east.atan2(south).to_degrees();
        if azimuth_deg < 0.0 {
            azimuth_deg += 360.0;
        }
        if azimuth_deg >= 360.0 {
            azimuth_deg -= 360.0;
        }

        let elevation_deg = if range_km > 0.0 {
            (zenith / range_km).clamp(-1.0, 1.0).asin().to_degrees()
        } else {
            0.0
        };

        TopocentricFix {
            azimuth_deg,
            elevation_deg,
            range_km,
        }
    }
}

pub fn earth_fixed_to_topocentric(
    observer: &EarthFixedVector,
    target: &EarthFixedVector,
) -> TopocentricFix {
    LocalFrame::at(*observer).look_at(target)
}

/// Rate of change of range (km/s, positive when receding) for a target moving
/// with `target_velocity` relative to a stationary Earth-fixed observer.
pub fn range_rate_km_s(
    observer: &EarthFixedVector,
    target: &EarthFixedVector,
    target_velocity: &EarthFixedVector,
) -> f64 {
    let d = target.sub(observer);
    let range = d.norm();
    if range > 0.0 {
        d.dot(target_velocity) / range
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::geodetic::geodetic_to_earth_fixed;

    fn fix_from(lat: f64, lon: f64, target: EarthFixedVector) -> TopocentricFix {
        earth_fixed_to_topocentric(&geodetic_to_earth_fixed(lat, lon, 0.0), &target)
    }

    #[test]
    fn object_straight_up_is_at_zenith() {
        let target = geodetic_to_earth_fixed(40.0, -75.0, 500_000.0);
        let fix = fix_from(40.0, -75.0, target);
        assert!((fix.elevation_deg - 90.0).abs() < 1e-4);
        assert!((fix.range_km - 500.0).abs() < 1e-6);
    }

    #[test]
    fn cardinal_bearings_from_the_equator() {
        // Observer at (0, 0): north is +z, east is +y. Azimuth counts from
        // south through east.
        let obs = geodetic_to_earth_fixed(0.0, 0.0, 0.0);

        let north = EarthFixedVector::new(obs.x, 0.0, 1000.0);
        let east = EarthFixedVector::new(obs.x, 1000.0, 0.0);
        let south = EarthFixedVector::new(obs.x, 0.0, -1000.0);
        let west = EarthFixedVector::new(obs.x, -1000.0, 0.0);

        let az = |t: EarthFixedVector| earth_fixed_to_topocentric(&obs, &t).azimuth_deg;
        assert!((az(north) - 180.0).abs() < 1e-9);
        assert!((az(east) - 90.0).abs() < 1e-9);
        assert!(az(south).abs() < 1e-9);
        assert!((az(west) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn horizontal_offsets_have_zero_elevation() {
        let obs = geodetic_to_earth_fixed(0.0, 0.0, 0.0);
        let fix = earth_fixed_to_topocentric(&obs, &EarthFixedVector::new(obs.x, 500.0, 0.0));
        assert!(fix.elevation_deg.abs() < 1e-9);
        assert!((fix.range_km - 500.0).abs() < 1e-9);
    }

    #[test]
    fn far_side_of_the_earth_is_below_horizon() {
        let target = geodetic_to_earth_fixed(-10.0, 170.0, 400_000.0);
        let fix = fix_from(10.0, -10.0, target);
        assert!(fix.elevation_deg < -45.0);
        assert!((0.0..360.0).contains(&fix.azimuth_deg));
    }

    #[test]
    fn reused_frame_matches_one_shot_conversion() {
        let obs = geodetic_to_earth_fixed(52.52, 13.405, 34.0);
        let frame = LocalFrame::at(obs);
        let target = geodetic_to_earth_fixed(55.0, 20.0, 420_000.0);
        assert_eq!(frame.look_at(&target), earth_fixed_to_topocentric(&obs, &target));
    }

    #[test]
    fn range_rate_sign_follows_motion() {
        let obs = EarthFixedVector::new(6378.0, 0.0, 0.0);
        let target = EarthFixedVector::new(7000.0, 0.0, 0.0);
        let away = EarthFixedVector::new(2.0, 0.0, 0.0);
        let across = EarthFixedVector::new(0.0, 7.5, 0.0);
        assert!((range_rate_km_s(&obs, &target, &away) - 2.0).abs() < 1e-12);
        assert!(range_rate_km_s(&obs, &target, &across).abs() < 1e-12);
    }
}
