use super::types::{EarthFixedVector, InertialVector};

pub const EARTH_ROTATION_RAD_S: f64 = 7.292_115e-5;
pub const SPEED_OF_LIGHT_KM_S: f64 = 299_792.458;

/// Rotates an inertial position about the polar axis by the sidereal angle.
pub fn inertial_to_fixed(v: &InertialVector, sidereal_rad: f64) -> EarthFixedVector {
    let cos_gmst = sidereal_rad.cos();
    let sin_gmst = sidereal_rad.sin();
    EarthFixedVector {
        x: v.x * cos_gmst + v.y * sin_gmst,
        y: -v.x * sin_gmst + v.y * cos_gmst,
        z: v.z,
    }
}

/// Earth-fixed velocity: the rotated inertial velocity minus the frame's own
/// rotation at the object's position.
pub fn inertial_velocity_to_fixed(
    position: &InertialVector,
    velocity: &InertialVector,
    sidereal_rad: f64,
) -> EarthFixedVector {
    let pos = inertial_to_fixed(position, sidereal_rad);
    let rotated = inertial_to_fixed(velocity, sidereal_rad);
    EarthFixedVector {
        x: rotated.x + EARTH_ROTATION_RAD_S * pos.y,
        y: rotated.y - EARTH_ROTATION_RAD_S * pos.x,
        z: rotated.z,
    }
}

pub fn downlink_doppler_hz(freq_hz: f64, range_rate_km_s: f64) -> f64 {
    freq_hz * (1.0 - range_rate_km_s / SPEED_OF_LIGHT_KM_S)
}

pub fn uplink_doppler_hz(freq_hz: f64, range_rate_km_s: f64) -> f64 {
    freq_hz * (1.0 + range_rate_km_s / SPEED_OF_LIGHT_KM_S)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn zero_angle_is_identity() {
        let v = InertialVector::new(1.0, 2.0, 3.0);
        assert_eq!(inertial_to_fixed(&v, 0.0), EarthFixedVector::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn quarter_turn_moves_x_onto_negative_y() {
        let fixed = inertial_to_fixed(&InertialVector::new(7000.0, 0.0, 100.0), FRAC_PI_2);
        assert!(fixed.x.abs() < 1e-9);
        assert!((fixed.y + 7000.0).abs() < 1e-9);
        assert_eq!(fixed.z, 100.0);
    }

    #[test]
    fn rotation_preserves_length() {
        let v = InertialVector::new(-4321.0, 5123.4, 2010.0);
        let fixed = inertial_to_fixed(&v, 1.234);
        let before = (v.x * v.x + v.y * v.y + v.z * v.z).sqrt();
        assert!((fixed.norm() - before).abs() < 1e-9);
    }

    #[test]
    fn geostationary_object_is_at_rest_in_fixed_frame() {
        let r = 42_164.0;
        let speed = EARTH_ROTATION_RAD_S * r;
        let pos = InertialVector::new(r, 0.0, 0.0);
        let vel = InertialVector::new(0.0, speed, 0.0);
        let fixed = inertial_velocity_to_fixed(&pos, &vel, 0.0);
        assert!(fixed.norm() < 1e-9);
    }

    #[test]
    fn doppler_lowers_receding_downlink() {
        let f = 437_000_000.0;
        assert!(downlink_doppler_hz(f, 5.0) < f);
        assert!(uplink_doppler_hz(f, 5.0) > f);
        assert_eq!(downlink_doppler_hz(f, 0.0), f);
    }
}
