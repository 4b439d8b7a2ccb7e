mod geodetic;
mod rotation;
mod topocentric;
mod types;

pub use geodetic::{
    earth_fixed_to_geodetic, geodetic_to_earth_fixed, prime_vertical_radius_km, ECCENTRICITY_SQ,
    EQUATORIAL_RADIUS_KM, FLATTENING,
};
pub use rotation::{
    downlink_doppler_hz, inertial_to_fixed, inertial_velocity_to_fixed, uplink_doppler_hz,
    EARTH_ROTATION_RAD_S, SPEED_OF_LIGHT_KM_S,
};
pub use topocentric::{earth_fixed_to_topocentric, range_rate_km_s, LocalFrame};
pub use types::{EarthFixedVector, Geodetic, InertialVector, StateVector, TopocentricFix};
