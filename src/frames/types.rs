use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Earth-centered, Earth-fixed position in kilometers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct EarthFixedVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl EarthFixedVector {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn sub(&self, other: &EarthFixedVector) -> EarthFixedVector {
        EarthFixedVector {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }

    pub fn dot(&self, other: &EarthFixedVector) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

/// Earth-centered inertial vector, kilometers or kilometers per second.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct InertialVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl InertialVector {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl From<[f64; 3]> for InertialVector {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

/// Propagator output: inertial position (km) and velocity (km/s).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct StateVector {
    pub position: InertialVector,
    pub velocity: InertialVector,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Geodetic {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_m: f64,
}

/// Azimuth/elevation/range of a target as seen from an observer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TopocentricFix {
    /// Degrees from the local south axis through east, in [0, 360).
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
    pub range_km: f64,
}
