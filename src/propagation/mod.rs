//! Seams to the orbit model. The registry only sees these traits, so any
//! propagator (SGP4 here, fakes in tests) can drive it.

mod error;
mod orbit;

use chrono::{DateTime, Utc};

use crate::frames::StateVector;

pub use error::PropagationError;
pub use orbit::{GmstClock, OrbitalElements, Sgp4Propagator};

pub trait Propagator {
    /// Opaque per-object orbital parameters.
    type Elements;

    fn propagate(
        &self,
        elements: &Self::Elements,
        time: DateTime<Utc>,
    ) -> Result<StateVector, PropagationError>;
}

pub trait SiderealClock {
    /// Rotation angle of the Earth-fixed frame against the inertial frame, in
    /// radians.
    fn sidereal_angle(&self, time: DateTime<Utc>) -> f64;
}
