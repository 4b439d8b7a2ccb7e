use chrono::{DateTime, Utc};
use sgp4::{Constants, Elements};

use crate::frames::StateVector;
use crate::propagation::{PropagationError, Propagator, SiderealClock};

/// Parsed two-line element set together with its SGP4 initialization.
pub struct OrbitalElements {
    elements: Elements,
    constants: Constants,
}

impl std::fmt::Debug for OrbitalElements {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrbitalElements")
            .field("norad_id", &self.elements.norad_id)
            .field("object_name", &self.elements.object_name)
            .field("epoch", &self.elements.datetime)
            .finish()
    }
}

impl OrbitalElements {
    pub fn from_tle(
        name: Option<String>,
        line1: &str,
        line2: &str,
    ) -> Result<Self, PropagationError> {
        let elements = Elements::from_tle(name, line1.as_bytes(), line2.as_bytes())?;
        let constants = Constants::from_elements(&elements)?;
        Ok(Self {
            elements,
            constants,
        })
    }

    pub fn norad_id(&self) -> u64 {
        self.elements.norad_id
    }

    pub fn object_name(&self) -> Option<&str> {
        self.elements.object_name.as_deref()
    }

    pub fn epoch(&self) -> DateTime<Utc> {
        self.elements.datetime.and_utc()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Sgp4Propagator;

impl Propagator for Sgp4Propagator {
    type Elements = OrbitalElements;

    fn propagate(
        &self,
        elements: &OrbitalElements,
        time: DateTime<Utc>,
    ) -> Result<StateVector, PropagationError> {
        let minutes = elements
            .elements
            .datetime_to_minutes_since_epoch(&time.naive_utc())
            .map_err(|e| PropagationError::Time(e.to_string()))?;

        let prediction = elements.constants.propagate(minutes)?;

        Ok(StateVector {
            position: prediction.position.into(),
            velocity: prediction.velocity.into(),
        })
    }
}

/// Greenwich mean sidereal time, IAU formulation.
#[derive(Debug, Clone, Copy, Default)]
pub struct GmstClock;

impl SiderealClock for GmstClock {
    fn sidereal_angle(&self, time: DateTime<Utc>) -> f64 {
        sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&time.naive_utc()))
    }
}
