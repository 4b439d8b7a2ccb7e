use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::frames::{EarthFixedVector, Geodetic, StateVector, TopocentricFix};
use crate::signal::{SignalQuality, SignalState};

/// Per-object update state, re-entered on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ObjectState {
    /// Never updated, or the propagator failed on the last tick.
    Uninitialized,
    Propagated,
    Visible,
    NotVisible,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Identity {
    pub name: String,
    pub catalog_number: Option<u64>,
}

impl Identity {
    pub fn new(name: impl Into<String>, catalog_number: Option<u64>) -> Self {
        Self {
            name: name.into(),
            catalog_number,
        }
    }
}

impl Identity {
    /// Catalog numbers decide when both sides carry one; names are only
    /// compared for objects registered without a number. Debris from one
    /// breakup often shares a name.
    pub fn same_object(&self, other: &Identity) -> bool {
        match (self.catalog_number, other.catalog_number) {
            (Some(a), Some(b)) => a == b,
            (None, None) => self.name == other.name,
            _ => false,
        }
    }
}

impl From<&str> for Identity {
    fn from(name: &str) -> Self {
        Self::new(name, None)
    }
}

/// A catalog object and everything derived for it on the last tick. Only the
/// registry writes these fields.
#[derive(Debug)]
pub struct TrackedObject<E> {
    pub(super) identity: Identity,
    pub(super) elements: E,
    pub(super) state: ObjectState,
    pub(super) inertial: Option<StateVector>,
    pub(super) earth_fixed: Option<EarthFixedVector>,
    pub(super) earth_fixed_velocity: Option<EarthFixedVector>,
    pub(super) ground_point: Option<Geodetic>,
    pub(super) topocentric: Option<TopocentricFix>,
    pub(super) range_rate_km_s: Option<f64>,
    pub(super) signal: SignalState,
    pub(super) is_active: bool,
    pub(super) last_update: Option<DateTime<Utc>>,
    pub(super) last_error: Option<String>,
}

impl<E> TrackedObject<E> {
    pub(super) fn new(identity: Identity, elements: E) -> Self {
        Self {
            identity,
            elements,
            state: ObjectState::Uninitialized,
            inertial: None,
            earth_fixed: None,
            earth_fixed_velocity: None,
            ground_point: None,
            topocentric: None,
            range_rate_km_s: None,
            signal: SignalState::NONE,
            is_active: false,
            last_update: None,
            last_error: None,
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn name(&self) -> &str {
        &self.identity.name
    }

    pub fn elements(&self) -> &E {
        &self.elements
    }

    pub fn state(&self) -> ObjectState {
        self.state
    }

    pub fn inertial(&self) -> Option<&StateVector> {
        self.inertial.as_ref()
    }

    pub fn earth_fixed(&self) -> Option<&EarthFixedVector> {
        self.earth_fixed.as_ref()
    }

    pub fn earth_fixed_velocity(&self) -> Option<&EarthFixedVector> {
        self.earth_fixed_velocity.as_ref()
    }

    pub fn ground_point(&self) -> Option<&Geodetic> {
        self.ground_point.as_ref()
    }

    pub fn topocentric(&self) -> Option<&TopocentricFix> {
        self.topocentric.as_ref()
    }

    pub fn range_rate_km_s(&self) -> Option<f64> {
        self.range_rate_km_s
    }

    pub fn signal(&self) -> &SignalState {
        &self.signal
    }

    pub fn is_visible(&self) -> bool {
        self.signal.visible
    }

    pub fn signal_strength(&self) -> f64 {
        self.signal.signal_strength
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.last_update
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Owned snapshot for readers outside the tick.
    pub fn view(&self) -> ObjectView {
        ObjectView {
            name: self.identity.name.clone(),
            catalog_number: self.identity.catalog_number,
            state: self.state,
            is_active: self.is_active,
            visible: self.signal.visible,
            signal_strength: self.signal.signal_strength,
            bars_active: self.signal.bars_active,
            quality: self.signal.quality(),
            topocentric: self.topocentric,
            ground_point: self.ground_point,
            range_rate_km_s: self.range_rate_km_s,
            last_update: self.last_update,
            last_error: self.last_error.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ObjectView {
    pub name: String,
    pub catalog_number: Option<u64>,
    pub state: ObjectState,
    pub is_active: bool,
    pub visible: bool,
    pub signal_strength: f64,
    pub bars_active: u8,
    pub quality: SignalQuality,
    pub topocentric: Option<TopocentricFix>,
    pub ground_point: Option<Geodetic>,
    pub range_rate_km_s: Option<f64>,
    pub last_update: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}
