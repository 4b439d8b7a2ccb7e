//! Simulated link quality from look angles.
//!
//! The score is a monotonic heuristic, not a link budget: it rises with
//! elevation and falls with range. Tuning constants are kept as-is for
//! compatibility with existing displays.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const HORIZON_THRESHOLD_DEG: f64 = -0.5;
pub const REFERENCE_ALTITUDE_KM: f64 = 400.0;
pub const ATTENUATION_COEFFICIENT: f64 = 0.1;
pub const MAX_BARS: u8 = 5;

const MIN_DISTANCE_FACTOR: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SignalState {
    pub visible: bool,
    /// Score in [0, 100].
    pub signal_strength: f64,
    pub bars_active: u8,
}

impl SignalState {
    pub const NONE: SignalState = SignalState {
        visible: false,
        signal_strength: 0.0,
        bars_active: 0,
    };

    pub fn quality(&self) -> SignalQuality {
        SignalQuality::from_strength(self.signal_strength)
    }

    pub fn has_signal(&self) -> bool {
        self.visible && self.signal_strength > 0.0
    }
}

impl Default for SignalState {
    fn default() -> Self {
        Self::NONE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SignalQuality {
    NoSignal,
    Weak,
    Fair,
    Good,
    Excellent,
}

impl SignalQuality {
    pub fn from_strength(strength: f64) -> Self {
        if strength >= 75.0 {
            SignalQuality::Excellent
        } else if strength >= 50.0 {
            SignalQuality::Good
        } else if strength >= 25.0 {
            SignalQuality::Fair
        } else if strength > 0.0 {
            SignalQuality::Weak
        } else {
            SignalQuality::NoSignal
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SignalQuality::NoSignal => "No Signal",
            SignalQuality::Weak => "WEAK",
            SignalQuality::Fair => "FAIR",
            SignalQuality::Good => "GOOD",
            SignalQuality::Excellent => "EXCELLENT",
        }
    }
}

pub fn evaluate(elevation_deg: f64, range_km: f64) -> SignalState {
    if !(elevation_deg > HORIZON_THRESHOLD_DEG) {
        return SignalState::NONE;
    }

    // Capped at zenith so the factor cannot fall again past 89 degrees.
    let elevation_factor = (elevation_deg + 1.0).min(90.0).to_radians().sin().max(0.0);
    let distance_factor = (REFERENCE_ALTITUDE_KM / range_km)
        .powi(2)
        .max(MIN_DISTANCE_FACTOR);
    let atmospheric_factor = (-ATTENUATION_COEFFICIENT * (1.0 - elevation_factor)).exp();

    let raw = elevation_factor * distance_factor * atmospheric_factor;
    let signal_strength = (raw * 100.0).min(100.0);
    let bars = (signal_strength / 100.0 * MAX_BARS as f64).ceil();

    SignalState {
        visible: true,
        signal_strength,
        bars_active: bars.clamp(0.0, MAX_BARS as f64) as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizon_threshold_is_exclusive() {
        let at = evaluate(-0.5, 1000.0);
        assert!(!at.visible);
        assert_eq!(at, SignalState::NONE);

        let just_above = evaluate(-0.4999, 1000.0);
        assert!(just_above.visible);
        assert!(just_above.signal_strength > 0.0);
    }

    #[test]
    fn below_horizon_short_circuits() {
        assert_eq!(evaluate(-30.0, 400.0), SignalState::NONE);
        assert_eq!(evaluate(f64::NAN, 400.0), SignalState::NONE);
    }

    #[test]
    fn overhead_at_reference_altitude_saturates() {
        let s = evaluate(90.0, 400.0);
        assert_eq!(evaluate(89.5, 400.0), s);
        assert!(s.visible);
        assert!((s.signal_strength - 100.0).abs() < 1e-9);
        assert_eq!(s.bars_active, 5);

        let closer = evaluate(90.0, 200.0);
        assert_eq!(closer.signal_strength, 100.0);
    }

    #[test]
    fn distant_objects_floor_at_distance_factor() {
        // GPS-like range: distance factor pinned at 0.1.
        let s = evaluate(89.0, 20_200.0);
        assert!((s.signal_strength - 10.0).abs() < 0.01);
        assert_eq!(s.bars_active, 1);
        assert_eq!(s.quality(), SignalQuality::Weak);
    }

    #[test]
    fn strength_never_drops_with_elevation() {
        for range in [350.0, 500.0, 1200.0, 2500.0, 36_000.0] {
            let mut prev = -1.0;
            let mut el = -0.49;
            while el <= 90.0 {
                let s = evaluate(el, range).signal_strength;
                assert!(s >= prev, "range {} el {}: {} < {}", range, el, s, prev);
                prev = s;
                el += 0.25;
            }
        }
    }

    #[test]
    fn strength_never_rises_with_range() {
        for el in [0.0, 5.0, 30.0, 60.0, 90.0] {
            let mut prev = f64::INFINITY;
            let mut range = 100.0;
            while range < 40_000.0 {
                let s = evaluate(el, range).signal_strength;
                assert!(s <= prev, "el {} range {}: {} > {}", el, range, s, prev);
                prev = s;
                range *= 1.1;
            }
        }
    }

    #[test]
    fn bars_track_strength_in_fifths() {
        let low = evaluate(2.0, 2000.0);
        assert!(low.signal_strength > 0.0 && low.signal_strength <= 20.0);
        assert_eq!(low.bars_active, 1);

        for el in [0.0, 10.0, 25.0, 45.0, 70.0, 90.0] {
            for range in [300.0, 600.0, 1500.0] {
                let s = evaluate(el, range);
                assert!(s.bars_active >= 1 && s.bars_active <= MAX_BARS);
                let expected = (s.signal_strength / 100.0 * 5.0).ceil() as u8;
                assert_eq!(s.bars_active, expected);
            }
        }
    }

    #[test]
    fn quality_tiers() {
        assert_eq!(SignalQuality::from_strength(0.0), SignalQuality::NoSignal);
        assert_eq!(SignalQuality::from_strength(0.1), SignalQuality::Weak);
        assert_eq!(SignalQuality::from_strength(25.0), SignalQuality::Fair);
        assert_eq!(SignalQuality::from_strength(50.0), SignalQuality::Good);
        assert_eq!(SignalQuality::from_strength(75.0), SignalQuality::Excellent);
        assert_eq!(SignalQuality::Excellent.label(), "EXCELLENT");
    }
}
