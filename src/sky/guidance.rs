use serde::Serialize;
use utoipa::ToSchema;

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// 16-point compass name for an azimuth in degrees.
pub fn compass_point(azimuth_deg: f64) -> &'static str {
    let index = (azimuth_deg.rem_euclid(360.0) / 22.5).round() as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[index]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Perfect,
    Good,
    Partial,
    TurnNeeded,
}

impl Alignment {
    pub fn from_offset(offset_deg: f64) -> Self {
        if offset_deg < 10.0 {
            Alignment::Perfect
        } else if offset_deg < 20.0 {
            Alignment::Good
        } else if offset_deg < 45.0 {
            Alignment::Partial
        } else {
            Alignment::TurnNeeded
        }
    }
}

/// How far a device heading is from the bearing of a target.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PointingGuidance {
    pub heading_deg: f64,
    pub target_azimuth_deg: f64,
    /// Shortest angular distance, in [0, 180].
    pub offset_deg: f64,
    pub alignment: Alignment,
    pub target_direction: String,
}

impl PointingGuidance {
    pub fn evaluate(heading_deg: f64, target_azimuth_deg: f64) -> Self {
        let mut offset = (heading_deg - target_azimuth_deg).rem_euclid(360.0);
        if offset > 180.0 {
            offset = 360.0 - offset;
        }
        Self {
            heading_deg,
            target_azimuth_deg,
            offset_deg: offset,
            alignment: Alignment::from_offset(offset),
            target_direction: compass_point(target_azimuth_deg).to_string(),
        }
    }
}
