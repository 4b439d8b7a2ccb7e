use serde::Serialize;
use utoipa::ToSchema;

use crate::registry::ObjectView;

/// Margin between the horizon ring and the canvas edge, in pixels.
pub const VIEW_MARGIN_PX: f64 = 40.0;
/// Elevations at which reference rings are drawn.
pub const ELEVATION_RINGS_DEG: [f64; 3] = [30.0, 60.0, 90.0];
/// How close a point must be to a marker to pick that object.
pub const PICK_RADIUS_PX: f64 = 15.0;

/// Offset from the view center in canvas units, y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct SkyPoint {
    pub x: f64,
    pub y: f64,
}

/// Polar sky projection: zenith at the center, horizon on the outer ring,
/// north straight up and east to the right.
pub fn project(azimuth_deg: f64, elevation_deg: f64, view_radius: f64) -> SkyPoint {
    let r = (view_radius * (1.0 - elevation_deg / 90.0)).max(0.0);
    let theta = (90.0 - azimuth_deg).to_radians();
    SkyPoint {
        x: r * theta.cos(),
        y: -r * theta.sin(),
    }
}

/// Canvas geometry for a rendered sky plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyView {
    width: f64,
    height: f64,
}

impl SkyView {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn center(&self) -> SkyPoint {
        SkyPoint {
            x: self.width / 2.0,
            y: self.height / 2.0,
        }
    }

    pub fn radius(&self) -> f64 {
        (self.width.min(self.height) / 2.0 - VIEW_MARGIN_PX).max(0.0)
    }

    pub fn to_canvas(&self, azimuth_deg: f64, elevation_deg: f64) -> SkyPoint {
        let center = self.center();
        let offset = project(azimuth_deg, elevation_deg, self.radius());
        SkyPoint {
            x: center.x + offset.x,
            y: center.y + offset.y,
        }
    }

    pub fn ring_radius(&self, elevation_deg: f64) -> f64 {
        (self.radius() * (1.0 - elevation_deg / 90.0)).max(0.0)
    }

    /// First visible object whose marker lies within the pick radius of the
    /// given canvas point.
    pub fn object_at<'a>(&self, x: f64, y: f64, objects: &'a [ObjectView]) -> Option<&'a ObjectView> {
        objects.iter().filter(|o| o.visible).find(|o| {
            o.topocentric.is_some_and(|fix| {
                let p = self.to_canvas(fix.azimuth_deg, fix.elevation_deg);
                (p.x - x).hypot(p.y - y) < PICK_RADIUS_PX
            })
        })
    }
}
