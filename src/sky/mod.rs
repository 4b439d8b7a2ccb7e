//! Presentation helpers over already-computed look angles. Nothing here
//! touches the registry state.

mod guidance;
mod projection;

pub use guidance::{compass_point, Alignment, PointingGuidance};
pub use projection::{
    project, SkyPoint, SkyView, ELEVATION_RINGS_DEG, PICK_RADIUS_PX, VIEW_MARGIN_PX,
};
