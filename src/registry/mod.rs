mod object;
mod registry;

pub use object::{Identity, ObjectState, ObjectView, TrackedObject};
pub use registry::Registry;
