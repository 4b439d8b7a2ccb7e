mod error;
mod location;

pub use error::ObserverError;
pub use location::ObserverLocation;
