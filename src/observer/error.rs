use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ObserverError {
    #[error("invalid {field}: {value} is not a finite number")]
    NonFinite { field: &'static str, value: f64 },
    #[error("invalid coordinates '{0}', expected \"lat, lon\"")]
    InvalidCoordinates(String),
}
