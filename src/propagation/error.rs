use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PropagationError {
    #[error("invalid elements: {0}")]
    InvalidElements(String),
    #[error("time conversion error: {0}")]
    Time(String),
    #[error("propagation error: {0}")]
    Propagation(String),
}

impl From<sgp4::TleError> for PropagationError {
    fn from(err: sgp4::TleError) -> Self {
        PropagationError::InvalidElements(err.to_string())
    }
}

impl From<sgp4::ElementsError> for PropagationError {
    fn from(err: sgp4::ElementsError) -> Self {
        PropagationError::InvalidElements(err.to_string())
    }
}

impl From<sgp4::Error> for PropagationError {
    fn from(err: sgp4::Error) -> Self {
        PropagationError::Propagation(err.to_string())
    }
}
