use thiserror::Error;

use crate::catalog::CatalogError;
use crate::observer::ObserverError;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("tracker already running")]
    AlreadyRunning,
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("observer error: {0}")]
    Observer(#[from] ObserverError),
}
