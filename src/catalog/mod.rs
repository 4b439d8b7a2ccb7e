mod error;
mod loader;
mod tle;

pub use error::CatalogError;
pub use loader::{load_file, TleLoader};
pub use tle::{parse_tle_lines, parse_tle_text, CatalogEntry, TleRecord};

#[cfg(test)]
pub(crate) use tle::fixtures;
