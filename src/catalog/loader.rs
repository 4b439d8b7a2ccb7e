use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::tle::{parse_tle_text, CatalogEntry};
use crate::catalog::CatalogError;

pub struct TleLoader {
    tle_dir: PathBuf,
}

impl TleLoader {
    pub fn new(tle_dir: PathBuf) -> Self {
        Self { tle_dir }
    }

    pub fn tle_dir(&self) -> &Path {
        &self.tle_dir
    }

    /// Loads every `*.tle` / `*.txt` file in the folder, in file-name order.
    /// Files that fail to parse are skipped with a warning; an object listed
    /// in several files keeps its first position and its last element set.
    pub fn load_all(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        if !self.tle_dir.is_dir() {
            return Err(CatalogError::DirectoryNotFound(
                self.tle_dir.display().to_string(),
            ));
        }

        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.tle_dir)? {
            let path = entry?.path();
            if path.is_file() && has_tle_extension(&path) {
                paths.push(path);
            }
        }
        paths.sort();

        let mut entries: Vec<CatalogEntry> = Vec::new();
        let mut index_by_id: HashMap<u64, usize> = HashMap::new();

        for path in paths {
            match load_file(&path) {
                Ok(loaded) => {
                    for entry in loaded {
                        match index_by_id.get(&entry.catalog_number) {
                            Some(&i) => entries[i] = entry,
                            None => {
                                index_by_id.insert(entry.catalog_number, entries.len());
                                entries.push(entry);
                            }
                        }
                    }
                }
                Err(e) => {
                    log::warn!("Failed to parse TLE file {}: {}", path.display(), e);
                }
            }
        }

        log::info!(
            "Loaded {} objects from {}",
            entries.len(),
            self.tle_dir.display()
        );
        Ok(entries)
    }
}

/// Parses a single catalog file. Any malformed element set fails the whole
/// file so a partially-corrupt download is never half-registered.
pub fn load_file(path: &Path) -> Result<Vec<CatalogEntry>, CatalogError> {
    let content = fs::read_to_string(path)?;
    let source_name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    parse_tle_text(&content)
        .into_iter()
        .map(|record| CatalogEntry::from_record(record, &source_name))
        .collect()
}

fn has_tle_extension(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("tle") | Some("txt")
    )
}
