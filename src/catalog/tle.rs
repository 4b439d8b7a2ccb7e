use crate::catalog::CatalogError;
use crate::propagation::OrbitalElements;

/// Raw two- or three-line element set, not yet validated.
#[derive(Debug, Clone, PartialEq)]
pub struct TleRecord {
    pub name: Option<String>,
    pub line1: String,
    pub line2: String,
}

/// An element set that passed SGP4 initialization and can be registered.
#[derive(Debug)]
pub struct CatalogEntry {
    pub name: String,
    pub catalog_number: u64,
    pub elements: OrbitalElements,
}

impl CatalogEntry {
    pub fn from_record(record: TleRecord, source_name: &str) -> Result<Self, CatalogError> {
        let elements =
            OrbitalElements::from_tle(record.name.clone(), &record.line1, &record.line2).map_err(
                |e| CatalogError::InvalidTle {
                    source_name: source_name.to_string(),
                    message: e.to_string(),
                },
            )?;

        let catalog_number = elements.norad_id();
        let name = record
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("NORAD {}", catalog_number));

        Ok(Self {
            name,
            catalog_number,
            elements,
        })
    }
}

/// Exactly one element set, with or without a name line.
pub fn parse_tle_lines(tle: &str) -> Result<TleRecord, CatalogError> {
    let lines: Vec<String> = tle
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect();

    match lines.as_slice() {
        [line1, line2] => Ok(TleRecord {
            name: None,
            line1: line1.clone(),
            line2: line2.clone(),
        }),
        [name, line1, line2] => Ok(TleRecord {
            name: Some(name.clone()),
            line1: line1.clone(),
            line2: line2.clone(),
        }),
        _ => Err(CatalogError::InvalidFormat),
    }
}

/// Multi-object catalog text. Lines that do not start a 2- or 3-line set are
/// skipped.
pub fn parse_tle_text(content: &str) -> Vec<TleRecord> {
    let lines: Vec<&str> = content
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    let mut result = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if lines[i].starts_with("1 ") && i + 1 < lines.len() && lines[i + 1].starts_with("2 ") {
            result.push(TleRecord {
                name: None,
                line1: lines[i].to_string(),
                line2: lines[i + 1].to_string(),
            });
            i += 2;
        } else if i + 2 < lines.len()
            && lines[i + 1].starts_with("1 ")
            && lines[i + 2].starts_with("2 ")
        {
            result.push(TleRecord {
                name: Some(lines[i].to_string()),
                line1: lines[i + 1].to_string(),
                line2: lines[i + 2].to_string(),
            });
            i += 3;
        } else {
            i += 1;
        }
    }

    result
}
