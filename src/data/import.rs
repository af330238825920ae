//! Convert a drop-table workbook into the canonical JSON dataset.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::data::dataset::DatasetError;
use crate::data::workbook::{load_workbook, SkippedSheet};

#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub source_path: String,
    pub output_path: String,
    pub weapon_count: usize,
    pub zone_count: usize,
    /// Weapons whose three affix slots are not all filled in.
    pub incomplete_weapons: usize,
    pub skipped_sheets: Vec<SkippedSheet>,
}

#[derive(Debug)]
pub enum ImportError {
    Load(DatasetError),
    Serialize(serde_json::Error),
    Write(std::io::Error),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load(err) => write!(f, "failed to load workbook: {err}"),
            Self::Serialize(err) => write!(f, "failed to serialize dataset: {err}"),
            Self::Write(err) => write!(f, "failed to persist dataset: {err}"),
        }
    }
}

/// Read `source`, stamp provenance, and write the canonical dataset to `output`.
pub fn import_workbook(source: &Path, output: &Path) -> Result<ImportReport, ImportError> {
    let load = load_workbook(source).map_err(ImportError::Load)?;
    let mut dataset = load.dataset;
    dataset.generated = Some(chrono::Utc::now().format("%Y-%m-%d").to_string());
    dataset.source_note = Some(format!("imported from {}", source.display()));

    let incomplete_weapons = dataset
        .weapons
        .iter()
        .filter(|weapon| !weapon.has_complete_affixes())
        .count();

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(ImportError::Write)?;
        }
    }
    let serialized = serde_json::to_string_pretty(&dataset).map_err(ImportError::Serialize)?;
    fs::write(output, serialized).map_err(ImportError::Write)?;

    Ok(ImportReport {
        source_path: source.display().to_string(),
        output_path: output.display().to_string(),
        weapon_count: dataset.weapons.len(),
        zone_count: dataset.zones.len(),
        incomplete_weapons,
        skipped_sheets: load.skipped,
    })
}
