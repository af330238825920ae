//! Canonical dataset: the weapon catalog plus the zone affix pools.
//! On-disk form is pretty-printed JSON (written by `import`); spreadsheet
//! paths are routed through the workbook reader instead.

use std::env;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::weapon::WeaponRecord;
use crate::data::zone::ZoneRecord;

pub const DEFAULT_DATASET_PATH: &str = "data/weapons.canonical.json";
/// Environment override for the dataset path, checked when no --data flag is given.
pub const DATASET_PATH_ENV: &str = "DROPSIGHT_DATA";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub data_version: Option<String>,
    #[serde(default)]
    pub source_note: Option<String>,
    /// Import date (%Y-%m-%d), stamped by the importer.
    #[serde(default)]
    pub generated: Option<String>,
    pub weapons: Vec<WeaponRecord>,
    #[serde(default)]
    pub zones: Vec<ZoneRecord>,
}

#[derive(Debug)]
pub enum DatasetError {
    Read(std::io::Error),
    Parse(serde_json::Error),
    Workbook(calamine::Error),
    EmptyWorkbook,
    MissingColumns { sheet: String, columns: Vec<&'static str> },
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(err) => write!(f, "failed to read dataset: {err}"),
            Self::Parse(err) => write!(f, "failed to parse dataset JSON: {err}"),
            Self::Workbook(err) => write!(f, "failed to read workbook: {err}"),
            Self::EmptyWorkbook => write!(f, "workbook has no sheets"),
            Self::MissingColumns { sheet, columns } => write!(
                f,
                "sheet '{sheet}' is missing required columns: {}",
                columns.join(", ")
            ),
        }
    }
}

/// Load the canonical JSON dataset. Workbook paths should go through
/// [crate::data::workbook::load_workbook] so sheet diagnostics survive.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset, DatasetError> {
    let raw = fs::read_to_string(path).map_err(DatasetError::Read)?;
    serde_json::from_str(&raw).map_err(DatasetError::Parse)
}

/// Dataset path precedence: explicit flag, then DROPSIGHT_DATA, then default.
pub fn resolve_dataset_path(flag: Option<&str>) -> String {
    if let Some(path) = flag {
        return path.to_string();
    }
    env::var(DATASET_PATH_ENV).unwrap_or_else(|_| DEFAULT_DATASET_PATH.to_string())
}
