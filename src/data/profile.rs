//! Standing analysis defaults: target weapon and display settings.
//! Missing or invalid profile falls back to built-in defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::weapon::DEFAULT_MIN_STARS;

pub const DEFAULT_PROFILE_PATH: &str = "data/dropsight.profile.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisProfile {
    /// Weapon analyzed when the command line names none.
    #[serde(default)]
    pub target_weapon: Option<String>,
    #[serde(default = "default_show_stars")]
    pub show_stars: bool,
    #[serde(default = "default_min_stars")]
    pub min_stars: u8,
    #[serde(default)]
    pub show_classes: bool,
}

impl Default for AnalysisProfile {
    fn default() -> Self {
        AnalysisProfile {
            target_weapon: None,
            show_stars: true,
            min_stars: DEFAULT_MIN_STARS,
            show_classes: false,
        }
    }
}

fn default_show_stars() -> bool {
    true
}

fn default_min_stars() -> u8 {
    DEFAULT_MIN_STARS
}

/// Load the profile from JSON. Returns defaults if the file is missing or invalid.
pub fn load_profile(path: &str) -> AnalysisProfile {
    let path = Path::new(path);
    if !path.exists() {
        return AnalysisProfile::default();
    }
    let raw = match fs::read_to_string(path) {
        Ok(s) => s,
        _ => return AnalysisProfile::default(),
    };
    serde_json::from_str(&raw).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let profile: AnalysisProfile = serde_json::from_str("{}").unwrap();
        assert!(profile.show_stars);
        assert_eq!(profile.min_stars, DEFAULT_MIN_STARS);
        assert!(!profile.show_classes);
        assert!(profile.target_weapon.is_none());
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let profile: AnalysisProfile = serde_json::from_str(
            "{\"target_weapon\":\"Sunfall\",\"show_stars\":false,\"min_stars\":4,\"show_classes\":true}",
        )
        .unwrap();
        assert_eq!(profile.target_weapon.as_deref(), Some("Sunfall"));
        assert!(!profile.show_stars);
        assert_eq!(profile.min_stars, 4);
        assert!(profile.show_classes);
    }
}
