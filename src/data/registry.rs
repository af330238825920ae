//! Loaded-once dataset plus weapon name lookup. Built at startup and read
//! only after that; shell prompts reuse the same registry across queries.

use std::collections::HashMap;

use crate::data::dataset::Dataset;
use crate::data::weapon::WeaponRecord;
use crate::data::zone::ZoneRecord;

/// Normalize a name for lookup: lowercase, collapse spaces/underscores.
fn normalize_lookup(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() || c == '_' { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug)]
pub struct DataRegistry {
    dataset: Dataset,
    weapons_by_key: HashMap<String, usize>,
}

impl DataRegistry {
    pub fn new(dataset: Dataset) -> Self {
        let mut weapons_by_key = HashMap::new();
        for (index, weapon) in dataset.weapons.iter().enumerate() {
            // First occurrence wins; validate flags the duplicate.
            weapons_by_key
                .entry(normalize_lookup(&weapon.name))
                .or_insert(index);
        }
        DataRegistry {
            dataset,
            weapons_by_key,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn weapons(&self) -> &[WeaponRecord] {
        &self.dataset.weapons
    }

    pub fn zones(&self) -> &[ZoneRecord] {
        &self.dataset.zones
    }

    /// Resolve a weapon by exact name, falling back to normalized lookup.
    pub fn resolve_weapon(&self, name: &str) -> Option<&WeaponRecord> {
        if let Some(weapon) = self.dataset.weapons.iter().find(|w| w.name == name) {
            return Some(weapon);
        }
        self.weapons_by_key
            .get(&normalize_lookup(name))
            .map(|&index| &self.dataset.weapons[index])
    }
}
