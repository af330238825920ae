use serde::{Deserialize, Serialize};

use crate::data::weapon::AffixSlot;

/// One drop zone: the affix values its loot table can roll per slot.
/// Pools are ordered as they appear in the source sheet, deduplicated,
/// and independent in length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRecord {
    pub name: String,
    pub first_pool: Vec<String>,
    pub second_pool: Vec<String>,
    pub third_pool: Vec<String>,
}

impl ZoneRecord {
    /// Pool for the given slot.
    pub fn pool(&self, slot: AffixSlot) -> &[String] {
        match slot {
            AffixSlot::First => &self.first_pool,
            AffixSlot::Second => &self.second_pool,
            AffixSlot::Third => &self.third_pool,
        }
    }

    /// Whether the zone can roll `affix` in the given slot.
    pub fn carries(&self, slot: AffixSlot, affix: &str) -> bool {
        self.pool(slot).iter().any(|candidate| candidate == affix)
    }
}
