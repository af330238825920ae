use serde::{Deserialize, Serialize};

/// Lowest star rating the game hands out for affix-rolled weapons.
pub const MIN_STAR_RATING: u8 = 4;
/// Highest star rating.
pub const MAX_STAR_RATING: u8 = 6;
/// Default display cutoff when none is configured.
pub const DEFAULT_MIN_STARS: u8 = 5;

/// One catalog weapon: three affixes in fixed slots, class and star rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponRecord {
    pub name: String,
    pub first_affix: String,
    pub second_affix: String,
    pub third_affix: String,
    #[serde(default)]
    pub weapon_class: String,
    #[serde(default)]
    pub stars: u8,
}

/// Affix slot position. Drop filters always include the first slot; the
/// second or third is what gets held fixed during analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AffixSlot {
    First,
    Second,
    Third,
}

impl AffixSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Second => "second",
            Self::Third => "third",
        }
    }
}

impl WeaponRecord {
    /// Affix in the given slot.
    pub fn affix(&self, slot: AffixSlot) -> &str {
        match slot {
            AffixSlot::First => &self.first_affix,
            AffixSlot::Second => &self.second_affix,
            AffixSlot::Third => &self.third_affix,
        }
    }

    pub fn has_complete_affixes(&self) -> bool {
        !self.first_affix.trim().is_empty()
            && !self.second_affix.trim().is_empty()
            && !self.third_affix.trim().is_empty()
    }
}
