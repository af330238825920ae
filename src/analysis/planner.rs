use std::fmt;

use serde::Serialize;

use crate::analysis::combos::pair_combinations;
use crate::analysis::droppable::{droppable_zones, zone_can_drop};
use crate::data::registry::DataRegistry;
use crate::data::weapon::{AffixSlot, WeaponRecord};
use crate::data::zone::ZoneRecord;

/// Other weapons reachable under one first-affix pair, fixed slot implied
/// by which list of the [ZonePlan] this sits in. Only non-empty matches
/// are ever stored; weapons are sorted stars-descending, then name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionMatches {
    pub pair: [String; 2],
    pub weapons: Vec<WeaponRecord>,
}

/// Why a droppable zone produced no selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneSkip {
    /// Zone's first pool is missing the target's first affix. Structural
    /// guard; a droppable zone always carries it.
    PrimaryMissing,
    /// Fewer than two other first affixes, so no pair can be formed.
    NotEnoughPrimaries,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZonePlan {
    pub zone_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<ZoneSkip>,
    /// Selections with the target's second affix held fixed.
    pub fixed_second: Vec<SelectionMatches>,
    /// Selections with the target's third affix held fixed.
    pub fixed_third: Vec<SelectionMatches>,
}

impl ZonePlan {
    /// Whether any selection matched at all (before star filtering).
    pub fn has_matches(&self) -> bool {
        !self.fixed_second.is_empty() || !self.fixed_third.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeaponPlan {
    pub target: WeaponRecord,
    /// One entry per droppable zone, in dataset order. Empty when the
    /// weapon can drop nowhere.
    pub zones: Vec<ZonePlan>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    UnknownWeapon(String),
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownWeapon(name) => write!(f, "unknown weapon '{name}'"),
        }
    }
}

/// Build the full farming plan for a weapon by name.
pub fn plan_for_weapon(registry: &DataRegistry, name: &str) -> Result<WeaponPlan, PlanError> {
    let target = registry
        .resolve_weapon(name)
        .ok_or_else(|| PlanError::UnknownWeapon(name.to_string()))?;

    let zones = droppable_zones(target, registry.zones())
        .into_iter()
        .map(|zone| plan_zone(registry, target, zone))
        .collect();

    Ok(WeaponPlan {
        target: target.clone(),
        zones,
    })
}

fn plan_zone(registry: &DataRegistry, target: &WeaponRecord, zone: &ZoneRecord) -> ZonePlan {
    let mut plan = ZonePlan {
        zone_name: zone.name.clone(),
        skip: None,
        fixed_second: Vec::new(),
        fixed_third: Vec::new(),
    };

    if !zone.carries(AffixSlot::First, &target.first_affix) {
        plan.skip = Some(ZoneSkip::PrimaryMissing);
        return plan;
    }

    let others: Vec<String> = zone
        .first_pool
        .iter()
        .filter(|affix| *affix != &target.first_affix)
        .cloned()
        .collect();
    if others.len() < 2 {
        plan.skip = Some(ZoneSkip::NotEnoughPrimaries);
        return plan;
    }

    let pairs = pair_combinations(&others);
    // The carries checks are implied by the droppable filter; kept because
    // zone sheets are user-edited.
    if zone.carries(AffixSlot::Second, &target.second_affix) {
        plan.fixed_second = collect_matches(registry, target, zone, &pairs, AffixSlot::Second);
    }
    if zone.carries(AffixSlot::Third, &target.third_affix) {
        plan.fixed_third = collect_matches(registry, target, zone, &pairs, AffixSlot::Third);
    }

    plan
}

fn collect_matches(
    registry: &DataRegistry,
    target: &WeaponRecord,
    zone: &ZoneRecord,
    pairs: &[(String, String)],
    fixed: AffixSlot,
) -> Vec<SelectionMatches> {
    let mut groups = Vec::new();
    for (a, b) in pairs {
        let selection = [a.as_str(), b.as_str(), target.first_affix.as_str()];
        let mut weapons: Vec<WeaponRecord> = registry
            .weapons()
            .iter()
            .filter(|weapon| weapon.name != target.name)
            .filter(|weapon| selection.contains(&weapon.first_affix.as_str()))
            .filter(|weapon| weapon.affix(fixed) == target.affix(fixed))
            .filter(|weapon| zone_can_drop(weapon, zone))
            .cloned()
            .collect();
        if weapons.is_empty() {
            continue;
        }
        sort_matches(&mut weapons);
        groups.push(SelectionMatches {
            pair: [a.clone(), b.clone()],
            weapons,
        });
    }
    groups
}

/// Stars descending, then name ascending.
fn sort_matches(weapons: &mut [WeaponRecord]) {
    weapons.sort_by(|x, y| y.stars.cmp(&x.stars).then_with(|| x.name.cmp(&y.name)));
}

#[cfg(test)]
mod tests {
    use super::sort_matches;
    use crate::data::weapon::WeaponRecord;

    fn weapon(name: &str, stars: u8) -> WeaponRecord {
        WeaponRecord {
            name: name.to_string(),
            first_affix: String::new(),
            second_affix: String::new(),
            third_affix: String::new(),
            weapon_class: String::new(),
            stars,
        }
    }

    #[test]
    fn sorts_stars_descending_then_name() {
        let mut weapons = vec![
            weapon("Gale Edge", 5),
            weapon("Night Chorus", 6),
            weapon("Emberwake", 5),
        ];
        sort_matches(&mut weapons);
        let names: Vec<&str> = weapons.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["Night Chorus", "Emberwake", "Gale Edge"]);
    }
}
