use crate::data::weapon::{AffixSlot, WeaponRecord};
use crate::data::zone::ZoneRecord;

/// A weapon can drop in a zone iff each of its affixes appears in the
/// zone's pool for the same slot.
pub fn zone_can_drop(weapon: &WeaponRecord, zone: &ZoneRecord) -> bool {
    zone.carries(AffixSlot::First, &weapon.first_affix)
        && zone.carries(AffixSlot::Second, &weapon.second_affix)
        && zone.carries(AffixSlot::Third, &weapon.third_affix)
}

/// Zones that can drop the weapon, in dataset order.
pub fn droppable_zones<'a>(
    weapon: &WeaponRecord,
    zones: &'a [ZoneRecord],
) -> Vec<&'a ZoneRecord> {
    zones
        .iter()
        .filter(|zone| zone_can_drop(weapon, zone))
        .collect()
}
