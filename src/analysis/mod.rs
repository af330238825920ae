//! Drop analysis: which zones can drop a weapon, and which other weapons
//! stay farmable under each first-affix selection with the second or third
//! affix held fixed.

mod combos;
mod droppable;
mod planner;

pub use combos::pair_combinations;
pub use droppable::{droppable_zones, zone_can_drop};
pub use planner::{
    plan_for_weapon, PlanError, SelectionMatches, WeaponPlan, ZonePlan, ZoneSkip,
};
