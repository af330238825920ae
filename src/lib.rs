//! Drop-table analysis for three-affix weapons.
//!
//! Loads a weapon catalog and per-zone affix pools (from a spreadsheet or the
//! canonical JSON dataset), finds where a target weapon can drop, and
//! enumerates which other weapons stay farmable once the drop filter is
//! locked to the target's first affix plus two others with its second or
//! third affix held fixed.

pub mod analysis;
pub mod cli;
pub mod data;
pub mod report;
