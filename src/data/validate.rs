use std::collections::HashSet;
use std::fmt;

use crate::analysis::zone_can_drop;
use crate::data::dataset::Dataset;
use crate::data::weapon::{AffixSlot, MAX_STAR_RATING, MIN_STAR_RATING};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }
}

const SLOTS: [AffixSlot; 3] = [AffixSlot::First, AffixSlot::Second, AffixSlot::Third];

/// Check the dataset for problems the analysis would otherwise hide:
/// broken records are errors, unfarmable data is a warning, dead pool
/// entries are informational.
pub fn validate_dataset(dataset: &Dataset) -> ValidationReport {
    let mut report = ValidationReport::default();

    let mut seen_weapons = HashSet::new();
    for (index, weapon) in dataset.weapons.iter().enumerate() {
        let context = format!("weapon[{index}] '{}'", weapon.name);

        if weapon.name.trim().is_empty() {
            report.push(ValidationSeverity::Error, context.clone(), "missing non-empty name");
        } else if !seen_weapons.insert(weapon.name.clone()) {
            report.push(
                ValidationSeverity::Error,
                context.clone(),
                format!("duplicate weapon name '{}'", weapon.name),
            );
        }

        for slot in SLOTS {
            if weapon.affix(slot).trim().is_empty() {
                report.push(
                    ValidationSeverity::Error,
                    context.clone(),
                    format!("missing {} affix", slot.as_str()),
                );
            }
        }

        if !(MIN_STAR_RATING..=MAX_STAR_RATING).contains(&weapon.stars) {
            report.push(
                ValidationSeverity::Error,
                context.clone(),
                format!(
                    "star rating {} outside {MIN_STAR_RATING}-{MAX_STAR_RATING}",
                    weapon.stars
                ),
            );
        }

        if weapon.has_complete_affixes()
            && !dataset.zones.iter().any(|zone| zone_can_drop(weapon, zone))
        {
            report.push(
                ValidationSeverity::Warning,
                context.clone(),
                "drops in no zone (no zone carries all three affixes)",
            );
        }
    }

    let mut seen_zones = HashSet::new();
    for (index, zone) in dataset.zones.iter().enumerate() {
        let context = format!("zone[{index}] '{}'", zone.name);

        if !seen_zones.insert(zone.name.clone()) {
            report.push(
                ValidationSeverity::Error,
                context.clone(),
                format!("duplicate zone name '{}'", zone.name),
            );
        }

        for slot in SLOTS {
            if zone.pool(slot).is_empty() {
                report.push(
                    ValidationSeverity::Error,
                    context.clone(),
                    format!("empty {}-affix pool", slot.as_str()),
                );
            }
        }

        // A selection needs the target's first affix plus two others.
        if !zone.first_pool.is_empty() && zone.first_pool.len() < 3 {
            report.push(
                ValidationSeverity::Warning,
                context.clone(),
                "first-affix pool smaller than a drop selection (3)",
            );
        }
    }

    for slot in SLOTS {
        let used: HashSet<&str> = dataset
            .weapons
            .iter()
            .map(|weapon| weapon.affix(slot))
            .collect();
        for (index, zone) in dataset.zones.iter().enumerate() {
            for affix in zone.pool(slot) {
                if !used.contains(affix.as_str()) {
                    report.push(
                        ValidationSeverity::Info,
                        format!("zone[{index}] '{}'", zone.name),
                        format!("{}-affix '{affix}' is used by no weapon", slot.as_str()),
                    );
                }
            }
        }
    }

    report
}
