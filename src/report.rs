//! Console and CSV rendering for farming plans. Pair labels sit in a fixed
//! column sized by terminal display width, where CJK ideographs take two
//! cells.

use std::fmt::Write as _;
use std::io;

use crate::analysis::{WeaponPlan, ZoneSkip};
use crate::data::dataset::Dataset;
use crate::data::profile::AnalysisProfile;
use crate::data::weapon::{
    WeaponRecord, DEFAULT_MIN_STARS, MAX_STAR_RATING, MIN_STAR_RATING,
};

/// Column width for the pair label, in display cells.
const PAIR_LABEL_WIDTH: usize = 15;

/// Qualifier suffixes stripped from affix names in pair labels.
const QUALIFIER_SUFFIXES: &[&str] = &["提升", " Boost"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    pub show_stars: bool,
    pub min_stars: u8,
    pub show_classes: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        DisplayOptions {
            show_stars: true,
            min_stars: DEFAULT_MIN_STARS,
            show_classes: false,
        }
    }
}

impl DisplayOptions {
    pub fn from_profile(profile: &AnalysisProfile) -> Self {
        DisplayOptions {
            show_stars: profile.show_stars,
            min_stars: profile.min_stars,
            show_classes: profile.show_classes,
        }
    }
}

/// Replace an out-of-range star cutoff with the default. Returns the value
/// to use and whether it was replaced.
pub fn sanitize_min_stars(requested: u8) -> (u8, bool) {
    if (MIN_STAR_RATING..=MAX_STAR_RATING).contains(&requested) {
        (requested, false)
    } else {
        (DEFAULT_MIN_STARS, true)
    }
}

/// Terminal display width: CJK unified ideographs take two cells.
pub fn display_width(s: &str) -> usize {
    s.chars()
        .map(|c| if ('\u{4e00}'..='\u{9fff}').contains(&c) { 2 } else { 1 })
        .sum()
}

/// Pad with spaces up to `width` display cells. Longer strings pass through.
pub fn pad_display(s: &str, width: usize) -> String {
    let current = display_width(s);
    if current >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - current))
    }
}

/// Strip the common qualifier suffix so pair labels stay short.
pub fn condense_affix(affix: &str) -> &str {
    for suffix in QUALIFIER_SUFFIXES {
        if let Some(stripped) = affix.strip_suffix(suffix) {
            return stripped;
        }
    }
    affix
}

fn pair_label(pair: &[String; 2]) -> String {
    format!("{}+{}", condense_affix(&pair[0]), condense_affix(&pair[1]))
}

/// Weapon display string, or None when the weapon falls below the cutoff.
pub fn format_weapon(weapon: &WeaponRecord, options: &DisplayOptions) -> Option<String> {
    if weapon.stars < options.min_stars {
        return None;
    }
    let mut parts = Vec::new();
    if options.show_stars {
        parts.push(format!("{}★", weapon.stars));
    }
    if options.show_classes && !weapon.weapon_class.is_empty() {
        parts.push(weapon.weapon_class.clone());
    }
    if parts.is_empty() {
        Some(weapon.name.clone())
    } else {
        Some(format!("{} ({})", weapon.name, parts.join(" ")))
    }
}

/// Render the console report for a plan.
pub fn render_plan(plan: &WeaponPlan, options: &DisplayOptions) -> String {
    let target = &plan.target;
    let mut out = String::new();
    let _ = writeln!(out, "target weapon: {}", target.name);
    let _ = writeln!(
        out,
        "affixes: {} | {} | {}",
        target.first_affix, target.second_affix, target.third_affix
    );
    let _ = writeln!(out, "class: {} | stars: {}", target.weapon_class, target.stars);
    let _ = writeln!(out, "{}", "-".repeat(60));

    if plan.zones.is_empty() {
        let _ = writeln!(
            out,
            "warning: {} cannot drop in any zone (no zone carries all three affixes)",
            target.name
        );
        return out;
    }

    let names: Vec<&str> = plan.zones.iter().map(|z| z.zone_name.as_str()).collect();
    let _ = writeln!(
        out,
        "droppable in {} zone(s): {}",
        names.len(),
        names.join(", ")
    );

    for zone in &plan.zones {
        let _ = writeln!(out);
        let _ = writeln!(out, "[{}]", zone.zone_name);
        match zone.skip {
            Some(ZoneSkip::PrimaryMissing) => {
                let _ = writeln!(out, "  warning: zone does not carry the target's first affix");
                continue;
            }
            Some(ZoneSkip::NotEnoughPrimaries) => {
                let _ = writeln!(
                    out,
                    "  warning: not enough other first affixes to form a selection"
                );
                continue;
            }
            None => {}
        }
        if !zone.has_matches() {
            let _ = writeln!(out, "  no other weapons match");
            continue;
        }
        let sections = [
            (&zone.fixed_second, target.second_affix.as_str()),
            (&zone.fixed_third, target.third_affix.as_str()),
        ];
        for (groups, fixed_affix) in sections {
            for group in groups {
                let weapons: Vec<String> = group
                    .weapons
                    .iter()
                    .filter_map(|weapon| format_weapon(weapon, options))
                    .collect();
                if weapons.is_empty() {
                    continue;
                }
                let label = pad_display(&pair_label(&group.pair), PAIR_LABEL_WIDTH);
                let _ = writeln!(out, "  {label}\t{fixed_affix}: {}", weapons.join(", "));
            }
        }
    }
    out
}

/// Numbered catalog listing with star glyphs and classes.
pub fn render_weapon_list(dataset: &Dataset) -> String {
    let mut out = String::new();
    for (index, weapon) in dataset.weapons.iter().enumerate() {
        let stars = "★".repeat(usize::from(weapon.stars));
        let line = format!(
            "{:>3}. {} {} {}",
            index + 1,
            pad_display(&weapon.name, PAIR_LABEL_WIDTH),
            pad_display(&stars, 6),
            weapon.weapon_class
        );
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}

/// Zone names with pool sizes.
pub fn render_zone_list(dataset: &Dataset) -> String {
    let mut out = String::new();
    for zone in &dataset.zones {
        let _ = writeln!(
            out,
            "{}: {} first / {} second / {} third affixes",
            zone.name,
            zone.first_pool.len(),
            zone.second_pool.len(),
            zone.third_pool.len()
        );
    }
    out
}

/// One CSV row per (zone, fixed slot, pair, weapon), same star cutoff as
/// the console report. Affix names are written raw, not condensed.
pub fn write_plan_csv<W: io::Write>(
    plan: &WeaponPlan,
    options: &DisplayOptions,
    out: W,
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record([
        "zone",
        "fixed_slot",
        "fixed_affix",
        "first_affix_pair",
        "weapon",
        "stars",
        "class",
    ])?;
    for zone in &plan.zones {
        let sections = [
            ("second", &zone.fixed_second, plan.target.second_affix.as_str()),
            ("third", &zone.fixed_third, plan.target.third_affix.as_str()),
        ];
        for (slot, groups, fixed_affix) in sections {
            for group in groups {
                let pair = format!("{}+{}", group.pair[0], group.pair[1]);
                for weapon in &group.weapons {
                    if weapon.stars < options.min_stars {
                        continue;
                    }
                    writer.write_record([
                        zone.zone_name.as_str(),
                        slot,
                        fixed_affix,
                        pair.as_str(),
                        weapon.name.as_str(),
                        &weapon.stars.to_string(),
                        weapon.weapon_class.as_str(),
                    ])?;
                }
            }
        }
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weapon(name: &str, stars: u8, class: &str) -> WeaponRecord {
        WeaponRecord {
            name: name.to_string(),
            first_affix: "Blaze".to_string(),
            second_affix: "Focus".to_string(),
            third_affix: "Haste".to_string(),
            weapon_class: class.to_string(),
            stars,
        }
    }

    #[test]
    fn display_width_counts_ideographs_double() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("词条"), 4);
        assert_eq!(display_width("A词"), 3);
        assert_eq!(display_width("★"), 1);
    }

    #[test]
    fn pad_display_fills_to_cell_width() {
        assert_eq!(pad_display("词条", 6), "词条  ");
        assert_eq!(pad_display("abcdef", 4), "abcdef");
    }

    #[test]
    fn condense_affix_strips_qualifier_suffixes() {
        assert_eq!(condense_affix("攻击提升"), "攻击");
        assert_eq!(condense_affix("Blaze Boost"), "Blaze");
        assert_eq!(condense_affix("Focus"), "Focus");
    }

    #[test]
    fn format_weapon_applies_cutoff_and_toggles() {
        let options = DisplayOptions::default();
        assert_eq!(
            format_weapon(&weapon("Sunfall", 6, "Rifle"), &options).as_deref(),
            Some("Sunfall (6★)")
        );
        assert_eq!(format_weapon(&weapon("Stone Oath", 4, "Hammer"), &options), None);

        let full = DisplayOptions {
            show_classes: true,
            ..DisplayOptions::default()
        };
        assert_eq!(
            format_weapon(&weapon("Sunfall", 6, "Rifle"), &full).as_deref(),
            Some("Sunfall (6★ Rifle)")
        );

        let bare = DisplayOptions {
            show_stars: false,
            min_stars: 4,
            show_classes: false,
        };
        assert_eq!(
            format_weapon(&weapon("Stone Oath", 4, "Hammer"), &bare).as_deref(),
            Some("Stone Oath")
        );
    }

    #[test]
    fn sanitize_min_stars_replaces_out_of_range_values() {
        assert_eq!(sanitize_min_stars(4), (4, false));
        assert_eq!(sanitize_min_stars(6), (6, false));
        assert_eq!(sanitize_min_stars(0), (DEFAULT_MIN_STARS, true));
        assert_eq!(sanitize_min_stars(9), (DEFAULT_MIN_STARS, true));
    }

    #[test]
    fn render_plan_filters_and_aligns() {
        use crate::analysis::plan_for_weapon;
        use crate::data::registry::DataRegistry;
        use crate::data::zone::ZoneRecord;

        let mut low = weapon("Stone Oath", 4, "Hammer");
        low.first_affix = "Stone".to_string();
        let dataset = Dataset {
            weapons: vec![
                weapon("Sunfall", 6, "Rifle"),
                weapon("Night Chorus", 6, "Bow"),
                low,
            ],
            zones: vec![ZoneRecord {
                name: "Ashen Plateau".to_string(),
                first_pool: vec![
                    "Blaze".to_string(),
                    "Gale".to_string(),
                    "Stone".to_string(),
                ],
                second_pool: vec!["Focus".to_string()],
                third_pool: vec!["Haste".to_string()],
            }],
            ..Dataset::default()
        };
        let registry = DataRegistry::new(dataset);
        let plan = plan_for_weapon(&registry, "Sunfall").unwrap();
        let rendered = render_plan(&plan, &DisplayOptions::default());

        assert!(rendered.contains("target weapon: Sunfall"));
        assert!(rendered.contains("droppable in 1 zone(s): Ashen Plateau"));
        assert!(rendered.contains("[Ashen Plateau]"));
        assert!(rendered.contains("Night Chorus (6★)"));
        // Below the default cutoff.
        assert!(!rendered.contains("Stone Oath"));
        // Pair label sits in a padded column before the fixed affix.
        assert!(rendered.contains("  Gale+Stone     \tFocus: "));
    }

    #[test]
    fn render_plan_warns_when_nothing_drops() {
        use crate::analysis::plan_for_weapon;
        use crate::data::registry::DataRegistry;

        let dataset = Dataset {
            weapons: vec![weapon("Sunfall", 6, "Rifle")],
            ..Dataset::default()
        };
        let registry = DataRegistry::new(dataset);
        let plan = plan_for_weapon(&registry, "Sunfall").unwrap();
        let rendered = render_plan(&plan, &DisplayOptions::default());
        assert!(rendered.contains("cannot drop in any zone"));
    }

    #[test]
    fn weapon_list_renders_star_glyphs() {
        let dataset = Dataset {
            weapons: vec![weapon("Sunfall", 6, "Rifle")],
            ..Dataset::default()
        };
        let listing = render_weapon_list(&dataset);
        assert!(listing.contains("  1. Sunfall"));
        assert!(listing.contains("★★★★★★"));
        assert!(listing.contains("Rifle"));
    }
}
