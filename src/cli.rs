use std::io::{self, Write as _};
use std::path::Path;

use crate::analysis::plan_for_weapon;
use crate::data::dataset::{
    load_dataset, resolve_dataset_path, Dataset, DatasetError, DEFAULT_DATASET_PATH,
};
use crate::data::import::import_workbook;
use crate::data::profile::{load_profile, AnalysisProfile, DEFAULT_PROFILE_PATH};
use crate::data::registry::DataRegistry;
use crate::data::validate::validate_dataset;
use crate::data::workbook::{is_workbook_path, load_workbook};
use crate::report::{
    render_plan, render_weapon_list, render_zone_list, sanitize_min_stars, write_plan_csv,
    DisplayOptions,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Analyze,
    List,
    Zones,
    Import,
    Validate,
    Shell,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("analyze") => Some(Command::Analyze),
        Some("list") => Some(Command::List),
        Some("zones") => Some(Command::Zones),
        Some("import") => Some(Command::Import),
        Some("validate") => Some(Command::Validate),
        Some("shell") => Some(Command::Shell),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    let rest: &[String] = args.get(2..).unwrap_or(&[]);
    match parse_command(args) {
        Some(Command::Analyze) => handle_analyze(rest),
        Some(Command::List) => handle_list(rest),
        Some(Command::Zones) => handle_zones(rest),
        Some(Command::Import) => handle_import(rest),
        Some(Command::Validate) => handle_validate(rest),
        Some(Command::Shell) => handle_shell(rest),
        None => {
            eprintln!("usage: dropsight <analyze|list|zones|import|validate|shell>");
            2
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct CommandFlags {
    data: Option<String>,
    output: Option<String>,
    min_stars: Option<u8>,
    no_stars: bool,
    classes: bool,
    csv: bool,
    json: bool,
}

fn parse_flags(rest: &[String]) -> Result<(Vec<String>, CommandFlags), String> {
    let mut positionals = Vec::new();
    let mut flags = CommandFlags::default();
    let mut iter = rest.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--data" => flags.data = Some(take_value(&mut iter, "--data")?),
            "--output" => flags.output = Some(take_value(&mut iter, "--output")?),
            "--min-stars" => {
                let raw = take_value(&mut iter, "--min-stars")?;
                match raw.parse::<u8>() {
                    Ok(value) => flags.min_stars = Some(value),
                    Err(_) => {
                        eprintln!("invalid --min-stars '{raw}', using the configured default")
                    }
                }
            }
            "--no-stars" => flags.no_stars = true,
            "--classes" => flags.classes = true,
            "--csv" => flags.csv = true,
            "--json" => flags.json = true,
            other if other.starts_with("--") => return Err(format!("unknown flag '{other}'")),
            _ => positionals.push(arg.clone()),
        }
    }
    Ok((positionals, flags))
}

fn take_value(iter: &mut std::slice::Iter<'_, String>, flag: &str) -> Result<String, String> {
    iter.next()
        .cloned()
        .ok_or_else(|| format!("{flag} requires a value"))
}

/// Load a dataset from either a workbook or the canonical JSON, reporting
/// skipped sheets on stderr.
fn load_dataset_reporting(path: &str) -> Result<Dataset, DatasetError> {
    let path = Path::new(path);
    if is_workbook_path(path) {
        let load = load_workbook(path)?;
        for skipped in &load.skipped {
            eprintln!(
                "warning: skipping sheet '{}': {}",
                skipped.sheet, skipped.reason
            );
        }
        if load.dataset.zones.is_empty() {
            eprintln!("warning: workbook has no zone sheets");
        }
        Ok(load.dataset)
    } else {
        load_dataset(path)
    }
}

fn display_options(profile: &AnalysisProfile, flags: &CommandFlags) -> DisplayOptions {
    let mut options = DisplayOptions::from_profile(profile);
    if let Some(min_stars) = flags.min_stars {
        options.min_stars = min_stars;
    }
    let (min_stars, adjusted) = sanitize_min_stars(options.min_stars);
    if adjusted {
        eprintln!(
            "invalid minimum star rating {}, defaulting to {min_stars}",
            options.min_stars
        );
    }
    options.min_stars = min_stars;
    if flags.no_stars {
        options.show_stars = false;
    }
    if flags.classes {
        options.show_classes = true;
    }
    options
}

fn handle_analyze(rest: &[String]) -> i32 {
    let (positionals, flags) = match parse_flags(rest) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("{message}");
            return analyze_usage();
        }
    };

    let profile = load_profile(DEFAULT_PROFILE_PATH);
    let target = if positionals.is_empty() {
        profile.target_weapon.clone()
    } else {
        Some(positionals.join(" "))
    };
    let Some(target) = target else {
        return analyze_usage();
    };

    let options = display_options(&profile, &flags);
    let dataset = match load_dataset_reporting(&resolve_dataset_path(flags.data.as_deref())) {
        Ok(dataset) => dataset,
        Err(err) => {
            eprintln!("{err}");
            return 1;
        }
    };
    let registry = DataRegistry::new(dataset);

    let plan = match plan_for_weapon(&registry, &target) {
        Ok(plan) => plan,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("run 'dropsight list' to see the catalog");
            return 1;
        }
    };

    if flags.csv {
        if let Err(err) = write_plan_csv(&plan, &options, io::stdout()) {
            eprintln!("failed to write csv: {err}");
            return 1;
        }
    } else if flags.json {
        match serde_json::to_string_pretty(&plan) {
            Ok(payload) => println!("{payload}"),
            Err(err) => {
                eprintln!("failed to serialize plan: {err}");
                return 1;
            }
        }
    } else {
        print!("{}", render_plan(&plan, &options));
    }
    0
}

fn analyze_usage() -> i32 {
    eprintln!(
        "usage: dropsight analyze <weapon> [--data PATH] [--min-stars N] [--no-stars] [--classes] [--csv] [--json]"
    );
    2
}

fn handle_list(rest: &[String]) -> i32 {
    let flags = match parse_flags(rest) {
        Ok((_, flags)) => flags,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("usage: dropsight list [--data PATH]");
            return 2;
        }
    };
    match load_dataset_reporting(&resolve_dataset_path(flags.data.as_deref())) {
        Ok(dataset) => {
            print!("{}", render_weapon_list(&dataset));
            0
        }
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

fn handle_zones(rest: &[String]) -> i32 {
    let flags = match parse_flags(rest) {
        Ok((_, flags)) => flags,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("usage: dropsight zones [--data PATH]");
            return 2;
        }
    };
    match load_dataset_reporting(&resolve_dataset_path(flags.data.as_deref())) {
        Ok(dataset) => {
            print!("{}", render_zone_list(&dataset));
            0
        }
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

fn handle_import(rest: &[String]) -> i32 {
    let (positionals, flags) = match parse_flags(rest) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("{message}");
            return import_usage();
        }
    };
    let Some(source) = positionals.first() else {
        return import_usage();
    };
    let output = flags
        .output
        .unwrap_or_else(|| DEFAULT_DATASET_PATH.to_string());

    match import_workbook(Path::new(source), Path::new(&output)) {
        Ok(report) => {
            for skipped in &report.skipped_sheets {
                eprintln!(
                    "warning: skipped sheet '{}': {}",
                    skipped.sheet, skipped.reason
                );
            }
            if report.incomplete_weapons > 0 {
                eprintln!(
                    "warning: {} weapon(s) have incomplete affixes",
                    report.incomplete_weapons
                );
            }
            println!(
                "import complete: weapons={}, zones={}, output='{}'",
                report.weapon_count, report.zone_count, report.output_path
            );
            0
        }
        Err(err) => {
            eprintln!("import failed: {err}");
            1
        }
    }
}

fn import_usage() -> i32 {
    eprintln!("usage: dropsight import <workbook.xlsx> [--output PATH]");
    2
}

fn handle_validate(rest: &[String]) -> i32 {
    let flags = match parse_flags(rest) {
        Ok((_, flags)) => flags,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("usage: dropsight validate [--data PATH]");
            return 2;
        }
    };
    let path = resolve_dataset_path(flags.data.as_deref());
    let dataset = match load_dataset_reporting(&path) {
        Ok(dataset) => dataset,
        Err(err) => {
            eprintln!("{err}");
            return 1;
        }
    };

    let report = validate_dataset(&dataset);
    for diagnostic in &report.diagnostics {
        eprintln!(
            "- {} {}: {}",
            diagnostic.severity, diagnostic.context, diagnostic.message
        );
    }
    if report.has_errors() {
        eprintln!(
            "validation failed: {} issue(s)",
            report.diagnostics.len()
        );
        1
    } else {
        println!("validation passed: {path}");
        0
    }
}

fn handle_shell(rest: &[String]) -> i32 {
    let flags = match parse_flags(rest) {
        Ok((_, flags)) => flags,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("usage: dropsight shell [--data PATH]");
            return 2;
        }
    };
    let profile = load_profile(DEFAULT_PROFILE_PATH);
    let options = display_options(&profile, &flags);
    let dataset = match load_dataset_reporting(&resolve_dataset_path(flags.data.as_deref())) {
        Ok(dataset) => dataset,
        Err(err) => {
            eprintln!("{err}");
            return 1;
        }
    };
    let registry = DataRegistry::new(dataset);

    println!(
        "{} weapons and {} zones loaded",
        registry.weapons().len(),
        registry.zones().len()
    );
    println!("type a weapon name to analyze, 'list' for the catalog, 'q' to quit");

    let stdin = io::stdin();
    let mut input = String::new();
    loop {
        print!("\nweapon> ");
        let _ = io::stdout().flush();
        input.clear();
        match stdin.read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                eprintln!("input error: {err}");
                return 1;
            }
        }
        let line = input.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
            break;
        }
        if line.eq_ignore_ascii_case("list") {
            print!("{}", render_weapon_list(registry.dataset()));
            continue;
        }
        match plan_for_weapon(&registry, line) {
            Ok(plan) => print!("{}", render_plan(&plan, &options)),
            Err(err) => {
                eprintln!("{err}");
                eprintln!("type 'list' to see the catalog");
            }
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_known_commands() {
        assert_eq!(
            parse_command(&args(&["dropsight", "analyze"])),
            Some(Command::Analyze)
        );
        assert_eq!(
            parse_command(&args(&["dropsight", "shell"])),
            Some(Command::Shell)
        );
        assert_eq!(parse_command(&args(&["dropsight", "nope"])), None);
        assert_eq!(parse_command(&args(&["dropsight"])), None);
    }

    #[test]
    fn flags_split_from_positionals() {
        let rest = args(&[
            "Sun", "Fall", "--data", "drops.xlsx", "--min-stars", "4", "--classes",
        ]);
        let (positionals, flags) = parse_flags(&rest).unwrap();
        assert_eq!(positionals, vec!["Sun", "Fall"]);
        assert_eq!(flags.data.as_deref(), Some("drops.xlsx"));
        assert_eq!(flags.min_stars, Some(4));
        assert!(flags.classes);
        assert!(!flags.csv);
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(parse_flags(&args(&["--wat"])).is_err());
        assert!(parse_flags(&args(&["--data"])).is_err());
    }
}
