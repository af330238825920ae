//! Spreadsheet ingestion. The weapons sheet is `Sheet1` (first sheet as a
//! fallback); every other sheet is treated as a zone and skipped with a
//! diagnostic when its columns don't line up. Headers are matched through an
//! alias table so community workbooks load without renaming.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use serde::Serialize;

use crate::data::dataset::{Dataset, DatasetError};
use crate::data::weapon::WeaponRecord;
use crate::data::zone::ZoneRecord;

pub const WEAPON_SHEET: &str = "Sheet1";

const NAME_HEADERS: &[&str] = &["武器名称", "name", "weapon", "weapon name"];
const FIRST_HEADERS: &[&str] = &["第一词条", "first affix", "affix 1", "first"];
const SECOND_HEADERS: &[&str] = &["第二词条", "second affix", "affix 2", "second"];
const THIRD_HEADERS: &[&str] = &["第三词条", "third affix", "affix 3", "third"];
const CLASS_HEADERS: &[&str] = &["武器类型", "class", "type", "weapon class"];
const STAR_HEADERS: &[&str] = &["武器星级", "stars", "star", "rarity"];

/// Zone sheet that could not be loaded, with the reason it was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedSheet {
    pub sheet: String,
    pub reason: String,
}

/// Workbook ingestion result: the dataset plus any zone sheets left out.
#[derive(Debug, Clone)]
pub struct WorkbookLoad {
    pub dataset: Dataset,
    pub skipped: Vec<SkippedSheet>,
}

pub fn is_workbook_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            ext.eq_ignore_ascii_case("xlsx")
                || ext.eq_ignore_ascii_case("xlsm")
                || ext.eq_ignore_ascii_case("xlsb")
                || ext.eq_ignore_ascii_case("xls")
        })
        .unwrap_or(false)
}

/// Render a cell for text processing. Floats with no fraction print as integers.
pub fn cell_str(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => format!("{}", f),
        Data::Int(i) => format!("{}", i),
        Data::Bool(b) => format!("{}", b),
        other => format!("{:?}", other),
    }
}

fn cell_at(row: &[Data], column: Option<usize>) -> String {
    column
        .and_then(|index| row.get(index))
        .map(cell_str)
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

fn cell_u8(row: &[Data], column: Option<usize>) -> Option<u8> {
    let cell = column.and_then(|index| row.get(index))?;
    match cell {
        Data::Int(i) => u8::try_from(*i).ok(),
        Data::Float(f) if f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u8::MAX) => {
            Some(*f as u8)
        }
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn find_column(header: &[Data], aliases: &[&str]) -> Option<usize> {
    header.iter().position(|cell| {
        let value = cell_str(cell);
        let value = value.trim();
        aliases.iter().any(|alias| value.eq_ignore_ascii_case(alias))
    })
}

/// Read a full workbook into a dataset. A broken weapons sheet is fatal;
/// broken zone sheets are reported in `skipped`.
pub fn load_workbook(path: &Path) -> Result<WorkbookLoad, DatasetError> {
    let mut workbook = open_workbook_auto(path).map_err(DatasetError::Workbook)?;
    let names = workbook.sheet_names();

    let weapon_sheet = names
        .iter()
        .find(|name| name.as_str() == WEAPON_SHEET)
        .or(names.first())
        .cloned()
        .ok_or(DatasetError::EmptyWorkbook)?;

    let range = workbook
        .worksheet_range(&weapon_sheet)
        .map_err(DatasetError::Workbook)?;
    let weapons = read_weapon_sheet(&weapon_sheet, &range)?;

    let mut zones = Vec::new();
    let mut skipped = Vec::new();
    for sheet in names.iter().filter(|name| **name != weapon_sheet) {
        let range = match workbook.worksheet_range(sheet) {
            Ok(range) => range,
            Err(err) => {
                skipped.push(SkippedSheet {
                    sheet: sheet.clone(),
                    reason: err.to_string(),
                });
                continue;
            }
        };
        match read_zone_sheet(sheet, &range) {
            Ok(zone) => zones.push(zone),
            Err(reason) => skipped.push(SkippedSheet {
                sheet: sheet.clone(),
                reason,
            }),
        }
    }

    Ok(WorkbookLoad {
        dataset: Dataset {
            data_version: None,
            source_note: Some(format!("workbook {}", path.display())),
            generated: None,
            weapons,
            zones,
        },
        skipped,
    })
}

fn read_weapon_sheet(
    sheet: &str,
    range: &Range<Data>,
) -> Result<Vec<WeaponRecord>, DatasetError> {
    let mut rows = range.rows();
    let header = rows.next().ok_or_else(|| DatasetError::MissingColumns {
        sheet: sheet.to_string(),
        columns: vec!["name", "first affix", "second affix", "third affix"],
    })?;

    let name_col = find_column(header, NAME_HEADERS);
    let first_col = find_column(header, FIRST_HEADERS);
    let second_col = find_column(header, SECOND_HEADERS);
    let third_col = find_column(header, THIRD_HEADERS);
    let class_col = find_column(header, CLASS_HEADERS);
    let star_col = find_column(header, STAR_HEADERS);

    let mut missing = Vec::new();
    if name_col.is_none() {
        missing.push("name");
    }
    if first_col.is_none() {
        missing.push("first affix");
    }
    if second_col.is_none() {
        missing.push("second affix");
    }
    if third_col.is_none() {
        missing.push("third affix");
    }
    if !missing.is_empty() {
        return Err(DatasetError::MissingColumns {
            sheet: sheet.to_string(),
            columns: missing,
        });
    }

    let mut weapons = Vec::new();
    for row in rows {
        let name = cell_at(row, name_col);
        if name.is_empty() {
            continue;
        }
        weapons.push(WeaponRecord {
            name,
            first_affix: cell_at(row, first_col),
            second_affix: cell_at(row, second_col),
            third_affix: cell_at(row, third_col),
            weapon_class: cell_at(row, class_col),
            stars: cell_u8(row, star_col).unwrap_or(0),
        });
    }
    Ok(weapons)
}

fn read_zone_sheet(sheet: &str, range: &Range<Data>) -> Result<ZoneRecord, String> {
    let mut rows = range.rows();
    let header = rows.next().ok_or_else(|| "sheet is empty".to_string())?;

    let first_col = find_column(header, FIRST_HEADERS);
    let second_col = find_column(header, SECOND_HEADERS);
    let third_col = find_column(header, THIRD_HEADERS);

    let mut missing = Vec::new();
    if first_col.is_none() {
        missing.push("first affix");
    }
    if second_col.is_none() {
        missing.push("second affix");
    }
    if third_col.is_none() {
        missing.push("third affix");
    }
    if !missing.is_empty() {
        return Err(format!("missing columns: {}", missing.join(", ")));
    }

    let mut first_pool = Vec::new();
    let mut second_pool = Vec::new();
    let mut third_pool = Vec::new();
    for row in rows {
        push_nonempty(&mut first_pool, cell_at(row, first_col));
        push_nonempty(&mut second_pool, cell_at(row, second_col));
        push_nonempty(&mut third_pool, cell_at(row, third_col));
    }

    Ok(ZoneRecord {
        name: sheet.to_string(),
        first_pool: dedup_preserving_order(first_pool),
        second_pool: dedup_preserving_order(second_pool),
        third_pool: dedup_preserving_order(third_pool),
    })
}

fn push_nonempty(pool: &mut Vec<String>, value: String) {
    if !value.is_empty() {
        pool.push(value);
    }
}

/// First occurrence wins; pool order mirrors the sheet's row order.
fn dedup_preserving_order(values: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_row(names: &[&str]) -> Vec<Data> {
        names
            .iter()
            .map(|name| Data::String(name.to_string()))
            .collect()
    }

    #[test]
    fn find_column_matches_chinese_and_english_aliases() {
        let header = header_row(&["武器名称", "第一词条", "Second Affix", "stars"]);
        assert_eq!(find_column(&header, NAME_HEADERS), Some(0));
        assert_eq!(find_column(&header, FIRST_HEADERS), Some(1));
        assert_eq!(find_column(&header, SECOND_HEADERS), Some(2));
        assert_eq!(find_column(&header, STAR_HEADERS), Some(3));
        assert_eq!(find_column(&header, THIRD_HEADERS), None);
    }

    #[test]
    fn cell_str_renders_numeric_cells_without_fraction() {
        assert_eq!(cell_str(&Data::Float(5.0)), "5");
        assert_eq!(cell_str(&Data::Int(6)), "6");
        assert_eq!(cell_str(&Data::Empty), "");
    }

    #[test]
    fn cell_u8_accepts_int_float_and_string_cells() {
        let row = vec![
            Data::Int(4),
            Data::Float(5.0),
            Data::String(" 6 ".to_string()),
            Data::Float(5.5),
        ];
        assert_eq!(cell_u8(&row, Some(0)), Some(4));
        assert_eq!(cell_u8(&row, Some(1)), Some(5));
        assert_eq!(cell_u8(&row, Some(2)), Some(6));
        assert_eq!(cell_u8(&row, Some(3)), None);
    }

    #[test]
    fn dedup_keeps_first_occurrence_order() {
        let values = vec![
            "Blaze".to_string(),
            "Gale".to_string(),
            "Blaze".to_string(),
            "Stone".to_string(),
        ];
        assert_eq!(dedup_preserving_order(values), vec!["Blaze", "Gale", "Stone"]);
    }

    #[test]
    fn workbook_paths_detected_by_extension() {
        assert!(is_workbook_path(Path::new("drops.xlsx")));
        assert!(is_workbook_path(Path::new("DROPS.XLS")));
        assert!(!is_workbook_path(Path::new("drops.json")));
        assert!(!is_workbook_path(Path::new("drops")));
    }
}
