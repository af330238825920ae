//! Inspect a drop-table .xlsx: print sheet names and the first rows of each.
//! Usage: cargo run --bin inspect_workbook -- path/to/drops.xlsx

use std::path::Path;

use calamine::Reader;

use dropsight::data::workbook::cell_str;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .ok_or("Usage: inspect_workbook <path-to.xlsx>")?;
    let path = Path::new(&path);
    if !path.exists() {
        return Err(format!("File not found: {}", path.display()).into());
    }

    let mut workbook = calamine::open_workbook_auto(path)?;
    let names = workbook.sheet_names();
    println!("Sheets ({}): {}", names.len(), names.join(", "));

    for sheet in &names {
        let range = workbook.worksheet_range(sheet)?;
        let (height, width) = range.get_size();
        println!("\n[{}] {} rows x {} cols, first 10 rows:", sheet, height, width);
        for (i, row) in range.rows().take(10).enumerate() {
            let cells: Vec<String> = row.iter().map(cell_str).collect();
            println!("  {}: {}", i, cells.join(" | "));
        }
    }
    Ok(())
}
