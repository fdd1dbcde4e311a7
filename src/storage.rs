use crate::models::{FilteredTable, TableShape};
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Prefix cells that a spreadsheet would read as a formula.
fn sanitize_cell(s: &str) -> String {
    if s.starts_with(['=', '+', '-', '@', '\t', '\r']) {
        format!("'{s}")
    } else {
        s.to_string()
    }
}

/// Save the filtered table as CSV with header. Columns follow the table shape;
/// an empty table writes nothing but the `year,region,unit,value` header.
pub fn save_csv<P: AsRef<Path>>(table: &FilteredTable, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    match table.shape {
        TableShape::Country => {
            wtr.write_record(TableShape::Country.columns())?;
            for r in &table.rows {
                wtr.serialize((
                    sanitize_cell(r.country.as_deref().unwrap_or("")),
                    sanitize_cell(&r.region),
                    r.year,
                    r.unit,
                    r.value,
                ))?;
            }
        }
        TableShape::RegionAggregate | TableShape::Empty => {
            wtr.write_record(TableShape::RegionAggregate.columns())?;
            for r in &table.rows {
                wtr.serialize((r.year, sanitize_cell(&r.region), r.unit, r.value))?;
            }
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Save the filtered rows as a pretty JSON array.
pub fn save_json<P: AsRef<Path>>(table: &FilteredTable, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(&table.rows)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Pick CSV or JSON from the file extension (CSV when unknown).
pub fn save_by_extension<P: AsRef<Path>>(table: &FilteredTable, path: P) -> Result<()> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("csv")
        .to_ascii_lowercase();
    match ext.as_str() {
        "json" => save_json(table, path),
        _ => save_csv(table, path),
    }
}
