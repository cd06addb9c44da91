// src/file.rs

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use crate::config::options::{ExportFormat, ExportOptions};
use crate::csv::to_export_string;
use crate::grades::{self, EXPORT_HEADERS, GradesTable};

/// Render the table in the requested format.
/// JSON keeps the nested shape; CSV/TSV are flattened one mark per line.
pub fn render(
    table: &GradesTable,
    format: ExportFormat,
    include_headers: bool,
) -> Result<String, Box<dyn std::error::Error>> {
    match format.delim() {
        Some(sep) => Ok(to_export_string(
            &EXPORT_HEADERS,
            &grades::to_rows(table),
            include_headers,
            sep,
        )),
        None => {
            let mut s = serde_json::to_string_pretty(table)?;
            s.push('\n');
            Ok(s)
        }
    }
}

/// Write the table where `export` points, or to stdout when it has no path.
/// Returns the file written, if any.
pub fn export_table(
    export: &ExportOptions,
    table: &GradesTable,
) -> Result<Option<PathBuf>, Box<dyn std::error::Error>> {
    let contents = render(table, export.format, export.include_headers)?;

    match export.out_path() {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    ensure_directory(parent)?;
                }
            }
            fs::write(&path, contents)?;
            logf!("Wrote {}", path.display());
            Ok(Some(path))
        }
        None => {
            let mut out = io::stdout().lock();
            out.write_all(contents.as_bytes())?;
            out.flush()?;
            Ok(None)
        }
    }
}

pub fn ensure_directory(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if dir.exists() && !dir.is_dir() {
        return Err(format!("Path exists but is not a directory: {}", dir.display()).into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
