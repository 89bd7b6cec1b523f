//! JSON and CSV writers
//!
//! The export file is produced in one go from the complete row set and
//! moved into place with a rename, so a failed run never leaves a partial file.

use super::format::OutputFormat;
use super::row::ExportRow;
use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write rows as a single JSON array
pub fn write_json<W: Write>(rows: &[ExportRow], writer: W) -> Result<()> {
    serde_json::to_writer(writer, rows)?;
    Ok(())
}

/// Write rows as CSV: header line, then one line per row, every cell quoted
pub fn write_csv<W: Write>(rows: &[ExportRow], mut writer: W) -> Result<()> {
    write_csv_line(&mut writer, ExportRow::FIELDS.iter().copied())?;
    for row in rows {
        let values = row.values();
        write_csv_line(&mut writer, values.iter().map(String::as_str))?;
    }
    Ok(())
}

fn write_csv_line<'a, W: Write>(
    writer: &mut W,
    values: impl Iterator<Item = &'a str>,
) -> Result<()> {
    let line = values
        .map(|v| format!("\"{}\"", v.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",");
    writeln!(writer, "{line}")?;
    Ok(())
}

/// Write rows in the given format
pub fn write_rows<W: Write>(rows: &[ExportRow], format: OutputFormat, writer: W) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(rows, writer),
        OutputFormat::Csv => write_csv(rows, writer),
    }
}

/// Write rows to `path`, replacing any existing file atomically
pub fn write_file(path: impl AsRef<Path>, rows: &[ExportRow], format: OutputFormat) -> Result<()> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .ok_or_else(|| Error::output(format!("'{}' is not a file path", path.display())))?;

    let mut temp_name = file_name.to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    let file = File::create(&temp_path).map_err(|e| Error::Output {
        message: format!("Failed to create {}: {e}", temp_path.display()),
    })?;
    let mut writer = BufWriter::new(file);
    write_rows(rows, format, &mut writer)?;
    writer.flush()?;
    writer
        .into_inner()
        .map_err(|e| Error::output(format!("Failed to flush {}: {e}", temp_path.display())))?
        .sync_all()?;

    std::fs::rename(&temp_path, path).map_err(|e| Error::Output {
        message: format!("Failed to move output into {}: {e}", path.display()),
    })?;

    Ok(())
}
