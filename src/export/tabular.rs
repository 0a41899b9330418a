//! Tabular export: one row per record, one column per field.
//!
//! Written as an `.xlsx` workbook by default, or as CSV.

use std::path::PathBuf;

use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook};

use crate::error::{AppError, Result};
use crate::export::{RecordExporter, dated_file_name, write_atomic};
use crate::models::{FIELD_HEADERS, Record, TabularFormat};

const SHEET_NAME: &str = "Listings";

/// Writes `<dir>/<label>_<date>.<xlsx|csv>`.
#[derive(Debug, Clone)]
pub struct TabularExporter {
    dir: PathBuf,
    label: String,
    format: TabularFormat,
}

impl TabularExporter {
    pub fn new(dir: impl Into<PathBuf>, label: impl Into<String>, format: TabularFormat) -> Self {
        Self {
            dir: dir.into(),
            label: label.into(),
            format,
        }
    }

    /// Serialize records in the configured format.
    pub fn render(&self, records: &[Record]) -> Result<Vec<u8>> {
        match self.format {
            TabularFormat::Xlsx => render_xlsx(records),
            TabularFormat::Csv => render_csv(records),
        }
    }
}

/// Single-sheet workbook, bold header row first.
pub fn render_xlsx(records: &[Record]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, name) in FIELD_HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, &header)?;
    }
    for (row, record) in records.iter().enumerate() {
        for (col, value) in record.values().iter().enumerate() {
            sheet.write_string(row as u32 + 1, col as u16, value)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// CSV bytes, header row first.
pub fn render_csv(records: &[Record]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(FIELD_HEADERS)?;
    for record in records {
        writer.write_record(record.values())?;
    }
    writer
        .into_inner()
        .map_err(|e| AppError::Io(e.into_error()))
}

impl RecordExporter for TabularExporter {
    fn name(&self) -> &'static str {
        match self.format {
            TabularFormat::Xlsx => "XLSX",
            TabularFormat::Csv => "CSV",
        }
    }

    fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir
            .join(dated_file_name(&self.label, date, self.format.extension()))
    }

    fn export(&self, records: &[Record], date: NaiveDate) -> Result<PathBuf> {
        let path = self.path_for(date);
        let bytes = self.render(records)?;
        write_atomic(&path, &bytes)?;
        log::info!("Saved {} rows to {}", records.len(), path.display());
        Ok(path)
    }
}
