//! Export adapters for extracted records.
//!
//! Both adapters read the same `&[Record]` and write one dated file each:
//!
//! ```text
//! output/
//! ├── debug_properstar.html             # raw index page per portal
//! ├── marbella_listings_2025-06-01.xlsx # tabular export (or .csv)
//! └── xml/
//!     └── marbella_listings_2025-06-01.xml
//! ```

pub mod tabular;
pub mod xml;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::{AppError, Result};
use crate::models::Record;

pub use tabular::TabularExporter;
pub use xml::XmlExporter;

/// Writes a record collection to one artifact.
pub trait RecordExporter {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Path the artifact for `date` is written to.
    fn path_for(&self, date: NaiveDate) -> PathBuf;

    /// Write `records` and return the artifact path.
    fn export(&self, records: &[Record], date: NaiveDate) -> Result<PathBuf>;
}

/// `<label>_<YYYY-MM-DD>.<ext>`
pub fn dated_file_name(label: &str, date: NaiveDate, ext: &str) -> String {
    format!("{}_{}.{}", label, date.format("%Y-%m-%d"), ext)
}

/// Write bytes atomically (write to temp, then rename).
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| AppError::export(path, e))?;
    }

    let tmp = path.with_extension("tmp");
    let written = fs::File::create(&tmp)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.flush()
        })
        .and_then(|()| fs::rename(&tmp, path));

    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(AppError::export(path, e));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_dated_file_name() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(
            dated_file_name("marbella_listings", date, "csv"),
            "marbella_listings_2025-06-01.csv"
        );
    }

    #[test]
    fn test_write_atomic_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/dir/out.txt");

        write_atomic(&path, b"hello").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"hello");
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_write_atomic_failure_leaves_no_temp_file() {
        let tmp = TempDir::new().unwrap();
        // a non-empty directory at the target path makes the rename fail
        let path = tmp.path().join("out.xml");
        fs::create_dir_all(path.join("occupied")).unwrap();

        let result = write_atomic(&path, b"<listings/>");

        assert!(matches!(result, Err(AppError::Export { .. })));
        assert!(!tmp.path().join("out.tmp").exists());
        assert!(path.is_dir());
    }
}
