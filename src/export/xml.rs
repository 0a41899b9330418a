//! Hierarchical (XML) export.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <listings>
//!   <listing>
//!     <listing_url>https://www.properstar.es/listing/101</listing_url>
//!     ...
//!   </listing>
//! </listings>
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::{AppError, Result};
use crate::export::{RecordExporter, dated_file_name, write_atomic};
use crate::models::{Record, field_tag};

const ROOT_TAG: &str = "listings";
const RECORD_TAG: &str = "listing";

/// Writes `<dir>/<label>_<date>.xml`.
#[derive(Debug, Clone)]
pub struct XmlExporter {
    dir: PathBuf,
    label: String,
}

impl XmlExporter {
    pub fn new(dir: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            label: label.into(),
        }
    }

    /// Serialize records to an indented, declaration-tagged document.
    pub fn render(records: &[Record], path: &Path) -> Result<Vec<u8>> {
        let fail = |e: &dyn fmt::Display| AppError::export(path, e);
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(|e| fail(&e))?;
        writer
            .write_event(Event::Start(BytesStart::new(ROOT_TAG)))
            .map_err(|e| fail(&e))?;

        for record in records {
            writer
                .write_event(Event::Start(BytesStart::new(RECORD_TAG)))
                .map_err(|e| fail(&e))?;
            for (header, value) in record.fields() {
                let tag = field_tag(header);
                writer
                    .write_event(Event::Start(BytesStart::new(tag.as_str())))
                    .map_err(|e| fail(&e))?;
                writer
                    .write_event(Event::Text(BytesText::new(&value)))
                    .map_err(|e| fail(&e))?;
                writer
                    .write_event(Event::End(BytesEnd::new(tag.as_str())))
                    .map_err(|e| fail(&e))?;
            }
            writer
                .write_event(Event::End(BytesEnd::new(RECORD_TAG)))
                .map_err(|e| fail(&e))?;
        }

        writer
            .write_event(Event::End(BytesEnd::new(ROOT_TAG)))
            .map_err(|e| fail(&e))?;

        Ok(writer.into_inner())
    }
}

impl RecordExporter for XmlExporter {
    fn name(&self) -> &'static str {
        "XML"
    }

    fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(dated_file_name(&self.label, date, "xml"))
    }

    fn export(&self, records: &[Record], date: NaiveDate) -> Result<PathBuf> {
        let path = self.path_for(date);
        let bytes = Self::render(records, &path)?;
        write_atomic(&path, &bytes)?;
        log::info!("Saved {} listings to {}", records.len(), path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FIELD_HEADERS, sample_record};
    use tempfile::TempDir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn test_export_document_shape() {
        let tmp = TempDir::new().unwrap();
        let exporter = XmlExporter::new(tmp.path().join("xml"), "marbella_listings");

        let path = exporter.export(&[sample_record()], date()).unwrap();
        assert_eq!(
            path,
            tmp.path().join("xml").join("marbella_listings_2025-06-01.xml")
        );

        let xml = std::fs::read_to_string(&path).unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains("<listings>"));
        assert_eq!(xml.matches("<listing>").count(), 1);
        assert!(xml.contains("<price>1250000</price>"));
        assert!(xml.contains("<land_m2>Unknown</land_m2>"));
        assert!(xml.contains("<architecture_studio>Nordic Architects</architecture_studio>"));
        assert!(xml.trim_end().ends_with("</listings>"));
    }

    #[test]
    fn test_one_child_per_field() {
        let bytes = XmlExporter::render(&[sample_record()], Path::new("x.xml")).unwrap();
        let xml = String::from_utf8(bytes).unwrap();
        for header in FIELD_HEADERS {
            let tag = field_tag(header);
            assert_eq!(xml.matches(&format!("<{tag}>")).count(), 1, "{tag}");
        }
    }

    #[test]
    fn test_text_is_escaped() {
        let mut record = sample_record();
        record.title = "Plot <A> & views".to_string();
        let bytes = XmlExporter::render(&[record], Path::new("x.xml")).unwrap();
        let xml = String::from_utf8(bytes).unwrap();
        assert!(xml.contains("<title>Plot &lt;A&gt; &amp; views</title>"));
    }

    #[test]
    fn test_empty_collection() {
        let bytes = XmlExporter::render(&[], Path::new("x.xml")).unwrap();
        let xml = String::from_utf8(bytes).unwrap();
        assert!(!xml.contains("<listing>"));
        assert!(xml.contains("<listings>"));
    }
}
