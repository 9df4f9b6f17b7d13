//! CSV corpus tables.
//!
//! Tables are UTF-8 with a byte-order mark, columns
//! `category, Title, Date, URL, Content` in that order. Writing always
//! truncates: each run replaces the previous table.

use crate::models::ArticleRecord;
use crate::utils::{UTF8_BOM, strip_bom};
use std::error::Error;
use std::io::Write;
use std::path::Path;
use tracing::{debug, instrument};

/// Write `records` to `path`, replacing any existing file.
#[instrument(level = "info", skip_all, fields(path = %path.display(), count = records.len()))]
pub fn write_corpus(path: &Path, records: &[ArticleRecord]) -> Result<(), Box<dyn Error>> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(UTF8_BOM)?;

    let mut writer = csv::Writer::from_writer(file);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    debug!("Corpus table written");
    Ok(())
}

/// Read a corpus table.
///
/// A leading byte-order mark is ignored, as are columns the table does not
/// know about. Missing columns and empty cells read as empty strings.
///
/// # Errors
///
/// Returns an error if the file is missing or a row is malformed.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn read_corpus(path: &Path) -> Result<Vec<ArticleRecord>, Box<dyn Error>> {
    let bytes = std::fs::read(path)
        .map_err(|e| format!("Cannot read corpus table {}: {e}", path.display()))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(strip_bom(&bytes));
    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: ArticleRecord = row?;
        records.push(record);
    }
    debug!(count = records.len(), "Corpus table read");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn record(category: Category, title: &str, content: &str) -> ArticleRecord {
        ArticleRecord {
            category,
            title: title.to_string(),
            raw_date: "2025-02-01T10:00:00Z".to_string(),
            url: "https://www.csis.org/analysis/a".to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_write_has_bom_and_header_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tt.csv");
        write_corpus(&path, &[record(Category::Csis, "T", "Line one\nLine, two")]).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        assert!(text.starts_with("category,Title,Date,URL,Content\n"));
        assert!(text.contains("CSIS,T,"));
        assert!(text.contains("\"Line one\nLine, two\""));
    }

    #[test]
    fn test_write_then_read_preserves_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("media.csv");
        let rows = vec![
            record(Category::Politico, "Quoted \"title\"", "Body\n\nMore"),
            record(Category::VoaNews, "", ""),
        ];
        write_corpus(&path, &rows).unwrap();
        assert_eq!(read_corpus(&path).unwrap(), rows);
    }

    #[test]
    fn test_write_overwrites_previous_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tt.csv");
        write_corpus(&path, &[record(Category::Cnas, "a", "x"), record(Category::Cnas, "b", "y")]).unwrap();
        write_corpus(&path, &[record(Category::Cset, "c", "z")]).unwrap();
        let rows = read_corpus(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].category, Category::Cset);
    }

    #[test]
    fn test_read_tolerates_foreign_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("experts.csv");
        std::fs::write(
            &path,
            "\u{feff}Author,Date,Content,Likes\nanalyst,2025-03-01,Chips matter,12\nother,,,3\n",
        )
        .unwrap();
        let rows = read_corpus(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].content, "Chips matter");
        assert_eq!(rows[0].raw_date, "2025-03-01");
        assert_eq!(rows[0].category, Category::Unknown);
        assert_eq!(rows[1].content, "");
    }

    #[test]
    fn test_read_missing_file() {
        assert!(read_corpus(Path::new("/nonexistent/us_think_tank_data.csv")).is_err());
    }
}
