//! Selection export
//!
//! Thin adapter over the archiving collaborator. A single selected page is
//! handed back as its stored bytes; multiple pages go into a ZIP archive
//! with deterministic per-record entry names. No compression logic of our
//! own lives here.

use std::io::{Cursor, Write};

use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::extract::{OutputFormat, PageRecord};

#[derive(Debug, Error)]
pub enum ExportError {
    /// Export requested with nothing selected
    #[error("No pages selected")]
    NoSelection,

    /// Archiving collaborator failed
    #[error("Archive error: {0}")]
    Archive(String),
}

impl From<zip::result::ZipError> for ExportError {
    fn from(err: zip::result::ZipError) -> Self {
        ExportError::Archive(err.to_string())
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::Archive(err.to_string())
    }
}

/// A downloadable export: either one raw image or a ZIP archive
#[derive(Debug, Clone)]
pub struct ExportPayload {
    pub file_name: String,
    pub content_type: &'static str,
    pub data: Vec<u8>,
}

/// Deterministic per-record file name: same inputs, same name
pub fn page_file_name(base_name: &str, index: usize, format: OutputFormat) -> String {
    format!("{}_page_{}.{}", base_name, index, format.extension())
}

/// Archive name for multi-page exports
pub fn archive_file_name(base_name: &str) -> String {
    format!("{}_images.zip", base_name)
}

/// Export the selected records
///
/// One selected record yields exactly its stored encoded bytes, unmodified.
/// Two or more yield a ZIP archive keyed by [`page_file_name`]. Zero
/// selected records is an error.
pub fn export_selection(
    base_name: &str,
    records: &[PageRecord],
    format: OutputFormat,
) -> Result<ExportPayload, ExportError> {
    let selected: Vec<&PageRecord> = records.iter().filter(|r| r.selected).collect();

    match selected.as_slice() {
        [] => Err(ExportError::NoSelection),
        [single] => Ok(ExportPayload {
            file_name: page_file_name(base_name, single.index, format),
            content_type: format.mime(),
            data: single.data.clone(),
        }),
        _ => {
            let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
            let options =
                SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

            for record in &selected {
                writer.start_file(page_file_name(base_name, record.index, format), options)?;
                writer.write_all(&record.data)?;
            }

            let data = writer.finish()?.into_inner();
            Ok(ExportPayload {
                file_name: archive_file_name(base_name),
                content_type: "application/zip",
                data,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use zip::ZipArchive;

    use super::*;

    fn records(count: usize) -> Vec<PageRecord> {
        (1..=count)
            .map(|index| PageRecord {
                index,
                data: vec![index as u8; 8],
                width: 1,
                height: 1,
                selected: true,
            })
            .collect()
    }

    #[test]
    fn entry_names_are_deterministic() {
        let a = page_file_name("slides", 3, OutputFormat::Png);
        let b = page_file_name("slides", 3, OutputFormat::Png);
        assert_eq!(a, b);
        assert_eq!(a, "slides_page_3.png");
        assert_eq!(page_file_name("slides", 3, OutputFormat::Jpeg), "slides_page_3.jpg");
    }

    #[test]
    fn single_selection_returns_the_stored_bytes_unmodified() {
        let mut records = records(3);
        records[0].selected = false;
        records[2].selected = false;

        let payload = export_selection("doc", &records, OutputFormat::Png).unwrap();
        assert_eq!(payload.file_name, "doc_page_2.png");
        assert_eq!(payload.content_type, "image/png");
        assert_eq!(payload.data, records[1].data);
    }

    #[test]
    fn multiple_selections_produce_a_zip_with_named_entries() {
        let mut records = records(3);
        records[1].selected = false;

        let payload = export_selection("doc", &records, OutputFormat::Jpeg).unwrap();
        assert_eq!(payload.file_name, "doc_images.zip");
        assert_eq!(payload.content_type, "application/zip");

        let mut archive = ZipArchive::new(Cursor::new(payload.data)).unwrap();
        assert_eq!(archive.len(), 2);

        let mut names = Vec::new();
        for i in 0..archive.len() {
            let mut entry = archive.by_index(i).unwrap();
            names.push(entry.name().to_string());
            let mut contents = Vec::new();
            entry.read_to_end(&mut contents).unwrap();
            assert_eq!(contents.len(), 8);
        }
        assert_eq!(names, vec!["doc_page_1.jpg", "doc_page_3.jpg"]);
    }

    #[test]
    fn empty_selection_is_an_error() {
        let mut records = records(2);
        for record in &mut records {
            record.selected = false;
        }
        let result = export_selection("doc", &records, OutputFormat::Png);
        assert!(matches!(result, Err(ExportError::NoSelection)));
    }
}
