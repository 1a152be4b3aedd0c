//! Export of the current translation
//!
//! `FileExportSink` can write plain text and the Word-compatible HTML document the
//! desktop office suites open directly. PDF and spreadsheet encodings need a real
//! document library and are reported as unsupported.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ExportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Txt,
    Pdf,
    Docx,
    Xlsx,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Txt,
        ExportFormat::Pdf,
        ExportFormat::Docx,
        ExportFormat::Xlsx,
    ];

    pub fn parse(value: &str) -> Option<ExportFormat> {
        match value.trim().to_lowercase().as_str() {
            "txt" | "text" => Some(ExportFormat::Txt),
            "pdf" => Some(ExportFormat::Pdf),
            "docx" | "doc" | "word" => Some(ExportFormat::Docx),
            "xlsx" | "excel" => Some(ExportFormat::Xlsx),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    /// File extension of the written artifact; Word output is the legacy `.doc` HTML form
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "doc",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "text/plain",
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Docx => "application/msword",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    /// Notification text shown after a successful export
    pub fn success_message(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "تم التحميل بنجاح",
            ExportFormat::Pdf => "تم تصدير PDF",
            ExportFormat::Docx => "تم تصدير Word",
            ExportFormat::Xlsx => "تم تصدير Excel",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `ترجمة_<millis>.<ext>`
pub fn suggested_filename(format: ExportFormat, timestamp_millis: i64) -> String {
    format!("ترجمة_{}.{}", timestamp_millis, format.extension())
}

/// Word-compatible HTML document with a leading byte order mark
pub fn word_document(text: &str) -> String {
    format!(
        "\u{feff}<html xmlns:o='urn:schemas-microsoft-com:office:office' \
         xmlns:w='urn:schemas-microsoft-com:office:word' \
         xmlns='http://www.w3.org/TR/REC-html40'>\n\
         <head><meta charset='utf-8'><title>Translation</title></head>\n\
         <body><p>{}</p></body>\n\
         </html>\n",
        text.replace('\n', "<br>")
    )
}

/// Destination for exported translations
pub trait ExportSink: Send + Sync {
    /// Write `text` as `format`, returning where it went
    fn export(
        &self,
        format: ExportFormat,
        text: &str,
        timestamp_millis: i64,
    ) -> Result<PathBuf, ExportError>;
}

/// Writes exports into a directory
#[derive(Debug, Clone)]
pub struct FileExportSink {
    dir: PathBuf,
}

impl FileExportSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ExportSink for FileExportSink {
    fn export(
        &self,
        format: ExportFormat,
        text: &str,
        timestamp_millis: i64,
    ) -> Result<PathBuf, ExportError> {
        let content = match format {
            ExportFormat::Txt => text.to_string(),
            ExportFormat::Docx => word_document(text),
            ExportFormat::Pdf | ExportFormat::Xlsx => {
                return Err(ExportError::Unsupported(format.to_string()));
            }
        };

        fs::create_dir_all(&self.dir)
            .map_err(|e| ExportError::Io(format!("{}: {}", self.dir.display(), e)))?;
        let path = self.dir.join(suggested_filename(format, timestamp_millis));
        fs::write(&path, content)
            .map_err(|e| ExportError::Io(format!("{}: {}", path.display(), e)))?;

        tracing::info!(format = %format, path = %path.display(), "exported translation");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggested_filename() {
        assert_eq!(
            suggested_filename(ExportFormat::Docx, 1700000000000),
            "ترجمة_1700000000000.doc"
        );
        assert_eq!(suggested_filename(ExportFormat::Txt, 5), "ترجمة_5.txt");
    }

    #[test]
    fn test_format_parse() {
        assert_eq!(ExportFormat::parse("word"), Some(ExportFormat::Docx));
        assert_eq!(ExportFormat::parse("XLSX"), Some(ExportFormat::Xlsx));
        assert_eq!(ExportFormat::parse("odt"), None);
    }

    #[test]
    fn test_word_document_breaks_lines() {
        let doc = word_document("سطر أول\nسطر ثان");
        assert!(doc.starts_with('\u{feff}'));
        assert!(doc.contains("<p>سطر أول<br>سطر ثان</p>"));
    }

    #[test]
    fn test_file_sink_writes_text() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileExportSink::new(dir.path());
        let path = sink.export(ExportFormat::Txt, "حمى", 42).unwrap();
        assert_eq!(path, dir.path().join("ترجمة_42.txt"));
        assert_eq!(fs::read_to_string(path).unwrap(), "حمى");
    }

    #[test]
    fn test_file_sink_rejects_binary_formats() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileExportSink::new(dir.path());
        for format in [ExportFormat::Pdf, ExportFormat::Xlsx] {
            assert!(matches!(
                sink.export(format, "حمى", 1),
                Err(ExportError::Unsupported(_))
            ));
        }
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
