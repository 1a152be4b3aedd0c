//! File ingestion
//!
//! Text files are read as UTF-8. Anything else is represented by a placeholder line
//! naming the file; there is no OCR or document parsing.

use async_trait::async_trait;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::IngestionError;

/// A file submitted for translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    pub name: String,
    pub mime_type: String,
    pub path: PathBuf,
}

impl FileSource {
    /// Describe the file at `path`, guessing its type from the extension
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime_type = guess_mime(&name).to_string();
        Self {
            name,
            mime_type,
            path,
        }
    }

    /// Whether the content is read verbatim rather than replaced by a placeholder
    pub fn is_text(&self) -> bool {
        self.mime_type.starts_with("text/") || self.name.to_lowercase().ends_with(".txt")
    }
}

/// Outcome of ingesting one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "lowercase")]
pub enum IngestStatus {
    Ready(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestedFile {
    pub name: String,
    #[serde(flatten)]
    pub status: IngestStatus,
}

impl IngestedFile {
    pub fn content(&self) -> Option<&str> {
        match &self.status {
            IngestStatus::Ready(text) => Some(text),
            IngestStatus::Failed(_) => None,
        }
    }
}

/// Turns a submitted file into text
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, file: &FileSource) -> Result<String, IngestionError>;
}

/// Reads from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsExtractor;

#[async_trait]
impl TextExtractor for FsExtractor {
    async fn extract(&self, file: &FileSource) -> Result<String, IngestionError> {
        if !file.is_text() {
            tracing::debug!(file = %file.name, mime = %file.mime_type, "non-text file, using placeholder");
            return Ok(format!("[محتوى الملف: {}]", file.name));
        }

        let bytes = tokio::fs::read(&file.path).await.map_err(|e| IngestionError {
            file_name: file.name.clone(),
            reason: e.to_string(),
        })?;
        String::from_utf8(bytes).map_err(|_| IngestionError {
            file_name: file.name.clone(),
            reason: "file is not valid UTF-8".to_string(),
        })
    }
}

/// MIME type for a file name, by extension
pub fn guess_mime(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "txt" => "text/plain",
        "md" => "text/markdown",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// Human readable size: `0 Bytes`, `1.5 KB`, `2 MB`
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}
