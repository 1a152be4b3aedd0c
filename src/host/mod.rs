//! Host collaborators
//!
//! Interfaces to the world outside the engine: reading uploaded files, writing
//! exported translations and handing text to a speech engine. Each one is a trait
//! with a small default implementation so the CLI works out of the box and tests
//! can substitute their own.

pub mod export;
pub mod ingest;
pub mod speech;

pub use export::{ExportFormat, ExportSink, FileExportSink, suggested_filename, word_document};
pub use ingest::{
    FileSource, FsExtractor, IngestStatus, IngestedFile, TextExtractor, format_file_size,
    guess_mime,
};
pub use speech::{SpeechOutput, TracingSpeech, Utterance};
