/// Error types for the medgloss crate
///
/// Every component has its own small error enum; `AppError` is the umbrella the
/// session and the CLI work with. None of these ever carry partially written state:
/// a failed operation leaves the ledger and the counters as they were.
use crate::glossary::GlossaryError;

/// Error returned by a collaborator that could not produce text from a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionError {
    /// Name of the file that failed
    pub file_name: String,
    /// Human readable cause
    pub reason: String,
}

impl std::fmt::Display for IngestionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to read '{}': {}", self.file_name, self.reason)
    }
}

impl std::error::Error for IngestionError {}

/// Error raised when the renderer is handed pairs it cannot lay out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Pair indices must be strictly increasing
    OutOfOrder { previous: usize, found: usize },
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::OutOfOrder { previous, found } => write!(
                f,
                "Render error: segment index {} follows {}",
                found, previous
            ),
        }
    }
}

impl std::error::Error for RenderError {}

/// Key-value storage failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Underlying read or write failed
    Io(String),
    /// Value could not be serialized
    Serialize(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(msg) => write!(f, "Storage I/O error: {}", msg),
            StorageError::Serialize(msg) => write!(f, "Storage serialization error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

/// Export sink failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// The sink cannot produce this format
    Unsupported(String),
    /// Writing the artifact failed
    Io(String),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Unsupported(format) => {
                write!(f, "Export format not supported by this sink: {}", format)
            }
            ExportError::Io(msg) => write!(f, "Export failed: {}", msg),
        }
    }
}

impl std::error::Error for ExportError {}

/// Speech output failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechError {
    /// No speech engine on this host
    Unavailable,
    /// Engine reported an error
    Failed(String),
}

impl std::fmt::Display for SpeechError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpeechError::Unavailable => write!(f, "Speech synthesis is not available"),
            SpeechError::Failed(msg) => write!(f, "Speech synthesis failed: {}", msg),
        }
    }
}

impl std::error::Error for SpeechError {}

/// Configuration loading failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Read(String),
    Parse(String),
    InvalidValue { key: String, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Read(msg) => write!(f, "Failed to read config: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { key, value } => {
                write!(f, "Invalid value for {}: '{}'", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Umbrella error for session operations
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Empty input, nothing to export, unknown id... never mutates state
    UserInput(String),
    /// A language tag that is not valid BCP-47
    InvalidLanguage(String),
    /// Another translation is still in flight
    Busy,
    Ingestion(IngestionError),
    Render(RenderError),
    Storage(StorageError),
    Export(ExportError),
    Speech(SpeechError),
    Glossary(GlossaryError),
    Config(ConfigError),
    /// The translator seam failed
    Translation(crate::engine::TranslateError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::UserInput(msg) => write!(f, "{}", msg),
            AppError::InvalidLanguage(tag) => write!(f, "Invalid language tag: '{}'", tag),
            AppError::Busy => write!(f, "A translation is already in progress"),
            AppError::Ingestion(e) => write!(f, "{}", e),
            AppError::Render(e) => write!(f, "{}", e),
            AppError::Storage(e) => write!(f, "{}", e),
            AppError::Export(e) => write!(f, "{}", e),
            AppError::Speech(e) => write!(f, "{}", e),
            AppError::Glossary(e) => write!(f, "{}", e),
            AppError::Config(e) => write!(f, "{}", e),
            AppError::Translation(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AppError {}

impl From<IngestionError> for AppError {
    fn from(e: IngestionError) -> Self {
        AppError::Ingestion(e)
    }
}

impl From<RenderError> for AppError {
    fn from(e: RenderError) -> Self {
        AppError::Render(e)
    }
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        AppError::Storage(e)
    }
}

impl From<ExportError> for AppError {
    fn from(e: ExportError) -> Self {
        AppError::Export(e)
    }
}

impl From<SpeechError> for AppError {
    fn from(e: SpeechError) -> Self {
        AppError::Speech(e)
    }
}

impl From<GlossaryError> for AppError {
    fn from(e: GlossaryError) -> Self {
        AppError::Glossary(e)
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Config(e)
    }
}

impl From<crate::engine::TranslateError> for AppError {
    fn from(e: crate::engine::TranslateError) -> Self {
        AppError::Translation(e)
    }
}

/// Result type for session operations
pub type AppResult<T> = Result<T, AppError>;

/// Severity of a user-visible notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// A message meant for the person using the tool
///
/// Every caught error ends up as one of these at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

impl From<&AppError> for Notification {
    fn from(err: &AppError) -> Self {
        match err {
            AppError::UserInput(msg) => Notification::warning(msg.clone()),
            AppError::Busy => Notification::warning("جاري تنفيذ ترجمة أخرى، يرجى الانتظار"),
            AppError::Ingestion(e) => {
                Notification::error(format!("خطأ في قراءة الملف: {}", e.file_name))
            }
            AppError::Storage(_) => Notification::warning("تعذر حفظ البيانات"),
            AppError::Export(_) => Notification::error("فشل التصدير"),
            AppError::Speech(SpeechError::Unavailable) => {
                Notification::error("المتصفح لا يدعم النطق")
            }
            AppError::Translation(_) => Notification::error("حدث خطأ في الترجمة"),
            other => Notification::error(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = AppError::InvalidLanguage("en@@".to_string());
        assert_eq!(err.to_string(), "Invalid language tag: 'en@@'");

        let err = AppError::from(RenderError::OutOfOrder {
            previous: 3,
            found: 1,
        });
        assert_eq!(err.to_string(), "Render error: segment index 1 follows 3");
    }

    #[test]
    fn test_user_input_becomes_warning() {
        let err = AppError::UserInput("الرجاء إدخال نص أو رفع ملف".to_string());
        let note = Notification::from(&err);
        assert_eq!(note.level, NotificationLevel::Warning);
        assert_eq!(note.message, "الرجاء إدخال نص أو رفع ملف");
    }

    #[test]
    fn test_ingestion_error_names_file() {
        let err = AppError::from(IngestionError {
            file_name: "scan.png".to_string(),
            reason: "unreadable".to_string(),
        });
        let note = Notification::from(&err);
        assert_eq!(note.level, NotificationLevel::Error);
        assert!(note.message.contains("scan.png"));
    }
}
