/// Error types for the translation engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// Language tag rejected by the translator
    InvalidLocale(String),
    /// Error during substitution or from a translation backend
    TranslationError(String),
    /// General error with context
    Other(String),
}

impl std::fmt::Display for TranslateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslateError::InvalidLocale(msg) => write!(f, "Invalid locale: {}", msg),
            TranslateError::TranslationError(msg) => write!(f, "Translation error: {}", msg),
            TranslateError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for TranslateError {}

/// Result type for engine operations
pub type TranslateResult<T> = Result<T, TranslateError>;
