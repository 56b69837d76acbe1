// error.rs - Error types for the string primitives engine.
//
// Public operations never return these: each one turns an internal
// `TextError` into its documented fallback value plus a log event. The
// type is public for the few fallible constructors (`Locale::parse`,
// `TextConfigBuilder::build`) and for callers using the `try_*` layer.

use thiserror::Error;

/// Error type for internal conversion, collation and regex failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextError {
    /// Buffer reservation failed.
    #[error("memory allocation failed ({requested} units requested)")]
    Memory { requested: usize },
    /// Collator construction or lookup failed.
    #[error("collator error: {0}")]
    Collator(String),
    /// No collator has been initialized on the calling thread.
    #[error("collator is not initialized")]
    NotInitialized,
    /// Pattern failed to compile.
    #[error("regex error: {0}")]
    Regex(String),
    /// Locale identifier could not be parsed.
    #[error("invalid locale identifier {0:?}")]
    InvalidLocale(String),
    /// Input bytes are not well-formed UTF-8.
    #[error("malformed UTF-8 at byte {valid_up_to}")]
    MalformedInput { valid_up_to: usize },
}

impl TextError {
    /// Stable numeric code, negative like the status codes of the
    /// internationalization libraries this layer wraps.
    pub fn code(&self) -> i32 {
        match self {
            TextError::Memory { .. } => -5,
            TextError::Collator(_) => -10,
            TextError::NotInitialized => -11,
            TextError::Regex(_) => -20,
            TextError::InvalidLocale(_) => -30,
            TextError::MalformedInput { .. } => -40,
        }
    }
}

impl From<regex::Error> for TextError {
    fn from(err: regex::Error) -> Self {
        TextError::Regex(err.to_string())
    }
}

impl From<std::collections::TryReserveError> for TextError {
    fn from(_: std::collections::TryReserveError) -> Self {
        TextError::Memory { requested: 0 }
    }
}

/// Convenience alias used by the internal fallible layer.
pub type Result<T> = std::result::Result<T, TextError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_error_display() {
        let err = TextError::Memory { requested: 64 };
        assert_eq!(err.code(), -5);
        assert_eq!(err.to_string(), "memory allocation failed (64 units requested)");
    }

    #[test]
    fn from_regex_error() {
        let err = TextError::from(regex::Regex::new("(unclosed").unwrap_err());
        assert!(matches!(err, TextError::Regex(_)));
        assert!(err.to_string().starts_with("regex error"));
    }

    #[test]
    fn invalid_locale_display() {
        let err = TextError::InvalidLocale("??".to_string());
        assert_eq!(err.to_string(), "invalid locale identifier \"??\"");
        assert_eq!(err.code(), -30);
    }

    #[test]
    fn error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(TextError::NotInitialized);
        assert_eq!(err.to_string(), "collator is not initialized");
    }
}
