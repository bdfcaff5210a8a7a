/// Error types for the language pair extension

use crate::language_pair::LanguagePair;
use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failure reported by the persistence service.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    /// The extension runtime reported `lastError` for the call.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// Stored value could not be converted to or from the expected shape.
    #[error("storage serialization error: {0}")]
    Serialization(String),

    /// No extension storage area is reachable from this context.
    #[error("storage unavailable")]
    Unavailable,
}

impl From<JsValue> for StorageError {
    fn from(val: JsValue) -> Self {
        StorageError::Backend(val.as_string().unwrap_or_else(|| format!("{:?}", val)))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// Errors raised by the quick link operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("language pair {} already exists", .0.label())]
    DuplicateItem(LanguagePair),

    /// The host page has no navigation landmark to anchor the chips to.
    #[error("navigation landmark not found")]
    MissingAnchor,

    #[error("DOM error: {0}")]
    Dom(String),
}

/// Errors raised while reporting usage events.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("collector rejected event with status {0}")]
    Rejected(u16),
}

impl From<reqwest::Error> for AnalyticsError {
    fn from(err: reqwest::Error) -> Self {
        AnalyticsError::Http(err.to_string())
    }
}
