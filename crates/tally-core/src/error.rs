//! Error types for the tally-core library.

use thiserror::Error;

/// Main error type for the tally library.
#[derive(Error, Debug)]
pub enum TallyError {
    /// Category table error.
    #[error("category error: {0}")]
    Category(#[from] CategoryError),

    /// OCR provider error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Transaction or object store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while loading or checking a category table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CategoryError {
    /// The same id appears more than once across expense and income lists.
    #[error("duplicate category id: {0}")]
    DuplicateId(String),

    /// The expense list has no `other` fallback.
    #[error("expense categories must include the '{0}' fallback")]
    MissingFallback(String),

    /// The fallback category carries keywords.
    #[error("fallback category '{0}' must not have keywords")]
    FallbackHasKeywords(String),

    /// A keyword is empty after trimming.
    #[error("category '{0}' has an empty keyword")]
    EmptyKeyword(String),
}

/// Errors reported by an OCR provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OcrError {
    /// No OCR backend is available.
    #[error("{0}")]
    NotConfigured(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Invalid image payload.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Errors reported by the transaction and object stores.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No record with this id.
    #[error("transaction not found: {0}")]
    NotFound(String),

    /// A transaction field failed validation.
    #[error("invalid {field}: {reason}")]
    InvalidTransaction { field: String, reason: String },

    /// The backend rejected the operation.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Result type for the tally library.
pub type Result<T> = std::result::Result<T, TallyError>;
