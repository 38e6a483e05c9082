//! Core library for receipt scanning and expense tracking.
//!
//! This crate provides:
//! - Receipt text parsing (amount, date, merchant)
//! - Keyword-based merchant categorization
//! - OCR provider boundary with manual-entry fallback
//! - Transaction models, store traits and an in-memory store
//! - Spending summaries

pub mod analytics;
pub mod categories;
pub mod error;
pub mod models;
pub mod ocr;
pub mod receipt;
pub mod store;

pub use analytics::{category_breakdown, summarize, CategoryTotal, DateRange, Period, Summary};
pub use categories::{
    categorize_merchant, Category, CategoryTable, MerchantClassifier, FALLBACK_CATEGORY,
};
pub use error::{CategoryError, OcrError, Result, StoreError, TallyError};
pub use models::{
    NewTransaction, ReceiptParseResult, TallyConfig, Transaction, TransactionType,
    TransactionUpdate,
};
pub use ocr::{OcrProvider, OcrText, ReceiptScanner, ScanOutcome, TextLine, UnconfiguredOcr};
pub use receipt::{parse_receipt_data, ReceiptParser};
pub use store::{MemoryObjectStore, MemoryStore, ObjectStore, TransactionQuery, TransactionStore};
