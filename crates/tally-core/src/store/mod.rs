//! Storage boundary for transactions and receipt images.

mod memory;

pub use memory::{MemoryObjectStore, MemoryStore};

use chrono::NaiveDate;

use crate::error::StoreError;
use crate::models::transaction::{NewTransaction, Transaction, TransactionType, TransactionUpdate};

/// Default cap on query results.
pub const DEFAULT_QUERY_LIMIT: usize = 100;

/// Filters for listing a user's transactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionQuery {
    /// Inclusive lower bound.
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound.
    pub end_date: Option<NaiveDate>,
    pub category: Option<String>,
    pub kind: Option<TransactionType>,
    /// Maximum number of records returned.
    pub limit: usize,
}

impl Default for TransactionQuery {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            category: None,
            kind: None,
            limit: DEFAULT_QUERY_LIMIT,
        }
    }
}

impl TransactionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn since(mut self, start: NaiveDate) -> Self {
        self.start_date = Some(start);
        self
    }

    pub fn until(mut self, end: NaiveDate) -> Self {
        self.end_date = Some(end);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Whether a transaction passes every filter (the limit is not applied
    /// here).
    pub fn matches(&self, transaction: &Transaction) -> bool {
        let date = transaction.date();

        if self.start_date.is_some_and(|start| date < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| date > end) {
            return false;
        }
        if let Some(category) = &self.category {
            if transaction.category() != category {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if transaction.kind() != kind {
                return false;
            }
        }
        true
    }
}

/// Persistent store of user transactions.
pub trait TransactionStore {
    /// Validate and store a new transaction, returning the stored record.
    fn add(&self, user_id: &str, transaction: NewTransaction) -> Result<Transaction, StoreError>;

    /// Apply a partial update; the patched record is validated again.
    fn update(&self, id: &str, update: &TransactionUpdate) -> Result<Transaction, StoreError>;

    /// Remove a transaction.
    fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// A user's transactions matching `query`, newest first, at most
    /// `query.limit` of them.
    fn list(&self, user_id: &str, query: &TransactionQuery) -> Result<Vec<Transaction>, StoreError>;
}

/// Blob storage for receipt images.
pub trait ObjectStore {
    /// Store `bytes` at `path` and return a URL for them.
    fn upload(&self, path: &str, bytes: &[u8]) -> Result<String, StoreError>;
}

/// Object path for a user's receipt image, as `receipts/{user}/{timestamp}.jpg`.
pub fn receipt_object_path(user_id: &str, timestamp_millis: i64) -> String {
    format!("receipts/{}/{}.jpg", user_id, timestamp_millis)
}
