//! In-process stores.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use chrono::Utc;
use tracing::{debug, info};

use crate::categories::CategoryTable;
use crate::error::StoreError;
use crate::models::transaction::{NewTransaction, Transaction, TransactionUpdate};

use super::{ObjectStore, TransactionQuery, TransactionStore};

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Backend("store lock poisoned".to_string())
}

/// Transaction store kept in memory.
pub struct MemoryStore {
    table: CategoryTable,
    records: RwLock<HashMap<String, Transaction>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    /// Store validating against the built-in category table.
    pub fn new() -> Self {
        Self::with_table(CategoryTable::builtin().clone())
    }

    /// Store validating against a custom category table.
    pub fn with_table(table: CategoryTable) -> Self {
        Self {
            table,
            records: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn next_id(&self) -> String {
        format!("txn-{:06}", self.next_id.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionStore for MemoryStore {
    fn add(&self, user_id: &str, transaction: NewTransaction) -> Result<Transaction, StoreError> {
        transaction.validate(&self.table)?;

        let record = Transaction {
            id: self.next_id(),
            user_id: user_id.to_string(),
            created_at: Utc::now(),
            data: transaction,
        };

        info!("Adding transaction {} for user {}", record.id, user_id);
        self.records
            .write()
            .map_err(poisoned)?
            .insert(record.id.clone(), record.clone());

        Ok(record)
    }

    fn update(&self, id: &str, update: &TransactionUpdate) -> Result<Transaction, StoreError> {
        let mut records = self.records.write().map_err(poisoned)?;
        let record = records
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let mut data = record.data.clone();
        update.apply(&mut data);
        data.validate(&self.table)?;
        record.data = data;

        info!("Updated transaction {}", id);
        Ok(record.clone())
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        let removed = self.records.write().map_err(poisoned)?.remove(id);
        match removed {
            Some(_) => {
                info!("Deleted transaction {}", id);
                Ok(())
            }
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }

    fn list(
        &self,
        user_id: &str,
        query: &TransactionQuery,
    ) -> Result<Vec<Transaction>, StoreError> {
        let records = self.records.read().map_err(poisoned)?;

        let mut matching: Vec<Transaction> = records
            .values()
            .filter(|t| t.user_id == user_id && query.matches(t))
            .cloned()
            .collect();

        // Newest first; ids are zero-padded so later inserts sort after.
        matching.sort_by(|a, b| b.date().cmp(&a.date()).then_with(|| b.id.cmp(&a.id)));
        matching.truncate(query.limit);

        debug!("Listed {} transactions for user {}", matching.len(), user_id);
        Ok(matching)
    }
}

/// Object store kept in memory, handing out `memory://` URLs.
#[derive(Default)]
pub struct MemoryObjectStore {
    objects: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes stored at `path`.
    pub fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.objects.read().ok()?.get(path).cloned()
    }
}

impl ObjectStore for MemoryObjectStore {
    fn upload(&self, path: &str, bytes: &[u8]) -> Result<String, StoreError> {
        if path.is_empty() {
            return Err(StoreError::Backend("empty object path".to_string()));
        }

        self.objects
            .write()
            .map_err(poisoned)?
            .insert(path.to_string(), bytes.to_vec());

        info!("Uploaded {} bytes to {}", bytes.len(), path);
        Ok(format!("memory://{}", path))
    }
}
