//! Configuration structures for tally.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::categories::CategoryTable;
use crate::models::transaction::TransactionType;

/// Main configuration for tally.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TallyConfig {
    /// Category table configuration.
    pub categories: CategoriesConfig,

    /// Receipt parsing configuration.
    pub receipt: ReceiptConfig,

    /// Transaction store configuration.
    pub store: StoreConfig,
}

/// Category table source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoriesConfig {
    /// JSON file with a custom table; the built-in table is used when unset.
    pub table_path: Option<PathBuf>,
}

/// Receipt parsing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiptConfig {
    /// Transaction type given to drafts built from receipts.
    pub default_transaction_type: TransactionType,
}

impl Default for ReceiptConfig {
    fn default() -> Self {
        Self {
            default_transaction_type: TransactionType::Expense,
        }
    }
}

/// Transaction store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Maximum number of transactions a query returns when no limit is given.
    pub default_limit: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { default_limit: 100 }
    }
}

impl TallyConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Load the configured category table, or the built-in one.
    pub fn load_category_table(&self) -> crate::Result<CategoryTable> {
        match &self.categories.table_path {
            Some(path) if !path.exists() => Err(crate::TallyError::Config(format!(
                "category table not found: {}",
                path.display()
            ))),
            Some(path) => CategoryTable::from_file(path),
            None => Ok(CategoryTable::builtin().clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = TallyConfig::default();
        assert_eq!(config.store.default_limit, 100);
        assert_eq!(config.receipt.default_transaction_type, TransactionType::Expense);
        assert!(config.categories.table_path.is_none());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: TallyConfig =
            serde_json::from_str(r#"{"store": {"default_limit": 25}}"#).unwrap();
        assert_eq!(config.store.default_limit, 25);
        assert_eq!(config.receipt.default_transaction_type, TransactionType::Expense);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = TallyConfig::default();
        config.store.default_limit = 10;
        config.save(&path).unwrap();

        let loaded = TallyConfig::from_file(&path).unwrap();
        assert_eq!(loaded.store.default_limit, 10);
    }

    #[test]
    fn test_missing_category_table_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = TallyConfig::default();
        config.categories.table_path = Some(dir.path().join("missing.json"));

        let err = config.load_category_table().unwrap_err();
        assert!(matches!(err, crate::TallyError::Config(ref msg) if msg.contains("missing.json")));
    }

    #[test]
    fn test_load_custom_category_table() {
        let dir = tempfile::tempdir().unwrap();
        let table_path = dir.path().join("categories.json");
        std::fs::write(
            &table_path,
            r##"{"expense": [
                {"id": "pets", "name": "Pets", "icon": "paw", "color": "#123456", "keywords": ["petco"]},
                {"id": "other", "name": "Other", "icon": "dots", "color": "#B4B4B4"}
            ]}"##,
        )
        .unwrap();

        let mut config = TallyConfig::default();
        config.categories.table_path = Some(table_path);

        let table = config.load_category_table().unwrap();
        assert_eq!(table.classify("PETCO #442"), Some("pets"));
    }

    #[test]
    fn test_builtin_table_when_unset() {
        let table = TallyConfig::default().load_category_table().unwrap();
        assert_eq!(&table, CategoryTable::builtin());
    }
}
