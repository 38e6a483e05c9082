//! Data models.

pub mod config;
pub mod receipt;
pub mod transaction;

pub use config::TallyConfig;
pub use receipt::ReceiptParseResult;
pub use transaction::{NewTransaction, Transaction, TransactionType, TransactionUpdate};
