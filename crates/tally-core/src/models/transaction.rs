//! Transaction records exchanged with the transaction store.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::categories::CategoryTable;
use crate::error::StoreError;
use crate::models::receipt::ReceiptParseResult;

/// Direction of money flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Money spent.
    #[default]
    Expense,
    /// Money received.
    Income,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Expense => "expense",
            TransactionType::Income => "income",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transaction ready to be handed to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    /// Expense or income.
    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Positive amount.
    pub amount: Decimal,

    /// Category id.
    pub category: String,

    /// Free-text description (the merchant for scanned receipts).
    pub description: String,

    /// Transaction date.
    pub date: NaiveDate,

    /// URL of the stored receipt image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_url: Option<String>,

    /// Entered by hand rather than scanned.
    pub is_manual: bool,
}

impl NewTransaction {
    /// Initial draft from a parsed receipt.
    ///
    /// A missing amount becomes zero, which `validate` rejects until the
    /// user fills it in.
    pub fn from_receipt(receipt: &ReceiptParseResult, kind: TransactionType) -> Self {
        Self {
            kind,
            amount: receipt.amount.unwrap_or_default(),
            category: receipt.category.clone(),
            description: receipt.merchant_name.clone(),
            date: receipt.date,
            receipt_url: None,
            is_manual: false,
        }
    }

    /// Attach the URL of the uploaded receipt image.
    pub fn with_receipt_url(mut self, url: impl Into<String>) -> Self {
        self.receipt_url = Some(url.into());
        self
    }

    /// Check the record before it is stored.
    pub fn validate(&self, table: &CategoryTable) -> Result<(), StoreError> {
        if self.amount <= Decimal::ZERO {
            return Err(invalid("amount", "must be greater than 0"));
        }

        match table.type_of(&self.category) {
            None => Err(invalid("category", format!("unknown category '{}'", self.category))),
            Some(kind) if kind != self.kind => Err(invalid(
                "category",
                format!("'{}' is not an {} category", self.category, self.kind),
            )),
            Some(_) => Ok(()),
        }
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> StoreError {
    StoreError::InvalidTransaction {
        field: field.to_string(),
        reason: reason.into(),
    }
}

/// A stored transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Store-assigned id.
    pub id: String,

    /// Opaque owner id.
    pub user_id: String,

    /// When the record was stored.
    pub created_at: DateTime<Utc>,

    #[serde(flatten)]
    pub data: NewTransaction,
}

impl Transaction {
    pub fn kind(&self) -> TransactionType {
        self.data.kind
    }

    pub fn amount(&self) -> Decimal {
        self.data.amount
    }

    pub fn category(&self) -> &str {
        &self.data.category
    }

    pub fn date(&self) -> NaiveDate {
        self.data.date
    }
}

/// Partial update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionUpdate {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_url: Option<String>,
}

impl TransactionUpdate {
    /// Apply the patch to a record.
    pub fn apply(&self, data: &mut NewTransaction) {
        if let Some(kind) = self.kind {
            data.kind = kind;
        }
        if let Some(amount) = self.amount {
            data.amount = amount;
        }
        if let Some(category) = &self.category {
            data.category = category.clone();
        }
        if let Some(description) = &self.description {
            data.description = description.clone();
        }
        if let Some(date) = self.date {
            data.date = date;
        }
        if let Some(url) = &self.receipt_url {
            data.receipt_url = Some(url.clone());
        }
    }
}
