//! Receipt parse result.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::categories::FALLBACK_CATEGORY;

/// A transaction candidate derived from receipt text.
///
/// Built fresh on every parse and never persisted by the core; the app
/// shows it to the user, who edits or discards it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptParseResult {
    /// Largest currency amount on the receipt, if any.
    pub amount: Option<Decimal>,

    /// Receipt date, or the parse day when none was recognized.
    pub date: NaiveDate,

    /// Whether `date` was read from the text.
    pub date_detected: bool,

    /// First line of the receipt (possibly empty).
    pub merchant_name: String,

    /// Category id, always populated.
    pub category: String,

    /// The input text, unchanged.
    pub raw_text: String,

    /// Coarse reliability hint in [0, 1]; not a probability.
    pub confidence: f32,
}

impl ReceiptParseResult {
    /// Draft used when OCR produced nothing and the user must type the
    /// details in.
    pub fn manual_entry(today: NaiveDate) -> Self {
        Self {
            amount: None,
            date: today,
            date_detected: false,
            merchant_name: String::new(),
            category: FALLBACK_CATEGORY.to_string(),
            raw_text: String::new(),
            confidence: 0.0,
        }
    }

    /// Whether an amount was found.
    pub fn has_amount(&self) -> bool {
        self.amount.is_some()
    }
}
