//! Receipt parser turning recognized text into a transaction candidate.

use chrono::{Local, NaiveDate};
use tracing::{debug, trace};

use crate::categories::{CategoryTable, MerchantClassifier, FALLBACK_CATEGORY};
use crate::models::receipt::ReceiptParseResult;

use super::rules::{extract_receipt_amount, extract_receipt_date, normalize_lines};

/// Confidence reported when an amount was found.
pub const CONFIDENCE_WITH_AMOUNT: f32 = 0.7;

/// Confidence reported when no amount was found.
pub const CONFIDENCE_WITHOUT_AMOUNT: f32 = 0.3;

/// Heuristic receipt parser.
///
/// Stateless apart from the category table it borrows, so one instance can
/// be shared across threads.
#[derive(Debug, Clone, Copy)]
pub struct ReceiptParser<'t> {
    classifier: MerchantClassifier<'t>,
}

impl ReceiptParser<'static> {
    /// Parser over the built-in category table.
    pub fn new() -> Self {
        Self {
            classifier: MerchantClassifier::new(),
        }
    }
}

impl Default for ReceiptParser<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'t> ReceiptParser<'t> {
    /// Parser over a custom category table.
    pub fn with_table(table: &'t CategoryTable) -> Self {
        Self {
            classifier: MerchantClassifier::with_table(table),
        }
    }

    /// Parse receipt text, falling back to today's local date.
    ///
    /// Returns `None` when there is nothing to parse.
    pub fn parse(&self, text: &str) -> Option<ReceiptParseResult> {
        self.parse_at(text, Local::now().date_naive())
    }

    /// Parse receipt text with an explicit fallback date.
    ///
    /// The output depends only on `text` and `today`.
    pub fn parse_at(&self, text: &str, today: NaiveDate) -> Option<ReceiptParseResult> {
        if text.is_empty() {
            return None;
        }

        debug!("Parsing receipt from {} characters of text", text.len());

        let lines = normalize_lines(text);
        trace!("{} non-empty lines", lines.len());

        let amount = extract_receipt_amount(&lines);
        if let Some(m) = &amount {
            debug!("Receipt amount {} from line {} ({:?})", m.value, m.line, m.source);
        }

        let date = extract_receipt_date(&lines);
        if let Some(m) = &date {
            debug!("Receipt date {} from line {} ({:?})", m.value, m.line, m.source);
        }

        let merchant_name = lines.first().map(|l| l.to_string()).unwrap_or_default();
        let category = self
            .classifier
            .classify(&merchant_name)
            .unwrap_or(FALLBACK_CATEGORY);

        let confidence = if amount.is_some() {
            CONFIDENCE_WITH_AMOUNT
        } else {
            CONFIDENCE_WITHOUT_AMOUNT
        };

        debug!(
            "Parsed receipt: merchant={:?} category={} confidence={:.1}",
            merchant_name, category, confidence
        );

        Some(ReceiptParseResult {
            amount: amount.map(|m| m.value),
            date: date.as_ref().map(|m| m.value).unwrap_or(today),
            date_detected: date.is_some(),
            merchant_name,
            category: category.to_string(),
            raw_text: text.to_string(),
            confidence,
        })
    }
}

/// Parse receipt text with the built-in category table.
pub fn parse_receipt_data(text: &str) -> Option<ReceiptParseResult> {
    ReceiptParser::new().parse(text)
}
