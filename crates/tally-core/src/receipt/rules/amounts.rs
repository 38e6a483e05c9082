//! Amount extraction for receipts.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::patterns::CURRENCY_AMOUNT;
use super::{ExtractionMatch, FieldExtractor};

/// Currency amount extractor.
///
/// Only numbers written next to a currency symbol count; bare numbers
/// (quantities, SKUs, phone fragments) are ignored.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, line: &str) -> Option<Self::Output> {
        self.extract_all(line).into_iter().next()
    }

    fn extract_all(&self, line: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for caps in CURRENCY_AMOUNT.captures_iter(line) {
            let Some(number) = caps.get(1).or_else(|| caps.get(2)) else {
                continue;
            };

            // Zero amounts (discounts, change due) never represent a total
            if let Some(amount) = parse_amount(number.as_str()).filter(|a| *a > Decimal::ZERO) {
                let full_match = &caps[0];
                results.push(
                    ExtractionMatch::new(amount, full_match)
                        .with_position(number.start(), number.end()),
                );
            }
        }

        results
    }
}

/// Pick the receipt amount from normalized lines.
///
/// The largest currency amount anywhere on the receipt is taken as the
/// total, since totals are printed alongside the smaller line items.
pub fn extract_receipt_amount(lines: &[&str]) -> Option<ExtractionMatch<Decimal>> {
    let extractor = AmountExtractor::new();

    lines
        .iter()
        .enumerate()
        .flat_map(|(idx, line)| {
            extractor
                .extract_all(line)
                .into_iter()
                .map(move |m| m.on_line(idx))
        })
        .fold(None, |best: Option<ExtractionMatch<Decimal>>, candidate| match best {
            Some(b) if b.value >= candidate.value => Some(b),
            _ => Some(candidate),
        })
}

/// Parse a two-decimal amount with either `.` or `,` as the separator.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let normalized: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    Decimal::from_str(&normalized).ok()
}
