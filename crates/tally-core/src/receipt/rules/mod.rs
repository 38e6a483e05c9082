//! Rule-based field extractors for receipt text.

pub mod amounts;
pub mod dates;
pub mod patterns;

pub use amounts::{extract_receipt_amount, parse_amount, AmountExtractor};
pub use dates::{extract_receipt_date, parse_numeric_date, DateExtractor};
pub use patterns::*;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from a single line.
    fn extract(&self, line: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field from a single line.
    fn extract_all(&self, line: &str) -> Vec<Self::Output>;
}

/// A value extracted from receipt text, with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Index of the normalized line the value was found on.
    pub line: usize,
    /// Byte range within that line.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            line: 0,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }

    pub fn on_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }
}

/// Split text into trimmed, non-empty lines, preserving order.
pub fn normalize_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}
