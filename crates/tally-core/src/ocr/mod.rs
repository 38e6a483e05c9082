//! Boundary to external OCR providers.
//!
//! No recognizer ships with tally; providers implement [`OcrProvider`] and
//! hand back recognized lines, which [`ReceiptScanner`] feeds to the
//! receipt parser.

mod provider;
mod scanner;

pub use provider::{OcrProvider, UnconfiguredOcr, OCR_NOT_CONFIGURED};
pub use scanner::{ReceiptScanner, ScanOutcome};

use serde::{Deserialize, Serialize};

/// Vertical distance within which two lines are treated as one printed row.
const ROW_TOLERANCE: f32 = 12.0;

/// A single recognized line of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    /// Recognized text content.
    pub text: String,

    /// Recognition confidence score (0.0 - 1.0).
    pub confidence: f32,

    /// Top edge of the line, in image pixels.
    pub top: f32,

    /// Left edge of the line, in image pixels.
    pub left: f32,
}

impl TextLine {
    pub fn new(text: impl Into<String>, top: f32, left: f32) -> Self {
        Self {
            text: text.into(),
            confidence: 1.0,
            top,
            left,
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }
}

/// Text recognized in a receipt image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrText {
    /// Recognized lines in reading order.
    pub lines: Vec<TextLine>,

    /// Full text (lines joined with newlines).
    pub text: String,
}

impl OcrText {
    /// Build from lines in any order, sorting them into reading order
    /// (top-to-bottom, then left-to-right within a row).
    ///
    /// A line starts a new row when its top is more than `ROW_TOLERANCE`
    /// below the top of the row's first line.
    pub fn from_lines(mut lines: Vec<TextLine>) -> Self {
        lines.sort_by(|a, b| a.top.total_cmp(&b.top));

        let mut rows: Vec<Vec<TextLine>> = Vec::new();
        for line in lines {
            let same_row = rows
                .last()
                .is_some_and(|row| line.top - row[0].top <= ROW_TOLERANCE);

            match rows.last_mut() {
                Some(row) if same_row => row.push(line),
                _ => rows.push(vec![line]),
            }
        }

        let lines: Vec<TextLine> = rows
            .into_iter()
            .flat_map(|mut row| {
                row.sort_by(|a, b| a.left.total_cmp(&b.left));
                row
            })
            .collect();

        let text = lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        Self { lines, text }
    }

    /// Build from already-joined text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            lines: Vec::new(),
            text: text.into(),
        }
    }

    /// Whether nothing usable was recognized.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Mean line confidence, if any lines are present.
    pub fn mean_confidence(&self) -> Option<f32> {
        if self.lines.is_empty() {
            return None;
        }
        let sum: f32 = self.lines.iter().map(|l| l.confidence).sum();
        Some(sum / self.lines.len() as f32)
    }
}
