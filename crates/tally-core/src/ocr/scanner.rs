//! Receipt scanning: OCR followed by parsing, with manual-entry fallback.

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use crate::error::OcrError;
use crate::models::receipt::ReceiptParseResult;
use crate::receipt::ReceiptParser;

use super::OcrProvider;

/// Outcome of scanning a receipt image.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// Text was recognized and parsed.
    Parsed(ReceiptParseResult),

    /// OCR failed or found nothing; the user has to fill in the draft.
    ManualEntry {
        /// Why the scan could not be used.
        reason: String,
        /// Blank draft to pre-fill the form.
        draft: ReceiptParseResult,
    },
}

impl ScanOutcome {
    /// The parsed result or the blank draft.
    pub fn draft(&self) -> &ReceiptParseResult {
        match self {
            ScanOutcome::Parsed(result) => result,
            ScanOutcome::ManualEntry { draft, .. } => draft,
        }
    }

    pub fn needs_manual_entry(&self) -> bool {
        matches!(self, ScanOutcome::ManualEntry { .. })
    }
}

/// Runs an OCR provider and the receipt parser together.
pub struct ReceiptScanner<'t, P: OcrProvider> {
    provider: P,
    parser: ReceiptParser<'t>,
}

impl<P: OcrProvider> ReceiptScanner<'static, P> {
    /// Scanner using the built-in category table.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            parser: ReceiptParser::new(),
        }
    }
}

impl<'t, P: OcrProvider> ReceiptScanner<'t, P> {
    /// Use a specific parser (e.g. one over a custom category table).
    pub fn with_parser<'u>(self, parser: ReceiptParser<'u>) -> ReceiptScanner<'u, P> {
        ReceiptScanner {
            provider: self.provider,
            parser,
        }
    }

    /// Scan an image, using today's local date as the fallback date.
    pub fn scan(&self, image: &[u8]) -> ScanOutcome {
        self.scan_at(image, Local::now().date_naive())
    }

    /// Scan an image with an explicit fallback date.
    pub fn scan_at(&self, image: &[u8], today: NaiveDate) -> ScanOutcome {
        info!("Scanning {} byte receipt image with {}", image.len(), self.provider.name());

        if image.is_empty() {
            let e = OcrError::InvalidImage("empty image".to_string());
            warn!("OCR skipped: {}", e);
            return manual_entry(e.to_string(), today);
        }

        let ocr = match self.provider.recognize(image) {
            Ok(ocr) => ocr,
            Err(e) => {
                warn!("OCR failed: {}", e);
                return manual_entry(e.to_string(), today);
            }
        };

        if ocr.is_blank() {
            warn!("OCR returned no text");
            return manual_entry("No text detected in image".to_string(), today);
        }

        match self.parser.parse_at(&ocr.text, today) {
            Some(result) => ScanOutcome::Parsed(result),
            None => manual_entry("No text detected in image".to_string(), today),
        }
    }
}

fn manual_entry(reason: String, today: NaiveDate) -> ScanOutcome {
    ScanOutcome::ManualEntry {
        reason,
        draft: ReceiptParseResult::manual_entry(today),
    }
}
