//! WASM bindings for receipt parsing and merchant categorization.
//!
//! This crate provides WebAssembly bindings for the mobile and web front ends.

use chrono::NaiveDate;
use wasm_bindgen::prelude::*;

use tally_core::ocr::{OcrText, TextLine};
use tally_core::{CategoryTable, MerchantClassifier, ReceiptParseResult, ReceiptParser};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js(result: Option<ReceiptParseResult>) -> Result<JsValue, JsValue> {
    match result {
        Some(result) => {
            serde_wasm_bindgen::to_value(&result).map_err(|e| JsValue::from_str(&e.to_string()))
        }
        None => Ok(JsValue::NULL),
    }
}

/// Parse receipt text into a transaction candidate.
///
/// Returns `null` for empty text.
#[wasm_bindgen]
pub fn parse_receipt_text(text: &str) -> Result<JsValue, JsValue> {
    to_js(ReceiptParser::new().parse(text))
}

/// Category id for a merchant name, or `undefined` for empty input.
#[wasm_bindgen]
pub fn classify_merchant(text: &str) -> Option<String> {
    tally_core::categorize_merchant(text).map(str::to_string)
}

/// The built-in category table (`{ expense, income }`).
#[wasm_bindgen]
pub fn categories() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(CategoryTable::builtin())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Receipt parser class for browser use.
#[wasm_bindgen]
pub struct ReceiptParserJs {
    table: CategoryTable,
}

#[wasm_bindgen]
impl ReceiptParserJs {
    /// Create a parser over the built-in category table.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            table: CategoryTable::builtin().clone(),
        }
    }

    /// Create a parser over a custom category table given as JSON.
    #[wasm_bindgen]
    pub fn with_table_json(json: &str) -> Result<ReceiptParserJs, JsValue> {
        let table = CategoryTable::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { table })
    }

    /// Parse receipt text, falling back to today's date.
    #[wasm_bindgen]
    pub fn parse(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(ReceiptParser::with_table(&self.table).parse(text))
    }

    /// Parse receipt text with an explicit fallback date (YYYY-MM-DD).
    #[wasm_bindgen]
    pub fn parse_at(&self, text: &str, today: &str) -> Result<JsValue, JsValue> {
        let today: NaiveDate = today
            .parse()
            .map_err(|e| JsValue::from_str(&format!("invalid date '{}': {}", today, e)))?;
        to_js(ReceiptParser::with_table(&self.table).parse_at(text, today))
    }

    /// Category id for a merchant name.
    #[wasm_bindgen]
    pub fn classify(&self, text: &str) -> Option<String> {
        MerchantClassifier::with_table(&self.table)
            .classify(text)
            .map(str::to_string)
    }
}

impl Default for ReceiptParserJs {
    fn default() -> Self {
        Self::new()
    }
}

/// Lines recognized by a browser-side OCR engine.
#[wasm_bindgen]
pub struct OcrLinesJs {
    lines: Vec<TextLine>,
}

#[wasm_bindgen]
impl OcrLinesJs {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add a recognized line with its top-left corner.
    #[wasm_bindgen]
    pub fn add_line(&mut self, text: &str, top: f32, left: f32, confidence: f32) {
        self.lines
            .push(TextLine::new(text, top, left).with_confidence(confidence));
    }

    /// Lines joined in reading order.
    #[wasm_bindgen]
    pub fn get_text(&self) -> String {
        OcrText::from_lines(self.lines.clone()).text
    }

    /// Parse the recognized lines as a receipt.
    #[wasm_bindgen]
    pub fn parse_receipt(&self) -> Result<JsValue, JsValue> {
        parse_receipt_text(&self.get_text())
    }
}

impl Default for OcrLinesJs {
    fn default() -> Self {
        Self::new()
    }
}
