//! Receipt text parsing.

mod parser;
pub mod rules;

pub use parser::{
    parse_receipt_data, ReceiptParser, CONFIDENCE_WITHOUT_AMOUNT, CONFIDENCE_WITH_AMOUNT,
};
