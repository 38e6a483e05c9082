//! Common regex patterns for receipt extraction.
//!
//! Digits are matched with `[0-9]` rather than `\d`, which is
//! Unicode-aware in the regex crate.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Currency amount: symbol before or after a number with two decimals
    pub static ref CURRENCY_AMOUNT: Regex = Regex::new(
        r"[$€£¥]\s*([0-9]+[.,][0-9]{2})|([0-9]+[.,][0-9]{2})\s*[$€£¥]"
    ).unwrap();

    // Numeric date: M/D/Y or M-D-Y, two to four year digits
    pub static ref NUMERIC_DATE: Regex = Regex::new(
        r"([0-9]{1,2})[/\-]([0-9]{1,2})[/\-]([0-9]{2,4})"
    ).unwrap();
}
