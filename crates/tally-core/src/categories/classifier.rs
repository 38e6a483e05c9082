//! Keyword-based merchant classification.

use tracing::debug;

use super::{CategoryTable, FALLBACK_CATEGORY};

/// Maps free-form merchant text to an expense category id.
///
/// Matching is first-match-wins over the table's declaration order, not
/// best-match: "Shell Gas" is `transport` because transport is declared
/// before utilities, even though both list "gas".
#[derive(Debug, Clone, Copy)]
pub struct MerchantClassifier<'t> {
    table: &'t CategoryTable,
}

impl MerchantClassifier<'static> {
    /// Classifier over the built-in table.
    pub fn new() -> Self {
        Self::with_table(CategoryTable::builtin())
    }
}

impl Default for MerchantClassifier<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'t> MerchantClassifier<'t> {
    /// Classifier over a custom table.
    pub fn with_table(table: &'t CategoryTable) -> Self {
        Self { table }
    }

    /// Classify merchant text.
    ///
    /// Returns `None` for empty input so the caller can pick its own
    /// fallback, and `Some("other")` when nothing matches.
    pub fn classify(&self, merchant: &str) -> Option<&'t str> {
        if merchant.is_empty() {
            return None;
        }

        let lower = merchant.to_lowercase();

        for category in self.table.expense() {
            if let Some(keyword) = category.keywords.iter().find(|k| lower.contains(k.as_str())) {
                debug!(category = %category.id, keyword = %keyword, "merchant keyword matched");
                return Some(category.id.as_str());
            }
        }

        Some(FALLBACK_CATEGORY)
    }

    /// Classify merchant text, substituting the fallback for empty input.
    pub fn classify_or_fallback(&self, merchant: &str) -> &'t str {
        self.classify(merchant).unwrap_or(FALLBACK_CATEGORY)
    }
}

/// Classify merchant text against the built-in table.
pub fn categorize_merchant(merchant: &str) -> Option<&'static str> {
    MerchantClassifier::new().classify(merchant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::Category;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_input_is_none() {
        assert_eq!(categorize_merchant(""), None);
        assert_eq!(MerchantClassifier::new().classify_or_fallback(""), "other");
    }

    #[test]
    fn test_no_match_is_other() {
        assert_eq!(categorize_merchant("ACME Holdings LLC"), Some("other"));
    }

    #[test]
    fn test_case_insensitive_substring() {
        assert_eq!(categorize_merchant("UBER *TRIP 8PM"), Some("transport"));
        assert_eq!(categorize_merchant("Joe's PIZZA Palace"), Some("food"));
        assert_eq!(categorize_merchant("CVS Pharmacy #123"), Some("healthcare"));
        assert_eq!(categorize_merchant("Planet Fitness"), Some("fitness"));
    }

    #[test]
    fn test_first_declared_category_wins_overlap() {
        // "gas" is listed under both transport and utilities
        assert_eq!(categorize_merchant("City Gas Co"), Some("transport"));
        // "trip" (travel) loses to "uber" (transport) by declaration order
        assert_eq!(categorize_merchant("Uber Trip"), Some("transport"));
        // "coffee" (food) beats "shop" (shopping)
        assert_eq!(categorize_merchant("Coffee Shop"), Some("food"));
    }

    #[test]
    fn test_starbucks_is_food() {
        assert_eq!(categorize_merchant("Starbucks Coffee"), Some("food"));
    }

    #[test]
    fn test_non_ascii_input() {
        assert_eq!(categorize_merchant("CAFE MÜNCHEN"), Some("food"));
        // no accent folding: "café" does not contain "cafe"
        assert_eq!(categorize_merchant("Café Größe"), Some("other"));
        assert_eq!(categorize_merchant("東京タクシー"), Some("other"));
    }

    #[test]
    fn test_fallback_never_matched_by_keyword() {
        // "other" has no keywords; literal text "other" must not select it via matching
        let table = CategoryTable::builtin();
        let fallback = table.get("other").unwrap();
        assert!(fallback.keywords.is_empty());
        assert_eq!(categorize_merchant("Brother Printers"), Some("other"));
    }

    #[test]
    fn test_income_categories_never_assigned() {
        let table = CategoryTable::new(
            vec![Category {
                id: "other".to_string(),
                name: "Other".to_string(),
                icon: "dots".to_string(),
                color: "#B4B4B4".to_string(),
                keywords: vec![],
            }],
            vec![Category {
                id: "salary".to_string(),
                name: "Salary".to_string(),
                icon: "cash".to_string(),
                color: "#51CF66".to_string(),
                keywords: vec!["payroll".to_string()],
            }],
        )
        .unwrap();

        assert_eq!(MerchantClassifier::with_table(&table).classify("ACME Payroll"), Some("other"));
    }

    #[test]
    fn test_custom_table_order_is_tie_break() {
        let table = CategoryTable::from_json(
            r##"{"expense": [
                {"id": "utilities", "name": "U", "icon": "i", "color": "#000", "keywords": ["gas"]},
                {"id": "transport", "name": "T", "icon": "i", "color": "#000", "keywords": ["gas"]},
                {"id": "other", "name": "O", "icon": "i", "color": "#000"}
            ]}"##,
        )
        .unwrap();

        assert_eq!(table.classify("Shell Gas"), Some("utilities"));
    }

    #[test]
    fn test_deterministic_across_calls() {
        let classifier = MerchantClassifier::new();
        let first = classifier.classify("Netflix.com");
        for _ in 0..10 {
            assert_eq!(classifier.classify("Netflix.com"), first);
        }
        assert_eq!(first, Some("entertainment"));
    }
}
