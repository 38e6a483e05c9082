//! Expense and income category tables.
//!
//! The table is process-wide configuration: the built-in one is built once
//! on first use, custom ones are loaded once at startup and then only read.

mod classifier;

pub use classifier::{categorize_merchant, MerchantClassifier};

use std::collections::HashSet;
use std::path::Path;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::error::CategoryError;
use crate::models::transaction::TransactionType;

/// Id of the expense category assigned when no keyword matches.
pub const FALLBACK_CATEGORY: &str = "other";

/// A named bucket for transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Short stable identifier (e.g. "food").
    pub id: String,

    /// Human-readable label.
    pub name: String,

    /// Icon name used by the app.
    pub icon: String,

    /// Display color as a hex string.
    pub color: String,

    /// Lowercase substrings matched against merchant text, in priority order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

impl Category {
    fn builtin(id: &str, name: &str, icon: &str, color: &str, keywords: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// The complete, validated list of expense and income categories.
///
/// Declaration order is significant: the classifier walks expense
/// categories and their keywords in exactly this order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCategoryTable")]
pub struct CategoryTable {
    expense: Vec<Category>,
    income: Vec<Category>,
}

#[derive(Deserialize)]
struct RawCategoryTable {
    expense: Vec<Category>,
    #[serde(default)]
    income: Vec<Category>,
}

impl TryFrom<RawCategoryTable> for CategoryTable {
    type Error = CategoryError;

    fn try_from(raw: RawCategoryTable) -> Result<Self, Self::Error> {
        Self::new(raw.expense, raw.income)
    }
}

lazy_static! {
    static ref BUILTIN: CategoryTable = CategoryTable {
        expense: vec![
            Category::builtin("food", "Food & Dining", "restaurant", "#FF6B6B", &[
                "restaurant", "food", "cafe", "coffee", "starbucks", "dining", "lunch",
                "dinner", "breakfast", "mcdonald", "kfc", "pizza",
            ]),
            Category::builtin("transport", "Transportation", "car", "#4ECDC4", &[
                "uber", "lyft", "taxi", "gas", "fuel", "parking", "metro", "bus", "train",
            ]),
            Category::builtin("utilities", "Utilities", "flash", "#95E1D3", &[
                "electric", "water", "gas", "internet", "phone", "utility", "bill",
            ]),
            Category::builtin("shopping", "Shopping", "cart", "#F38181", &[
                "amazon", "walmart", "target", "shop", "store", "mall", "clothing", "fashion",
            ]),
            Category::builtin("healthcare", "Healthcare", "medical", "#AA96DA", &[
                "hospital", "doctor", "pharmacy", "medicine", "health", "clinic", "dental",
            ]),
            Category::builtin("entertainment", "Entertainment", "game-controller", "#FCBAD3", &[
                "movie", "cinema", "netflix", "spotify", "game", "concert", "theater",
            ]),
            Category::builtin("education", "Education", "school", "#FFFFD2", &[
                "school", "university", "course", "book", "tuition", "education", "training",
            ]),
            Category::builtin("fitness", "Fitness", "fitness", "#A8D8EA", &[
                "gym", "fitness", "yoga", "sports", "exercise", "workout",
            ]),
            Category::builtin("travel", "Travel", "airplane", "#FFAAA5", &[
                "hotel", "flight", "airbnb", "travel", "vacation", "trip", "airline",
            ]),
            Category::builtin(FALLBACK_CATEGORY, "Other", "ellipsis-horizontal", "#B4B4B4", &[]),
        ],
        income: vec![
            Category::builtin("salary", "Salary", "cash", "#51CF66", &[]),
            Category::builtin("freelance", "Freelance", "briefcase", "#74C0FC", &[]),
            Category::builtin("investment", "Investment", "trending-up", "#FFD43B", &[]),
            Category::builtin("other_income", "Other Income", "wallet", "#B4B4B4", &[]),
        ],
    };
}

impl CategoryTable {
    /// Build a table from expense and income lists.
    ///
    /// Keywords are trimmed and lower-cased; income keywords are dropped
    /// since income is never auto-categorized.
    pub fn new(expense: Vec<Category>, income: Vec<Category>) -> Result<Self, CategoryError> {
        let expense = expense
            .into_iter()
            .map(|mut cat| {
                cat.keywords = cat.keywords.iter().map(|k| k.trim().to_lowercase()).collect();
                cat
            })
            .collect();
        let income = income
            .into_iter()
            .map(|mut cat| {
                cat.keywords.clear();
                cat
            })
            .collect();

        let table = Self { expense, income };
        table.validate()?;
        Ok(table)
    }

    /// The built-in table shipped with the app.
    pub fn builtin() -> &'static CategoryTable {
        &BUILTIN
    }

    /// Parse a table from JSON (`{"expense": [...], "income": [...]}`).
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a table from a JSON file.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Check the table invariants.
    pub fn validate(&self) -> Result<(), CategoryError> {
        let mut seen = HashSet::new();
        for cat in self.all() {
            if !seen.insert(cat.id.as_str()) {
                return Err(CategoryError::DuplicateId(cat.id.clone()));
            }
        }

        let fallback = self
            .expense
            .iter()
            .find(|c| c.id == FALLBACK_CATEGORY)
            .ok_or_else(|| CategoryError::MissingFallback(FALLBACK_CATEGORY.to_string()))?;
        if !fallback.keywords.is_empty() {
            return Err(CategoryError::FallbackHasKeywords(fallback.id.clone()));
        }

        if let Some(cat) = self
            .expense
            .iter()
            .find(|c| c.keywords.iter().any(|k| k.is_empty()))
        {
            return Err(CategoryError::EmptyKeyword(cat.id.clone()));
        }

        Ok(())
    }

    /// Expense categories in declaration order.
    pub fn expense(&self) -> &[Category] {
        &self.expense
    }

    /// Income categories in declaration order.
    pub fn income(&self) -> &[Category] {
        &self.income
    }

    /// Categories for one transaction type.
    pub fn for_type(&self, kind: TransactionType) -> &[Category] {
        match kind {
            TransactionType::Expense => &self.expense,
            TransactionType::Income => &self.income,
        }
    }

    /// Expense categories followed by income categories.
    pub fn all(&self) -> impl Iterator<Item = &Category> {
        self.expense.iter().chain(self.income.iter())
    }

    /// Look up a category by id.
    pub fn get(&self, id: &str) -> Option<&Category> {
        self.all().find(|c| c.id == id)
    }

    /// Which list a category id belongs to.
    pub fn type_of(&self, id: &str) -> Option<TransactionType> {
        if self.expense.iter().any(|c| c.id == id) {
            Some(TransactionType::Expense)
        } else if self.income.iter().any(|c| c.id == id) {
            Some(TransactionType::Income)
        } else {
            None
        }
    }

    /// Classify merchant text against this table.
    pub fn classify(&self, merchant: &str) -> Option<&str> {
        MerchantClassifier::with_table(self).classify(merchant)
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        BUILTIN.clone()
    }
}
