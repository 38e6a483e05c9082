//! Spending summaries over stored transactions.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::categories::CategoryTable;
use crate::models::transaction::{Transaction, TransactionType};

/// Income and expense totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    /// Income minus expenses.
    pub balance: Decimal,
    pub transaction_count: usize,
}

/// Expense total for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    /// Display name; the id when the category is not in the table.
    pub name: String,
    pub color: Option<String>,
    pub total: Decimal,
    /// Share of all expenses, 0-100.
    pub percentage: f64,
    pub count: usize,
}

pub fn summarize(transactions: &[Transaction]) -> Summary {
    let mut summary = Summary {
        transaction_count: transactions.len(),
        ..Default::default()
    };

    for t in transactions {
        match t.kind() {
            TransactionType::Income => summary.total_income += t.amount(),
            TransactionType::Expense => summary.total_expenses += t.amount(),
        }
    }

    summary.balance = summary.total_income - summary.total_expenses;
    summary
}

/// Expense totals per category, largest first.
pub fn category_breakdown(
    transactions: &[Transaction],
    table: &CategoryTable,
) -> Vec<CategoryTotal> {
    let mut totals: HashMap<&str, (Decimal, usize)> = HashMap::new();
    let mut grand_total = Decimal::ZERO;

    for t in transactions.iter().filter(|t| t.kind() == TransactionType::Expense) {
        let entry = totals.entry(t.category()).or_insert((Decimal::ZERO, 0));
        entry.0 += t.amount();
        entry.1 += 1;
        grand_total += t.amount();
    }

    let mut breakdown: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(id, (total, count))| {
            let category = table.get(id);
            let percentage = if grand_total.is_zero() {
                0.0
            } else {
                (total / grand_total * Decimal::ONE_HUNDRED)
                    .to_f64()
                    .unwrap_or(0.0)
            };

            CategoryTotal {
                category: id.to_string(),
                name: category.map(|c| c.name.clone()).unwrap_or_else(|| id.to_string()),
                color: category.map(|c| c.color.clone()),
                total,
                percentage,
                count,
            }
        })
        .collect();

    breakdown.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    breakdown
}

/// Reporting window relative to a reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Today,
    /// Sunday through Saturday.
    Week,
    Month,
}

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl Period {
    pub fn range(&self, reference: NaiveDate) -> DateRange {
        match self {
            Period::Today => DateRange {
                start: reference,
                end: reference,
            },
            Period::Week => {
                let start = reference
                    - Duration::days(i64::from(reference.weekday().num_days_from_sunday()));
                DateRange {
                    start,
                    end: start + Duration::days(6),
                }
            }
            Period::Month => {
                let start = reference.with_day(1).unwrap_or(reference);
                let next_month = if reference.month() == 12 {
                    NaiveDate::from_ymd_opt(reference.year() + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(reference.year(), reference.month() + 1, 1)
                };
                let end = next_month
                    .and_then(|d| d.pred_opt())
                    .unwrap_or(reference);
                DateRange { start, end }
            }
        }
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "today" => Ok(Period::Today),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            other => Err(format!("unknown period: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::transaction::NewTransaction;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn txn(cents: i64, category: &str, kind: TransactionType) -> Transaction {
        Transaction {
            id: format!("{}-{}", category, cents),
            user_id: "u1".to_string(),
            created_at: Utc::now(),
            data: NewTransaction {
                kind,
                amount: Decimal::new(cents, 2),
                category: category.to_string(),
                description: String::new(),
                date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                receipt_url: None,
                is_manual: true,
            },
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_summarize() {
        let summary = summarize(&[
            txn(300_000, "salary", TransactionType::Income),
            txn(4_550, "food", TransactionType::Expense),
            txn(10_000, "shopping", TransactionType::Expense),
        ]);

        assert_eq!(summary.total_income, Decimal::new(300_000, 2));
        assert_eq!(summary.total_expenses, Decimal::new(14_550, 2));
        assert_eq!(summary.balance, Decimal::new(285_450, 2));
        assert_eq!(summary.transaction_count, 3);
    }

    #[test]
    fn test_summarize_empty() {
        assert_eq!(summarize(&[]), Summary::default());
    }

    #[test]
    fn test_category_breakdown() {
        let breakdown = category_breakdown(
            &[
                txn(2_500, "food", TransactionType::Expense),
                txn(5_000, "transport", TransactionType::Expense),
                txn(2_500, "food", TransactionType::Expense),
                txn(100_000, "salary", TransactionType::Income),
            ],
            CategoryTable::builtin(),
        );

        assert_eq!(breakdown.len(), 2);
        // Equal totals fall back to id order.
        assert_eq!(breakdown[0].category, "food");
        assert_eq!(breakdown[0].total, Decimal::new(5_000, 2));
        assert_eq!(breakdown[0].count, 2);
        assert_eq!(breakdown[0].name, "Food & Dining");
        assert_eq!(breakdown[0].percentage, 50.0);
        assert_eq!(breakdown[1].category, "transport");
        assert!(breakdown[1].color.is_some());
    }

    #[test]
    fn test_breakdown_unknown_category() {
        let legacy = [txn(100, "legacy", TransactionType::Expense)];
        let breakdown = category_breakdown(&legacy, CategoryTable::builtin());
        assert_eq!(breakdown[0].name, "legacy");
        assert_eq!(breakdown[0].color, None);
        assert_eq!(breakdown[0].percentage, 100.0);
    }

    #[test]
    fn test_period_ranges() {
        // 2024-05-15 is a Wednesday.
        let reference = date(2024, 5, 15);

        assert_eq!(
            Period::Today.range(reference),
            DateRange { start: reference, end: reference }
        );
        assert_eq!(
            Period::Week.range(reference),
            DateRange { start: date(2024, 5, 12), end: date(2024, 5, 18) }
        );
        assert_eq!(
            Period::Month.range(reference),
            DateRange { start: date(2024, 5, 1), end: date(2024, 5, 31) }
        );
        assert_eq!(
            Period::Month.range(date(2024, 12, 31)),
            DateRange { start: date(2024, 12, 1), end: date(2024, 12, 31) }
        );
        assert_eq!(Period::Month.range(date(2024, 2, 10)).end, date(2024, 2, 29));
    }

    #[test]
    fn test_week_starting_on_sunday() {
        let sunday = date(2024, 5, 12);
        let range = Period::Week.range(sunday);
        assert_eq!(range.start, sunday);
        assert!(range.contains(date(2024, 5, 18)));
        assert!(!range.contains(date(2024, 5, 19)));
    }

    #[test]
    fn test_period_from_str() {
        assert_eq!("Week".parse::<Period>(), Ok(Period::Week));
        assert!("year".parse::<Period>().is_err());
    }
}
