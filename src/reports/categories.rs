// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

use crate::models::{Transaction, TransactionCategory};

/// Bucket used when a record carries no category or references one that
/// no longer exists.
pub const UNCATEGORIZED_NAME: &str = "(uncategorized)";
pub const UNCATEGORIZED_EMOJI: &str = "📁";

/// Percentage of `base`, defined as 0 when `base` is 0 so degenerate
/// totals never produce NaN or a division error.
pub fn percentage_of(amount: Decimal, base: Decimal) -> Decimal {
    if base.is_zero() {
        Decimal::ZERO
    } else {
        amount / base * Decimal::ONE_HUNDRED
    }
}

/// Plain quotient with the same zero-denominator convention.
pub fn ratio_of(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator / denominator
    }
}

/// Per-category grouping of transactions, the common output shape of
/// every statement builder. Constituent transactions are retained for
/// drill-down.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryBreakdown {
    pub category_id: Option<i64>,
    pub name: String,
    pub emoji: String,
    pub amount: Decimal,
    pub percentage: Decimal,
    pub transaction_count: usize,
    pub transactions: Vec<Transaction>,
}

/// Group `txs` by category, accumulate amounts and counts, then assign
/// each group `percentage_of(amount, base)`. The percentage base is the
/// caller's to choose (usually this partition's own total). Output is
/// sorted descending by amount.
pub fn breakdown_transactions(
    txs: &[Transaction],
    categories: &HashMap<i64, TransactionCategory>,
    base: Decimal,
) -> Vec<CategoryBreakdown> {
    let mut groups: HashMap<Option<i64>, CategoryBreakdown> = HashMap::new();
    for tx in txs {
        let entry = groups.entry(tx.category_id).or_insert_with(|| {
            let (name, emoji) = match tx.category_id.and_then(|id| categories.get(&id)) {
                Some(cat) => (cat.name.clone(), cat.emoji.clone()),
                None => (UNCATEGORIZED_NAME.to_string(), UNCATEGORIZED_EMOJI.to_string()),
            };
            CategoryBreakdown {
                category_id: tx.category_id,
                name,
                emoji,
                amount: Decimal::ZERO,
                percentage: Decimal::ZERO,
                transaction_count: 0,
                transactions: Vec::new(),
            }
        });
        entry.amount += tx.amount;
        entry.transaction_count += 1;
        entry.transactions.push(tx.clone());
    }
    let mut out: Vec<CategoryBreakdown> = groups.into_values().collect();
    for group in &mut out {
        group.percentage = percentage_of(group.amount, base);
    }
    out.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.name.cmp(&b.name)));
    out
}

/// String-keyed distribution for non-transaction groupings (e.g. debt
/// amounts by debt type). Same percentage convention and ordering as
/// `breakdown_transactions`.
#[derive(Debug, Clone, Serialize)]
pub struct GroupTotal {
    pub key: String,
    pub amount: Decimal,
    pub percentage: Decimal,
    pub count: usize,
}

pub fn grouped_totals<T>(
    items: &[T],
    key_fn: impl Fn(&T) -> String,
    amount_fn: impl Fn(&T) -> Decimal,
    base: Decimal,
) -> Vec<GroupTotal> {
    let mut groups: HashMap<String, GroupTotal> = HashMap::new();
    for item in items {
        let key = key_fn(item);
        let entry = groups.entry(key.clone()).or_insert(GroupTotal {
            key,
            amount: Decimal::ZERO,
            percentage: Decimal::ZERO,
            count: 0,
        });
        entry.amount += amount_fn(item);
        entry.count += 1;
    }
    let mut out: Vec<GroupTotal> = groups.into_values().collect();
    for group in &mut out {
        group.percentage = percentage_of(group.amount, base);
    }
    out.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.key.cmp(&b.key)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TxKind, CategoryKind};
    use chrono::NaiveDate;

    fn tx(amount: i64, category_id: Option<i64>) -> Transaction {
        Transaction {
            id: 0,
            user_id: 1,
            date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            amount: Decimal::from(amount),
            kind: TxKind::Expense,
            category_id,
            is_recurring: false,
            flow_type: None,
            note: None,
        }
    }

    fn cat(id: i64, name: &str) -> (i64, TransactionCategory) {
        (
            id,
            TransactionCategory {
                id,
                user_id: 1,
                name: name.to_string(),
                emoji: "🍞".to_string(),
                color: String::new(),
                kind: CategoryKind::Expense,
            },
        )
    }

    #[test]
    fn percentages_sum_to_one_hundred() {
        let categories: HashMap<_, _> = vec![cat(1, "Food"), cat(2, "Rent")].into_iter().collect();
        let txs = vec![tx(30, Some(1)), tx(50, Some(2)), tx(20, Some(1))];
        let total: Decimal = txs.iter().map(|t| t.amount).sum();
        let groups = breakdown_transactions(&txs, &categories, total);
        let pct_sum: Decimal = groups.iter().map(|g| g.percentage).sum();
        assert_eq!(pct_sum, Decimal::ONE_HUNDRED);
        assert_eq!(groups[0].name, "Rent");
        assert_eq!(groups[0].amount, Decimal::from(50));
        assert_eq!(groups[1].transaction_count, 2);
    }

    #[test]
    fn zero_base_means_zero_percentages() {
        let categories = HashMap::new();
        let txs = vec![tx(10, None)];
        let groups = breakdown_transactions(&txs, &categories, Decimal::ZERO);
        assert_eq!(groups[0].percentage, Decimal::ZERO);
    }

    #[test]
    fn missing_category_lands_in_placeholder_bucket() {
        let categories = HashMap::new();
        let txs = vec![tx(10, None), tx(5, Some(99))];
        let total = Decimal::from(15);
        let groups = breakdown_transactions(&txs, &categories, total);
        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(|g| g.name == UNCATEGORIZED_NAME));
    }

    #[test]
    fn grouped_totals_distributes_by_key() {
        let debts = vec![("mortgage", 200), ("card", 50), ("mortgage", 100)];
        let base = Decimal::from(350);
        let groups = grouped_totals(
            &debts,
            |d| d.0.to_string(),
            |d| Decimal::from(d.1),
            base,
        );
        assert_eq!(groups[0].key, "mortgage");
        assert_eq!(groups[0].amount, Decimal::from(300));
        assert_eq!(groups[0].count, 2);
        let pct_sum: Decimal = groups.iter().map(|g| g.percentage).sum();
        assert_eq!(pct_sum.round_dp(6), Decimal::ONE_HUNDRED);
    }
}
