//! Pure aggregation over an already-loaded transaction collection.
//! Deterministic: identical inputs always produce identical outputs.

use chrono::{DateTime, Local};

use crate::models::{parse_timestamp, Transaction};

/// How many entries the recent-transactions view shows.
pub(crate) const RECENT_WINDOW: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CategoryTotal {
    pub(crate) category_id: String,
    pub(crate) total_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MerchantTotal {
    pub(crate) merchant: String,
    pub(crate) total_cents: i64,
}

/// The "YYYY-MM" key for the current local calendar month.
pub(crate) fn current_month_key(now: DateTime<Local>) -> String {
    now.format("%Y-%m").to_string()
}

/// Keep transactions whose `occurred_at`, in local time, falls in the
/// given month. Unparseable timestamps are treated as non-matching.
pub(crate) fn filter_by_month(txs: &[Transaction], month_key: &str) -> Vec<Transaction> {
    txs.iter()
        .filter(|tx| tx.month_key().as_deref() == Some(month_key))
        .cloned()
        .collect()
}

pub(crate) fn sum_amount_cents(txs: &[Transaction]) -> i64 {
    txs.iter().map(|tx| tx.amount_cents).sum()
}

/// Spending totals per category, descending. Ties keep encounter order.
pub(crate) fn group_by_category(txs: &[Transaction]) -> Vec<CategoryTotal> {
    ranked_totals(txs, |tx| &tx.category)
        .into_iter()
        .map(|(category_id, total_cents)| CategoryTotal {
            category_id,
            total_cents,
        })
        .collect()
}

/// Spending totals per merchant, descending. Ties keep encounter order.
pub(crate) fn group_by_merchant(txs: &[Transaction]) -> Vec<MerchantTotal> {
    ranked_totals(txs, |tx| &tx.merchant_raw)
        .into_iter()
        .map(|(merchant, total_cents)| MerchantTotal {
            merchant,
            total_cents,
        })
        .collect()
}

fn ranked_totals(txs: &[Transaction], key: impl Fn(&Transaction) -> &str) -> Vec<(String, i64)> {
    let mut totals: Vec<(String, i64)> = Vec::new();
    for tx in txs {
        let key = key(tx).trim();
        if key.is_empty() {
            continue;
        }
        match totals.iter_mut().find(|entry| entry.0 == key) {
            Some(entry) => entry.1 += tx.amount_cents,
            None => totals.push((key.to_string(), tx.amount_cents)),
        }
    }
    // Stable sort: equal totals stay in first-seen order.
    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals
}

/// The fixed recent window: newest first by `occurred_at`, with
/// `created_at` as tie-breaker, truncated to `limit` entries.
pub(crate) fn recent(txs: &[Transaction], limit: usize) -> Vec<Transaction> {
    let mut sorted = txs.to_vec();
    sorted.sort_by(|a, b| {
        parse_timestamp(&b.occurred_at)
            .cmp(&parse_timestamp(&a.occurred_at))
            .then_with(|| parse_timestamp(&b.created_at).cmp(&parse_timestamp(&a.created_at)))
    });
    sorted.truncate(limit);
    sorted
}
