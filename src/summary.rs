//! Dashboard aggregates computed from the transaction list
//!
//! These mirror the dashboard widgets: overall totals, the income vs.
//! expense split, the per-head expense breakdown, and the recent-entry
//! lists. All functions are pure over a fetched transaction slice.

use crate::client::{Transaction, TransactionKind};

/// Overall income and expense totals
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
}

/// Expense total for one head
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct HeadTotal {
    pub head: String,
    pub amount: f64,
}

/// Sum income and expense amounts across all transactions
pub fn totals(transactions: &[Transaction]) -> Totals {
    let mut income = 0.0;
    let mut expense = 0.0;

    for tx in transactions {
        match tx.kind {
            TransactionKind::Income => income += tx.amount,
            TransactionKind::Expense => expense += tx.amount,
        }
    }

    Totals { income, expense }
}

/// Income and expense shares of the combined total, as percentages rounded
/// to two decimals. Both are zero when nothing has been recorded. The
/// expense share is derived from the rounded income share so the two always
/// sum to 100.
pub fn split_percentages(totals: &Totals) -> (f64, f64) {
    let combined = totals.income + totals.expense;
    if combined <= 0.0 {
        return (0.0, 0.0);
    }

    let income_pct = round2(totals.income / combined * 100.0);
    let expense_pct = round2(100.0 - income_pct);
    (income_pct, expense_pct)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Expense amounts grouped by head name, in first-seen order.
/// Expenses without a resolved head are skipped.
pub fn head_breakdown(transactions: &[Transaction]) -> Vec<HeadTotal> {
    let mut breakdown: Vec<HeadTotal> = Vec::new();

    for tx in transactions {
        if tx.kind != TransactionKind::Expense {
            continue;
        }
        let Some(head) = &tx.head else {
            continue;
        };

        match breakdown.iter_mut().find(|entry| entry.head == *head) {
            Some(entry) => entry.amount += tx.amount,
            None => breakdown.push(HeadTotal {
                head: head.clone(),
                amount: tx.amount,
            }),
        }
    }

    breakdown
}

/// The most recent transactions of one kind, newest first, undated entries
/// last, limited to `limit`
pub fn recent(transactions: &[Transaction], kind: TransactionKind, limit: usize) -> Vec<&Transaction> {
    let mut entries: Vec<&Transaction> = transactions.iter().filter(|tx| tx.kind == kind).collect();

    // Stable sort keeps backend order among equal or missing dates.
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    entries.truncate(limit);
    entries
}
