//! Dashboard command implementation
//!
//! Renders the same aggregates the web dashboard shows: overall totals, the
//! income vs. expense split, the per-head expense breakdown, and the recent
//! entries of each kind.

use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{CommandContext, OutputFormat};
use crate::client::{FinanceApi, Transaction, TransactionKind};
use crate::error::Result;
use crate::output::{format_amount, json, table};
use crate::summary::{self, HeadTotal, Totals};

#[derive(Serialize)]
struct DashboardSummary<'a> {
    totals: Totals,
    income_pct: f64,
    expense_pct: f64,
    heads: Vec<HeadTotal>,
    recent_income: Vec<&'a Transaction>,
    recent_expenses: Vec<&'a Transaction>,
}

/// Per-head row for table display
#[derive(Tabled)]
struct HeadRow {
    #[tabled(rename = "HEAD")]
    head: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
}

/// Recent-entry row for table display
#[derive(Tabled)]
struct RecentRow {
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "DETAIL")]
    detail: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
}

impl From<&&Transaction> for RecentRow {
    fn from(tx: &&Transaction) -> Self {
        Self {
            date: tx.date.map(|d| d.to_string()).unwrap_or_else(|| "-".into()),
            detail: tx
                .title
                .as_deref()
                .or(tx.source.as_deref())
                .unwrap_or("-")
                .to_string(),
            amount: format_amount(tx.amount),
        }
    }
}

/// Run the dashboard command
pub async fn run(ctx: &CommandContext) -> Result<()> {
    let transactions = ctx.client.list_transactions().await?;
    let limit = ctx.config.preferences.recent_limit;

    let totals = summary::totals(&transactions);
    let (income_pct, expense_pct) = summary::split_percentages(&totals);
    let heads = summary::head_breakdown(&transactions);
    let recent_income = summary::recent(&transactions, TransactionKind::Income, limit);
    let recent_expenses = summary::recent(&transactions, TransactionKind::Expense, limit);

    if ctx.format == OutputFormat::Json {
        let summary = DashboardSummary {
            totals,
            income_pct,
            expense_pct,
            heads,
            recent_income,
            recent_expenses,
        };
        println!("{}", json::format_json(&summary)?);
        return Ok(());
    }

    println!("{}\n", "Overview".bold());
    println!("  Income:   {}", format_amount(totals.income).green());
    println!("  Expenses: {}", format_amount(totals.expense).red());
    println!(
        "  Net:      {}",
        format_amount(totals.income - totals.expense).bold()
    );
    println!();
    println!(
        "Income vs expenses: {} / {}",
        format!("{income_pct}%").green(),
        format!("{expense_pct}%").red()
    );

    println!("\n{}", "Expenses by head".bold());
    let head_rows: Vec<HeadRow> = heads
        .into_iter()
        .map(|entry| HeadRow {
            head: entry.head,
            amount: format_amount(entry.amount),
        })
        .collect();
    println!("{}", table::format_table(&head_rows));

    println!("\n{}", "Recent expenses".bold());
    let expense_rows: Vec<RecentRow> = recent_expenses.iter().map(RecentRow::from).collect();
    println!("{}", table::format_table(&expense_rows));

    println!("\n{}", "Recent income".bold());
    let income_rows: Vec<RecentRow> = recent_income.iter().map(RecentRow::from).collect();
    println!("{}", table::format_table(&income_rows));

    Ok(())
}
