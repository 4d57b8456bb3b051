//! Transaction command implementations

use colored::Colorize;
use tabled::Tabled;

use crate::cli::{CommandContext, OutputFormat};
use crate::client::{
    FinanceApi, NewTransaction, Transaction, TransactionKind, resolve_category, resolve_head,
    resolve_subcategory,
};
use crate::error::{ApiError, Result};
use crate::output::{format_amount, json, table};

/// Kind filter for `tx list`
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum KindFilter {
    Income,
    Expense,
}

impl From<KindFilter> for TransactionKind {
    fn from(filter: KindFilter) -> Self {
        match filter {
            KindFilter::Income => TransactionKind::Income,
            KindFilter::Expense => TransactionKind::Expense,
        }
    }
}

/// Transaction for table display
#[derive(Tabled)]
struct TxDisplay {
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "KIND")]
    kind: String,
    #[tabled(rename = "DETAIL")]
    detail: String,
    #[tabled(rename = "HEAD")]
    head: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
    #[tabled(rename = "UUID")]
    uuid: String,
}

impl From<&Transaction> for TxDisplay {
    fn from(tx: &Transaction) -> Self {
        let detail = tx
            .title
            .as_deref()
            .or(tx.source.as_deref())
            .unwrap_or("-")
            .to_string();

        Self {
            date: tx.date.map(|d| d.to_string()).unwrap_or_else(|| "-".into()),
            kind: tx.kind.to_string(),
            detail,
            head: tx.head.clone().unwrap_or_else(|| "-".into()),
            amount: format_amount(tx.amount),
            uuid: tx.uuid.clone(),
        }
    }
}

/// Run the tx list command
pub async fn list(
    ctx: &CommandContext,
    kind: Option<KindFilter>,
    head: Option<&str>,
) -> Result<()> {
    let mut transactions = ctx.client.list_transactions().await?;

    if let Some(kind) = kind {
        let kind: TransactionKind = kind.into();
        transactions.retain(|tx| tx.kind == kind);
    }
    if let Some(head) = head {
        transactions.retain(|tx| {
            tx.head
                .as_deref()
                .is_some_and(|h| h.eq_ignore_ascii_case(head))
        });
    }

    match ctx.format {
        OutputFormat::Table => {
            let rows: Vec<TxDisplay> = transactions.iter().map(TxDisplay::from).collect();
            println!("{}", table::format_table(&rows));
        }
        OutputFormat::Json => {
            println!("{}", json::format_json(&transactions)?);
        }
    }

    Ok(())
}

/// Run the tx add-income command
pub async fn add_income(
    ctx: &CommandContext,
    amount: f64,
    source: &str,
    description: Option<String>,
) -> Result<()> {
    let tx = NewTransaction::Income {
        source: source.to_string(),
        amount,
        description,
    };
    ctx.client.create_transaction(&tx).await?;

    println!(
        "{} Recorded income of {} from {}",
        "✓".green(),
        format_amount(amount).bold(),
        source.bold()
    );

    Ok(())
}

/// Run the tx add-expense command.
///
/// The taxonomy arguments accept uuids or names; names are resolved level
/// by level, so the category must live under the head and the subcategory
/// under the category.
pub async fn add_expense(
    ctx: &CommandContext,
    amount: f64,
    head: &str,
    category: &str,
    subcategory: &str,
    title: &str,
    description: Option<String>,
) -> Result<()> {
    let head = resolve_head(ctx.client.as_ref(), head).await?;
    let category = resolve_category(ctx.client.as_ref(), &head.uuid, category).await?;
    let subcategory =
        resolve_subcategory(ctx.client.as_ref(), &category.uuid, subcategory).await?;

    let tx = NewTransaction::Expense {
        head_id: head.uuid,
        category_id: category.uuid,
        subcategory_id: subcategory.uuid,
        title: title.to_string(),
        amount,
        description,
    };
    ctx.client.create_transaction(&tx).await?;

    println!(
        "{} Recorded expense of {} under {} / {} / {}",
        "✓".green(),
        format_amount(amount).bold(),
        head.name,
        category.name,
        subcategory.name
    );

    Ok(())
}

/// Run the tx update command
pub async fn update(
    ctx: &CommandContext,
    uuid: &str,
    amount: Option<f64>,
    title: Option<String>,
    description: Option<String>,
) -> Result<()> {
    let transactions = ctx.client.list_transactions().await?;
    let mut tx = transactions
        .into_iter()
        .find(|tx| tx.uuid == uuid)
        .ok_or_else(|| ApiError::NotFound(format!("Transaction '{}'", uuid)))?;

    if let Some(amount) = amount {
        tx.amount = amount;
    }
    if title.is_some() {
        tx.title = title;
    }
    if description.is_some() {
        tx.description = description;
    }

    ctx.client.update_transaction(uuid, &tx).await?;

    println!("{} Updated transaction {}", "✓".green(), uuid);
    Ok(())
}
