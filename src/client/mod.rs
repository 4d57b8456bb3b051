//! Finance backend API client

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ApiError, Result};

pub mod finance;
#[cfg(test)]
pub mod mock;

pub use finance::FinanceClient;
#[cfg(test)]
#[allow(unused_imports)]
pub use mock::MockFinanceClient;

/// Finance backend API trait
#[async_trait]
pub trait FinanceApi: Send + Sync {
    /// Exchange credentials for a session token
    async fn login(&self, email: &str, password: &str) -> Result<String>;

    /// List expense heads
    async fn list_heads(&self) -> Result<Vec<Head>>;

    /// Create an expense head
    async fn create_head(&self, name: &str) -> Result<Created>;

    /// List categories under a head
    async fn list_categories(&self, head_uuid: &str) -> Result<Vec<Category>>;

    /// Create a category under a head
    async fn create_category(&self, head_uuid: &str, name: &str) -> Result<Created>;

    /// List subcategories under a category
    async fn list_subcategories(&self, category_uuid: &str) -> Result<Vec<Subcategory>>;

    /// Create a subcategory under a category
    async fn create_subcategory(&self, category_uuid: &str, name: &str) -> Result<Created>;

    /// List all transactions for the signed-in user
    async fn list_transactions(&self) -> Result<Vec<Transaction>>;

    /// Record a new transaction
    async fn create_transaction(&self, tx: &NewTransaction) -> Result<()>;

    /// Replace an existing transaction
    async fn update_transaction(&self, uuid: &str, tx: &Transaction) -> Result<()>;
}

/// Top level of the expense taxonomy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Head {
    pub uuid: String,
    pub name: String,
}

/// Second level of the expense taxonomy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub uuid: String,
    pub name: String,
}

/// Third level of the expense taxonomy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subcategory {
    pub uuid: String,
    pub name: String,
}

/// Identity returned by create endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Created {
    pub uuid: String,
}

/// Whether a transaction adds to or draws from the balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Income => write!(f, "income"),
            TransactionKind::Expense => write!(f, "expense"),
        }
    }
}

/// A recorded transaction.
///
/// Expense entries carry the resolved taxonomy names and a title; income
/// entries carry a source. The backend omits whichever side does not apply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub uuid: String,

    #[serde(rename = "type")]
    pub kind: TransactionKind,

    pub amount: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Income source, e.g. "salary"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Expense title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Resolved head name for expenses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<String>,

    /// Resolved category name for expenses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Resolved subcategory name for expenses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,

    /// Transaction date (`YYYY-MM-DD`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// Payload for recording a transaction
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NewTransaction {
    Income {
        source: String,
        amount: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    Expense {
        head_id: String,
        category_id: String,
        subcategory_id: String,
        title: String,
        amount: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

/// Resolve a head given its uuid or (case-insensitive) name
pub async fn resolve_head(client: &dyn FinanceApi, input: &str) -> Result<Head> {
    let heads = client.list_heads().await?;
    heads
        .into_iter()
        .find(|h| h.uuid == input || h.name.eq_ignore_ascii_case(input))
        .ok_or_else(|| ApiError::NotFound(format!("Head '{}'", input)).into())
}

/// Resolve a category under a head given its uuid or name
pub async fn resolve_category(
    client: &dyn FinanceApi,
    head_uuid: &str,
    input: &str,
) -> Result<Category> {
    let categories = client.list_categories(head_uuid).await?;
    categories
        .into_iter()
        .find(|c| c.uuid == input || c.name.eq_ignore_ascii_case(input))
        .ok_or_else(|| ApiError::NotFound(format!("Category '{}'", input)).into())
}

/// Resolve a category by uuid or name without knowing its head, scanning
/// every head's categories
pub async fn resolve_category_anywhere(
    client: &dyn FinanceApi,
    input: &str,
) -> Result<Category> {
    for head in client.list_heads().await? {
        let categories = client.list_categories(&head.uuid).await?;
        if let Some(found) = categories
            .into_iter()
            .find(|c| c.uuid == input || c.name.eq_ignore_ascii_case(input))
        {
            return Ok(found);
        }
    }

    Err(ApiError::NotFound(format!("Category '{}'", input)).into())
}

/// Resolve a subcategory under a category given its uuid or name
pub async fn resolve_subcategory(
    client: &dyn FinanceApi,
    category_uuid: &str,
    input: &str,
) -> Result<Subcategory> {
    let subcategories = client.list_subcategories(category_uuid).await?;
    subcategories
        .into_iter()
        .find(|s| s.uuid == input || s.name.eq_ignore_ascii_case(input))
        .ok_or_else(|| ApiError::NotFound(format!("Subcategory '{}'", input)).into())
}
