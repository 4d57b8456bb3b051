//! Mock finance API client for testing
//!
//! Configure responses via builder methods, then hand the mock to code that
//! takes a `&dyn FinanceApi`. Write operations are captured for assertions.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::{
    Category, Created, FinanceApi, Head, NewTransaction, Subcategory, Transaction,
};
use crate::error::{ApiError, Result};

/// Mock API client for unit tests
#[derive(Default)]
pub struct MockFinanceClient {
    heads: Mutex<Vec<Head>>,
    /// head uuid -> categories
    categories: Mutex<HashMap<String, Vec<Category>>>,
    /// category uuid -> subcategories
    subcategories: Mutex<HashMap<String, Vec<Subcategory>>>,
    transactions: Mutex<Vec<Transaction>>,
    /// Error to return, consumed on first use
    error: Mutex<Option<ApiError>>,
    /// Captured create_transaction payloads
    created_transactions: Mutex<Vec<NewTransaction>>,
    /// Captured update_transaction payloads
    updated_transactions: Mutex<Vec<(String, Transaction)>>,
}

impl MockFinanceClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_heads(self, heads: Vec<Head>) -> Self {
        *self.heads.lock().expect("mock lock") = heads;
        self
    }

    pub fn with_categories(self, head_uuid: &str, categories: Vec<Category>) -> Self {
        self.categories
            .lock().expect("mock lock")
            .insert(head_uuid.to_string(), categories);
        self
    }

    pub fn with_subcategories(self, category_uuid: &str, subcategories: Vec<Subcategory>) -> Self {
        self.subcategories
            .lock().expect("mock lock")
            .insert(category_uuid.to_string(), subcategories);
        self
    }

    pub fn with_transactions(self, transactions: Vec<Transaction>) -> Self {
        *self.transactions.lock().expect("mock lock") = transactions;
        self
    }

    pub fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().expect("mock lock") = Some(error);
        self
    }

    /// Payloads passed to `create_transaction`
    pub fn created_transactions(&self) -> Vec<NewTransaction> {
        self.created_transactions.lock().expect("mock lock").clone()
    }

    /// Payloads passed to `update_transaction`
    pub fn updated_transactions(&self) -> Vec<(String, Transaction)> {
        self.updated_transactions.lock().expect("mock lock").clone()
    }

    fn take_error(&self) -> Option<ApiError> {
        self.error.lock().expect("mock lock").take()
    }
}

#[async_trait]
impl FinanceApi for MockFinanceClient {
    async fn login(&self, _email: &str, _password: &str) -> Result<String> {
        if let Some(err) = self.take_error() {
            return Err(err.into());
        }
        Ok("header.payload.signature".to_string())
    }

    async fn list_heads(&self) -> Result<Vec<Head>> {
        if let Some(err) = self.take_error() {
            return Err(err.into());
        }
        Ok(self.heads.lock().expect("mock lock").clone())
    }

    async fn create_head(&self, name: &str) -> Result<Created> {
        if let Some(err) = self.take_error() {
            return Err(err.into());
        }
        let mut heads = self.heads.lock().expect("mock lock");
        let uuid = format!("h-{}", heads.len() + 1);
        heads.push(Head {
            uuid: uuid.clone(),
            name: name.to_string(),
        });
        Ok(Created { uuid })
    }

    async fn list_categories(&self, head_uuid: &str) -> Result<Vec<Category>> {
        if let Some(err) = self.take_error() {
            return Err(err.into());
        }
        Ok(self
            .categories
            .lock()
            .expect("mock lock")
            .get(head_uuid)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_category(&self, head_uuid: &str, name: &str) -> Result<Created> {
        if let Some(err) = self.take_error() {
            return Err(err.into());
        }
        let mut categories = self.categories.lock().expect("mock lock");
        let entries = categories.entry(head_uuid.to_string()).or_default();
        let uuid = format!("c-{}", entries.len() + 1);
        entries.push(Category {
            uuid: uuid.clone(),
            name: name.to_string(),
        });
        Ok(Created { uuid })
    }

    async fn list_subcategories(&self, category_uuid: &str) -> Result<Vec<Subcategory>> {
        if let Some(err) = self.take_error() {
            return Err(err.into());
        }
        Ok(self
            .subcategories
            .lock()
            .expect("mock lock")
            .get(category_uuid)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_subcategory(&self, category_uuid: &str, name: &str) -> Result<Created> {
        if let Some(err) = self.take_error() {
            return Err(err.into());
        }
        let mut subcategories = self.subcategories.lock().expect("mock lock");
        let entries = subcategories.entry(category_uuid.to_string()).or_default();
        let uuid = format!("s-{}", entries.len() + 1);
        entries.push(Subcategory {
            uuid: uuid.clone(),
            name: name.to_string(),
        });
        Ok(Created { uuid })
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        if let Some(err) = self.take_error() {
            return Err(err.into());
        }
        Ok(self.transactions.lock().expect("mock lock").clone())
    }

    async fn create_transaction(&self, tx: &NewTransaction) -> Result<()> {
        if let Some(err) = self.take_error() {
            return Err(err.into());
        }
        self.created_transactions.lock().expect("mock lock").push(tx.clone());
        Ok(())
    }

    async fn update_transaction(&self, uuid: &str, tx: &Transaction) -> Result<()> {
        if let Some(err) = self.take_error() {
            return Err(err.into());
        }
        self.updated_transactions
            .lock()
            .expect("mock lock")
            .push((uuid.to_string(), tx.clone()));
        Ok(())
    }
}
