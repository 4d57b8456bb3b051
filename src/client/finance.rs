//! HTTP implementation of the finance backend client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, Method, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde::ser::Serialize;

use super::{
    Category, Created, FinanceApi, Head, NewTransaction, Subcategory, Transaction,
};
use crate::error::{ApiError, Result};

/// Error body shape used by the backend for every non-2xx response
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Finance backend HTTP client
pub struct FinanceClient {
    http: HttpClient,
    base_url: String,
    token: Option<String>,
}

impl FinanceClient {
    /// Create a client against the given API host
    pub fn new(api_host: String) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: api_host.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Attach the session token sent as the bearer credential
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn request<T: DeserializeOwned>(&self, method: Method, path: &str) -> Result<T> {
        let mut request = self.http.request(method.clone(), self.url(path));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        log::debug!("{} {}", method, path);
        let response = request.send().await.map_err(ApiError::from)?;
        Self::handle(response).await
    }

    async fn request_with_body<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let mut request = self.http.request(method.clone(), self.url(path)).json(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        log::debug!("{} {}", method, path);
        let response = request.send().await.map_err(ApiError::from)?;
        Self::handle(response).await
    }

    async fn handle<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            return response.json::<T>().await.map_err(|e| {
                ApiError::InvalidResponse(format!("Failed to parse response: {}", e)).into()
            });
        }

        match status {
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized.into()),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(error_message(response).await).into()),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Err(ApiError::BadRequest(error_message(response).await).into())
            }
            status if status.is_server_error() => {
                Err(ApiError::ServerError(error_message(response).await).into())
            }
            status => {
                Err(ApiError::InvalidResponse(format!("Unexpected status code: {}", status)).into())
            }
        }
    }
}

/// Extract the backend's `{"error": ...}` message, falling back to raw text
async fn error_message(response: Response) -> String {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => body.error,
        Err(_) if !text.is_empty() => text,
        Err(_) => format!("HTTP {}", status),
    }
}

#[async_trait]
impl FinanceApi for FinanceClient {
    async fn login(&self, email: &str, password: &str) -> Result<String> {
        #[derive(serde::Serialize)]
        struct LoginRequest<'a> {
            email: &'a str,
            password: &'a str,
        }

        #[derive(Deserialize)]
        struct LoginResponse {
            token: String,
        }

        let response = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&LoginRequest { email, password })
            .send()
            .await
            .map_err(ApiError::from)?;

        // A login rejection is a credential problem, not a stale session.
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ApiError::BadRequest(error_message(response).await).into());
        }

        let login: LoginResponse = Self::handle(response).await?;
        Ok(login.token)
    }

    async fn list_heads(&self) -> Result<Vec<Head>> {
        self.request(Method::GET, "/api/heads").await
    }

    async fn create_head(&self, name: &str) -> Result<Created> {
        self.request_with_body(Method::POST, "/api/heads", &serde_json::json!({ "name": name }))
            .await
    }

    async fn list_categories(&self, head_uuid: &str) -> Result<Vec<Category>> {
        self.request(Method::GET, &format!("/api/heads/{}/categories", head_uuid))
            .await
    }

    async fn create_category(&self, head_uuid: &str, name: &str) -> Result<Created> {
        self.request_with_body(
            Method::POST,
            &format!("/api/heads/{}/categories", head_uuid),
            &serde_json::json!({ "name": name }),
        )
        .await
    }

    async fn list_subcategories(&self, category_uuid: &str) -> Result<Vec<Subcategory>> {
        self.request(
            Method::GET,
            &format!("/api/categories/{}/subcategories", category_uuid),
        )
        .await
    }

    async fn create_subcategory(&self, category_uuid: &str, name: &str) -> Result<Created> {
        self.request_with_body(
            Method::POST,
            &format!("/api/categories/{}/subcategories", category_uuid),
            &serde_json::json!({ "name": name }),
        )
        .await
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        self.request(Method::GET, "/api/transactions").await
    }

    async fn create_transaction(&self, tx: &NewTransaction) -> Result<()> {
        let _: serde_json::Value = self
            .request_with_body(Method::POST, "/api/transactions", tx)
            .await?;
        Ok(())
    }

    async fn update_transaction(&self, uuid: &str, tx: &Transaction) -> Result<()> {
        let _: serde_json::Value = self
            .request_with_body(Method::PUT, &format!("/api/transactions/{}", uuid), tx)
            .await?;
        Ok(())
    }
}
