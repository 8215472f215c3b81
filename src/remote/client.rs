//! Expense REST API Client
//!
//! HTTP client for the expense store's JSON resource:
//!
//! - `GET    /expenses`      list all records
//! - `POST   /expenses`      create a record, returns it with `_id`
//! - `DELETE /expense/{id}`  delete one record
//! - `DELETE /expenses`      delete every record
//!
//! Each operation makes exactly one request attempt.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::error::{RemoteError, RemoteResult};
use super::ExpenseStore;
use crate::model::{Expense, ExpenseDraft, ExpenseId};

/// Configuration for the REST store client
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the expense service (e.g., "http://localhost:8080")
    pub base_url: String,
    /// Optional per-request timeout; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            request_timeout: None,
        }
    }
}

impl StoreConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Builder method: set request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

/// Expense store backed by the REST service
pub struct RestExpenseStore {
    client: Client,
    config: StoreConfig,
}

impl RestExpenseStore {
    /// Create a new client with the given configuration
    pub fn new(config: StoreConfig) -> RemoteResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| RemoteError::Config(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn collection_url(&self) -> String {
        self.url("/expenses")
    }

    fn item_url(&self, id: &ExpenseId) -> String {
        self.url(&format!("/expense/{}", urlencoding::encode(id.as_str())))
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> RemoteResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| RemoteError::from_transport(e, &self.config.base_url))?;

        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(RemoteError::Status {
                status: status.as_u16(),
                message: text,
            })
        }
    }

    async fn decode<T: DeserializeOwned>(&self, response: Response) -> RemoteResult<T> {
        let body = response
            .text()
            .await
            .map_err(|e| RemoteError::from_transport(e, &self.config.base_url))?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ExpenseStore for RestExpenseStore {
    async fn list_expenses(&self) -> RemoteResult<Vec<Expense>> {
        let url = self.collection_url();
        tracing::debug!(%url, "GET expenses");

        let response = self.send(self.client.get(&url)).await?;
        let expenses: Vec<Expense> = self.decode(response).await?;

        tracing::debug!(count = expenses.len(), "Fetched expenses");
        Ok(expenses)
    }

    async fn create_expense(&self, draft: &ExpenseDraft) -> RemoteResult<Expense> {
        let url = self.collection_url();
        tracing::debug!(%url, date = %draft.date, category = %draft.category, "POST expense");

        let response = self.send(self.client.post(&url).json(draft)).await?;
        self.decode(response).await
    }

    async fn delete_expense(&self, id: &ExpenseId) -> RemoteResult<()> {
        let url = self.item_url(id);
        tracing::debug!(%url, "DELETE expense");

        self.send(self.client.delete(&url)).await?;
        Ok(())
    }

    async fn delete_all_expenses(&self) -> RemoteResult<()> {
        let url = self.collection_url();
        tracing::debug!(%url, "DELETE all expenses");

        self.send(self.client.delete(&url)).await?;
        Ok(())
    }
}
