use crate::error::Result;
use crate::export::remote::RemoteInvestorRow;
use async_trait::async_trait;
use std::time::Duration;

// Acquisition-side ports
#[async_trait]
pub trait HttpClientPort: Send + Sync {
    async fn get(&self, request: &HttpGetRequest) -> Result<HttpGetResult>;
}

#[derive(Clone, Debug)]
pub struct HttpGetRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub timeout: Duration,
}

impl HttpGetRequest {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
            timeout,
        }
    }

    pub fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }
}

#[derive(Clone, Debug)]
pub struct HttpGetResult {
    pub status: u16,
    pub body: String,
}

impl HttpGetResult {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// Export-side ports
#[async_trait]
pub trait RemoteTablePort: Send + Sync {
    /// Inserts or updates all rows in one call, resolving conflicts on `on_conflict`.
    async fn upsert(&self, rows: &[RemoteInvestorRow], on_conflict: &str) -> Result<()>;

    /// Inserts a single row.
    async fn insert(&self, row: &RemoteInvestorRow) -> Result<()>;
}
