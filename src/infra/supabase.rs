use crate::app::ports::RemoteTablePort;
use crate::config::RemoteCredentials;
use crate::error::{IntelError, Result};
use crate::export::remote::RemoteInvestorRow;
use async_trait::async_trait;
use std::time::Duration;

/// PostgREST table client for a hosted Supabase project.
/// Config via env (see `RemoteCredentials::from_env`):
/// - SUPABASE_URL (e.g., https://xyzcompany.supabase.co)
/// - SUPABASE_SERVICE_ROLE_KEY (service role key)
pub struct SupabaseTable {
    client: reqwest::Client,
    endpoint: String,
    key: String,
    timeout: Duration,
}

impl SupabaseTable {
    pub fn new(credentials: RemoteCredentials, table: &str, timeout: Duration) -> Self {
        let endpoint = format!("{}/rest/v1/{}", credentials.url.trim_end_matches('/'), table);
        Self {
            client: reqwest::Client::new(),
            endpoint,
            key: credentials.key,
            timeout,
        }
    }

    async fn post<T: serde::Serialize + ?Sized>(
        &self,
        body: &T,
        query: &[(&str, &str)],
        prefer: &str,
    ) -> Result<()> {
        let resp = self
            .client
            .post(&self.endpoint)
            .header("apikey", &self.key)
            .header("Authorization", format!("Bearer {}", self.key))
            .header("Prefer", prefer)
            .query(query)
            .timeout(self.timeout)
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(IntelError::Api {
                message: format!("Supabase write failed: {} - {}", status, body),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteTablePort for SupabaseTable {
    async fn upsert(&self, rows: &[RemoteInvestorRow], on_conflict: &str) -> Result<()> {
        self.post(
            rows,
            &[("on_conflict", on_conflict)],
            "resolution=merge-duplicates,return=minimal",
        )
        .await
    }

    async fn insert(&self, row: &RemoteInvestorRow) -> Result<()> {
        self.post(row, &[], "return=minimal").await
    }
}
