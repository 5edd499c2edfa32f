use crate::models::QueryPayload;
use crate::query::QuerySubmitter;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};

/// Posts queries to the examination department's endpoint.
#[derive(Clone)]
pub struct QueryClient {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl QueryClient {
    pub fn new(endpoint: String, token: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(15))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            endpoint,
            token,
        })
    }

    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &self.token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))
                    .context("Query token is not a valid header value")?,
            );
        }
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("answer-paper-viewer"));
        Ok(headers)
    }

    pub async fn post_query(&self, payload: &QueryPayload) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .headers(self.build_headers()?)
            .json(payload)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", self.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "Query endpoint answered {}: {}",
                status,
                error_text.chars().take(200).collect::<String>()
            );
        }

        Ok(())
    }
}

#[async_trait]
impl QuerySubmitter for QueryClient {
    async fn submit(&self, payload: &QueryPayload) -> Result<()> {
        self.post_query(payload).await
    }
}
