use crate::viewer::DocumentSource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};

/// Upper bound on a scanned answer paper.
const MAX_DOCUMENT_BYTES: usize = 64 * 1024 * 1024;

#[derive(Clone)]
pub struct DocumentClient {
    client: reqwest::Client,
}

impl DocumentClient {
    pub fn new(timeout: std::time::Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(std::time::Duration::from_secs(15))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/pdf, application/octet-stream;q=0.9"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("answer-paper-viewer"));
        headers
    }

    /// Download the document behind `url`
    pub async fn get_document(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .headers(self.build_headers())
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Document request failed with status {} for URL {}", status, url);
        }

        if let Some(len) = response.content_length() {
            if len as usize > MAX_DOCUMENT_BYTES {
                anyhow::bail!("Document is too large ({} bytes)", len);
            }
        }

        let bytes = response
            .bytes()
            .await
            .context("Failed to read document body")?;

        if bytes.len() > MAX_DOCUMENT_BYTES {
            anyhow::bail!("Document is too large ({} bytes)", bytes.len());
        }

        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl DocumentSource for DocumentClient {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.get_document(url).await
    }
}
