use crate::error::ViewerError;
use crate::parser;
use async_trait::async_trait;

/// Where the answer paper currently stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DocumentStatus {
    #[default]
    Idle,
    Loading {
        url: String,
    },
    Ready {
        url: String,
        num_pages: u32,
    },
    Failed {
        url: String,
        reason: String,
    },
}

impl DocumentStatus {
    pub fn url(&self) -> Option<&str> {
        match self {
            DocumentStatus::Idle => None,
            DocumentStatus::Loading { url }
            | DocumentStatus::Ready { url, .. }
            | DocumentStatus::Failed { url, .. } => Some(url),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, DocumentStatus::Ready { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, DocumentStatus::Failed { .. })
    }
}

/// Anything that can hand back the raw bytes behind a document URL.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch(&self, url: &str) -> anyhow::Result<Vec<u8>>;
}

/// A fetched answer paper with its page count.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub url: String,
    pub bytes: Vec<u8>,
    pub num_pages: u32,
}

/// Fetch a document once and count its pages. No retries happen here; the
/// caller decides whether to load again.
pub async fn load_document(
    source: &dyn DocumentSource,
    url: &str,
) -> Result<LoadedDocument, ViewerError> {
    let bytes = source
        .fetch(url)
        .await
        .map_err(|e| ViewerError::resource_load(url, format!("{:#}", e)))?;

    let num_pages =
        parser::count_pdf_pages(&bytes).map_err(|e| ViewerError::resource_load(url, e))?;

    Ok(LoadedDocument {
        url: url.to_string(),
        bytes,
        num_pages,
    })
}

/// Expand a document URL template with the record's identity.
pub fn document_url(template: &str, roll_number: &str, subject_code: &str) -> String {
    template
        .replace("{roll}", roll_number)
        .replace("{subject}", subject_code)
}
