use thiserror::Error;

/// Failures surfaced to the viewer. None of them end the session; each leaves
/// the UI in a state the user can act on again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewerError {
    /// Local input check failed; nothing was sent anywhere.
    #[error("{0}")]
    Validation(String),

    /// The answer paper could not be fetched or understood.
    #[error("Failed to load document {url}: {reason}")]
    ResourceLoad { url: String, reason: String },

    /// The query reached the department collaborator and failed, or timed out.
    #[error("Query submission failed: {0}")]
    Submission(String),

    #[error("A query submission is already in progress")]
    SubmissionInFlight,

    /// Reference data could not be read or violates its invariants.
    #[error("Catalog error: {0}")]
    Catalog(String),
}

impl ViewerError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn resource_load(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::ResourceLoad {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub fn submission(reason: impl ToString) -> Self {
        Self::Submission(reason.to_string())
    }

    pub fn catalog(message: impl Into<String>) -> Self {
        Self::Catalog(message.into())
    }

    /// Whether the user can recover by repeating the same action.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ResourceLoad { .. } | Self::Submission(_))
    }
}

pub type Result<T> = std::result::Result<T, ViewerError>;
