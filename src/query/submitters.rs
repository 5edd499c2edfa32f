use crate::error::ViewerError;
use crate::models::QueryPayload;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::time::Duration;

/// The examination department's intake for queries. One call per submit;
/// any error is final for that attempt.
#[async_trait]
pub trait QuerySubmitter: Send + Sync {
    async fn submit(&self, payload: &QueryPayload) -> Result<()>;
}

/// Deliver a payload once, bounded by `timeout`. A timeout is a failed submission.
pub async fn deliver(
    submitter: &dyn QuerySubmitter,
    payload: &QueryPayload,
    timeout: Duration,
) -> std::result::Result<(), ViewerError> {
    match tokio::time::timeout(timeout, submitter.submit(payload)).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(ViewerError::submission(format!("{:#}", e))),
        Err(_) => Err(ViewerError::submission(format!(
            "timed out after {}s",
            timeout.as_secs_f32()
        ))),
    }
}

const OUTBOX_HEADERS: [&str; 10] = [
    "submitted_at",
    "student_name",
    "roll_number",
    "subject_code",
    "subject_name",
    "query_type",
    "question_no",
    "page_number",
    "subject_line",
    "description",
];

/// Appends queries to a local CSV file when no department endpoint is configured.
#[derive(Debug, Clone)]
pub struct OutboxSubmitter {
    path: PathBuf,
}

impl OutboxSubmitter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn append(&self, payload: &QueryPayload) -> Result<()> {
        let needs_header = std::fs::metadata(&self.path)
            .map(|m| m.len() == 0)
            .unwrap_or(true);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open outbox {}", self.path.display()))?;

        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if needs_header {
            wtr.write_record(OUTBOX_HEADERS)
                .context("Failed to write outbox headers")?;
        }

        wtr.write_record([
            Utc::now().to_rfc3339(),
            payload.student_name.clone(),
            payload.roll_number.clone(),
            payload.subject_code.clone(),
            payload.subject_name.clone(),
            payload.query_type.value().to_string(),
            payload.question_no.clone().unwrap_or_default(),
            payload
                .page_number
                .map(|p| p.to_string())
                .unwrap_or_default(),
            payload.subject_line.clone().unwrap_or_default(),
            payload.description.clone(),
        ])
        .context("Failed to write outbox record")?;

        wtr.flush().context("Failed to flush outbox")?;
        Ok(())
    }
}

#[async_trait]
impl QuerySubmitter for OutboxSubmitter {
    async fn submit(&self, payload: &QueryPayload) -> Result<()> {
        let this = self.clone();
        let payload = payload.clone();
        tokio::task::spawn_blocking(move || this.append(&payload))
            .await
            .context("Outbox writer task panicked")?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QueryType;

    fn payload(description: &str) -> QueryPayload {
        QueryPayload {
            student_name: "Amit Singh".to_string(),
            roll_number: "CS2021018".to_string(),
            subject_code: "CS601".to_string(),
            subject_name: "Database Management Systems".to_string(),
            query_type: QueryType::AnswerNotEvaluated,
            question_no: Some("7".to_string()),
            page_number: Some(5),
            subject_line: None,
            description: description.to_string(),
        }
    }

    #[tokio::test]
    async fn test_outbox_appends_rows_under_one_header() {
        let dir = tempfile::tempdir().unwrap();
        let outbox = OutboxSubmitter::new(dir.path().join("outbox.csv"));

        outbox.submit(&payload("SQL joins part missed")).await.unwrap();
        outbox.submit(&payload("page 5, second half")).await.unwrap();

        let mut rdr = csv::Reader::from_path(outbox.path()).unwrap();
        let headers = rdr.headers().unwrap().clone();
        assert_eq!(headers.get(2), Some("roll_number"));

        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get(5), Some("answer_not_evaluated"));
        assert_eq!(rows[0].get(7), Some("5"));
        assert_eq!(rows[1].get(9), Some("page 5, second half"));
    }

    #[tokio::test]
    async fn test_outbox_unwritable_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let outbox = OutboxSubmitter::new(dir.path().join("missing").join("outbox.csv"));
        let outcome = deliver(&outbox, &payload("x"), Duration::from_secs(5)).await;
        assert!(matches!(outcome, Err(ViewerError::Submission(_))));
    }
}
