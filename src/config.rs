use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_DOCUMENT_URL: &str = "https://www.w3.org/WAI/WCAG21/Techniques/pdf/img/table-word.pdf";
const DEFAULT_COLLEGE: &str = "National Institute of Technology";
const DEFAULT_SUBMIT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone)]
pub struct Config {
    /// Answer-paper URL; `{roll}` and `{subject}` are filled in per record.
    pub document_url: String,
    pub query_endpoint: Option<String>,
    pub query_token: Option<String>,
    pub outbox_path: PathBuf,
    pub catalog_path: Option<PathBuf>,
    pub submit_timeout: Duration,
    pub download_dir: PathBuf,
    pub college_name: String,
    pub log_path: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let submit_timeout = match get("ANSWER_VIEWER_SUBMIT_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .context("ANSWER_VIEWER_SUBMIT_TIMEOUT_SECS must be a whole number of seconds")?;
                if secs == 0 {
                    anyhow::bail!("ANSWER_VIEWER_SUBMIT_TIMEOUT_SECS must be greater than zero");
                }
                secs
            }
            None => DEFAULT_SUBMIT_TIMEOUT_SECS,
        };

        let query_endpoint = get("ANSWER_VIEWER_QUERY_ENDPOINT");
        if let Some(endpoint) = &query_endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                anyhow::bail!("ANSWER_VIEWER_QUERY_ENDPOINT must be an http(s) URL");
            }
        }

        Ok(Config {
            document_url: get("ANSWER_VIEWER_DOCUMENT_URL")
                .unwrap_or_else(|| DEFAULT_DOCUMENT_URL.to_string()),
            query_endpoint,
            query_token: get("ANSWER_VIEWER_QUERY_TOKEN"),
            outbox_path: get("ANSWER_VIEWER_OUTBOX")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("query_outbox.csv")),
            catalog_path: get("ANSWER_VIEWER_CATALOG").map(PathBuf::from),
            submit_timeout: Duration::from_secs(submit_timeout),
            download_dir: get("ANSWER_VIEWER_DOWNLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            college_name: get("ANSWER_VIEWER_COLLEGE")
                .unwrap_or_else(|| DEFAULT_COLLEGE.to_string()),
            log_path: get("ANSWER_VIEWER_LOG")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("answer_paper_viewer.log")),
        })
    }
}
