mod admin;
mod api;
mod catalog;
#[cfg(feature = "cli")]
mod cli;
mod config;
mod error;
mod export;
mod filters;
mod logging;
mod models;
mod orchestrator;
mod parser;
mod query;
mod resolver;
mod ui;
mod viewer;

use anyhow::{Context, Result};
use catalog::Catalog;
use config::Config;
use orchestrator::ViewOrchestrator;
use query::{OutboxSubmitter, QuerySubmitter};
use resolver::ExamRecordResolver;
use std::sync::Arc;
use tracing::info;
use ui::App;
use viewer::DocumentSource;

/// Answer papers can be large scans; give them longer than a query post.
const DOCUMENT_TIMEOUT_SECS: u64 = 60;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    #[cfg(feature = "cli")]
    let args = <cli::Args as clap::Parser>::parse();

    logging::init(&config.log_path)?;

    let catalog = Arc::new(load_catalog(&config)?);
    let resolver = ExamRecordResolver::from_catalog(Arc::clone(&catalog));

    #[cfg(feature = "cli")]
    if let Some(lookup) = args.lookup() {
        return cli::print_lookup(&resolver, &lookup);
    }

    // Initialize API clients
    let documents: Arc<dyn DocumentSource> = Arc::new(api::DocumentClient::new(
        std::time::Duration::from_secs(DOCUMENT_TIMEOUT_SECS),
    )?);
    let submitter: Arc<dyn QuerySubmitter> = match &config.query_endpoint {
        Some(endpoint) => {
            info!(endpoint = %endpoint, "queries go to the examination service");
            Arc::new(api::QueryClient::new(
                endpoint.clone(),
                config.query_token.clone(),
            )?)
        }
        None => {
            let outbox = OutboxSubmitter::new(config.outbox_path.clone());
            info!(outbox = %outbox.path().display(), "queries go to the local outbox");
            Arc::new(outbox)
        }
    };

    // Start TUI application
    let mut app = App::new(config, ViewOrchestrator::new(resolver), documents, submitter);
    app.run().await?;

    Ok(())
}

fn load_catalog(config: &Config) -> Result<Catalog> {
    match &config.catalog_path {
        Some(path) => {
            let catalog = parser::load_catalog(path)?;
            info!(
                path = %path.display(),
                students = catalog.students.len(),
                subjects = catalog.subjects.len(),
                "catalog loaded"
            );
            Ok(catalog)
        }
        None => Ok(Catalog::sample()),
    }
}
