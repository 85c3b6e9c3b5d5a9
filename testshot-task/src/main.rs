//! Testshot Task
//!
//! Pipeline task that attaches failure screenshots to Azure DevOps
//! test results after an automated test run.
//!
//! Flow:
//! - Configuration: read and validate the pipeline environment
//! - Resolution: reduce the one-day runs query to a single run id
//! - Upload: match each failed case to its screenshot and attach it
//! - Report: emit exactly one terminal status to the agent
//!
//! Setup and resolution errors fail the task through the single
//! top-level handler below; per-screenshot problems only ever
//! downgrade the verdict to "succeeded with issues".

mod config;
mod reporter;
mod resolver;
mod store;
#[cfg(test)]
mod testutil;
mod uploader;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{AgentEnv, TaskConfig};
use crate::reporter::Reporter;
use crate::store::LocalScreenshots;
use testshot_client::{TestApi, TestClient};
use testshot_core::verdict::TaskReport;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "testshot_task=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let report = match run().await {
        Ok(report) => report,
        Err(e) => {
            error!("Task failed: {:#}", e);
            TaskReport::failed(format!("{:#}", e))
        }
    };

    std::process::exit(Reporter::complete(&report));
}

async fn run() -> Result<TaskReport> {
    let config = TaskConfig::load(&AgentEnv)?;
    info!(
        "Loaded configuration: organization={}, project={}, screenshot folder={}",
        config.organization, config.project, config.screenshot_folder
    );

    let client = Arc::new(TestClient::new(&config.organization, &config.access_token));

    let run_id = match resolver::resolve_run_id(client.as_ref(), &config.project, &config.context)
        .await
    {
        Ok(Some(run_id)) => run_id,
        Ok(None) => {
            return Ok(TaskReport::skipped(
                "Unsupported execution context, no test run to query.",
            ));
        }
        Err(e) => return Err(anyhow::Error::new(e).context("Could not resolve a test run")),
    };
    Reporter::debug(&format!("Resolved test run {}", run_id));

    let failed = client
        .get_failed_results(&config.project, run_id)
        .await
        .context("Could not fetch failed test results")?;

    let report = uploader::upload_screenshots(
        client as Arc<dyn TestApi>,
        Arc::new(LocalScreenshots),
        config.project,
        config.screenshot_folder,
        failed,
    )
    .await;

    Ok(report)
}
