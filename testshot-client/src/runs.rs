//! Test run query endpoint

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;

use crate::error::Result;
use crate::{TestClient, ValueList};
use testshot_core::domain::{RunFilter, TestRunSummary};

impl TestClient {
    /// Query test runs created inside a time window
    ///
    /// Always filters by build id; release and release-environment ids
    /// are added when the filter carries them. The backend caps the
    /// window at seven days, well above the one-day lookback the task
    /// uses.
    ///
    /// # Arguments
    /// * `project` - The team project name
    /// * `from` - Start of the window (inclusive)
    /// * `to` - End of the window (inclusive)
    /// * `filter` - Identifier filters derived from the execution context
    ///
    /// # Returns
    /// The matching run summaries, in backend order
    pub async fn query_test_runs(
        &self,
        project: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        filter: &RunFilter,
    ) -> Result<Vec<TestRunSummary>> {
        let mut query: Vec<(&str, String)> = vec![
            (
                "minLastUpdatedDate",
                from.to_rfc3339_opts(SecondsFormat::Secs, true),
            ),
            (
                "maxLastUpdatedDate",
                to.to_rfc3339_opts(SecondsFormat::Secs, true),
            ),
            ("buildIds", filter.build_id.to_string()),
        ];
        if let Some(release_id) = filter.release_id {
            query.push(("releaseIds", release_id.to_string()));
        }
        if let Some(env_id) = filter.release_environment_id {
            query.push(("releaseEnvIds", env_id.to_string()));
        }

        debug!(build_id = filter.build_id, "Querying test runs");

        let response = self.get(project, "runs").query(&query).send().await?;
        let list: ValueList<TestRunSummary> = self.handle_response(response).await?;

        debug!("Runs query returned {} run(s)", list.value.len());
        Ok(list.value)
    }
}
