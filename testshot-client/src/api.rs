//! The `TestApi` seam
//!
//! Narrow trait over the three backend calls the task makes. The
//! resolver and uploader take `&dyn TestApi`, so the real client can be
//! swapped for an in-memory fake in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::results::AttachmentRequest;
use crate::TestClient;
use testshot_core::domain::{AttachmentReference, FailedTestCase, RunFilter, RunId, TestRunSummary};

/// Test-management backend operations used by the task
#[async_trait]
pub trait TestApi: Send + Sync {
    /// Query test runs created inside a time window, filtered by the
    /// identifiers in `filter`.
    async fn query_test_runs(
        &self,
        project: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        filter: &RunFilter,
    ) -> Result<Vec<TestRunSummary>>;

    /// List the failed results of a run.
    async fn get_failed_results(&self, project: &str, run_id: RunId)
    -> Result<Vec<FailedTestCase>>;

    /// Create an attachment on a test result.
    ///
    /// Returns `Ok(None)` when the backend accepted the call but
    /// created no attachment.
    async fn create_attachment(
        &self,
        project: &str,
        run_id: RunId,
        case_id: i32,
        request: AttachmentRequest,
    ) -> Result<Option<AttachmentReference>>;
}

#[async_trait]
impl TestApi for TestClient {
    async fn query_test_runs(
        &self,
        project: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        filter: &RunFilter,
    ) -> Result<Vec<TestRunSummary>> {
        TestClient::query_test_runs(self, project, from, to, filter).await
    }

    async fn get_failed_results(
        &self,
        project: &str,
        run_id: RunId,
    ) -> Result<Vec<FailedTestCase>> {
        TestClient::get_failed_results(self, project, run_id).await
    }

    async fn create_attachment(
        &self,
        project: &str,
        run_id: RunId,
        case_id: i32,
        request: AttachmentRequest,
    ) -> Result<Option<AttachmentReference>> {
        TestClient::create_attachment(self, project, run_id, case_id, request).await
    }
}
