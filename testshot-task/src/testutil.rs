//! In-memory fakes for the backend and the screenshot store.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::store::ScreenshotStore;
use testshot_client::{AttachmentRequest, Result, TestApi};
use testshot_core::domain::{
    AttachmentReference, FailedTestCase, RunFilter, RunId, TestRunSummary,
};

/// Fake backend that serves canned runs and records every call.
#[derive(Default)]
pub struct FakeApi {
    runs: Vec<i32>,
    state: Mutex<FakeApiState>,
}

#[derive(Default)]
struct FakeApiState {
    runs_queries: usize,
    last_filter: Option<RunFilter>,
    attachment_calls: usize,
    rejected_cases: HashSet<i32>,
}

impl FakeApi {
    pub fn with_runs(runs: Vec<i32>) -> Self {
        Self {
            runs,
            state: Mutex::default(),
        }
    }

    /// Makes the backend accept but not create attachments for a case.
    pub fn reject_attachments_for(&self, case_id: i32) {
        self.state.lock().unwrap().rejected_cases.insert(case_id);
    }

    pub fn runs_queries(&self) -> usize {
        self.state.lock().unwrap().runs_queries
    }

    pub fn last_filter(&self) -> Option<RunFilter> {
        self.state.lock().unwrap().last_filter.clone()
    }

    pub fn attachment_calls(&self) -> usize {
        self.state.lock().unwrap().attachment_calls
    }
}

#[async_trait]
impl TestApi for FakeApi {
    async fn query_test_runs(
        &self,
        _project: &str,
        _from: DateTime<Utc>,
        _to: DateTime<Utc>,
        filter: &RunFilter,
    ) -> Result<Vec<TestRunSummary>> {
        let mut state = self.state.lock().unwrap();
        state.runs_queries += 1;
        state.last_filter = Some(filter.clone());
        Ok(self
            .runs
            .iter()
            .map(|id| TestRunSummary {
                id: RunId(*id),
                name: None,
                state: None,
                completed_date: None,
            })
            .collect())
    }

    async fn get_failed_results(
        &self,
        _project: &str,
        _run_id: RunId,
    ) -> Result<Vec<FailedTestCase>> {
        Ok(Vec::new())
    }

    async fn create_attachment(
        &self,
        _project: &str,
        run_id: RunId,
        case_id: i32,
        _request: AttachmentRequest,
    ) -> Result<Option<AttachmentReference>> {
        let mut state = self.state.lock().unwrap();
        state.attachment_calls += 1;
        if state.rejected_cases.contains(&case_id) {
            return Ok(None);
        }
        Ok(Some(AttachmentReference {
            id: case_id as i64,
            url: format!("https://dev.azure.com/fake/run/{}/attachment/{}", run_id, case_id),
        }))
    }
}

/// Fake screenshot store backed by a path map.
#[derive(Default)]
pub struct FakeStore {
    files: HashMap<String, Vec<u8>>,
}

impl FakeStore {
    pub fn insert(&mut self, path: &str, content: &[u8]) {
        self.files.insert(path.to_string(), content.to_vec());
    }
}

#[async_trait]
impl ScreenshotStore for FakeStore {
    async fn read(&self, path: &str) -> std::io::Result<Option<Vec<u8>>> {
        Ok(self.files.get(path).cloned())
    }
}
