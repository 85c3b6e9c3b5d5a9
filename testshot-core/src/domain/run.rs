//! Test run domain types

use serde::{Deserialize, Serialize};

use crate::domain::ExecutionContext;

/// Numeric identifier of a test run.
///
/// Azure DevOps test run ids are plain integers; the newtype keeps them
/// from being confused with build or result ids in signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub i32);

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Shallow summary of a test run, as returned by the runs query.
///
/// Read-only; the task never mutates runs, it only picks one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRunSummary {
    pub id: RunId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub completed_date: Option<chrono::DateTime<chrono::Utc>>,
}

/// Identifier filters applied to the time-bounded runs query.
///
/// The build id is always present; the release ids are only set when
/// the task runs from a release pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunFilter {
    pub build_id: i32,
    pub release_id: Option<i32>,
    pub release_environment_id: Option<i32>,
}

impl RunFilter {
    /// Derives the query filter from an execution context.
    ///
    /// Returns `None` for unsupported contexts, which the resolver
    /// reports as "no run id" rather than an error.
    pub fn from_context(context: &ExecutionContext) -> Option<Self> {
        match context {
            ExecutionContext::Build { build_id } => Some(Self {
                build_id: *build_id,
                release_id: None,
                release_environment_id: None,
            }),
            ExecutionContext::Release {
                build_id,
                release_id,
                release_environment_id,
            } => Some(Self {
                build_id: *build_id,
                release_id: Some(*release_id),
                release_environment_id: Some(*release_environment_id),
            }),
            ExecutionContext::Unsupported { .. } => None,
        }
    }
}
