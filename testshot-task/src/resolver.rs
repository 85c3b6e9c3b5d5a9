//! Run resolver
//!
//! Reduces the time-bounded runs query to exactly one run id. The
//! lookback is a fixed day: a run attached to the current build was
//! created at most a few hours ago, and the short window keeps the
//! query cheap on busy projects.

use chrono::{DateTime, NaiveTime, TimeDelta, Utc};
use thiserror::Error;
use tracing::{debug, warn};

use testshot_client::{ClientError, TestApi};
use testshot_core::domain::{ExecutionContext, RunFilter, RunId};

/// Errors raised while resolving the test run.
///
/// Distinct from setup failures: resolution only runs after
/// authentication and configuration have succeeded.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The query window contained no matching run
    #[error("No test run found for build {build_id} within the last day")]
    NoRunFound { build_id: i32 },

    /// The runs query itself failed
    #[error(transparent)]
    Api(#[from] ClientError),
}

/// Resolves the test run the current pipeline invocation belongs to
///
/// Queries runs created between yesterday midnight (UTC) and now,
/// filtered by the identifiers the execution context carries.
///
/// # Returns
/// - `Ok(Some(id))` - the resolved run. With multiple matches the
///   highest numeric id wins: when a build is re-queued or a run is
///   duplicated, the most recently created run is assumed
///   authoritative.
/// - `Ok(None)` - the context is unsupported; logged, not an error.
/// - `Err(ResolveError::NoRunFound)` - the window had no match.
pub async fn resolve_run_id(
    api: &dyn TestApi,
    project: &str,
    context: &ExecutionContext,
) -> Result<Option<RunId>, ResolveError> {
    let Some(filter) = RunFilter::from_context(context) else {
        let host_type = match context {
            ExecutionContext::Unsupported { host_type } => host_type.as_str(),
            _ => "unknown",
        };
        warn!(
            "Unsupported execution context '{}', cannot resolve a test run",
            host_type
        );
        return Ok(None);
    };

    let (from, to) = query_window(Utc::now());
    let runs = api.query_test_runs(project, from, to, &filter).await?;

    let Some(newest) = runs.iter().map(|run| run.id).max() else {
        return Err(ResolveError::NoRunFound {
            build_id: filter.build_id,
        });
    };

    if runs.len() > 1 {
        warn!(
            "{} test runs matched the query window, using newest run {}",
            runs.len(),
            newest
        );
    } else {
        debug!("Resolved test run {}", newest);
    }

    Ok(Some(newest))
}

/// The fixed one-day lookback: [yesterday 00:00 UTC, now].
fn query_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let yesterday = (now - TimeDelta::days(1)).date_naive();
    let from = yesterday.and_time(NaiveTime::MIN).and_utc();
    (from, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::FakeApi;
    use chrono::TimeZone;

    #[tokio::test]
    async fn test_single_run_resolves_to_its_id() {
        let api = FakeApi::with_runs(vec![7]);
        let context = ExecutionContext::Build { build_id: 42 };
        let resolved = resolve_run_id(&api, "web-app", &context).await.unwrap();
        assert_eq!(resolved, Some(RunId(7)));
    }

    #[tokio::test]
    async fn test_newest_id_wins_among_many() {
        let api = FakeApi::with_runs(vec![5, 9, 3]);
        let context = ExecutionContext::Build { build_id: 42 };
        let resolved = resolve_run_id(&api, "web-app", &context).await.unwrap();
        assert_eq!(resolved, Some(RunId(9)));
    }

    #[tokio::test]
    async fn test_zero_runs_is_no_run_found() {
        let api = FakeApi::with_runs(vec![]);
        let context = ExecutionContext::Build { build_id: 42 };
        let err = resolve_run_id(&api, "web-app", &context).await.unwrap_err();
        assert!(matches!(err, ResolveError::NoRunFound { build_id: 42 }));
    }

    #[tokio::test]
    async fn test_unsupported_context_resolves_to_none() {
        let api = FakeApi::with_runs(vec![7]);
        let context = ExecutionContext::Unsupported {
            host_type: "checklist".to_string(),
        };
        let resolved = resolve_run_id(&api, "web-app", &context).await.unwrap();
        assert_eq!(resolved, None);
        // Unsupported contexts never reach the backend.
        assert_eq!(api.runs_queries(), 0);
    }

    #[tokio::test]
    async fn test_release_context_passes_release_filters() {
        let api = FakeApi::with_runs(vec![7]);
        let context = ExecutionContext::Release {
            build_id: 42,
            release_id: 9,
            release_environment_id: 4,
        };
        resolve_run_id(&api, "web-app", &context).await.unwrap();
        let filter = api.last_filter().expect("query must have been issued");
        assert_eq!(filter.build_id, 42);
        assert_eq!(filter.release_id, Some(9));
        assert_eq!(filter.release_environment_id, Some(4));
    }

    #[test]
    fn test_query_window_starts_yesterday_midnight() {
        let now = Utc.with_ymd_and_hms(2026, 8, 25, 14, 30, 0).unwrap();
        let (from, to) = query_window(now);
        assert_eq!(from, Utc.with_ymd_and_hms(2026, 8, 24, 0, 0, 0).unwrap());
        assert_eq!(to, now);
    }
}
