//! Task verdict reduction
//!
//! Folds the per-case upload outcomes into the single terminal status
//! the pipeline sees. The reduction is pure: it looks at the outcome
//! set and nothing else, so the policy is testable without any I/O.
//!
//! Per-screenshot problems never fail the task. A CI task should not
//! break the whole pipeline because some screenshots are absent, so
//! the worst a case can do is downgrade the verdict to
//! `SucceededWithIssues`. `Failed` is reserved for setup and
//! resolution errors raised before any upload is attempted.

use crate::domain::UploadOutcome;

/// Terminal status of the task, as understood by the pipeline agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskVerdict {
    Succeeded,
    SucceededWithIssues,
    Failed,
    Skipped,
}

impl TaskVerdict {
    /// The status name used by the agent's logging commands.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Succeeded => "Succeeded",
            Self::SucceededWithIssues => "SucceededWithIssues",
            Self::Failed => "Failed",
            Self::Skipped => "Skipped",
        }
    }
}

/// The aggregate result of one task invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskReport {
    pub verdict: TaskVerdict,
    /// Human-readable completion message
    pub message: String,
    /// Screenshots attached successfully
    pub published: usize,
    /// Failed cases considered
    pub total: usize,
}

impl TaskReport {
    /// Report for a setup or resolution error.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            verdict: TaskVerdict::Failed,
            message: message.into(),
            published: 0,
            total: 0,
        }
    }

    /// Report for an invocation that had nothing to do.
    pub fn skipped(message: impl Into<String>) -> Self {
        Self {
            verdict: TaskVerdict::Skipped,
            message: message.into(),
            published: 0,
            total: 0,
        }
    }
}

/// Reduces the full set of settled upload outcomes into a task report.
///
/// The decision only depends on three counts: total cases, missing
/// screenshots, and failed attachments. An empty set means no test
/// failed and the task skips; otherwise missing files and failed
/// attachments downgrade to `SucceededWithIssues` with a message that
/// distinguishes "some" from "all".
pub fn reduce_outcomes(outcomes: &[UploadOutcome]) -> TaskReport {
    let total = outcomes.len();
    if total == 0 {
        return TaskReport::skipped("No test failures found.");
    }

    let missing = outcomes
        .iter()
        .filter(|o| matches!(o, UploadOutcome::MissingFile))
        .count();
    let attach_failed = outcomes
        .iter()
        .filter(|o| matches!(o, UploadOutcome::AttachmentFailed))
        .count();
    let published = total - missing - attach_failed;

    if missing == 0 && attach_failed == 0 {
        return TaskReport {
            verdict: TaskVerdict::Succeeded,
            message: "All screenshots were published successfully".to_string(),
            published,
            total,
        };
    }

    let mut parts = Vec::new();
    if missing > 0 {
        parts.push(if missing == total {
            "All screenshots were missing."
        } else {
            "Some screenshots were missing."
        });
    }
    if attach_failed > 0 {
        parts.push(if attach_failed == total {
            "All attachments failed."
        } else {
            "Some attachments failed."
        });
    }

    TaskReport {
        verdict: TaskVerdict::SucceededWithIssues,
        message: parts.join(" "),
        published,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AttachmentReference;

    fn uploaded() -> UploadOutcome {
        UploadOutcome::Uploaded(AttachmentReference {
            id: 1,
            url: "https://dev.azure.com/org/attachment/1".to_string(),
        })
    }

    #[test]
    fn test_empty_set_skips() {
        let report = reduce_outcomes(&[]);
        assert_eq!(report.verdict, TaskVerdict::Skipped);
        assert_eq!(report.message, "No test failures found.");
        assert_eq!(report.total, 0);
    }

    #[test]
    fn test_all_uploaded_succeeds() {
        let report = reduce_outcomes(&[uploaded(), uploaded(), uploaded()]);
        assert_eq!(report.verdict, TaskVerdict::Succeeded);
        assert_eq!(report.message, "All screenshots were published successfully");
        assert_eq!(report.published, 3);
        assert_eq!(report.total, 3);
    }

    #[test]
    fn test_some_missing() {
        let report = reduce_outcomes(&[uploaded(), UploadOutcome::MissingFile, uploaded()]);
        assert_eq!(report.verdict, TaskVerdict::SucceededWithIssues);
        assert_eq!(report.message, "Some screenshots were missing.");
        assert_eq!(report.published, 2);
        assert_eq!(report.total, 3);
    }

    #[test]
    fn test_all_missing() {
        let report = reduce_outcomes(&[UploadOutcome::MissingFile, UploadOutcome::MissingFile]);
        assert_eq!(report.verdict, TaskVerdict::SucceededWithIssues);
        assert_eq!(report.message, "All screenshots were missing.");
        assert_eq!(report.published, 0);
    }

    #[test]
    fn test_some_attachments_failed() {
        let report = reduce_outcomes(&[uploaded(), UploadOutcome::AttachmentFailed]);
        assert_eq!(report.verdict, TaskVerdict::SucceededWithIssues);
        assert_eq!(report.message, "Some attachments failed.");
        assert_eq!(report.published, 1);
    }

    #[test]
    fn test_all_attachments_failed() {
        let report = reduce_outcomes(&[
            UploadOutcome::AttachmentFailed,
            UploadOutcome::AttachmentFailed,
        ]);
        assert_eq!(report.verdict, TaskVerdict::SucceededWithIssues);
        assert_eq!(report.message, "All attachments failed.");
    }

    #[test]
    fn test_missing_and_failed_combine() {
        let report = reduce_outcomes(&[
            uploaded(),
            UploadOutcome::MissingFile,
            UploadOutcome::AttachmentFailed,
        ]);
        assert_eq!(report.verdict, TaskVerdict::SucceededWithIssues);
        assert_eq!(
            report.message,
            "Some screenshots were missing. Some attachments failed."
        );
        assert_eq!(report.published, 1);
        assert_eq!(report.total, 3);
    }

    #[test]
    fn test_no_case_alone_fails_the_task() {
        let every_bad_outcome = [UploadOutcome::MissingFile, UploadOutcome::AttachmentFailed];
        for outcome in every_bad_outcome {
            let report = reduce_outcomes(&[outcome]);
            assert_ne!(report.verdict, TaskVerdict::Failed);
        }
    }
}
