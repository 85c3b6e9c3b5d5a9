//! Task outcome reporter
//!
//! Azure Pipelines reads task status from `##vso` logging commands on
//! stdout; the agent parses them out of the log stream. The reporter is
//! the task's sole externally observable result besides the uploaded
//! attachments, and exactly one completion command is emitted per
//! invocation.

use testshot_core::verdict::{TaskReport, TaskVerdict};

/// Formats the terminal `task.complete` logging command.
pub fn completion_command(report: &TaskReport) -> String {
    format!(
        "##vso[task.complete result={};]{}",
        report.verdict.as_str(),
        report.message
    )
}

/// Formats a `task.debug` logging command.
pub fn debug_command(message: &str) -> String {
    format!("##vso[task.debug]{}", message)
}

/// Writes logging commands to the agent via stdout.
pub struct Reporter;

impl Reporter {
    /// Emits the terminal status and returns the process exit code.
    ///
    /// Only `Failed` exits non-zero; `SucceededWithIssues` and
    /// `Skipped` are pipeline-visible but do not break the job.
    pub fn complete(report: &TaskReport) -> i32 {
        println!("{}", completion_command(report));
        match report.verdict {
            TaskVerdict::Failed => 1,
            _ => 0,
        }
    }

    /// Emits a debug diagnostic visible when the pipeline runs with
    /// system diagnostics enabled.
    pub fn debug(message: &str) {
        println!("{}", debug_command(message));
    }
}
