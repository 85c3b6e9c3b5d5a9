//! Domain types shared between the REST client and the task binary.

mod context;
mod result;
mod run;

pub use context::ExecutionContext;
pub use result::{AttachmentReference, FailedTestCase, UploadOutcome};
pub use run::{RunFilter, RunId, TestRunSummary};
