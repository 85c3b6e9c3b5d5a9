//! Failed test case results and attachment outcomes

use serde::{Deserialize, Serialize};

/// Sentinel run id carried by shallow results whose run reference was
/// never resolved by the backend.
const UNRESOLVED_RUN_ID: i32 = -1;

/// One automated test result with the Failed outcome.
///
/// Produced by the results query for the resolved run. The two
/// `automated_test_*` fields are the load-bearing contract for
/// screenshot matching: the on-device test framework writes
/// `<class>/<test>.png` and this record is the only place those names
/// come from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedTestCase {
    /// Result id within the run
    pub id: i32,
    /// Owning run reference; may be the `-1` unresolved sentinel
    #[serde(default = "default_run_id")]
    pub run_id: i32,
    /// Fully qualified test method name
    pub automated_test_name: String,
    /// Containing class name
    pub automated_test_storage: String,
}

fn default_run_id() -> i32 {
    UNRESOLVED_RUN_ID
}

impl FailedTestCase {
    /// Whether the owning run reference is usable for an upload.
    pub fn has_resolved_run(&self) -> bool {
        self.run_id != UNRESOLVED_RUN_ID
    }
}

/// Reference to a stored attachment, returned by a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentReference {
    pub id: i64,
    pub url: String,
}

/// What happened to one failed case's screenshot.
///
/// Every failed case maps to exactly one of these; the task verdict is
/// a pure reduction over the full set and inspects nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The screenshot was found and attached
    Uploaded(AttachmentReference),
    /// No file existed at the derived path
    MissingFile,
    /// The file existed but the attachment was not created
    AttachmentFailed,
}
