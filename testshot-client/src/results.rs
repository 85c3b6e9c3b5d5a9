//! Failed result listing and attachment upload endpoints

use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::{TestClient, ValueList};
use testshot_core::domain::{AttachmentReference, FailedTestCase, RunId};
use testshot_core::screenshot::attachment_file_name;

/// Request body for creating a test result attachment.
///
/// The content travels base64-encoded inside the JSON body; there is no
/// multipart upload on this route.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentRequest {
    pub file_name: String,
    /// Base64-encoded file content
    pub stream: String,
    pub attachment_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl AttachmentRequest {
    /// Builds the attachment request for a failure screenshot.
    ///
    /// The published file name is `<test>.png`, matching the on-disk
    /// name so the attachment is recognizable in the result UI.
    pub fn png(test_name: &str, content: &[u8]) -> Self {
        Self {
            file_name: attachment_file_name(test_name),
            stream: STANDARD.encode(content),
            attachment_type: "GeneralAttachment".to_string(),
            comment: Some("Screenshot captured on test failure".to_string()),
        }
    }
}

/// Wire shape of one test case result row.
///
/// The run reference comes back as a shallow `{id: "..."}` object with
/// a string id; it is absent or unparsable on results whose run was
/// never resolved, which maps to the `-1` sentinel.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TestCaseResultRow {
    id: i32,
    #[serde(default)]
    test_run: Option<ShallowReference>,
    #[serde(default)]
    automated_test_name: Option<String>,
    #[serde(default)]
    automated_test_storage: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ShallowReference {
    id: String,
}

impl TestCaseResultRow {
    /// Maps the wire row to the domain record, if it names a test.
    ///
    /// Rows without an automated test name cannot be matched to a
    /// screenshot and are dropped with a diagnostic.
    fn into_failed_case(self) -> Option<FailedTestCase> {
        let run_id = self
            .test_run
            .and_then(|r| r.id.parse::<i32>().ok())
            .unwrap_or(-1);

        let (Some(automated_test_name), Some(automated_test_storage)) =
            (self.automated_test_name, self.automated_test_storage)
        else {
            debug!(result_id = self.id, "Result has no automated test name, skipping");
            return None;
        };

        Some(FailedTestCase {
            id: self.id,
            run_id,
            automated_test_name,
            automated_test_storage,
        })
    }
}

impl TestClient {
    /// List the failed results of a run
    ///
    /// The outcome filter is applied server-side, so the returned set
    /// is exactly the cases the task needs a screenshot for.
    ///
    /// # Arguments
    /// * `project` - The team project name
    /// * `run_id` - The resolved test run
    ///
    /// # Returns
    /// The failed cases, with unresolved run references mapped to `-1`
    pub async fn get_failed_results(
        &self,
        project: &str,
        run_id: RunId,
    ) -> Result<Vec<FailedTestCase>> {
        let route = format!("Runs/{}/results", run_id);
        let response = self
            .get(project, &route)
            .query(&[("outcomes", "Failed")])
            .send()
            .await?;

        let list: ValueList<TestCaseResultRow> = self.handle_response(response).await?;
        let cases: Vec<FailedTestCase> = list
            .value
            .into_iter()
            .filter_map(TestCaseResultRow::into_failed_case)
            .collect();

        debug!(run = %run_id, "Found {} failed case(s)", cases.len());
        Ok(cases)
    }

    /// Create an attachment on a test result
    ///
    /// # Arguments
    /// * `project` - The team project name
    /// * `run_id` - The run owning the result
    /// * `case_id` - The result id within the run
    /// * `request` - The attachment body (file name + base64 content)
    ///
    /// # Returns
    /// The stored attachment reference, or `None` when the backend
    /// accepted the call but created nothing (the upload-failed
    /// sentinel)
    pub async fn create_attachment(
        &self,
        project: &str,
        run_id: RunId,
        case_id: i32,
        request: AttachmentRequest,
    ) -> Result<Option<AttachmentReference>> {
        let route = format!("Runs/{}/Results/{}/attachments", run_id, case_id);
        let response = self.post(project, &route).json(&request).send().await?;

        self.handle_response(response).await
    }
}
