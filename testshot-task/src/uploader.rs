//! Failure screenshot matcher & uploader
//!
//! For every failed case: derive the expected screenshot path, read the
//! file, and attach it to the test result. Cases are independent, so
//! every attempt is spawned up front and the verdict is only computed
//! once all of them have settled - an explicit launch-all, await-all
//! barrier rather than incremental judgment.
//!
//! Each spawned task returns its own `UploadOutcome`; there is no
//! shared accumulator to guard.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::store::ScreenshotStore;
use testshot_client::{AttachmentRequest, TestApi};
use testshot_core::domain::{FailedTestCase, RunId, UploadOutcome};
use testshot_core::screenshot::screenshot_path;
use testshot_core::verdict::{TaskReport, reduce_outcomes};

/// Uploads the screenshots of all failed cases and reduces the
/// settled outcomes to the task report
///
/// Per-case problems (missing file, rejected attachment, transport
/// error) become outcome values and are folded into the report; they
/// never propagate as errors.
pub async fn upload_screenshots(
    api: Arc<dyn TestApi>,
    store: Arc<dyn ScreenshotStore>,
    project: String,
    screenshot_folder: String,
    cases: Vec<FailedTestCase>,
) -> TaskReport {
    let total = cases.len();
    if total == 0 {
        info!("No test failures found");
        return reduce_outcomes(&[]);
    }

    info!("{} tests failed. Will proceed with screenshot upload.", total);

    let mut attempts = JoinSet::new();
    for case in cases {
        let api = Arc::clone(&api);
        let store = Arc::clone(&store);
        let project = project.clone();
        let folder = screenshot_folder.clone();
        attempts
            .spawn(async move { publish_case(api.as_ref(), store.as_ref(), &project, &folder, case).await });
    }

    // The barrier: every attempt settles before any outcome is judged.
    let mut outcomes = Vec::with_capacity(total);
    while let Some(joined) = attempts.join_next().await {
        match joined {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => {
                error!("Upload task panicked: {}", e);
                outcomes.push(UploadOutcome::AttachmentFailed);
            }
        }
    }

    let report = reduce_outcomes(&outcomes);
    info!(
        "Task completed. Published {}/{} screenshots",
        report.published, report.total
    );
    report
}

/// Handles one failed case end to end and returns its outcome.
async fn publish_case(
    api: &dyn TestApi,
    store: &dyn ScreenshotStore,
    project: &str,
    folder: &str,
    case: FailedTestCase,
) -> UploadOutcome {
    let img_path = screenshot_path(folder, &case.automated_test_storage, &case.automated_test_name);
    debug!("Searching for image at path: {}", img_path);

    let content = match store.read(&img_path).await {
        Ok(Some(content)) => content,
        Ok(None) => {
            debug!(
                "No screenshot found for {}/{}",
                case.automated_test_storage, case.automated_test_name
            );
            return UploadOutcome::MissingFile;
        }
        Err(e) => {
            warn!("Could not read screenshot {}: {}", img_path, e);
            return UploadOutcome::MissingFile;
        }
    };

    if !case.has_resolved_run() {
        // Nothing to attach to; skip without touching the API.
        debug!(
            "Result {} has no resolved run reference, skipping upload",
            case.id
        );
        return UploadOutcome::AttachmentFailed;
    }

    let request = AttachmentRequest::png(&case.automated_test_name, &content);
    match api
        .create_attachment(project, RunId(case.run_id), case.id, request)
        .await
    {
        Ok(Some(reference)) => {
            debug!("Attachment success -> {}", reference.url);
            UploadOutcome::Uploaded(reference)
        }
        Ok(None) => {
            warn!("Backend created no attachment for result {}", case.id);
            UploadOutcome::AttachmentFailed
        }
        Err(e) => {
            warn!("Attachment upload failed for result {}: {}", case.id, e);
            UploadOutcome::AttachmentFailed
        }
    }
}
