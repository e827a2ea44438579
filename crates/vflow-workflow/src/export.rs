//! Model export phase.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::info;
use uuid::Uuid;

use vflow_client::{ClientError, TrainingClient};
use vflow_models::{Export, ExportPlatform};

use crate::error::{WorkflowError, WorkflowResult};

/// Export an iteration to a platform and download the artifact.
///
/// Each poll tick re-fetches the iteration's export list; an export is
/// requested only when none exists for the platform yet, so re-running
/// after an earlier export reuses it. The loop runs while the status is
/// `Exporting`; the artifact is downloaded only on `Done`.
pub async fn export_and_download(
    client: &TrainingClient,
    project_id: Uuid,
    iteration_id: Uuid,
    platform: &ExportPlatform,
    model_name: &str,
    output_dir: impl AsRef<Path>,
    poll_interval: Duration,
) -> WorkflowResult<PathBuf> {
    info!(platform = %platform, "Exporting model");

    let export = loop {
        let export = find_or_request(client, project_id, iteration_id, platform).await?;
        info!(platform = %platform, status = %export.status, "Export status");

        if !export.status.is_exporting() {
            break export;
        }
        tokio::time::sleep(poll_interval).await;
    };

    if !export.status.is_done() {
        return Err(WorkflowError::ExportFailed(export.status.as_str().to_string()));
    }

    let download_uri = export
        .download_uri
        .as_deref()
        .ok_or(ClientError::MissingDownloadUri)?;
    let dest = output_dir
        .as_ref()
        .join(platform.artifact_file_name(model_name));

    client.download_artifact(download_uri, &dest).await?;
    Ok(dest)
}

/// Reuse the platform's existing export or request a new one.
async fn find_or_request(
    client: &TrainingClient,
    project_id: Uuid,
    iteration_id: Uuid,
    platform: &ExportPlatform,
) -> WorkflowResult<Export> {
    let existing = client.exports(project_id, iteration_id).await?;
    match existing.into_iter().find(|e| e.platform == platform.name) {
        Some(export) => Ok(export),
        None => Ok(client
            .export_iteration(project_id, iteration_id, &platform.name)
            .await?),
    }
}
