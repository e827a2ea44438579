//! Training and publishing phase.

use std::time::Duration;

use tracing::{info, warn};
use uuid::Uuid;

use vflow_client::TrainingClient;
use vflow_models::Iteration;

use crate::error::{WorkflowError, WorkflowResult};

/// Trigger training and poll until the iteration leaves `Training`.
///
/// The iteration is re-fetched on every tick; the loop exits only when
/// the status is no longer `Training`.
pub async fn run_training(
    client: &TrainingClient,
    project_id: Uuid,
    poll_interval: Duration,
) -> WorkflowResult<Iteration> {
    let mut iteration = client.train_project(project_id).await?;

    while iteration.status.is_training() {
        info!(
            iteration = %iteration.name,
            status = %iteration.status,
            "Training in progress"
        );
        tokio::time::sleep(poll_interval).await;
        iteration = client.iteration(project_id, iteration.id).await?;
    }

    info!(
        iteration = %iteration.name,
        status = %iteration.status,
        "Training finished"
    );
    Ok(iteration)
}

/// Publish a trained iteration under the configured model name.
///
/// Publish failures are recovered: the service rejects a publish when
/// nothing changed since the last iteration, which leaves the previous
/// published model in place.
pub async fn publish_iteration(
    client: &TrainingClient,
    project_id: Uuid,
    iteration: &Iteration,
    publish_name: &str,
) {
    match client
        .publish_iteration(project_id, iteration.id, publish_name)
        .await
    {
        Ok(true) => {
            info!(iteration = %iteration.name, model = publish_name, "Iteration published");
        }
        Ok(false) => {
            warn!(iteration = %iteration.name, "Service declined to publish the iteration");
        }
        Err(e) => {
            warn!(
                iteration = %iteration.name,
                error = %e,
                "Publish failed (perhaps nothing changed since the last iteration?)"
            );
        }
    }
}

/// Select the most recently modified existing iteration.
///
/// Used when no new training was performed. An empty iteration list is
/// fatal: there is no model to predict against.
pub async fn latest_iteration(
    client: &TrainingClient,
    project_id: Uuid,
) -> WorkflowResult<Iteration> {
    let iteration = client
        .iterations(project_id)
        .await?
        .into_iter()
        .max_by_key(|i| i.last_modified)
        .ok_or(WorkflowError::NoIterations)?;

    info!(
        iteration = %iteration.name,
        status = %iteration.status,
        "Loaded existing iteration"
    );
    Ok(iteration)
}
