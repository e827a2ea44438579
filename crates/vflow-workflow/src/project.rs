//! Project resolution phase.

use tracing::info;

use vflow_client::TrainingClient;
use vflow_models::Project;

use crate::error::{WorkflowError, WorkflowResult};

/// Look up a project by exact name.
///
/// A missing project is fatal; the workflow never creates one. On success
/// the project's domain is fetched and reported.
pub async fn resolve_project(client: &TrainingClient, name: &str) -> WorkflowResult<Project> {
    let projects = client.projects().await?;
    let project = projects
        .into_iter()
        .find(|p| p.name == name)
        .ok_or_else(|| WorkflowError::ProjectNotFound(name.to_string()))?;

    let domain = client.domain(project.settings.domain_id).await?;
    info!(
        project = %project.name,
        domain = %domain.name,
        domain_type = %domain.domain_type,
        "Found project in workspace"
    );

    Ok(project)
}
