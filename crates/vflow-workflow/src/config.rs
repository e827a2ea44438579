//! Workflow configuration.

use std::path::PathBuf;
use std::time::Duration;

use vflow_client::ServiceCredentials;

use crate::error::{WorkflowError, WorkflowResult};

/// Configuration for one workflow run.
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    /// Service credentials (endpoint, key, prediction resource id)
    pub credentials: ServiceCredentials,
    /// Name of the project on the remote service (must already exist)
    pub project_name: String,
    /// Name the trained iteration is published under
    pub published_model_name: String,
    /// Dataset root: tag list, per-label image folders, label files
    pub dataset_dir: PathBuf,
    /// Folder of held-out images for the prediction phase
    pub test_images_dir: PathBuf,
    /// Folder exported model artifacts are downloaded into
    pub export_dir: PathBuf,
    /// Interval between training/export status polls
    pub poll_interval: Duration,
}

impl WorkflowConfig {
    /// Create config from environment variables.
    ///
    /// `VISION_ENDPOINT`, `VISION_KEY`, `VISION_RESOURCE_ID` and
    /// `VISION_PROJECT` are required; the rest have defaults.
    pub fn from_env() -> WorkflowResult<Self> {
        let endpoint = require_env("VISION_ENDPOINT")?;
        let key = require_env("VISION_KEY")?;
        let resource_id = require_env("VISION_RESOURCE_ID")?;
        let project_name = require_env("VISION_PROJECT")?;

        let credentials = ServiceCredentials::new(endpoint, key, resource_id)?;

        Ok(Self {
            credentials,
            published_model_name: std::env::var("PUBLISHED_MODEL_NAME")
                .unwrap_or_else(|_| format!("{}Model", project_name.replace(' ', ""))),
            project_name,
            dataset_dir: std::env::var("DATASET_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("dataset")),
            test_images_dir: std::env::var("TEST_IMAGES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("test")),
            export_dir: std::env::var("EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            poll_interval: Duration::from_millis(
                std::env::var("POLL_INTERVAL_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(1000),
            ),
        })
    }
}

fn require_env(name: &str) -> WorkflowResult<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(WorkflowError::config(format!("{} is not set", name))),
    }
}
