//! Workflow error types.

use thiserror::Error;

pub type WorkflowResult<T> = Result<T, WorkflowError>;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("project '{0}' was not found in the workspace")]
    ProjectNotFound(String),

    #[error("project has no iterations to fall back to")]
    NoIterations,

    #[error("image batch #{batch} was rejected by the service")]
    BatchRejected { batch: usize },

    #[error("export ended in status '{0}'")]
    ExportFailed(String),

    #[error("client error: {0}")]
    Client(#[from] vflow_client::ClientError),

    #[error("dataset error: {0}")]
    Dataset(#[from] vflow_dataset::DatasetError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WorkflowError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
