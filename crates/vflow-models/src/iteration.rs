//! Training iterations and their status vocabulary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Iteration status as reported by the remote service.
///
/// The vocabulary is service-defined and treated as an opaque contract:
/// unknown values are carried through untouched. Only the states the
/// workflow keys off are given predicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IterationStatus(String);

impl IterationStatus {
    /// Training is still in progress.
    pub const TRAINING: &'static str = "Training";
    /// Training finished successfully.
    pub const COMPLETED: &'static str = "Completed";
    /// Training failed.
    pub const FAILED: &'static str = "Failed";

    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The poll loop keeps running exactly while this returns true.
    pub fn is_training(&self) -> bool {
        self.0 == Self::TRAINING
    }

    pub fn is_completed(&self) -> bool {
        self.0 == Self::COMPLETED
    }

    pub fn is_failed(&self) -> bool {
        self.0 == Self::FAILED
    }
}

impl std::fmt::Display for IterationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One training run of a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Iteration {
    /// Unique iteration identifier
    pub id: Uuid,
    /// Service-assigned iteration name
    pub name: String,
    /// Current status
    pub status: IterationStatus,
    /// Last modification time, used to pick the newest prior run
    pub last_modified: DateTime<Utc>,
    /// Name under which this iteration is published, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_name: Option<String>,
}
