//! Model exports and target platforms.

use serde::{Deserialize, Serialize};

/// Export status as reported by the remote service.
///
/// Same opaque-vocabulary treatment as [`crate::IterationStatus`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExportStatus(String);

impl ExportStatus {
    /// Conversion is still in progress.
    pub const EXPORTING: &'static str = "Exporting";
    /// Artifact is ready for download.
    pub const DONE: &'static str = "Done";
    /// Conversion failed.
    pub const FAILED: &'static str = "Failed";

    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The poll loop keeps running exactly while this returns true.
    pub fn is_exporting(&self) -> bool {
        self.0 == Self::EXPORTING
    }

    /// Downloads only occur in this state.
    pub fn is_done(&self) -> bool {
        self.0 == Self::DONE
    }

    pub fn is_failed(&self) -> bool {
        self.0 == Self::FAILED
    }
}

impl std::fmt::Display for ExportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An on-demand conversion of a trained iteration into a deployable
/// model artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Export {
    /// Target platform name
    pub platform: String,
    /// Current status
    pub status: ExportStatus,
    /// Artifact URL, present once the export is done
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_uri: Option<String>,
}

/// A target export platform: a service-side platform name plus the file
/// extension the downloaded artifact is saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPlatform {
    pub name: String,
    pub extension: String,
}

impl ExportPlatform {
    /// TensorFlow preset (zip archive).
    pub fn tensorflow() -> Self {
        Self {
            name: "TensorFlow".to_string(),
            extension: "zip".to_string(),
        }
    }

    /// CoreML preset.
    pub fn coreml() -> Self {
        Self {
            name: "CoreML".to_string(),
            extension: "mlmodel".to_string(),
        }
    }

    /// Free-form platform name and artifact extension.
    pub fn custom(name: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extension: extension.into(),
        }
    }

    /// File name the downloaded artifact is saved under.
    pub fn artifact_file_name(&self, model_name: &str) -> String {
        format!("{}_{}.{}", model_name, self.name, self.extension)
    }
}

impl std::fmt::Display for ExportPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
