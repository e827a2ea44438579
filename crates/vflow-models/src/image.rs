//! Image upload entries and batch wire types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::region::Region;

/// One image file queued for upload, with its tagged regions.
///
/// The wire format carries the file bytes base64-encoded inside the
/// JSON batch body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFileCreateEntry {
    /// File name, used by the service as the image name
    pub name: String,
    /// Raw file bytes (base64 on the wire)
    #[serde(with = "base64_bytes")]
    pub contents: Vec<u8>,
    /// Tags applied to the whole image (unused for detection projects)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag_ids: Vec<Uuid>,
    /// Tagged regions inside the image
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub regions: Vec<Region>,
}

impl ImageFileCreateEntry {
    /// Create an upload entry for a detection project (regions only).
    pub fn with_regions(name: impl Into<String>, contents: Vec<u8>, regions: Vec<Region>) -> Self {
        Self {
            name: name.into(),
            contents,
            tag_ids: Vec::new(),
            regions,
        }
    }
}

/// A fixed-size batch of upload entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFileCreateBatch {
    pub images: Vec<ImageFileCreateEntry>,
}

impl ImageFileCreateBatch {
    pub fn new(images: Vec<ImageFileCreateEntry>) -> Self {
        Self { images }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Per-image result inside a batch upload response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageCreateResult {
    /// Upload status string as reported by the service (e.g. "OK",
    /// "OKDuplicate", "ErrorRegionLimitExceed")
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

impl ImageCreateResult {
    /// Whether this image was stored (including duplicate re-uploads).
    pub fn is_ok(&self) -> bool {
        self.status == "OK" || self.status == "OKDuplicate"
    }
}

/// Response summary for one uploaded batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageCreateSummary {
    /// Whether the whole batch was accepted
    pub is_batch_successful: bool,
    #[serde(default)]
    pub images: Vec<ImageCreateResult>,
}

impl ImageCreateSummary {
    /// Count of images the service reported as duplicates.
    pub fn duplicate_count(&self) -> usize {
        self.images
            .iter()
            .filter(|i| i.status == "OKDuplicate")
            .count()
    }
}

/// Serde helper serializing `Vec<u8>` as standard base64.
mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
