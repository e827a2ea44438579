//! Dataset layout and labeled-image loading.

use std::path::{Path, PathBuf};

use tracing::debug;

use vflow_models::BoundingBox;

use crate::error::{DatasetError, DatasetResult};

/// File listing the labels, one per line, in processing order.
const TAG_LIST_FILE: &str = "tags.txt";

/// Per-label subfolder holding the normalized bounding-box files.
const LABEL_DIR: &str = "normalizedLabel";

/// An image file read from disk with its parsed bounding boxes.
///
/// Boxes are not yet associated with a remote tag; the workflow attaches
/// the tag id once the label is synchronized.
#[derive(Debug, Clone)]
pub struct LabeledImage {
    /// File name including extension
    pub file_name: String,
    /// Raw file bytes
    pub contents: Vec<u8>,
    /// Normalized bounding boxes from the co-located label file
    pub boxes: Vec<BoundingBox>,
}

/// A training dataset rooted at a local directory.
///
/// Layout: `<root>/tags.txt`, `<root>/<label>/*.jpg`,
/// `<root>/<label>/normalizedLabel/<stem>.txt`.
#[derive(Debug, Clone)]
pub struct Dataset {
    root: PathBuf,
}

impl Dataset {
    /// Open a dataset rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read the ordered label list from `tags.txt`.
    ///
    /// Line order is preserved; blank lines are skipped.
    pub async fn labels(&self) -> DatasetResult<Vec<String>> {
        let path = self.root.join(TAG_LIST_FILE);
        if !path.exists() {
            return Err(DatasetError::TagListNotFound(path));
        }

        let content = tokio::fs::read_to_string(&path).await?;
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }

    /// Load every image in a label's folder together with its regions.
    ///
    /// Each image `<stem>.<ext>` must have a `normalizedLabel/<stem>.txt`
    /// file holding one `left top width height` line per box. A missing or
    /// malformed label file is an error.
    pub async fn load_label_images(&self, label: &str) -> DatasetResult<Vec<LabeledImage>> {
        let folder = self.root.join(label);
        if !folder.is_dir() {
            return Err(DatasetError::LabelFolderNotFound(folder));
        }
        let label_dir = folder.join(LABEL_DIR);

        let mut image_paths = Vec::new();
        let mut entries = tokio::fs::read_dir(&folder).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                image_paths.push(entry.path());
            }
        }
        // Directory order is platform-dependent; keep uploads deterministic.
        image_paths.sort();

        let mut images = Vec::with_capacity(image_paths.len());
        for path in image_paths {
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string();
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default();

            let boxes = read_label_file(&label_dir.join(format!("{}.txt", stem))).await?;
            let contents = tokio::fs::read(&path).await?;

            debug!(
                image = %file_name,
                regions = boxes.len(),
                "Loaded labeled image"
            );
            images.push(LabeledImage {
                file_name,
                contents,
                boxes,
            });
        }

        Ok(images)
    }
}

/// Parse a normalized label file: one bounding box per line.
async fn read_label_file(path: &Path) -> DatasetResult<Vec<BoundingBox>> {
    if !path.exists() {
        return Err(DatasetError::LabelFileNotFound(path.to_path_buf()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let mut boxes = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let bbox = line
            .parse::<BoundingBox>()
            .map_err(|source| DatasetError::MalformedRegion {
                path: path.to_path_buf(),
                line: index + 1,
                source,
            })?;
        boxes.push(bbox);
    }
    Ok(boxes)
}

/// List the files of a test-image folder in name order.
pub async fn list_test_images(dir: impl AsRef<Path>) -> DatasetResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut paths = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_file() {
            paths.push(entry.path());
        }
    }
    paths.sort();
    Ok(paths)
}
