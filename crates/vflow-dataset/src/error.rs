//! Dataset error types.

use std::path::PathBuf;
use thiserror::Error;

use vflow_models::RegionParseError;

pub type DatasetResult<T> = Result<T, DatasetError>;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("tag list file not found: {0}")]
    TagListNotFound(PathBuf),

    #[error("label folder not found: {0}")]
    LabelFolderNotFound(PathBuf),

    #[error("label file not found for image: {0}")]
    LabelFileNotFound(PathBuf),

    #[error("malformed region in {path} line {line}: {source}")]
    MalformedRegion {
        path: PathBuf,
        line: usize,
        source: RegionParseError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
