//! Local dataset access for the VisionFlow training workflow.
//!
//! This crate provides:
//! - The on-disk dataset layout: a `tags.txt` label list, one folder of
//!   images per label, and per-image `normalizedLabel/*.txt` bounding-box
//!   files
//! - Loading labeled images with their parsed regions
//! - Fixed-size batching for upload

pub mod batch;
pub mod error;
pub mod loader;

pub use batch::{into_batches, UPLOAD_BATCH_SIZE};
pub use error::{DatasetError, DatasetResult};
pub use loader::{list_test_images, Dataset, LabeledImage};
