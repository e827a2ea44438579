//! Shared data models for the VisionFlow training workflow.
//!
//! This crate provides Serde-serializable types for:
//! - Projects, domains and tags on the remote training service
//! - Normalized bounding boxes and tagged regions
//! - Image upload entries and batches
//! - Training iterations and export artifacts
//! - Detection predictions

pub mod export;
pub mod image;
pub mod iteration;
pub mod prediction;
pub mod project;
pub mod region;
pub mod tag;

// Re-export common types
pub use export::{Export, ExportPlatform, ExportStatus};
pub use image::{ImageCreateResult, ImageCreateSummary, ImageFileCreateBatch, ImageFileCreateEntry};
pub use iteration::{Iteration, IterationStatus};
pub use prediction::{ImagePrediction, PredictionResponse};
pub use project::{Domain, Project, ProjectSettings};
pub use region::{BoundingBox, Region, RegionParseError};
pub use tag::Tag;
