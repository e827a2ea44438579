//! HTTP client for the remote object-detection training service.
//!
//! This crate provides:
//! - [`TrainingClient`]: projects, domains, tags, image batches, training,
//!   iterations, publishing and exports
//! - [`PredictionClient`]: detections against a published iteration
//! - Streaming download of export artifacts to disk
//!
//! Both clients authenticate with the same API key, sent under the header
//! name each API expects.

pub mod credentials;
pub mod error;
pub mod prediction;
pub mod training;

pub use credentials::ServiceCredentials;
pub use error::{ClientError, ClientResult};
pub use prediction::PredictionClient;
pub use training::TrainingClient;
