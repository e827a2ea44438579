//! End-to-end training workflow orchestrator.
//!
//! This crate wires the phases together:
//! - Project resolution (fatal when missing)
//! - Tag synchronization against the local label list
//! - Batched dataset upload
//! - Training with status polling and publish
//! - Predictions against held-out images
//! - Interactive model export and artifact download

pub mod config;
pub mod console;
pub mod error;
pub mod export;
pub mod predict;
pub mod project;
pub mod run;
pub mod tags;
pub mod training;
pub mod upload;

pub use config::WorkflowConfig;
pub use console::{Console, ExportChoice};
pub use error::{WorkflowError, WorkflowResult};
pub use run::run;
pub use tags::TagSync;
pub use upload::UploadReport;
