//! Search analytics collaborator.
//!
//! - [`sink`]: The [`AnalyticsSink`] trait and the in-flight record job
//! - [`appwrite`]: REST implementation over an Appwrite collection

pub mod appwrite;
pub mod sink;

pub use appwrite::{AppwriteSettings, AppwriteSink, TRENDING_LIMIT};
pub use sink::{AnalyticsSink, RecordJob, RecordStage};
