//! Tencent COS storage client, speaking the S3-compatible API.
//!
//! This crate provides:
//! - The [`ArtifactStore`] capability contract (`copy_object`, `batch_delete`)
//! - The production [`CosClient`] implementation backed by aws-sdk-s3

pub mod client;
pub mod error;
pub mod store;

pub use client::{CosClient, CosConfig};
pub use error::{StorageError, StorageResult};
pub use store::{ArtifactStore, BatchDeleteError, BatchDeleteOutcome};
