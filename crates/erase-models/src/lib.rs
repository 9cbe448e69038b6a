//! Shared data models for the SmartErase callback service.
//!
//! This crate provides:
//! - Serde-decodable callback payload types
//! - Canonical-key derivation for processed assets
//! - The static reconciliation plan (copy/delete template tables)

pub mod event;
pub mod key;
pub mod plan;

// Re-export common types
pub use event::{
    ActivityResult, CallbackPayload, EventDisposition, ScheduleTaskEvent, SCHEDULE_TASK_EVENT,
    SUCCESS_MESSAGE,
};
pub use key::CanonicalKey;
pub use plan::{ArtifactOperation, ReconciliationPlan, COPY_RENAMES, INTERMEDIATE_SUFFIXES};
