//! Static reconciliation plan for finalized assets.
//!
//! The upstream erase job writes every output under a numeric activity
//! suffix. The plan renames the outputs a human-facing system expects and
//! purges every intermediate byproduct, including ones never copied (the
//! English master `.mp4`/`.vtt` sources are deleted outright). The
//! activity-ID scheme is fixed per deployment, so both tables are constant
//! data rather than discovered at runtime.

use crate::key::CanonicalKey;

/// Intermediate-suffix → final-suffix rename table.
pub const COPY_RENAMES: [(&str, &str); 4] = [
    ("_smarterase_20100.mp4", ".mp4"),
    ("_smarterase_102.vtt", "_en.vtt"),
    ("_smarterase_20108_id.vtt", "_id.vtt"),
    ("_smarterase_20107_zh-TW.vtt", "_zh.vtt"),
];

/// Intermediate artifacts purged once all copies have been attempted.
pub const INTERMEDIATE_SUFFIXES: [&str; 7] = [
    "_smarterase_102.mp4",
    "_smarterase_20100.mp4",
    "_smarterase_102.vtt",
    "_smarterase_20108.vtt",
    "_smarterase_20108_id.vtt",
    "_smarterase_20107.vtt",
    "_smarterase_20107_zh-TW.vtt",
];

/// One storage operation in a reconciliation plan.
///
/// Keys are built only from the canonical key plus the constant suffix
/// tables, never from free-form payload fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactOperation {
    Copy { source: String, destination: String },
    Delete { key: String },
}

/// Ordered operations that finalize one asset.
///
/// Invariant: all copies come before all deletes. The delete set includes
/// copy sources, so reordering would delete objects a copy still reads.
#[derive(Debug, Clone)]
pub struct ReconciliationPlan {
    operations: Vec<ArtifactOperation>,
}

impl ReconciliationPlan {
    /// Build the fixed plan for one canonical key. Never fails.
    pub fn for_key(key: &CanonicalKey) -> Self {
        let mut operations =
            Vec::with_capacity(COPY_RENAMES.len() + INTERMEDIATE_SUFFIXES.len());

        for (source_suffix, destination_suffix) in COPY_RENAMES {
            operations.push(ArtifactOperation::Copy {
                source: format!("{}{}", key, source_suffix),
                destination: format!("{}{}", key, destination_suffix),
            });
        }

        for suffix in INTERMEDIATE_SUFFIXES {
            operations.push(ArtifactOperation::Delete {
                key: format!("{}{}", key, suffix),
            });
        }

        Self { operations }
    }

    /// All operations in execution order.
    pub fn operations(&self) -> &[ArtifactOperation] {
        &self.operations
    }

    /// Copy pairs `(source, destination)` in plan order.
    pub fn copies(&self) -> impl Iterator<Item = (&str, &str)> {
        self.operations.iter().filter_map(|op| match op {
            ArtifactOperation::Copy {
                source,
                destination,
            } => Some((source.as_str(), destination.as_str())),
            ArtifactOperation::Delete { .. } => None,
        })
    }

    /// Keys covered by the single batch delete.
    pub fn delete_keys(&self) -> Vec<String> {
        self.operations
            .iter()
            .filter_map(|op| match op {
                ArtifactOperation::Delete { key } => Some(key.clone()),
                ArtifactOperation::Copy { .. } => None,
            })
            .collect()
    }
}
