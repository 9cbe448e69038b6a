//! Canonical key derivation.

use std::fmt;

/// Extension carried by the pipeline's media inputs.
const MEDIA_EXTENSION: &str = ".mp4";

/// Stable identifier for a logical video asset: the input object key with
/// the media extension stripped (e.g. `/input/show/ep01.mp4` →
/// `/input/show/ep01`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    /// Derive from a raw object key.
    ///
    /// Total and idempotent: keys without the media extension pass through
    /// unchanged, so deriving twice yields the same key.
    pub fn derive(object_key: &str) -> Self {
        match object_key.strip_suffix(MEDIA_EXTENSION) {
            Some(stem) => Self(stem.to_string()),
            None => Self(object_key.to_string()),
        }
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_media_extension() {
        let key = CanonicalKey::derive("/input/show/ep01.mp4");
        assert_eq!(key.as_str(), "/input/show/ep01");
    }

    #[test]
    fn test_other_extensions_unchanged() {
        let key = CanonicalKey::derive("/input/show/ep01.mov");
        assert_eq!(key.as_str(), "/input/show/ep01.mov");
    }

    #[test]
    fn test_idempotent() {
        let once = CanonicalKey::derive("/input/show/ep01.mp4");
        let twice = CanonicalKey::derive(once.as_str());
        assert_eq!(once, twice);
    }
}
