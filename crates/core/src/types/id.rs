//! Store-assigned document identifier.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error parsing a [`DocumentId`] from request text.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid document id: {0}")]
pub struct DocumentIdError(#[from] uuid::Error);

/// Opaque identifier assigned by the document store.
///
/// Wraps a UUID so handler code cannot mix up document ids with the other
/// string-shaped values floating around (collection names, category slugs).
/// Serializes as the plain UUID string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Wrap a store-assigned UUID.
    #[must_use]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Parse an id echoed back by a client (e.g. an order id).
    ///
    /// # Errors
    ///
    /// Returns [`DocumentIdError`] if the input is not a valid UUID.
    pub fn parse(s: &str) -> Result<Self, DocumentIdError> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for DocumentId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::str::FromStr for DocumentId {
    type Err = DocumentIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        let id = DocumentId::new(Uuid::new_v4());
        let parsed = DocumentId::parse(&id.to_string()).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(DocumentId::parse("not-a-uuid").is_err());
        assert!(DocumentId::parse("").is_err());
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = DocumentId::parse("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"67e55044-10b1-426f-9247-bb680e5fe0c8\"");

        let back: DocumentId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
