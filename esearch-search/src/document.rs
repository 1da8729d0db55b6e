//! Document addressing and payloads.

use crate::error::{EsError, Result};
use serde::{Deserialize, Serialize};

/// Schemaless JSON object used for documents, queries and update bodies.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// The (index, type, id) triple that identifies one document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentRef {
    /// Index name.
    pub index: String,
    /// Type name.
    pub doc_type: String,
    /// Document ID.
    pub id: String,
}

impl DocumentRef {
    /// Create a document reference.
    pub fn new(
        index: impl Into<String>,
        doc_type: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            index: index.into(),
            doc_type: doc_type.into(),
            id: id.into(),
        }
    }

    /// Fail with [`EsError::InvalidInput`] unless all three parts are non-empty.
    pub fn validate(&self) -> Result<()> {
        if self.index.is_empty() || self.doc_type.is_empty() || self.id.is_empty() {
            return Err(EsError::invalid_document(&self.index, &self.doc_type, &self.id));
        }
        Ok(())
    }
}

impl std::fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.index, self.doc_type, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(DocumentRef::new("idx", "test", "doc1").validate().is_ok());
        for (index, doc_type, id) in [("", "test", "doc1"), ("idx", "", "doc1"), ("idx", "test", "")] {
            let err = DocumentRef::new(index, doc_type, id).validate().unwrap_err();
            assert!(matches!(err, EsError::InvalidInput(_)));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(DocumentRef::new("idx", "test", "doc1").to_string(), "idx/test/doc1");
    }
}
