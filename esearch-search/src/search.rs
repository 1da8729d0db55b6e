//! Search results.

use crate::{
    document::DocumentRef,
    error::{EsError, Result},
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::value::RawValue;

/// Decoded `_search` response.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    /// Time the engine spent on the search, in milliseconds.
    pub took: i64,
    /// Matching documents.
    pub hits: Hits,
}

impl SearchResult {
    /// Decode a response body.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(EsError::Decode)
    }

    /// Total number of matches reported by the engine.
    pub fn total(&self) -> i64 {
        self.hits.total
    }

    /// Check if the page holds no hits.
    pub fn is_empty(&self) -> bool {
        self.hits.hits.is_empty()
    }

    /// Iterate over hits in rank order.
    pub fn iter(&self) -> std::slice::Iter<'_, Hit> {
        self.hits.hits.iter()
    }
}

/// The hit collection of a search response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Hits {
    /// Total number of matching documents.
    #[serde(default, deserialize_with = "deserialize_total")]
    pub total: i64,
    /// Highest score among the hits.
    #[serde(default)]
    pub max_score: Option<f64>,
    /// Hits in the order the engine ranked them.
    #[serde(default)]
    pub hits: Vec<Hit>,
}

/// A single search hit.
#[derive(Debug, Clone, Deserialize)]
pub struct Hit {
    /// Index holding the document.
    #[serde(rename = "_index")]
    pub index: String,
    /// Type of the document. Engines without types report `_doc`.
    #[serde(rename = "_type", default = "default_doc_type")]
    pub doc_type: String,
    /// Document ID.
    #[serde(rename = "_id")]
    pub id: String,
    /// Relevance score.
    #[serde(rename = "_score", default)]
    pub score: Option<f64>,
    #[serde(rename = "_source", default)]
    source: Option<Box<RawValue>>,
}

impl Hit {
    /// The source document exactly as the engine returned it.
    pub fn raw_source(&self) -> Option<&str> {
        self.source.as_deref().map(RawValue::get)
    }

    /// Decode the source document into a caller type.
    pub fn source_as<T: DeserializeOwned>(&self) -> Result<T> {
        let raw = self.raw_source().unwrap_or("null");
        serde_json::from_str(raw).map_err(EsError::Decode)
    }

    /// Reference to this hit's own document.
    pub fn document_ref(&self) -> DocumentRef {
        DocumentRef::new(&self.index, &self.doc_type, &self.id)
    }
}

fn default_doc_type() -> String {
    "_doc".to_string()
}

/// `hits.total` is a bare count on older engines and an object on newer ones.
#[derive(Deserialize)]
#[serde(untagged)]
enum Total {
    Count(i64),
    Object { value: i64 },
}

fn deserialize_total<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Total::deserialize(deserializer)? {
        Total::Count(count) => count,
        Total::Object { value } => value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Payload;
    use serde_json::json;

    const RESPONSE: &str = r#"{
        "took": 3,
        "timed_out": false,
        "hits": {
            "total": 2,
            "max_score": 1.5,
            "hits": [
                {"_index": "idx", "_type": "test", "_id": "doc1", "_score": 1.5,
                 "_source": {"owner": "User-1", "message": "hello",   "seen": false}},
                {"_index": "idx", "_type": "other", "_id": "doc2", "_score": null,
                 "_source": {"owner": "User-1", "nested": {"n": [1, 2.5, "x"]}}}
            ]
        }
    }"#;

    #[test]
    fn test_decode_search_response() {
        let result = SearchResult::from_slice(RESPONSE.as_bytes()).unwrap();
        assert_eq!(result.took, 3);
        assert_eq!(result.total(), 2);
        assert_eq!(result.hits.max_score, Some(1.5));

        let ids: Vec<&str> = result.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, ["doc1", "doc2"]);

        let second = &result.hits.hits[1];
        assert_eq!(second.doc_type, "other");
        assert_eq!(second.score, None);
        assert_eq!(second.document_ref(), DocumentRef::new("idx", "other", "doc2"));
    }

    #[test]
    fn test_raw_source_is_untouched() {
        let result = SearchResult::from_slice(RESPONSE.as_bytes()).unwrap();
        assert_eq!(
            result.hits.hits[0].raw_source(),
            Some(r#"{"owner": "User-1", "message": "hello",   "seen": false}"#)
        );

        let source: Payload = result.hits.hits[0].source_as().unwrap();
        assert_eq!(
            serde_json::Value::Object(source),
            json!({"owner": "User-1", "message": "hello", "seen": false})
        );
    }

    #[test]
    fn test_total_as_object() {
        let body = r#"{"took": 1, "hits": {"total": {"value": 7, "relation": "eq"},
                      "max_score": null, "hits": []}}"#;
        let result = SearchResult::from_slice(body.as_bytes()).unwrap();
        assert_eq!(result.total(), 7);
        assert_eq!(result.hits.max_score, None);
        assert!(result.is_empty());
    }

    #[test]
    fn test_missing_type_defaults_to_doc() {
        let body = r#"{"took": 1, "hits": {"total": 1, "hits": [
                      {"_index": "idx", "_id": "a", "_source": {}}]}}"#;
        let result = SearchResult::from_slice(body.as_bytes()).unwrap();
        assert_eq!(result.hits.hits[0].doc_type, "_doc");
    }

    #[test]
    fn test_decode_errors() {
        for body in ["not json", r#"{"took": 1}"#, r#"{"took": "x", "hits": {}}"#] {
            let err = SearchResult::from_slice(body.as_bytes()).unwrap_err();
            assert!(matches!(err, EsError::Decode(_)), "{body}");
        }
    }

    #[test]
    fn test_source_as_wrong_shape() {
        let result = SearchResult::from_slice(RESPONSE.as_bytes()).unwrap();
        let err = result.hits.hits[0].source_as::<Vec<i32>>().unwrap_err();
        assert!(matches!(err, EsError::Decode(_)));
    }
}
