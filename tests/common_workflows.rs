//! Integration tests for common esearch workflows.
//!
//! A mock engine stands in for a real cluster; responses are sequenced so
//! each step sees the state the previous step would have left behind.

use esearch::prelude::*;
use serde::Deserialize;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, PartialEq, Deserialize)]
struct Message {
    owner: String,
    message: String,
    seen: bool,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn search_response(hits: serde_json::Value, total: i64) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "took": 1,
        "hits": {"total": total, "max_score": if total > 0 { json!(0.28) } else { json!(null) }, "hits": hits}
    }))
}

async fn mount_refresh(server: &MockServer, index: &str) {
    Mock::given(method("POST"))
        .and(path(format!("/{}/_refresh", index)))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"_shards":{"total":1,"successful":1,"failed":0}}"#))
        .mount(server)
        .await;
}

// =============================================================================
// Put, search and delete by query
// =============================================================================

#[tokio::test]
async fn test_put_search_delete_query_workflow() {
    init_tracing();
    let server = MockServer::start().await;
    let query = json!({"query": {"term": {"owner": "User-1"}}});

    Mock::given(method("POST"))
        .and(path("/test-messages/message/doc1"))
        .and(body_json(json!({"owner": "User-1", "message": "hello", "seen": false})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(&server, "test-messages").await;

    // First search sees the document, every later one sees nothing.
    Mock::given(method("POST"))
        .and(path("/test-messages/message/_search"))
        .and(body_json(query.clone()))
        .respond_with(search_response(
            json!([{
                "_index": "test-messages",
                "_type": "message",
                "_id": "doc1",
                "_score": 0.28,
                "_source": {"owner": "User-1", "message": "hello", "seen": false}
            }]),
            1,
        ))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/test-messages/message/_search"))
        .respond_with(search_response(json!([]), 0))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/test-messages/message/doc1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = EsClient::new(EsConfig::new(server.uri())).unwrap();

    client
        .put(
            "test-messages",
            "message",
            "doc1",
            &json!({"owner": "User-1", "message": "hello", "seen": false}),
        )
        .await
        .unwrap();
    client.refresh_index("test-messages").await.unwrap();

    let result = client.search("test-messages", "message", &query).await.unwrap();
    assert_eq!(result.total(), 1);
    let message: Message = result.hits.hits[0].source_as().unwrap();
    assert_eq!(
        message,
        Message {
            owner: "User-1".to_string(),
            message: "hello".to_string(),
            seen: false,
        }
    );

    let outcome = client
        .delete_query("test-messages", "message", &query)
        .await
        .unwrap();
    assert_eq!(outcome.deleted, vec![DocumentRef::new("test-messages", "message", "doc1")]);
    client.refresh_index("test-messages").await.unwrap();

    let result = client.search("test-messages", "message", &query).await.unwrap();
    assert_eq!(result.total(), 0);
    assert!(result.is_empty());
    assert_eq!(result.hits.max_score, None);
}

// =============================================================================
// Partial update
// =============================================================================

#[tokio::test]
async fn test_update_round_trip() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/test-messages/message/u2"))
        .and(body_json(json!({"owner": "u2", "message": "hello there", "seen": false})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/test-messages/message/u2/_update"))
        .and(body_json(json!({"doc": {"seen": true}})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(&server, "test-messages").await;
    Mock::given(method("POST"))
        .and(path("/test-messages/message/_search"))
        .respond_with(search_response(
            json!([{
                "_index": "test-messages",
                "_type": "message",
                "_id": "u2",
                "_score": 1.0,
                "_source": {"owner": "u2", "message": "hello there", "seen": true}
            }]),
            1,
        ))
        .mount(&server)
        .await;

    let client = EsClient::new(EsConfig::new(server.uri())).unwrap();
    client
        .put(
            "test-messages",
            "message",
            "u2",
            &json!({"owner": "u2", "message": "hello there", "seen": false}),
        )
        .await
        .unwrap();
    client
        .update("test-messages", "message", "u2", &json!({"doc": {"seen": true}}))
        .await
        .unwrap();
    client.refresh_index("test-messages").await.unwrap();

    let result = client
        .search("test-messages", "message", &json!({"query": {"term": {"owner": "u2"}}}))
        .await
        .unwrap();
    let message: Message = result.hits.hits[0].source_as().unwrap();
    assert_eq!(
        message,
        Message {
            owner: "u2".to_string(),
            message: "hello there".to_string(),
            seen: true,
        }
    );
}

// =============================================================================
// Index lifecycle
// =============================================================================

#[tokio::test]
async fn test_index_lifecycle() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/test-messages"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"acknowledged":true}"#))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/test-messages/_mapping/message"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/test-messages"))
        .respond_with(ResponseTemplate::new(200))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/test-messages"))
        .respond_with(ResponseTemplate::new(404).set_body_string("index_not_found_exception"))
        .mount(&server)
        .await;

    let client = EsClient::new(EsConfig::new(server.uri())).unwrap();
    client.create_index("test-messages").await.unwrap();
    client
        .put_mapping(
            "test-messages",
            "message",
            &json!({"properties": {"owner": {"type": "keyword"}}}),
        )
        .await
        .unwrap();

    client.delete_index("test-messages").await.unwrap();
    let first = client.delete_index("test-messages").await.unwrap_err();
    let second = client.delete_index("test-messages").await.unwrap_err();
    assert_eq!(first.kind(), ErrorKind::Http);
    assert_eq!(first.kind(), second.kind());
    assert!(second.is_not_found());
}

// =============================================================================
// Failure modes
// =============================================================================

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Nothing listens on port 1.
    let client = EsClient::new(EsConfig::new("http://127.0.0.1:1")).unwrap();
    let err = client.refresh_index("test-messages").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[cfg(feature = "aws-auth")]
#[tokio::test]
async fn test_signed_client_from_config() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/test-messages/_refresh"))
        .and(wiremock::matchers::header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = EsConfig::new(server.uri())
        .with_aws_credentials("AKIDEXAMPLE", "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY")
        .with_aws_region("eu-west-1");
    let client = EsClient::new(config).unwrap();
    assert!(client.signing_enabled());
    client.refresh_index("test-messages").await.unwrap();
}
