//! Data client tests against a local mock GraphQL endpoint.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use dapp_connect::config::DataConfig;
use dapp_connect::data::{
    create_data_client, DataError, FetchPolicy, GraphQlRequest, SharedDataClient,
};
use serde_json::{json, Value};

mod common;

const TOKENS_RESPONSE: &str = r#"{"data":{"tokens":[{"id":"0x1","symbol":"avax"}]}}"#;

fn config(addr: SocketAddr, token: Option<&str>) -> DataConfig {
    DataConfig {
        endpoint_url: format!("http://{}/subgraphs/name/app", addr),
        api_token: token.map(str::to_string),
        request_timeout_secs: 5,
    }
}

fn tokens_query() -> GraphQlRequest {
    GraphQlRequest::new("{ tokens { id symbol } }")
}

#[tokio::test]
async fn test_bearer_token_sent_when_configured() {
    let (addr, recorded) = common::start_mock_backend(TOKENS_RESPONSE).await;
    let client = create_data_client(&config(addr, Some("secret-token")), false).unwrap();

    let _: Value = client.query(&tokens_query(), FetchPolicy::NetworkOnly).await.unwrap();

    let request = recorded.last().unwrap().to_lowercase();
    assert!(request.starts_with("post /subgraphs/name/app"));
    assert!(request.contains("authorization: bearer secret-token"));
}

#[tokio::test]
async fn test_no_authorization_without_token() {
    let (addr, recorded) = common::start_mock_backend(TOKENS_RESPONSE).await;
    let client = create_data_client(&config(addr, None), false).unwrap();

    let _: Value = client.query(&tokens_query(), FetchPolicy::NetworkOnly).await.unwrap();

    let request = recorded.last().unwrap().to_lowercase();
    assert!(!request.contains("authorization:"));
}

#[tokio::test]
async fn test_request_body_is_graphql_envelope() {
    let (addr, recorded) = common::start_mock_backend(TOKENS_RESPONSE).await;
    let client = create_data_client(&config(addr, None), false).unwrap();

    let request = tokens_query()
        .with_variables(json!({"first": 5}))
        .with_operation_name("Tokens");
    let _: Value = client.query(&request, FetchPolicy::CacheFirst).await.unwrap();

    let raw = recorded.last().unwrap();
    let body: Value = serde_json::from_str(common::body_of(&raw)).unwrap();
    assert_eq!(body["query"], "{ tokens { id symbol } }");
    assert_eq!(body["variables"], json!({"first": 5}));
    assert_eq!(body["operationName"], "Tokens");
}

#[tokio::test]
async fn test_cache_first_fetches_once() {
    let (addr, recorded) = common::start_mock_backend(TOKENS_RESPONSE).await;
    let client = create_data_client(&config(addr, None), false).unwrap();

    let first: Value = client.query(&tokens_query(), FetchPolicy::CacheFirst).await.unwrap();
    let second: Value = client.query(&tokens_query(), FetchPolicy::CacheFirst).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first["tokens"][0]["symbol"], "avax");
    assert_eq!(recorded.count(), 1);
    assert_eq!(client.cache().len(), 1);

    // Different variables are a different cache entry.
    let _: Value = client
        .query(&tokens_query().with_variables(json!({"first": 1})), FetchPolicy::CacheFirst)
        .await
        .unwrap();
    assert_eq!(recorded.count(), 2);
}

#[tokio::test]
async fn test_network_only_always_fetches() {
    let hits = Arc::new(AtomicU32::new(0));
    let h = hits.clone();
    let (addr, recorded) = common::start_programmable_backend(move |_| {
        let h = h.clone();
        async move {
            let n = h.fetch_add(1, Ordering::SeqCst);
            (200, format!(r#"{{"data":{{"counter":{}}}}}"#, n))
        }
    })
    .await;
    let client = create_data_client(&config(addr, None), false).unwrap();

    let first: Value = client.query(&tokens_query(), FetchPolicy::NetworkOnly).await.unwrap();
    let second: Value = client.query(&tokens_query(), FetchPolicy::NetworkOnly).await.unwrap();
    assert_eq!(first["counter"], 0);
    assert_eq!(second["counter"], 1);
    assert_eq!(recorded.count(), 2);

    // The network result still refreshes the cache.
    let cached: Value = client.query(&tokens_query(), FetchPolicy::CacheFirst).await.unwrap();
    assert_eq!(cached["counter"], 1);
    assert_eq!(recorded.count(), 2);

    client.clear_cache();
    let refetched: Value = client.query(&tokens_query(), FetchPolicy::CacheFirst).await.unwrap();
    assert_eq!(refetched["counter"], 2);
}

#[tokio::test]
async fn test_ssr_mode_serves_network_only_from_cache() {
    let (addr, recorded) = common::start_mock_backend(TOKENS_RESPONSE).await;
    let client = create_data_client(&config(addr, None), true).unwrap();

    let _: Value = client.query(&tokens_query(), FetchPolicy::NetworkOnly).await.unwrap();
    let _: Value = client.query(&tokens_query(), FetchPolicy::NetworkOnly).await.unwrap();

    assert_eq!(recorded.count(), 1);
}

#[tokio::test]
async fn test_graphql_errors_surface() {
    let (addr, _recorded) = common::start_mock_backend(
        r#"{"data":null,"errors":[{"message":"Unknown field `tokenz`","path":["tokenz"]}]}"#,
    )
    .await;
    let client = create_data_client(&config(addr, None), false).unwrap();

    let err = client
        .query::<Value>(&GraphQlRequest::new("{ tokenz { id } }"), FetchPolicy::CacheFirst)
        .await
        .unwrap_err();

    match err {
        DataError::GraphQl(errors) => {
            assert_eq!(errors.len(), 1);
            assert!(errors[0].message.contains("tokenz"));
        }
        other => panic!("expected GraphQL error, got {:?}", other),
    }
    assert!(client.cache().is_empty());
}

#[tokio::test]
async fn test_error_status_surfaces() {
    let (addr, _recorded) =
        common::start_programmable_backend(|_| async { (401, r#"{"error":"auth"}"#.to_string()) })
            .await;
    let client = create_data_client(&config(addr, Some("wrong")), false).unwrap();

    let err = client
        .query::<Value>(&tokens_query(), FetchPolicy::CacheFirst)
        .await
        .unwrap_err();

    match err {
        DataError::Status { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("auth"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_mutations_bypass_cache() {
    let (addr, recorded) = common::start_mock_backend(r#"{"data":{"ok":true}}"#).await;
    let client = create_data_client(&config(addr, None), false).unwrap();
    let mutation = GraphQlRequest::new("mutation { touch }");

    let _: Value = client.mutate(&mutation).await.unwrap();
    let _: Value = client.mutate(&mutation).await.unwrap();

    assert_eq!(recorded.count(), 2);
    assert!(client.cache().is_empty());
}

#[tokio::test]
async fn test_typed_decode() {
    #[derive(serde::Deserialize)]
    struct Tokens {
        tokens: Vec<Token>,
    }
    #[derive(serde::Deserialize)]
    struct Token {
        id: String,
        symbol: String,
    }

    let (addr, _recorded) = common::start_mock_backend(TOKENS_RESPONSE).await;
    let client = create_data_client(&config(addr, None), false).unwrap();

    let data: Tokens = client.query(&tokens_query(), FetchPolicy::CacheFirst).await.unwrap();
    assert_eq!(data.tokens.len(), 1);
    assert_eq!(data.tokens[0].id, "0x1");
    assert_eq!(data.tokens[0].symbol, "avax");
}

#[tokio::test]
async fn test_shared_client_reuses_cache() {
    let (addr, recorded) = common::start_mock_backend(TOKENS_RESPONSE).await;
    let shared = SharedDataClient::new(config(addr, None));

    let _: Value = shared
        .get()
        .unwrap()
        .query(&tokens_query(), FetchPolicy::CacheFirst)
        .await
        .unwrap();
    let _: Value = shared
        .get()
        .unwrap()
        .query(&tokens_query(), FetchPolicy::CacheFirst)
        .await
        .unwrap();

    assert_eq!(recorded.count(), 1);
}
