use ethernity_api::{ApiConfig, EthernityApiClient};
use ethernity_core::error::Error;
use ethernity_core::traits::ExplorerDataProvider;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HASH: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

fn client(server: &MockServer) -> EthernityApiClient {
    let config = ApiConfig {
        endpoint: format!("{}/api/", server.uri()),
        timeout: Duration::from_secs(5),
        max_retries: 0,
        ..Default::default()
    };
    EthernityApiClient::new(config).unwrap()
}

#[tokio::test]
async fn transaction_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/transactions/{}", HASH)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hash": HASH,
            "label": "ARBITRAGE",
            "blockNumber": 22289420,
            "profit": "1000000000000000000"
        })))
        .mount(&server)
        .await;

    let tx = client(&server).get_transaction_by_hash(HASH).await.unwrap().unwrap();
    assert_eq!(tx.hash.as_deref(), Some(HASH));
    assert_eq!(tx.block_number.as_deref(), Some("22289420"));
}

#[tokio::test]
async fn not_found_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let api = client(&server);
    assert_eq!(api.get_transaction_by_hash(HASH).await.unwrap(), None);
    assert_eq!(api.get_block_by_number(1).await.unwrap(), None);
    assert!(api.get_transactions_by_address("0x01").await.unwrap().is_empty());
}

#[tokio::test]
async fn server_error_is_upstream_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server).get_block_by_number(10).await;
    assert!(matches!(result, Err(Error::UpstreamUnavailable(_))));
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let result = client(&server).get_transaction_by_hash(HASH).await;
    assert!(matches!(result, Err(Error::DecodeError(_))));
}

#[tokio::test]
async fn block_with_transactions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/blocks/22289420"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "block": { "number": "22289420", "miner": "0xminer" },
            "transactions": [
                { "hash": "0x01", "blockNumber": 22289420 },
                { "id": "s1", "label": "SANDWICH", "blockNumber": 22289420 }
            ]
        })))
        .mount(&server)
        .await;

    let payload = client(&server).get_block_by_number(22289420).await.unwrap().unwrap();
    assert_eq!(payload.block.miner.as_deref(), Some("0xminer"));
    assert_eq!(payload.transactions.len(), 2);
}

#[tokio::test]
async fn address_transactions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/addresses/0xabc/transactions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "hash": "0x01" }, { "hash": "0x02" }
        ])))
        .mount(&server)
        .await;

    let txs = client(&server).get_transactions_by_address("0xabc").await.unwrap();
    assert_eq!(txs.len(), 2);
}

#[tokio::test]
async fn repeated_lookup_hits_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/blocks/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "block": { "number": 5 } })))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    let first = tokio_test::assert_ok!(api.get_block_by_number(5).await);
    let second = tokio_test::assert_ok!(api.get_block_by_number(5).await);
    assert_eq!(first, second);

    let stats = api.cache_stats();
    assert_eq!(stats.total_entries, 1);
    assert!((stats.cache_hit_ratio - 0.5).abs() < f64::EPSILON);

    api.clear_cache();
    assert_eq!(api.cache_stats().total_entries, 0);
}

#[test]
fn config_from_env_overrides_endpoint() {
    std::env::set_var(ethernity_api::ENDPOINT_ENV, "http://explorer.local/api");
    assert_eq!(ApiConfig::from_env().endpoint, "http://explorer.local/api");
    std::env::remove_var(ethernity_api::ENDPOINT_ENV);
}
