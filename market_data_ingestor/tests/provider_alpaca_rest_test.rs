use std::time::Duration;

use chrono::{TimeZone, Utc};
use market_data_ingestor::{
    models::{
        request_params::{BarsRequestParams, ProviderParams},
        timeframe::TimeFrame,
    },
    providers::{
        DataProvider, ProviderError,
        alpaca_rest::{AlpacaBarsParams, AlpacaCredentials, AlpacaProvider, Feed},
    },
};
use mockito::Matcher;
use serde_json::json;

fn provider(server: &mockito::Server) -> AlpacaProvider {
    let credentials = AlpacaCredentials::new("test-key", "test-secret");
    AlpacaProvider::with_credentials(&credentials, server.url(), Duration::from_secs(5))
        .expect("provider")
}

fn bar_json(day: u32, close: f64, volume: u64) -> serde_json::Value {
    json!({
        "t": format!("2025-01-{day:02}T05:00:00Z"),
        "o": 100.0, "h": 105.0, "l": 99.0, "c": close, "v": volume,
        "n": 10, "vw": 101.0
    })
}

#[tokio::test]
async fn fetch_bars_sends_auth_and_query_and_decodes_rows() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/stocks/AAPL/bars")
        .match_header("apca-api-key-id", "test-key")
        .match_header("apca-api-secret-key", "test-secret")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("timeframe".into(), "1Day".into()),
            Matcher::UrlEncoded("limit".into(), "2".into()),
            Matcher::UrlEncoded("feed".into(), "iex".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "bars": [bar_json(2, 101.0, 500), bar_json(3, 102.0, 700)],
                "symbol": "AAPL",
                "next_page_token": null
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let mut params = BarsRequestParams::new(TimeFrame::day(), 2);
    params.provider_specific = ProviderParams::Alpaca(AlpacaBarsParams {
        feed: Some(Feed::Iex),
        ..Default::default()
    });

    let bars = provider(&server).fetch_bars("AAPL", &params).await.unwrap();

    mock.assert_async().await;
    assert_eq!(bars.len(), 2);
    assert!(bars.iter().all(|b| b.symbol == "AAPL"));
    assert_eq!(bars[0].timestamp, Utc.with_ymd_and_hms(2025, 1, 2, 5, 0, 0).unwrap());
    assert_eq!(bars[1].close, 102.0);
    assert_eq!(bars[1].volume, 700);
}

#[tokio::test]
async fn null_bars_is_an_empty_result() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/stocks/ZZZZ/bars")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"bars": null, "symbol": "ZZZZ", "next_page_token": null}"#)
        .create_async()
        .await;

    let bars = provider(&server)
        .fetch_bars("ZZZZ", &BarsRequestParams::new(TimeFrame::day(), 10))
        .await
        .unwrap();

    assert!(bars.is_empty());
}

#[tokio::test]
async fn non_success_status_maps_to_api_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/stocks/AAPL/bars")
        .match_query(Matcher::Any)
        .with_status(403)
        .with_body(r#"{"message": "forbidden"}"#)
        .create_async()
        .await;

    let err = provider(&server)
        .fetch_bars("AAPL", &BarsRequestParams::new(TimeFrame::day(), 10))
        .await
        .unwrap_err();

    match err {
        ProviderError::Api { status, message } => {
            assert_eq!(status, 403);
            assert!(message.contains("forbidden"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_retryable_request_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/stocks/AAPL/bars")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let err = provider(&server)
        .fetch_bars("AAPL", &BarsRequestParams::new(TimeFrame::day(), 10))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Request(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn unsupported_timeframe_never_hits_the_network() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let params = BarsRequestParams::new("90Min".parse().unwrap(), 10);
    let err = provider(&server).fetch_bars("AAPL", &params).await.unwrap_err();

    assert!(matches!(err, ProviderError::Validation(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn follows_page_token_until_limit() {
    let mut server = mockito::Server::new_async().await;
    let first = server
        .mock("GET", "/stocks/MSFT/bars")
        .match_query(Matcher::UrlEncoded("limit".into(), "3".into()))
        .with_status(200)
        .with_body(
            json!({
                "bars": [bar_json(2, 1.0, 1), bar_json(3, 2.0, 2)],
                "symbol": "MSFT",
                "next_page_token": "page-2"
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;
    let second = server
        .mock("GET", "/stocks/MSFT/bars")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("limit".into(), "1".into()),
            Matcher::UrlEncoded("page_token".into(), "page-2".into()),
        ]))
        .with_status(200)
        .with_body(
            json!({
                "bars": [bar_json(6, 3.0, 3)],
                "symbol": "MSFT",
                "next_page_token": "page-3"
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let bars = provider(&server)
        .fetch_bars("MSFT", &BarsRequestParams::new(TimeFrame::day(), 3))
        .await
        .unwrap();

    first.assert_async().await;
    second.assert_async().await;
    assert_eq!(bars.len(), 3);
}

#[tokio::test]
async fn empty_page_with_token_ends_pagination() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/stocks/AAPL/bars")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"bars": [], "symbol": "AAPL", "next_page_token": "again"}"#)
        .expect(1)
        .create_async()
        .await;

    let p = provider(&server);
    let params = BarsRequestParams::new(TimeFrame::day(), 10);
    let fetch = p.fetch_bars("AAPL", &params);
    let bars = tokio::time::timeout(Duration::from_secs(3), fetch)
        .await
        .expect("pagination did not stop")
        .unwrap();

    mock.assert_async().await;
    assert!(bars.is_empty());
}

#[tokio::test]
async fn repeated_page_token_ends_pagination() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/stocks/AAPL/bars")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!({
                "bars": [bar_json(2, 1.0, 1)],
                "symbol": "AAPL",
                "next_page_token": "same"
            })
            .to_string(),
        )
        .expect(2)
        .create_async()
        .await;

    let p = provider(&server);
    let params = BarsRequestParams::new(TimeFrame::day(), 10);
    let fetch = p.fetch_bars("AAPL", &params);
    let bars = tokio::time::timeout(Duration::from_secs(3), fetch)
        .await
        .expect("pagination did not stop")
        .unwrap();

    mock.assert_async().await;
    assert_eq!(bars.len(), 2);
}

#[tokio::test]
async fn slash_in_symbol_stays_in_one_path_segment() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/stocks/BRK%2FB/bars")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({"bars": [bar_json(2, 1.0, 1)], "next_page_token": null}).to_string())
        .expect(1)
        .create_async()
        .await;

    let bars = provider(&server)
        .fetch_bars("BRK/B", &BarsRequestParams::new(TimeFrame::day(), 10))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(bars[0].symbol, "BRK/B");
}
