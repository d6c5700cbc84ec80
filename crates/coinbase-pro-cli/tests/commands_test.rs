/*
[INPUT]:  Mock REST server and local feed server
[OUTPUT]: Test results for subcommand implementations
[POS]:    Integration tests - command layer
[UPDATE]: When subcommand behavior changes
*/

use std::time::Duration;

use coinbase_pro_adapter::{ClientConfig, CoinbaseClient, RestApi, Stream, SubscribeMessage};
use coinbase_pro_cli::commands;
use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio_test::assert_ok;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> CoinbaseClient {
    let config = ClientConfig {
        rate_limit: Duration::ZERO,
        ..ClientConfig::default()
    };
    CoinbaseClient::with_config(config, RestApi::new(server.uri())).expect("client should build")
}

#[tokio::test]
async fn test_server_time() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/time"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "iso": "2020-09-13T12:26:40Z",
            "epoch": 1600000000.0,
        })))
        .mount(&server)
        .await;

    let time = assert_ok!(commands::server_time(&client(&server)).await);
    assert_eq!(time.iso, "2020-09-13T12:26:40Z");
}

#[tokio::test]
async fn test_fetch_reports_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/NOPE-USD"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "NotFound"})))
        .mount(&server)
        .await;

    let (status, body) = assert_ok!(commands::fetch(&client(&server), "/products/NOPE-USD", None).await);
    assert_eq!(status, 404);
    assert_eq!(body["message"], "NotFound");
}

#[tokio::test]
async fn test_fetch_pages_applies_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/BTC-USD/trades"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"trade_id": 7}])))
        .expect(1)
        .mount(&server)
        .await;

    let query = commands::parse_query(&[]).unwrap();
    let pages = assert_ok!(
        commands::fetch_pages(&client(&server), "/products/BTC-USD/trades", query, Some(5)).await
    );
    assert_eq!(pages, vec![json!([{"trade_id": 7}])]);
}

#[tokio::test]
async fn test_fetch_pages_fails_on_error_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fills"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "invalid signature"})))
        .mount(&server)
        .await;

    let err = commands::fetch_pages(&client(&server), "/fills", None, None)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn test_stream_messages_stops_at_count() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());
    let feed = tokio::spawn(async move {
        let (tcp, _) = listener.accept().await.unwrap();
        let mut socket = accept_async(tcp).await.unwrap();
        let _subscribe = socket.next().await;
        for sequence in 1..=3 {
            let frame = json!({"type": "ticker", "product_id": "BTC-USD", "sequence": sequence});
            socket.send(Message::Text(frame.to_string().into())).await.unwrap();
        }
        while let Some(Ok(message)) = socket.next().await {
            if message.is_close() {
                break;
            }
        }
    });

    let mut stream = Stream::new(url);
    let mut seen: Vec<Value> = Vec::new();
    let delivered = assert_ok!(
        commands::stream_messages(
            &mut stream,
            &SubscribeMessage::ticker("BTC-USD"),
            Some(2),
            CancellationToken::new(),
            |frame| seen.push(frame.clone()),
        )
        .await
    );

    assert_eq!(delivered, 2);
    assert_eq!(seen[1]["sequence"], 2);
    assert!(!stream.connected());
    feed.await.unwrap();
}

#[tokio::test]
async fn test_stream_messages_stops_on_shutdown() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());
    let feed = tokio::spawn(async move {
        let (tcp, _) = listener.accept().await.unwrap();
        let mut socket = accept_async(tcp).await.unwrap();
        while let Some(Ok(message)) = socket.next().await {
            if message.is_close() {
                break;
            }
        }
    });

    let shutdown = CancellationToken::new();
    shutdown.cancel();

    let mut stream = Stream::new(url);
    let delivered = assert_ok!(
        commands::stream_messages(&mut stream, &SubscribeMessage::ticker("BTC-USD"), None, shutdown, |_| {})
            .await
    );
    assert_eq!(delivered, 0);
    feed.await.unwrap();
}
