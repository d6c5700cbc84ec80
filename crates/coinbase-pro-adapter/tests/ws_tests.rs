/*
[INPUT]:  Local WebSocket server scenarios
[OUTPUT]: Test results for the stream session
[POS]:    Integration tests - WebSocket
[UPDATE]: When handshake, framing or disconnect handling changes
*/

mod common;

use common::{TEST_KEY, TEST_PASSPHRASE, test_credentials};
use coinbase_pro_adapter::{CoinbaseError, Stream, StreamMessage, StreamToken, SubscribeMessage};
use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_test::assert_ok;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::{accept_async, accept_hdr_async};
use tokio_util::sync::CancellationToken;

const HANDSHAKE_HEADERS: [&str; 4] = ["signature", "key", "passphrase", "timestamp"];

/// Accept one client, record its handshake headers, answer the first frame
/// with `replies`, then drain until the client leaves. Yields the first frame.
async fn feed_server(
    replies: Vec<Value>,
) -> (String, oneshot::Receiver<HashMap<String, String>>, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());
    let (headers_tx, headers_rx) = oneshot::channel();

    let handle = tokio::spawn(async move {
        let (tcp, _) = listener.accept().await.unwrap();
        let callback = |request: &Request, response: Response| -> Result<Response, ErrorResponse> {
            let captured = HANDSHAKE_HEADERS
                .iter()
                .filter_map(|name| {
                    request
                        .headers()
                        .get(*name)
                        .and_then(|value| value.to_str().ok())
                        .map(|value| (name.to_string(), value.to_string()))
                })
                .collect::<HashMap<_, _>>();
            let _ = headers_tx.send(captured);
            Ok(response)
        };
        let mut socket = accept_hdr_async(tcp, callback).await.unwrap();

        let first = match socket.next().await {
            Some(Ok(Message::Text(text))) => text.as_str().to_owned(),
            other => panic!("expected a text frame, got {other:?}"),
        };
        for reply in replies {
            socket.send(Message::Text(reply.to_string().into())).await.unwrap();
        }
        while let Some(Ok(message)) = socket.next().await {
            if message.is_close() {
                break;
            }
        }
        first
    });

    (url, headers_rx, handle)
}

#[tokio::test]
async fn test_authenticated_subscribe_and_receive() {
    let replies = vec![
        json!({
            "type": "subscriptions",
            "channels": [{"name": "ticker", "product_ids": ["BTC-USD"]}],
        }),
        json!({
            "type": "ticker",
            "product_id": "BTC-USD",
            "sequence": 42,
            "price": "30000.01",
            "best_bid": "30000.00",
            "best_ask": "30000.02",
        }),
    ];
    let (url, headers_rx, server) = feed_server(replies).await;

    let mut stream = Stream::with_credentials(url, test_credentials());
    assert!(stream.is_authenticated());
    assert!(assert_ok!(stream.connect().await));
    assert!(stream.connected());

    assert_ok!(stream.send(&SubscribeMessage::ticker("BTC-USD")).await);

    let confirmation = assert_ok!(stream.receive().await);
    match assert_ok!(StreamMessage::from_value(confirmation)) {
        StreamMessage::Subscriptions { channels } => {
            assert_eq!(channels[0].name, "ticker");
            assert_eq!(channels[0].product_ids, vec!["BTC-USD".to_string()]);
        }
        other => panic!("unexpected message: {other:?}"),
    }

    let tick = assert_ok!(stream.receive().await);
    assert_eq!(tick["price"], "30000.01");
    match assert_ok!(StreamMessage::from_value(tick)) {
        StreamMessage::Ticker(event) => assert_eq!(event.sequence, Some(42)),
        other => panic!("unexpected message: {other:?}"),
    }

    assert!(assert_ok!(stream.disconnect().await));
    assert!(!stream.connected());

    let subscribe: Value = serde_json::from_str(&server.await.unwrap()).unwrap();
    assert_eq!(
        subscribe,
        json!({"type": "subscribe", "product_ids": ["BTC-USD"], "channels": ["ticker"]})
    );

    let headers = headers_rx.await.unwrap();
    assert_eq!(headers["key"], TEST_KEY);
    assert_eq!(headers["passphrase"], TEST_PASSPHRASE);
    let expected = StreamToken::new(test_credentials())
        .header_at(&headers["timestamp"])
        .unwrap();
    assert_eq!(headers["signature"], expected.signature);
}

#[tokio::test]
async fn test_public_stream_sends_no_handshake_headers() {
    let (url, headers_rx, server) = feed_server(vec![json!({"type": "heartbeat"})]).await;

    let mut stream = Stream::new(url);
    assert_ok!(stream.connect().await);
    assert_ok!(stream.send(&SubscribeMessage::ticker("ETH-USD")).await);

    let frame = assert_ok!(stream.receive().await);
    assert_eq!(frame["type"], "heartbeat");

    assert_ok!(stream.disconnect().await);
    server.await.unwrap();
    assert!(headers_rx.await.unwrap().is_empty());
}

#[tokio::test]
async fn test_receive_after_peer_close_is_empty() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());
    let server = tokio::spawn(async move {
        let (tcp, _) = listener.accept().await.unwrap();
        let mut socket = accept_async(tcp).await.unwrap();
        socket.close(None).await.unwrap();
    });

    let mut stream = Stream::new(url);
    assert_ok!(stream.connect().await);

    let frame = assert_ok!(stream.receive().await);
    assert_eq!(frame, json!({}));
    assert!(!stream.connected());

    // a later receive does not wait on the dead socket
    assert_eq!(assert_ok!(stream.receive().await), json!({}));
    assert!(assert_ok!(stream.disconnect().await));
    server.await.unwrap();
}

#[tokio::test]
async fn test_connect_refused_is_connection_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());
    drop(listener);

    let mut stream = Stream::new(url);
    let err = stream.connect().await.unwrap_err();
    assert!(err.is_connection_error());
    assert!(!stream.connected());
}

#[tokio::test]
async fn test_keep_alive_pings_until_cancelled() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());
    let (ping_tx, ping_rx) = oneshot::channel();
    let server = tokio::spawn(async move {
        let (tcp, _) = listener.accept().await.unwrap();
        let mut socket = accept_async(tcp).await.unwrap();
        let mut ping_tx = Some(ping_tx);
        while let Some(Ok(message)) = socket.next().await {
            match message {
                Message::Ping(_) => {
                    if let Some(tx) = ping_tx.take() {
                        let _ = tx.send(());
                    }
                }
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    let mut stream = Stream::new(url);
    assert_ok!(stream.connect().await);

    let shutdown = CancellationToken::new();
    let canceller = shutdown.clone();
    let (frames, _frames_rx) = mpsc::channel(8);
    let (result, ()) = tokio::join!(
        stream.keep_alive(Duration::from_millis(20), shutdown, &frames),
        async move {
            ping_rx.await.unwrap();
            canceller.cancel();
        }
    );
    assert_ok!(result);
    assert!(stream.connected());

    assert!(assert_ok!(stream.disconnect().await));
    server.await.unwrap();
}

#[tokio::test]
async fn test_keep_alive_returns_when_peer_closes() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());
    let (release_tx, release_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(async move {
        let (tcp, _) = listener.accept().await.unwrap();
        let mut socket = accept_async(tcp).await.unwrap();
        socket
            .send(Message::Text(json!({"type": "heartbeat", "sequence": 7}).to_string().into()))
            .await
            .unwrap();
        socket.close(None).await.unwrap();
        // hold the TCP connection open until the client has returned
        let _ = release_rx.await;
    });

    let mut stream = Stream::new(url);
    assert_ok!(stream.connect().await);

    // the interval is far longer than the test, so only the close can end it
    let (frames, mut frames_rx) = mpsc::channel(8);
    let result = tokio::time::timeout(
        Duration::from_secs(5),
        stream.keep_alive(Duration::from_secs(60), CancellationToken::new(), &frames),
    )
    .await
    .expect("keep_alive should return once the peer closes");
    assert_ok!(result);
    assert!(!stream.connected());

    let forwarded = frames_rx.recv().await.unwrap();
    assert_eq!(forwarded, json!({"type": "heartbeat", "sequence": 7}));

    assert_eq!(assert_ok!(stream.receive().await), json!({}));
    let _ = release_tx.send(());
    server.await.unwrap();
}

#[tokio::test]
async fn test_receive_malformed_frame_is_serialization_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());
    let server = tokio::spawn(async move {
        let (tcp, _) = listener.accept().await.unwrap();
        let mut socket = accept_async(tcp).await.unwrap();
        socket.send(Message::Text("not json".into())).await.unwrap();
        socket
            .send(Message::Text(json!({"type": "heartbeat"}).to_string().into()))
            .await
            .unwrap();
        while let Some(Ok(message)) = socket.next().await {
            if message.is_close() {
                break;
            }
        }
    });

    let mut stream = Stream::new(url);
    assert_ok!(stream.connect().await);

    let err = stream.receive().await.unwrap_err();
    assert!(matches!(err, CoinbaseError::Serialization(_)), "unexpected error: {err:?}");

    // a bad frame leaves the session usable
    assert!(stream.connected());
    let frame = assert_ok!(stream.receive().await);
    assert_eq!(frame["type"], "heartbeat");

    assert!(assert_ok!(stream.disconnect().await));
    server.await.unwrap();
}
