/*
[INPUT]:  Feed URL and optional credentials for the handshake
[OUTPUT]: One WebSocket session exchanging JSON frames
[POS]:    WebSocket layer - real-time data stream handling
[UPDATE]: When changing connection, handshake or frame handling
*/

use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::{HeaderName, HeaderValue};
use tokio_tungstenite::tungstenite::{Error as WsError, Message as WsMessage};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::auth::{Credentials, StreamToken};
use crate::http::{CoinbaseError, PRODUCTION_STREAM_URL, Result};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;
type ReadResult = std::result::Result<WsMessage, WsError>;

/// WebSocket session against the market-data feed
///
/// Every socket operation takes `&mut self`; a session is owned by one task.
/// There is no reconnect on drop, call [`Stream::connect`] again instead.
pub struct Stream {
    url: String,
    token: Option<StreamToken>,
    socket: Option<Socket>,
}

impl Stream {
    /// Public (unauthenticated) session
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: None,
            socket: None,
        }
    }

    /// Session that signs the handshake; incomplete credentials stay public
    pub fn with_credentials(url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            url: url.into(),
            token: credentials
                .is_complete()
                .then(|| StreamToken::new(credentials)),
            socket: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn token(&self) -> Option<&StreamToken> {
        self.token.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn connected(&self) -> bool {
        self.socket.is_some()
    }

    /// Open the socket, signing the handshake when credentials are present.
    /// An existing session is closed first.
    pub async fn connect(&mut self) -> Result<bool> {
        self.disconnect().await?;

        let mut request = self.url.as_str().into_client_request()?;
        if let Some(token) = &self.token {
            let header = token.header()?;
            for (name, value) in header.pairs() {
                let header_value = HeaderValue::from_str(value)
                    .map_err(|_| CoinbaseError::InvalidHeader { name })?;
                request
                    .headers_mut()
                    .insert(HeaderName::from_static(name), header_value);
            }
        }

        let (socket, response) = connect_async(request).await?;
        info!(
            url = %self.url,
            status = %response.status(),
            authenticated = self.is_authenticated(),
            "stream connected"
        );
        self.socket = Some(socket);
        Ok(self.connected())
    }

    /// Write one JSON text frame; does nothing while disconnected
    pub async fn send<M>(&mut self, message: &M) -> Result<()>
    where
        M: Serialize + ?Sized,
    {
        let Some(socket) = self.socket.as_mut() else {
            return Ok(());
        };

        let text = serde_json::to_string(message)?;
        debug!(bytes = text.len(), "stream send");
        if let Err(err) = socket.send(WsMessage::Text(text.into())).await {
            self.socket = None;
            return Err(err.into());
        }
        Ok(())
    }

    /// Wait for the next JSON frame.
    ///
    /// Returns an empty object without waiting while disconnected, and after
    /// the peer closes the socket.
    pub async fn receive(&mut self) -> Result<Value> {
        loop {
            let Some(socket) = self.socket.as_mut() else {
                return Ok(empty_frame());
            };
            let incoming = socket.next().await;
            match self.inbound(incoming)? {
                Inbound::Data(value) => return Ok(value),
                Inbound::Control => {}
                Inbound::Closed => return Ok(empty_frame()),
            }
        }
    }

    /// Close the socket if open; returns whether the session is now down
    pub async fn disconnect(&mut self) -> Result<bool> {
        if let Some(mut socket) = self.socket.take() {
            match socket.close(None).await {
                Ok(()) | Err(WsError::ConnectionClosed | WsError::AlreadyClosed) => {}
                Err(err) => return Err(err.into()),
            }
            info!(url = %self.url, "stream disconnected");
        }
        Ok(!self.connected())
    }

    /// Ping every `interval` while reading the socket, until the peer
    /// closes it or `shutdown` fires.
    ///
    /// Data frames read in the meantime go to `frames`; a dropped receiver
    /// discards them without stopping the pings.
    pub async fn keep_alive(
        &mut self,
        interval: Duration,
        shutdown: CancellationToken,
        frames: &mpsc::Sender<Value>,
    ) -> Result<()> {
        let mut ticker = tokio::time::interval(interval);
        // first tick completes immediately
        ticker.tick().await;

        loop {
            let Some(socket) = self.socket.as_mut() else {
                return Ok(());
            };
            let wake = tokio::select! {
                _ = shutdown.cancelled() => return Ok(()),
                _ = ticker.tick() => None,
                incoming = socket.next() => Some(incoming),
            };

            let Some(incoming) = wake else {
                self.ping().await?;
                continue;
            };
            match self.inbound(incoming)? {
                Inbound::Data(value) => {
                    if frames.send(value).await.is_err() {
                        debug!("keep-alive frame dropped, receiver gone");
                    }
                }
                Inbound::Control => {}
                Inbound::Closed => return Ok(()),
            }
        }
    }

    /// Classify one read; a close or transport error drops the socket
    fn inbound(&mut self, incoming: Option<ReadResult>) -> Result<Inbound> {
        match incoming {
            Some(Ok(WsMessage::Text(text))) => {
                Ok(Inbound::Data(serde_json::from_str(text.as_str())?))
            }
            Some(Ok(WsMessage::Binary(bytes))) => Ok(Inbound::Data(serde_json::from_slice(&bytes)?)),
            Some(Ok(WsMessage::Ping(_) | WsMessage::Pong(_) | WsMessage::Frame(_))) => {
                Ok(Inbound::Control)
            }
            Some(Ok(WsMessage::Close(frame))) => {
                info!(?frame, "stream closed by peer");
                self.socket = None;
                Ok(Inbound::Closed)
            }
            Some(Err(err)) => {
                self.socket = None;
                Err(err.into())
            }
            None => {
                self.socket = None;
                Ok(Inbound::Closed)
            }
        }
    }

    async fn ping(&mut self) -> Result<()> {
        let Some(socket) = self.socket.as_mut() else {
            return Ok(());
        };
        if let Err(err) = socket.send(WsMessage::Ping(Vec::new().into())).await {
            self.socket = None;
            return Err(err.into());
        }
        debug!("stream ping");
        Ok(())
    }
}

impl Default for Stream {
    fn default() -> Self {
        Self::new(PRODUCTION_STREAM_URL)
    }
}

impl fmt::Debug for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream")
            .field("url", &self.url)
            .field("authenticated", &self.is_authenticated())
            .field("connected", &self.connected())
            .finish()
    }
}

enum Inbound {
    Data(Value),
    Control,
    Closed,
}

fn empty_frame() -> Value {
    Value::Object(Map::new())
}
