//! Live trade-tick stream from the market provider.
//!
//! One long-lived WebSocket per credential pushes unsolicited price ticks.
//! The raw socket layer is policy-free; [`ReconnectingTickStream`] owns
//! reconnection with capped exponential backoff and jitter, resubscribing
//! the watchlist after each successful reconnect. Drops and reconnects are
//! surfaced as [`StreamUpdate`]s so the caller can reflect connection state.

use crate::config::StreamConfig;
use crate::error::Result;
use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::net::TcpStream;
use tokio::time::sleep;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, warn};

/// A single price tick pushed by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTick {
    /// Ticker symbol.
    pub symbol: String,
    /// Last trade price.
    pub price: Decimal,
    /// Trade volume.
    pub volume: Decimal,
    /// Trade timestamp, Unix milliseconds.
    pub timestamp: i64,
}

/// Events surfaced by a tick source.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// One batch of trade ticks.
    Ticks(Vec<PriceTick>),
    /// Provider heartbeat.
    Ping,
    /// The connection dropped.
    Disconnected { reason: String },
}

/// A source of tick events. The seam that lets tests script disconnects.
#[async_trait]
pub trait TickSource: Send {
    /// Establish the connection.
    async fn connect(&mut self) -> Result<()>;
    /// Subscribe to a set of symbols on the open connection.
    async fn subscribe(&mut self, symbols: &[String]) -> Result<()>;
    /// Wait for the next event. `None` means the stream ended.
    async fn next_event(&mut self) -> Option<StreamEvent>;
}

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// WebSocket-backed tick source.
pub struct WsTickSource {
    url: String,
    token: String,
    socket: Option<WsStream>,
}

#[derive(Debug, Deserialize)]
struct WsFrame {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: Option<Vec<WsTrade>>,
}

#[derive(Debug, Deserialize)]
struct WsTrade {
    #[serde(rename = "s")]
    symbol: String,
    #[serde(rename = "p")]
    price: Decimal,
    #[serde(rename = "v")]
    volume: Decimal,
    #[serde(rename = "t")]
    timestamp: i64,
}

impl WsTickSource {
    /// Create a tick source for the given socket URL and token.
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: token.into(),
            socket: None,
        }
    }
}

/// Parse one text frame into a stream event. Unknown frame types yield `None`.
pub(crate) fn parse_frame(text: &str) -> Option<StreamEvent> {
    let frame: WsFrame = serde_json::from_str(text).ok()?;
    match frame.kind.as_str() {
        "trade" => {
            let ticks = frame
                .data
                .unwrap_or_default()
                .into_iter()
                .map(|t| PriceTick {
                    symbol: t.symbol,
                    price: t.price,
                    volume: t.volume,
                    timestamp: t.timestamp,
                })
                .collect();
            Some(StreamEvent::Ticks(ticks))
        }
        "ping" => Some(StreamEvent::Ping),
        _ => None,
    }
}

#[async_trait]
impl TickSource for WsTickSource {
    async fn connect(&mut self) -> Result<()> {
        let url = format!("{}?token={}", self.url, self.token);
        let (socket, _) = connect_async(&url).await?;
        info!("Tick stream connected");
        self.socket = Some(socket);
        Ok(())
    }

    async fn subscribe(&mut self, symbols: &[String]) -> Result<()> {
        let socket = self
            .socket
            .as_mut()
            .ok_or_else(|| crate::Error::application("Tick stream not connected"))?;
        for symbol in symbols {
            let payload = serde_json::json!({ "type": "subscribe", "symbol": symbol });
            socket.send(Message::Text(payload.to_string())).await?;
        }
        debug!(count = symbols.len(), "Subscribed symbols on tick stream");
        Ok(())
    }

    async fn next_event(&mut self) -> Option<StreamEvent> {
        let socket = self.socket.as_mut()?;
        loop {
            match socket.next().await {
                Some(Ok(Message::Text(text))) => {
                    if let Some(event) = parse_frame(&text) {
                        return Some(event);
                    }
                }
                Some(Ok(Message::Ping(payload))) => {
                    if socket.send(Message::Pong(payload)).await.is_err() {
                        return Some(StreamEvent::Disconnected {
                            reason: "pong send failed".to_string(),
                        });
                    }
                }
                Some(Ok(Message::Close(_))) | None => {
                    self.socket = None;
                    return Some(StreamEvent::Disconnected {
                        reason: "closed by peer".to_string(),
                    });
                }
                Some(Ok(_)) => continue,
                Some(Err(e)) => {
                    self.socket = None;
                    return Some(StreamEvent::Disconnected {
                        reason: e.to_string(),
                    });
                }
            }
        }
    }
}

/// Updates surfaced by [`ReconnectingTickStream::next_update`].
#[derive(Debug, Clone, PartialEq)]
pub enum StreamUpdate {
    /// One batch of trade ticks.
    Ticks(Vec<PriceTick>),
    /// The stream reconnected and resubscribed after a drop.
    Connected,
    /// The connection dropped; a reconnect attempt follows.
    Disconnected,
}

/// Wrapper that adds reconnection to any [`TickSource`].
pub struct ReconnectingTickStream<S: TickSource> {
    inner: S,
    config: StreamConfig,
    subscribed: Vec<String>,
    consecutive_failures: u32,
    current_delay_ms: u64,
    connected: bool,
}

impl<S: TickSource> ReconnectingTickStream<S> {
    /// Create a reconnecting wrapper.
    pub fn new(inner: S, config: StreamConfig) -> Self {
        let initial_delay = config.initial_delay_ms;
        Self {
            inner,
            config,
            subscribed: Vec::new(),
            consecutive_failures: 0,
            current_delay_ms: initial_delay,
            connected: false,
        }
    }

    /// Connect and subscribe the given symbols.
    pub async fn start(&mut self, symbols: Vec<String>) -> Result<()> {
        self.subscribed = symbols;
        self.inner.connect().await?;
        self.connected = true;
        self.reset_backoff();
        self.inner.subscribe(&self.subscribed).await
    }

    /// Wait for the next update, reconnecting as needed. Drops and
    /// successful reconnects are returned to the caller; failed reconnect
    /// attempts retry internally after the backoff delay.
    pub async fn next_update(&mut self) -> StreamUpdate {
        loop {
            if !self.connected {
                match self.reconnect().await {
                    Ok(()) => return StreamUpdate::Connected,
                    Err(e) => {
                        warn!(error = %e, "Reconnection attempt failed, will retry");
                        continue;
                    }
                }
            }

            match self.inner.next_event().await {
                Some(StreamEvent::Ticks(ticks)) => {
                    if self.consecutive_failures > 0 {
                        debug!("Tick received after reconnection, resetting backoff");
                        self.reset_backoff();
                    }
                    return StreamUpdate::Ticks(ticks);
                }
                Some(StreamEvent::Ping) => continue,
                Some(StreamEvent::Disconnected { reason }) => {
                    warn!(reason = %reason, "Tick stream lost, will reconnect");
                    self.connected = false;
                    self.consecutive_failures += 1;
                    return StreamUpdate::Disconnected;
                }
                None => {
                    warn!("Tick stream ended unexpectedly, will reconnect");
                    self.connected = false;
                    self.consecutive_failures += 1;
                    return StreamUpdate::Disconnected;
                }
            }
        }
    }

    fn reset_backoff(&mut self) {
        self.consecutive_failures = 0;
        self.current_delay_ms = self.config.initial_delay_ms;
    }

    /// Next backoff delay: exponential growth to a cap, plus bounded jitter.
    fn next_delay(&mut self) -> Duration {
        let base = Duration::from_millis(self.current_delay_ms);
        let delay = base + Duration::from_millis(jitter_ms(base));

        let grown = (self.current_delay_ms as f64 * self.config.backoff_multiplier) as u64;
        self.current_delay_ms = grown.min(self.config.max_delay_ms);

        delay
    }

    async fn reconnect(&mut self) -> Result<()> {
        let delay = self.next_delay();
        info!(
            delay_ms = delay.as_millis(),
            attempt = self.consecutive_failures + 1,
            "Reconnecting tick stream after delay"
        );
        sleep(delay).await;

        match self.inner.connect().await {
            Ok(()) => {
                self.connected = true;
                if !self.subscribed.is_empty()
                    && let Err(e) = self.inner.subscribe(&self.subscribed).await
                {
                    warn!(error = %e, "Resubscribe failed after reconnect");
                    self.connected = false;
                    self.consecutive_failures += 1;
                    return Err(e);
                }
                info!("Tick stream reconnected");
                Ok(())
            }
            Err(e) => {
                self.consecutive_failures += 1;
                Err(e)
            }
        }
    }
}

/// Up to 20% of the base delay, derived from the clock's sub-second noise.
fn jitter_ms(base: Duration) -> u64 {
    let range = (base.as_millis() as u64) / 5;
    if range == 0 {
        return 0;
    }
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    (nanos as u64) % (range + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use std::collections::VecDeque;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Tick source that replays a scripted list of events.
    struct ScriptedSource {
        events: VecDeque<StreamEvent>,
        connect_count: Arc<AtomicU32>,
        subscribe_count: Arc<AtomicU32>,
    }

    impl ScriptedSource {
        fn new(events: Vec<StreamEvent>) -> Self {
            Self {
                events: events.into(),
                connect_count: Arc::new(AtomicU32::new(0)),
                subscribe_count: Arc::new(AtomicU32::new(0)),
            }
        }

        fn counters(&self) -> (Arc<AtomicU32>, Arc<AtomicU32>) {
            (self.connect_count.clone(), self.subscribe_count.clone())
        }
    }

    #[async_trait]
    impl TickSource for ScriptedSource {
        async fn connect(&mut self) -> Result<()> {
            self.connect_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn subscribe(&mut self, _symbols: &[String]) -> Result<()> {
            self.subscribe_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn next_event(&mut self) -> Option<StreamEvent> {
            self.events.pop_front()
        }
    }

    fn fast_config() -> StreamConfig {
        StreamConfig {
            initial_delay_ms: 1,
            max_delay_ms: 8,
            backoff_multiplier: 2.0,
        }
    }

    fn tick(symbol: &str) -> PriceTick {
        PriceTick {
            symbol: symbol.to_string(),
            price: dec!(150.0),
            volume: dec!(10),
            timestamp: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_parse_trade_frame() {
        let event = parse_frame(
            r#"{"type":"trade","data":[{"s":"AAPL","p":150.25,"v":3,"t":1700000000000}]}"#,
        )
        .unwrap();
        match event {
            StreamEvent::Ticks(ticks) => {
                assert_eq!(ticks.len(), 1);
                assert_eq!(ticks[0].symbol, "AAPL");
                assert_eq!(ticks[0].price, dec!(150.25));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_parse_ignores_unknown_frames() {
        assert_eq!(parse_frame(r#"{"type":"ping"}"#), Some(StreamEvent::Ping));
        assert_eq!(parse_frame(r#"{"type":"error","msg":"x"}"#), None);
        assert_eq!(parse_frame("not json"), None);
    }

    #[tokio::test]
    async fn test_ticks_pass_through() {
        let source = ScriptedSource::new(vec![StreamEvent::Ticks(vec![tick("AAPL")])]);
        let mut stream = ReconnectingTickStream::new(source, fast_config());
        stream.start(vec!["AAPL".to_string()]).await.unwrap();

        let update = stream.next_update().await;
        assert_eq!(update, StreamUpdate::Ticks(vec![tick("AAPL")]));
    }

    #[tokio::test]
    async fn test_reconnects_and_resubscribes_after_disconnect() {
        let source = ScriptedSource::new(vec![
            StreamEvent::Disconnected {
                reason: "test".to_string(),
            },
            StreamEvent::Ticks(vec![tick("MSFT")]),
        ]);
        let (connects, subscribes) = source.counters();

        let mut stream = ReconnectingTickStream::new(source, fast_config());
        stream.start(vec!["MSFT".to_string()]).await.unwrap();

        // The drop and the successful reconnect both surface before ticks
        // resume, so the caller can mirror connection state.
        assert_eq!(stream.next_update().await, StreamUpdate::Disconnected);
        assert_eq!(stream.next_update().await, StreamUpdate::Connected);
        assert_eq!(
            stream.next_update().await,
            StreamUpdate::Ticks(vec![tick("MSFT")])
        );
        assert!(connects.load(Ordering::SeqCst) >= 2);
        assert!(subscribes.load(Ordering::SeqCst) >= 2);
    }

    #[tokio::test]
    async fn test_backoff_grows_to_cap() {
        let source = ScriptedSource::new(vec![]);
        let mut stream = ReconnectingTickStream::new(source, fast_config());

        let in_range = |delay: Duration, base_ms: u64| {
            let max = base_ms + base_ms / 5;
            (base_ms..=max).contains(&(delay.as_millis() as u64))
        };

        assert!(in_range(stream.next_delay(), 1));
        assert!(in_range(stream.next_delay(), 2));
        assert!(in_range(stream.next_delay(), 4));
        assert!(in_range(stream.next_delay(), 8));
        assert!(in_range(stream.next_delay(), 8)); // capped
    }

    #[tokio::test]
    async fn test_backoff_resets_after_tick() {
        let source = ScriptedSource::new(vec![
            StreamEvent::Disconnected {
                reason: "blip".to_string(),
            },
            StreamEvent::Ticks(vec![tick("AAPL")]),
        ]);
        let mut stream = ReconnectingTickStream::new(source, fast_config());
        stream.start(vec!["AAPL".to_string()]).await.unwrap();

        while !matches!(stream.next_update().await, StreamUpdate::Ticks(_)) {}
        assert_eq!(stream.consecutive_failures, 0);
        assert_eq!(stream.current_delay_ms, 1);
    }
}
