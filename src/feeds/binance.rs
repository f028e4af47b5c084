use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tokio_tungstenite::connect_async;
use tracing::{debug, info, warn};

use crate::config::FeedConfig;
use crate::error::FeedError;
use crate::events::Event;

// Binance `!ticker@arr` sends an array of 24h tickers, we only need these two
#[derive(serde::Deserialize)]
struct Ticker {
    #[serde(rename = "s")]
    symbol: String,
    #[serde(rename = "c")]
    last_price: String,
}

/// Pull prices for `symbol` out of one ticker-array frame.
///
/// Tickers for other symbols are skipped, so are prices that don't parse.
pub fn parse_frame(text: &str, symbol: &str) -> Result<Vec<f64>, FeedError> {
    let mut bytes = text.as_bytes().to_vec();
    let tickers = simd_json::from_slice::<Vec<Ticker>>(&mut bytes)
        .map_err(|e| FeedError::Malformed(e.to_string()))?;

    let prices = tickers
        .into_iter()
        .filter(|t| t.symbol == symbol)
        .filter_map(|t| match t.last_price.parse::<f64>() {
            Ok(price) => Some(price),
            Err(_) => {
                debug!(target: "feed", "unparseable price {:?}", t.last_price);
                None
            }
        })
        .collect();

    Ok(prices)
}

pub struct BinanceFeed {
    url: String,
    symbol: String,
    reconnect: Duration,
}

impl BinanceFeed {
    pub fn new(cfg: &FeedConfig) -> Self {
        Self {
            url: cfg.url.clone(),
            symbol: cfg.symbol.clone(),
            reconnect: Duration::from_secs(cfg.reconnect_secs),
        }
    }

    /// Spawns a task that connects to Binance and sends Price events.
    /// Abort the handle to unsubscribe.
    pub fn spawn(self, tx: mpsc::Sender<Event>) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                info!(target: "feed", "connecting to {}", self.url);

                match connect_async(self.url.as_str()).await {
                    Ok((ws_stream, _)) => {
                        info!(target: "feed", "connected, tracking {}", self.symbol);

                        let (_, mut read) = ws_stream.split();

                        while let Some(msg) = read.next().await {
                            match msg {
                                Ok(tungstenite::Message::Text(text)) => {
                                    let prices = match parse_frame(&text, &self.symbol) {
                                        Ok(prices) => prices,
                                        Err(e) => {
                                            debug!(target: "feed", "dropped frame: {}", e);
                                            continue;
                                        }
                                    };
                                    for price in prices {
                                        if tx.send(Event::Price { price }).await.is_err() {
                                            // Event loop is gone, stop for good
                                            return;
                                        }
                                    }
                                }
                                Ok(tungstenite::Message::Close(frame)) => {
                                    info!(target: "feed", "closed by server: {:?}", frame);
                                    break;
                                }
                                Err(e) => {
                                    warn!(target: "feed", "error: {}", e);
                                    break;
                                }
                                _ => {}
                            }
                        }
                    }
                    Err(e) => {
                        warn!(target: "feed", "failed to connect: {}", e);
                    }
                }

                // Wait before reconnecting
                info!(target: "feed", "reconnecting in {}s", self.reconnect.as_secs());
                tokio::time::sleep(self.reconnect).await;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: &str = r#"[
        {"e":"24hrTicker","E":1700000000000,"s":"ETHUSDT","c":"2050.10","v":"1000"},
        {"e":"24hrTicker","E":1700000000000,"s":"BTCUSDT","c":"64123.45","v":"500"}
    ]"#;

    #[test]
    fn test_filters_symbol() {
        assert_eq!(parse_frame(FRAME, "BTCUSDT").unwrap(), vec![64123.45]);
        assert_eq!(parse_frame(FRAME, "ETHUSDT").unwrap(), vec![2050.10]);
        assert!(parse_frame(FRAME, "SOLUSDT").unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_symbol_entries_all_forwarded() {
        let frame = r#"[{"s":"BTCUSDT","c":"1.5"},{"s":"BTCUSDT","c":"1.5"}]"#;
        assert_eq!(parse_frame(frame, "BTCUSDT").unwrap(), vec![1.5, 1.5]);
    }

    #[test]
    fn test_bad_price_skipped() {
        let frame = r#"[{"s":"BTCUSDT","c":"abc"},{"s":"BTCUSDT","c":"10"}]"#;
        assert_eq!(parse_frame(frame, "BTCUSDT").unwrap(), vec![10.0]);
    }

    #[test]
    fn test_malformed_frame() {
        assert!(matches!(parse_frame("not json", "BTCUSDT"), Err(FeedError::Malformed(_))));
        // Single object instead of array (e.g. a subscription ack)
        assert!(matches!(
            parse_frame(r#"{"result":null,"id":1}"#, "BTCUSDT"),
            Err(FeedError::Malformed(_))
        ));
    }
}
