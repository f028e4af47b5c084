use futures_util::StreamExt;
use std::time::Instant;
use tokio_tungstenite::connect_async;

use price_tracker::config::{Config, FeedConfig};
use price_tracker::feeds::binance::parse_frame;

const SAMPLES: usize = 20;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let feed = Config::load("config.toml")
        .map(|cfg| cfg.feed)
        .unwrap_or_else(|_| FeedConfig::default());

    println!("Connecting to {} ...", feed.url);
    let (ws, _) = connect_async(feed.url.as_str()).await?;
    let (_, mut read) = ws.split();

    println!("Connected. Waiting for {} {} prices...\n", SAMPLES, feed.symbol);

    let mut times: Vec<u128> = Vec::new();

    while let Some(msg) = read.next().await {
        if let tungstenite::Message::Text(text) = msg? {
            let start = Instant::now();
            let prices = match parse_frame(&text, &feed.symbol) {
                Ok(prices) => prices,
                Err(e) => {
                    println!("dropped frame: {}", e);
                    continue;
                }
            };
            let elapsed = start.elapsed().as_nanos();

            for price in prices {
                times.push(elapsed);
                println!("#{}: {} ({}μs to parse frame)", times.len(), price, elapsed / 1000);
            }

            if times.len() >= SAMPLES {
                break;
            }
        }
    }

    if times.is_empty() {
        println!("No prices received");
        return Ok(());
    }

    // Stats
    times.sort();
    let avg = times.iter().sum::<u128>() / times.len() as u128;
    let median = times[times.len() / 2];

    println!("\n=== FRAME PARSE LATENCY ({} prices) ===", times.len());
    println!("Min:    {}μs", times[0] / 1000);
    println!("Max:    {}μs", times[times.len() - 1] / 1000);
    println!("Avg:    {}μs", avg / 1000);
    println!("Median: {}μs", median / 1000);

    Ok(())
}
