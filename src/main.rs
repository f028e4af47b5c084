use anyhow::Context;
use tokio::sync::mpsc;
use tokio::time::Duration;
use tracing::info;

use price_tracker::app::App;
use price_tracker::config::Config;
use price_tracker::events::Event;
use price_tracker::feeds::BinanceFeed;
use price_tracker::game::SessionController;
use price_tracker::input;
use price_tracker::logging;
use price_tracker::report::{HttpReporter, LogReporter, ScoreReporter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let path = std::env::var("PRICE_TRACKER_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let cfg = Config::load(&path).with_context(|| format!("failed to load config from {}", path))?;

    logging::init_tracing(&cfg.general.log_level);
    info!("Loaded config: {:?}", cfg);

    let reporter: Box<dyn ScoreReporter + Send> = match &cfg.reporter.url {
        Some(url) => {
            info!("Reporting results to {}", url);
            Box::new(HttpReporter::new(url.clone()))
        }
        None => Box::new(LogReporter),
    };

    let game = SessionController::new(reporter)
        .with_countdown(cfg.game.countdown_secs)
        .with_fresh_price(cfg.game.require_fresh_price)
        .with_turn(cfg.game.turn);

    // Create the event channel
    let (tx, mut rx) = mpsc::channel::<Event>(100);

    // Start producers
    let feed = BinanceFeed::new(&cfg.feed).spawn(tx.clone());
    input::spawn_stdin(tx.clone());

    let ctrl_c_tx = tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = ctrl_c_tx.send(Event::Shutdown).await;
        }
    });

    // Main event loop
    info!("Type `start` (or just Enter) to lock in the price, `turn <n>` to set the turn, `quit` to exit");
    let mut app = App::new(game, tx, Duration::from_millis(cfg.game.tick_ms));
    app.run(&mut rx).await;

    // Release the feed subscription
    feed.abort();
    Ok(())
}
