use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tracing::{debug, info, warn};

use crate::clock;
use crate::events::Event;
use crate::game::SessionController;
use crate::report::ScoreReporter;
use crate::state::PriceFeed;

/// Everything the event loop owns. Events are handled one at a time, so the
/// feed and the countdown never touch session state concurrently.
pub struct App<R: ScoreReporter> {
    feed: PriceFeed,
    game: SessionController<R>,
    /// Handed to each countdown task
    tx: mpsc::Sender<Event>,
    tick_period: Duration,
    countdown: Option<JoinHandle<()>>,
}

impl<R: ScoreReporter> App<R> {
    pub fn new(game: SessionController<R>, tx: mpsc::Sender<Event>, tick_period: Duration) -> Self {
        Self {
            feed: PriceFeed::new(),
            game,
            tx,
            tick_period,
            countdown: None,
        }
    }

    /// Main event loop. Returns on Shutdown or when every sender is gone.
    pub async fn run(&mut self, rx: &mut mpsc::Receiver<Event>) {
        while let Some(event) = rx.recv().await {
            if !self.handle(event) {
                break;
            }
        }
        self.stop_countdown();
    }

    /// Apply one event. Returns false when the app should stop.
    pub fn handle(&mut self, event: Event) -> bool {
        match event {
            Event::Price { price } => {
                if let Err(e) = self.feed.on_sample(price) {
                    debug!(target: "feed", "dropped sample: {}", e);
                    return true;
                }
                // A late price may be what an expired session is waiting for
                self.game.check_expiry(&self.feed);
            }
            Event::Tick { session } => {
                if self.game.tick(session) {
                    self.render();
                }
                self.game.check_expiry(&self.feed);
            }
            Event::Start => match self.game.start_session(&self.feed) {
                Ok(session) => {
                    let id = session.id;
                    self.restart_countdown(id);
                }
                Err(e) => warn!(target: "game", "start ignored: {}", e),
            },
            Event::Turn { turn } => {
                info!(target: "game", ?turn, "turn changed");
                self.game.set_turn(turn);
            }
            Event::Shutdown => {
                info!("shutting down");
                self.stop_countdown();
                if let Some(session) = self.game.active_session_id() {
                    warn!(target: "game", session, "shutting down mid-countdown, result dropped");
                }
                let pending = self.game.reporter().pending();
                if pending > 0 {
                    warn!(target: "report", pending, "shutting down with results still being sent");
                }
                return false;
            }
        }
        true
    }

    pub fn feed(&self) -> &PriceFeed {
        &self.feed
    }

    pub fn game(&self) -> &SessionController<R> {
        &self.game
    }

    fn restart_countdown(&mut self, session: u64) {
        self.stop_countdown();
        self.countdown = Some(clock::spawn_countdown(
            self.tx.clone(),
            session,
            self.game.countdown_secs(),
            self.tick_period,
        ));
    }

    fn stop_countdown(&mut self) {
        if let Some(handle) = self.countdown.take() {
            handle.abort();
        }
    }

    /// Snapshot line for whatever is drawing the chart.
    fn render(&self) {
        let snapshot = self.game.snapshot(&self.feed);
        info!(
            target: "game",
            price = ?snapshot.current_price,
            remaining_secs = ?snapshot.remaining_secs,
            "tick"
        );
        if let Ok(json) = serde_json::to_string(&snapshot) {
            debug!(target: "render", "{}", json);
        }
    }
}

impl<R: ScoreReporter> Drop for App<R> {
    fn drop(&mut self) {
        self.stop_countdown();
    }
}
