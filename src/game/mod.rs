mod markers;
mod outcome;

pub use markers::{project, Markers};
pub use outcome::{resolve, Outcome};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::GameError;
use crate::report::{Report, ScoreReporter};
use crate::state::{Phase, PriceFeed, Session, COUNTDOWN_SECS};

/// Read-only view of the game for whatever draws it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub history_len: usize,
    pub current_price: Option<f64>,
    /// Horizontal reference line
    pub baseline_price: Option<f64>,
    pub remaining_secs: Option<u32>,
    pub phase: Option<Phase>,
    pub outcome: Option<Outcome>,
    pub turn: Option<u64>,
    pub markers: Markers,
}

/// Owns the single prediction session and drives it to exactly one outcome.
///
/// # Flow
/// 1. `start_session` captures the current price and history length
/// 2. `tick` counts the session down once per second
/// 3. `check_expiry` runs after every tick and every price; the first call that
///    sees the countdown at zero and a usable price resolves and reports
pub struct SessionController<R> {
    session: Option<Session>,
    /// Id handed to the next session
    next_id: u64,
    countdown_secs: u32,
    /// Only resolve against a price delivered after the session started
    require_fresh_price: bool,
    turn: Option<u64>,
    reporter: R,
}

impl<R: ScoreReporter> SessionController<R> {
    pub fn new(reporter: R) -> Self {
        Self {
            session: None,
            next_id: 1,
            countdown_secs: COUNTDOWN_SECS,
            require_fresh_price: true,
            turn: None,
            reporter,
        }
    }

    pub fn with_countdown(mut self, countdown_secs: u32) -> Self {
        self.countdown_secs = countdown_secs;
        self
    }

    pub fn with_fresh_price(mut self, require_fresh_price: bool) -> Self {
        self.require_fresh_price = require_fresh_price;
        self
    }

    pub fn with_turn(mut self, turn: Option<u64>) -> Self {
        self.turn = turn;
        self
    }

    // =========================================================================
    // COMMANDS
    // =========================================================================

    /// Lock in the current price and start a fresh countdown.
    ///
    /// Replaces any previous session. If that one was still counting down its
    /// result is dropped and never reported.
    pub fn start_session(&mut self, feed: &PriceFeed) -> Result<&Session, GameError> {
        let baseline_price = feed.current_price().ok_or(GameError::NoBaselineAvailable)?;

        if let Some(prev) = self.session.as_ref().filter(|s| !s.resolved) {
            warn!(
                target: "game",
                session = prev.id,
                remaining_secs = prev.remaining_secs,
                "abandoning unresolved session"
            );
        }

        let id = self.next_id;
        self.next_id += 1;

        let session = Session::new(id, baseline_price, feed.len(), self.countdown_secs);
        info!(
            target: "game",
            session = id,
            baseline = baseline_price,
            index = session.baseline_index,
            "session started"
        );

        Ok(&*self.session.insert(session))
    }

    /// One second of countdown for `session_id`.
    /// Ticks for any other session (a superseded countdown) are ignored.
    pub fn tick(&mut self, session_id: u64) -> bool {
        match self.session.as_mut() {
            Some(session) if session.id == session_id && !session.resolved => session.tick(),
            _ => false,
        }
    }

    /// Resolve the session if its time is up and a price is available.
    ///
    /// Safe to call any number of times; returns the outcome only on the call
    /// that actually resolved.
    pub fn check_expiry(&mut self, feed: &PriceFeed) -> Option<Outcome> {
        let session = self.session.as_mut()?;
        if session.resolved || !session.is_expired() {
            return None;
        }

        let fresh = !self.require_fresh_price || feed.len() > session.baseline_index;
        let final_price = match feed.current_price() {
            Some(price) if fresh => price,
            _ => {
                debug!(target: "game", session = session.id, "expired, waiting for a price");
                return None;
            }
        };

        let outcome = resolve(session.baseline_price, final_price);
        if !session.resolve(outcome) {
            return None;
        }

        info!(
            target: "game",
            session = session.id,
            baseline = session.baseline_price,
            final_price,
            "{}",
            outcome
        );

        match self.turn {
            Some(turn) => self.reporter.report(Report { turn, outcome }),
            None => debug!(target: "game", session = session.id, "no turn set, result not reported"),
        }

        Some(outcome)
    }

    pub fn set_turn(&mut self, turn: Option<u64>) {
        self.turn = turn;
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Session currently counting down, if any.
    pub fn active_session_id(&self) -> Option<u64> {
        self.session
            .as_ref()
            .filter(|s| !s.resolved && !s.is_expired())
            .map(|s| s.id)
    }

    pub fn turn(&self) -> Option<u64> {
        self.turn
    }

    pub fn countdown_secs(&self) -> u32 {
        self.countdown_secs
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn markers(&self, feed: &PriceFeed) -> Markers {
        project(self.session.as_ref(), self.countdown_secs, feed.len())
    }

    pub fn snapshot(&self, feed: &PriceFeed) -> Snapshot {
        let session = self.session.as_ref();
        Snapshot {
            history_len: feed.len(),
            current_price: feed.current_price(),
            baseline_price: session.map(|s| s.baseline_price),
            remaining_secs: session.map(|s| s.remaining_secs),
            phase: session.map(|s| s.phase()),
            outcome: session.and_then(|s| s.outcome),
            turn: self.turn,
            markers: self.markers(feed),
        }
    }
}
