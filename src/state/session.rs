use serde::Serialize;

use crate::game::Outcome;

/// Where a session is in its lifecycle. No session at all means idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// Counting down (or at zero, waiting for a price to resolve against)
    Armed,
    /// Outcome computed, report (if any) already sent
    Resolved,
}

/// One prediction attempt, from "start" until its outcome is known.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    /// Generation number, bumped on every start
    pub id: u64,
    /// Price captured at start, the resolution threshold
    pub baseline_price: f64,
    /// History length at start
    pub baseline_index: usize,
    pub remaining_secs: u32,
    /// Exactly-once guard for resolution
    pub resolved: bool,
    pub outcome: Option<Outcome>,
}

impl Session {
    pub fn new(id: u64, baseline_price: f64, baseline_index: usize, countdown_secs: u32) -> Self {
        Self {
            id,
            baseline_price,
            baseline_index,
            remaining_secs: countdown_secs,
            resolved: false,
            outcome: None,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.resolved {
            Phase::Resolved
        } else {
            Phase::Armed
        }
    }

    /// Countdown has run out.
    pub fn is_expired(&self) -> bool {
        self.remaining_secs == 0
    }

    /// Advance the countdown by one second. Returns false if already at zero.
    pub fn tick(&mut self) -> bool {
        if self.remaining_secs == 0 {
            return false;
        }
        self.remaining_secs -= 1;
        true
    }

    /// Record the outcome. Returns false if this session was already resolved.
    pub fn resolve(&mut self, outcome: Outcome) -> bool {
        if self.resolved {
            return false;
        }
        self.resolved = true;
        self.outcome = Some(outcome);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_armed() {
        let s = Session::new(1, 98.0, 4, 30);
        assert_eq!(s.phase(), Phase::Armed);
        assert_eq!(s.remaining_secs, 30);
        assert!(!s.is_expired());
        assert_eq!(s.outcome, None);
    }

    #[test]
    fn test_tick_stops_at_zero() {
        let mut s = Session::new(1, 98.0, 4, 2);

        assert!(s.tick());
        assert!(s.tick());
        assert!(s.is_expired());

        // Already at zero
        assert!(!s.tick());
        assert_eq!(s.remaining_secs, 0);
    }

    #[test]
    fn test_resolve_once() {
        let mut s = Session::new(1, 98.0, 4, 0);

        assert!(s.resolve(Outcome::FutureUp));
        assert_eq!(s.phase(), Phase::Resolved);

        // Second resolve is refused and keeps the first outcome
        assert!(!s.resolve(Outcome::FutureDown));
        assert_eq!(s.outcome, Some(Outcome::FutureUp));
    }
}
