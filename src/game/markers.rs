use serde::Serialize;

use crate::state::Session;

/// Chart markers, as indices into the price history. Each one is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Markers {
    /// Where the session started ("Current")
    pub baseline: Option<usize>,
    /// Where the window is scheduled to end, baseline + countdown length
    pub countdown_end: Option<usize>,
    /// Where the series actually was when time ran out
    pub end: Option<usize>,
}

/// Derive markers from the session and the current history length.
///
/// `end` tracks the live history length once the countdown is at zero, so it
/// can drift from `countdown_end` when the feed doesn't deliver one sample per
/// second.
pub fn project(session: Option<&Session>, countdown_secs: u32, history_len: usize) -> Markers {
    let Some(session) = session else {
        return Markers::default();
    };

    Markers {
        baseline: Some(session.baseline_index),
        countdown_end: Some(session.baseline_index + countdown_secs as usize),
        end: session.is_expired().then_some(history_len),
    }
}
