mod http;

pub use http::HttpReporter;

use serde::Serialize;
use tracing::info;

use crate::game::Outcome;

/// One resolved session, as handed to the scoring side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Report {
    pub turn: u64,
    pub outcome: Outcome,
}

impl Report {
    pub fn code(&self) -> u8 {
        self.outcome.code()
    }
}

/// Receives outcomes from the session controller.
///
/// Called from the event loop, so implementations must not block.
pub trait ScoreReporter {
    fn report(&mut self, report: Report);

    /// Reports handed over but not yet delivered.
    fn pending(&self) -> usize {
        0
    }
}

impl<R: ScoreReporter + ?Sized> ScoreReporter for Box<R> {
    fn report(&mut self, report: Report) {
        (**self).report(report)
    }

    fn pending(&self) -> usize {
        (**self).pending()
    }
}

/// Collects reports in memory. Handy for tests and dry runs.
impl ScoreReporter for Vec<Report> {
    fn report(&mut self, report: Report) {
        self.push(report);
    }
}

/// Only logs the outcome.
#[derive(Debug, Default)]
pub struct LogReporter;

impl ScoreReporter for LogReporter {
    fn report(&mut self, report: Report) {
        info!(
            target: "report",
            turn = report.turn,
            result = report.code(),
            "{}",
            report.outcome
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_code() {
        let r = Report { turn: 3, outcome: Outcome::FutureUp };
        assert_eq!(r.code(), 0);

        let r = Report { turn: 3, outcome: Outcome::FutureDown };
        assert_eq!(r.code(), 1);
    }

    #[test]
    fn test_boxed_reporter_forwards() {
        let mut boxed: Box<Vec<Report>> = Box::default();
        boxed.report(Report { turn: 1, outcome: Outcome::FutureDown });
        assert_eq!(boxed.len(), 1);
    }
}
