use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::{Report, ScoreReporter};

/// JSON body POSTed to the scoring endpoint
#[derive(Debug, Serialize)]
struct ResultBody<'a> {
    turn: u64,
    /// 0 = FutureUp, 1 = FutureDown
    result: u8,
    outcome: &'a str,
    resolved_at_ms: i64,
}

/// Posts each report to an HTTP endpoint.
///
/// The request runs on its own task so the event loop never waits on the
/// network. Must be used inside a tokio runtime.
pub struct HttpReporter {
    client: reqwest::Client,
    url: String,
    /// Requests still in flight
    in_flight: Vec<JoinHandle<()>>,
}

impl HttpReporter {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            in_flight: Vec::new(),
        }
    }

    fn track(&mut self, handle: JoinHandle<()>) {
        self.in_flight.retain(|h| !h.is_finished());
        self.in_flight.push(handle);
    }
}

impl ScoreReporter for HttpReporter {
    fn report(&mut self, report: Report) {
        let label = report.outcome.to_string();
        let body = ResultBody {
            turn: report.turn,
            result: report.code(),
            outcome: &label,
            resolved_at_ms: chrono::Utc::now().timestamp_millis(),
        };

        let request = self.client.post(&self.url).json(&body);
        let turn = report.turn;

        let handle = tokio::spawn(async move {
            match request.send().await {
                Ok(resp) if resp.status().is_success() => {
                    debug!(target: "report", turn, "result delivered");
                }
                Ok(resp) => {
                    warn!(target: "report", turn, status = %resp.status(), "result rejected");
                }
                Err(e) => {
                    warn!(target: "report", turn, "failed to deliver result: {}", e);
                }
            }
        });
        self.track(handle);
    }

    fn pending(&self) -> usize {
        self.in_flight.iter().filter(|h| !h.is_finished()).count()
    }
}
