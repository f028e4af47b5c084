use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, MissedTickBehavior};

use crate::events::Event;

/// Spawns the countdown for one session: `ticks` Tick events, one per `period`,
/// the first one a full period after start.
///
/// Abort the handle when the session is superseded or the app shuts down.
pub fn spawn_countdown(
    tx: mpsc::Sender<Event>,
    session: u64,
    ticks: u32,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = time::interval_at(time::Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        for _ in 0..ticks {
            interval.tick().await;
            if tx.send(Event::Tick { session }).await.is_err() {
                // Event loop is gone
                break;
            }
        }
    })
}
