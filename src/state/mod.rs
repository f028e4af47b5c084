mod prices;
mod session;

pub use prices::PriceFeed;
pub use session::{Phase, Session};

/// Length of one prediction window in seconds.
pub const COUNTDOWN_SECS: u32 = 30;
