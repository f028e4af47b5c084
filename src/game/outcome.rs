use serde::Serialize;
use std::fmt;

/// Result of one session. Naming follows the betting convention:
/// finishing below the baseline means the "up" bet on the baseline wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Outcome {
    FutureUp,
    FutureDown,
}

impl Outcome {
    /// Code sent to the score reporter: 0 = FutureUp, 1 = FutureDown.
    pub fn code(&self) -> u8 {
        match self {
            Outcome::FutureUp => 0,
            Outcome::FutureDown => 1,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::FutureUp => f.write_str("Future Up"),
            Outcome::FutureDown => f.write_str("Future Down"),
        }
    }
}

/// Classify a finished session.
///
/// `final_price < baseline` → FutureUp, anything else → FutureDown.
/// A tie goes to FutureDown.
pub fn resolve(baseline: f64, final_price: f64) -> Outcome {
    if final_price < baseline {
        Outcome::FutureUp
    } else {
        Outcome::FutureDown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_below_baseline() {
        assert_eq!(resolve(98.0, 97.0), Outcome::FutureUp);
        assert_eq!(resolve(98.0, 97.999), Outcome::FutureUp);
    }

    #[test]
    fn test_resolve_above_baseline() {
        assert_eq!(resolve(98.0, 99.0), Outcome::FutureDown);
        assert_eq!(resolve(64_000.0, 64_000.01), Outcome::FutureDown);
    }

    #[test]
    fn test_resolve_tie_goes_down() {
        assert_eq!(resolve(100.0, 100.0), Outcome::FutureDown);
        assert_eq!(resolve(0.5, 0.5), Outcome::FutureDown);
    }

    #[test]
    fn test_codes() {
        assert_eq!(Outcome::FutureUp.code(), 0);
        assert_eq!(Outcome::FutureDown.code(), 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(Outcome::FutureUp.to_string(), "Future Up");
        assert_eq!(Outcome::FutureDown.to_string(), "Future Down");
    }
}
