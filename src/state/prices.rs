use serde::Serialize;

use crate::error::FeedError;

/// Price feed sink - the current price plus every price seen so far.
/// History is append-only; its index is the x-coordinate for all markers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PriceFeed {
    history: Vec<f64>,
    current: Option<f64>,
}

impl PriceFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one sample from the feed.
    ///
    /// Duplicates and out-of-order values are appended as they come.
    /// Non-finite or non-positive prices are rejected and nothing changes.
    pub fn on_sample(&mut self, price: f64) -> Result<(), FeedError> {
        if !price.is_finite() || price <= 0.0 {
            return Err(FeedError::InvalidPrice(price));
        }
        self.history.push(price);
        self.current = Some(price);
        Ok(())
    }

    /// Most recent accepted price, None until the first sample.
    pub fn current_price(&self) -> Option<f64> {
        self.current
    }

    pub fn history(&self) -> &[f64] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_price() {
        let feed = PriceFeed::new();
        assert_eq!(feed.current_price(), None);
        assert!(feed.is_empty());
    }

    #[test]
    fn test_on_sample_appends() {
        let mut feed = PriceFeed::new();

        feed.on_sample(100.0).unwrap();
        feed.on_sample(101.5).unwrap();

        assert_eq!(feed.current_price(), Some(101.5));
        assert_eq!(feed.history(), &[100.0, 101.5]);
        assert_eq!(feed.len(), 2);
    }

    #[test]
    fn test_duplicates_and_out_of_order_kept() {
        let mut feed = PriceFeed::new();

        feed.on_sample(100.0).unwrap();
        feed.on_sample(100.0).unwrap(); // duplicate
        feed.on_sample(99.0).unwrap(); // "older" value arriving late

        assert_eq!(feed.history(), &[100.0, 100.0, 99.0]);
        assert_eq!(feed.current_price(), Some(99.0));
    }

    #[test]
    fn test_invalid_sample_dropped() {
        let mut feed = PriceFeed::new();
        feed.on_sample(100.0).unwrap();

        assert!(feed.on_sample(f64::NAN).is_err());
        assert_eq!(feed.on_sample(f64::INFINITY), Err(FeedError::InvalidPrice(f64::INFINITY)));
        assert_eq!(feed.on_sample(0.0), Err(FeedError::InvalidPrice(0.0)));
        assert_eq!(feed.on_sample(-5.0), Err(FeedError::InvalidPrice(-5.0)));

        // State untouched
        assert_eq!(feed.len(), 1);
        assert_eq!(feed.current_price(), Some(100.0));
    }
}
