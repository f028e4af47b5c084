pub mod binance;

pub use binance::BinanceFeed;
