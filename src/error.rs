use thiserror::Error;

/// Bad data coming off the feed. Never fatal, the sample is just dropped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeedError {
    #[error("malformed frame: {0}")]
    Malformed(String),

    #[error("invalid price: {0}")]
    InvalidPrice(f64),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Start requested before any price arrived.
    #[error("no current price to use as baseline")]
    NoBaselineAvailable,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
