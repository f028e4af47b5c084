use serde::Deserialize;
use std::fs;

use crate::error::ConfigError;
use crate::state::COUNTDOWN_SECS;

pub const BINANCE_TICKER_URL: &str = "wss://stream.binance.com:9443/ws/!ticker@arr";

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: General,
    pub feed: FeedConfig,
    pub game: GameConfig,
    pub reporter: ReporterConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct General {
    pub log_level: String,
}

impl Default for General {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub url: String,
    /// Only tickers for this symbol are forwarded
    pub symbol: String,
    pub reconnect_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: BINANCE_TICKER_URL.to_string(),
            symbol: "BTCUSDT".to_string(),
            reconnect_secs: 5,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub countdown_secs: u32,
    /// Countdown tick period in milliseconds (one tick = one second of countdown)
    pub tick_ms: u64,
    /// Turn to report against until the outer app sets another one
    pub turn: Option<u64>,
    /// Resolve only against a price that arrived after the session started
    pub require_fresh_price: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            countdown_secs: COUNTDOWN_SECS,
            tick_ms: 1000,
            turn: None,
            require_fresh_price: true,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ReporterConfig {
    /// Results are POSTed here when set, otherwise only logged
    pub url: Option<String>,
}

impl Config {
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.game.countdown_secs == 0 {
            return Err(ConfigError::Invalid("game.countdown_secs must be > 0".into()));
        }
        if self.game.tick_ms == 0 {
            return Err(ConfigError::Invalid("game.tick_ms must be > 0".into()));
        }
        if self.feed.symbol.trim().is_empty() {
            return Err(ConfigError::Invalid("feed.symbol must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let cfg = Config::parse("").unwrap();
        assert_eq!(cfg.general.log_level, "info");
        assert_eq!(cfg.feed.symbol, "BTCUSDT");
        assert_eq!(cfg.feed.url, BINANCE_TICKER_URL);
        assert_eq!(cfg.game.countdown_secs, 30);
        assert_eq!(cfg.game.tick_ms, 1000);
        assert_eq!(cfg.game.turn, None);
        assert!(cfg.game.require_fresh_price);
        assert!(cfg.reporter.url.is_none());
    }

    #[test]
    fn test_partial_sections() {
        let cfg = Config::parse(
            r#"
            [game]
            turn = 7

            [reporter]
            url = "http://localhost:8080/result"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.game.turn, Some(7));
        assert_eq!(cfg.game.countdown_secs, 30); // default kept
        assert_eq!(cfg.reporter.url.as_deref(), Some("http://localhost:8080/result"));
    }

    #[test]
    fn test_rejects_zero_countdown() {
        let err = Config::parse("[game]\ncountdown_secs = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_empty_symbol() {
        let err = Config::parse("[feed]\nsymbol = \"  \"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_bad_toml() {
        let err = Config::parse("[game\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
