use std::env;

use crate::services::StrategyConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Largest candle history accepted per request. Bounds backtest cost.
    pub max_candles: usize,
    /// Allowed CORS origins (empty = any origin).
    pub cors_origins: Vec<String>,
    /// Strategy parameters for the signal generator.
    pub strategy: StrategyConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_candles: 5000,
            cors_origins: Vec::new(),
            strategy: StrategyConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        // Format: "http://localhost:3000,http://127.0.0.1:3000"
        let cors_origins = lookup("CORS_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let strategy = StrategyConfig {
            min_lookback: lookup("BACKTEST_MIN_LOOKBACK")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.strategy.min_lookback),
            lookahead: lookup("BACKTEST_LOOKAHEAD")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.strategy.lookahead),
            profit_threshold: lookup("BACKTEST_PROFIT_THRESHOLD")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.strategy.profit_threshold),
            ..defaults.strategy
        };

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            max_candles: lookup("MAX_CANDLES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_candles),
            cors_origins,
            strategy,
        }
    }

    /// Socket address string to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
