//! Agent Alpha - RSI / Bollinger mean-reversion signal server

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod types;

use std::sync::Arc;

use config::Config;
use services::signals::StrategyConfigError;
use services::SignalGenerator;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub generator: Arc<SignalGenerator>,
}

impl AppState {
    /// Build the shared state, validating the strategy parameters.
    pub fn new(config: Config) -> Result<Self, StrategyConfigError> {
        let generator = SignalGenerator::new(config.strategy.clone())?;
        Ok(Self {
            config: Arc::new(config),
            generator: Arc::new(generator),
        })
    }
}

// Re-export commonly used types
pub use services::{Backtester, StrategyConfig};
pub use types::*;
