//! Trading signals service module.
//!
//! Provides technical indicator calculations, the rule-based evaluator,
//! confidence scoring and the signal generator that ties them together.

pub mod confidence;
pub mod evaluator;
pub mod generator;
pub mod indicators;
pub mod snapshot;
pub mod strategy;

pub use confidence::score_confidence;
pub use evaluator::{classify, evaluate, Evaluation, MarketConditions, Setup};
pub use generator::SignalGenerator;
pub use indicators::{
    bollinger_bands, ema, price_position, rsi, sma, Indicator, IndicatorError,
};
pub use strategy::{StrategyConfig, StrategyConfigError};
