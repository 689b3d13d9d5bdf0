//! Current indicator readings.

use super::indicators::{price_position, Indicator, IndicatorError};
use super::strategy::StrategyConfig;
use crate::types::IndicatorSnapshot;

impl IndicatorSnapshot {
    /// Compute RSI, Bollinger Bands and price position for the newest close.
    pub fn from_closes(closes: &[f64], config: &StrategyConfig) -> Result<Self, IndicatorError> {
        let current_price = *closes.last().ok_or(IndicatorError::InsufficientData {
            indicator: "price",
            required: 1,
            available: 0,
        })?;

        let rsi = config.rsi().calculate(closes)?;
        let bands = config.bollinger().calculate(closes)?;

        Ok(Self {
            rsi,
            bands,
            current_price,
            price_position: price_position(current_price, bands.upper, bands.lower),
        })
    }
}
