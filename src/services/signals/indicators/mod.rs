//! Technical indicator implementations.
//!
//! Every indicator is available both as a free function over a close price
//! series and as a configured struct implementing [`Indicator`]. Only the
//! terminal value (for the newest price) is computed.

pub mod bollinger;
pub mod ema;
pub mod position;
pub mod rsi;
pub mod sma;

pub use bollinger::{bollinger_bands, BollingerBands};
pub use ema::{ema, Ema};
pub use position::price_position;
pub use rsi::{rsi, Rsi, RsiState};
pub use sma::{sma, Sma};

use thiserror::Error;

/// Indicator calculation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    #[error("Need at least {required} prices for {indicator} calculation, got {available}")]
    InsufficientData {
        indicator: &'static str,
        required: usize,
        available: usize,
    },
    #[error("Invalid {indicator} period: {period}")]
    InvalidPeriod { indicator: &'static str, period: usize },
}

/// Trait implemented by every configured indicator.
pub trait Indicator: Send + Sync {
    type Output;

    /// Unique identifier for this indicator.
    fn id(&self) -> &'static str;

    /// Minimum number of prices required for calculation.
    fn min_periods(&self) -> usize;

    /// Calculate the indicator value for the newest price.
    fn calculate(&self, prices: &[f64]) -> Result<Self::Output, IndicatorError>;
}

/// Fail with `InsufficientData` when fewer than `required` prices are given.
pub(crate) fn require_prices(
    indicator: &'static str,
    prices: &[f64],
    required: usize,
) -> Result<(), IndicatorError> {
    if prices.len() < required {
        return Err(IndicatorError::InsufficientData {
            indicator,
            required,
            available: prices.len(),
        });
    }
    Ok(())
}

/// Fail with `InvalidPeriod` when `period` is below `min`.
pub(crate) fn require_period(
    indicator: &'static str,
    period: usize,
    min: usize,
) -> Result<(), IndicatorError> {
    if period < min {
        return Err(IndicatorError::InvalidPeriod { indicator, period });
    }
    Ok(())
}

/// Arithmetic mean. Callers guarantee a non-empty slice.
pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Assert two f64 values are approximately equal.
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, epsilon={epsilon}"
    );
}
