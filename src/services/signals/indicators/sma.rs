//! Simple Moving Average (SMA) indicator.

use super::{mean, require_period, require_prices, Indicator, IndicatorError};

/// SMA (Simple Moving Average) indicator.
///
/// Calculates the average close over the last `period` prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sma {
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Indicator for Sma {
    type Output = f64;

    fn id(&self) -> &'static str {
        match self.period {
            20 => "sma20",
            50 => "sma50",
            _ => "sma",
        }
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn calculate(&self, prices: &[f64]) -> Result<f64, IndicatorError> {
        sma(prices, self.period)
    }
}

/// Mean of the last `period` prices.
pub fn sma(prices: &[f64], period: usize) -> Result<f64, IndicatorError> {
    require_period("SMA", period, 1)?;
    require_prices("SMA", prices, period)?;
    Ok(mean(&prices[prices.len() - period..]))
}
