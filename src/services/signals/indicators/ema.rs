//! Exponential Moving Average (EMA) indicator.

use super::{mean, require_period, require_prices, Indicator, IndicatorError};

/// EMA (Exponential Moving Average) indicator.
///
/// Like SMA but gives more weight to recent prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ema {
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Indicator for Ema {
    type Output = f64;

    fn id(&self) -> &'static str {
        match self.period {
            12 => "ema12",
            26 => "ema26",
            _ => "ema",
        }
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn calculate(&self, prices: &[f64]) -> Result<f64, IndicatorError> {
        ema(prices, self.period)
    }
}

/// EMA of the whole series, seeded with the SMA of the first `period` prices.
pub fn ema(prices: &[f64], period: usize) -> Result<f64, IndicatorError> {
    require_period("EMA", period, 1)?;
    require_prices("EMA", prices, period)?;

    let multiplier = 2.0 / (period as f64 + 1.0);

    // First EMA is SMA
    let mut ema = mean(&prices[..period]);
    for price in &prices[period..] {
        ema = (price - ema) * multiplier + ema;
    }

    Ok(ema)
}
