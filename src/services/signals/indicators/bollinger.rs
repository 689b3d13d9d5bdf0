//! Bollinger Bands indicator.

use super::{mean, require_period, require_prices, Indicator, IndicatorError};
use crate::types::BandSet;

/// Bollinger Bands indicator.
///
/// Consists of:
/// - Middle band: SMA(20)
/// - Upper band: SMA + 2 * StdDev
/// - Lower band: SMA - 2 * StdDev
///
/// The deviation is the sample standard deviation (divisor `period - 1`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev_multiplier: 2.0,
        }
    }
}

impl BollingerBands {
    pub fn new(period: usize, std_dev_multiplier: f64) -> Self {
        Self {
            period,
            std_dev_multiplier,
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn std_dev_multiplier(&self) -> f64 {
        self.std_dev_multiplier
    }
}

impl Indicator for BollingerBands {
    type Output = BandSet;

    fn id(&self) -> &'static str {
        "bollinger"
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn calculate(&self, prices: &[f64]) -> Result<BandSet, IndicatorError> {
        bollinger_bands(prices, self.period, self.std_dev_multiplier)
    }
}

/// Bollinger Bands over the most recent `period` prices.
pub fn bollinger_bands(
    prices: &[f64],
    period: usize,
    std_dev: f64,
) -> Result<BandSet, IndicatorError> {
    require_period("Bollinger Bands", period, 2)?;
    require_prices("Bollinger Bands", prices, period)?;

    let window = &prices[prices.len() - period..];
    let middle = mean(window);
    let std = sample_std_dev(window, middle);

    Ok(BandSet {
        upper: middle + std_dev * std,
        middle,
        lower: middle - std_dev * std,
    })
}

/// Bessel-corrected standard deviation. Needs at least two values.
fn sample_std_dev(values: &[f64], mean: f64) -> f64 {
    let variance: f64 =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}
