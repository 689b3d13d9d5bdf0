//! Relative Strength Index (RSI) indicator.

use super::{require_period, require_prices, Indicator, IndicatorError};

/// RSI (Relative Strength Index) indicator.
///
/// Measures momentum by comparing the magnitude of recent gains to recent losses.
/// Values range from 0-100:
/// - Below 30: Oversold (potential buy signal)
/// - Above 70: Overbought (potential sell signal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn id(&self) -> &'static str {
        "rsi"
    }

    fn min_periods(&self) -> usize {
        self.period + 1
    }

    fn calculate(&self, prices: &[f64]) -> Result<f64, IndicatorError> {
        rsi(prices, self.period)
    }
}

/// RSI for the last price in `prices`, using Wilder's smoothing.
///
/// Requires at least `period + 1` prices. A zero average loss yields exactly 100.
pub fn rsi(prices: &[f64], period: usize) -> Result<f64, IndicatorError> {
    require_period("RSI", period, 1)?;
    require_prices("RSI", prices, period + 1)?;

    let mut state = RsiState::new(period);
    for &price in prices {
        state.push(price);
    }

    state.value().ok_or(IndicatorError::InsufficientData {
        indicator: "RSI",
        required: period + 1,
        available: prices.len(),
    })
}

/// Running Wilder RSI state, fed one price at a time.
///
/// After `n` pushes the state holds exactly the averages [`rsi`] computes on
/// the same `n` prices, so a walk over a growing prefix can extend the state
/// instead of recomputing it.
#[derive(Debug, Clone)]
pub struct RsiState {
    period: usize,
    prev: Option<f64>,
    deltas: usize,
    gain_sum: f64,
    loss_sum: f64,
    avg_gain: f64,
    avg_loss: f64,
}

impl RsiState {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            prev: None,
            deltas: 0,
            gain_sum: 0.0,
            loss_sum: 0.0,
            avg_gain: 0.0,
            avg_loss: 0.0,
        }
    }

    /// Feed the next price.
    pub fn push(&mut self, price: f64) {
        let Some(prev) = self.prev.replace(price) else {
            return;
        };

        let change = price - prev;
        let (gain, loss) = if change > 0.0 {
            (change, 0.0)
        } else if change < 0.0 {
            (0.0, -change)
        } else {
            (0.0, 0.0)
        };

        self.deltas += 1;
        let period = self.period as f64;

        if self.deltas < self.period {
            self.gain_sum += gain;
            self.loss_sum += loss;
        } else if self.deltas == self.period {
            // Seed with the simple mean of the first `period` moves
            self.gain_sum += gain;
            self.loss_sum += loss;
            self.avg_gain = self.gain_sum / period;
            self.avg_loss = self.loss_sum / period;
        } else {
            self.avg_gain = (self.avg_gain * (period - 1.0) + gain) / period;
            self.avg_loss = (self.avg_loss * (period - 1.0) + loss) / period;
        }
    }

    /// Current RSI, or `None` until `period + 1` prices have been pushed.
    pub fn value(&self) -> Option<f64> {
        if self.period == 0 || self.deltas < self.period {
            return None;
        }

        if self.avg_loss == 0.0 {
            return Some(100.0);
        }

        let rs = self.avg_gain / self.avg_loss;
        Some(100.0 - (100.0 / (1.0 + rs)))
    }
}
