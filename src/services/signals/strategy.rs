//! Strategy parameters for the mean-reversion signal engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::indicators::{BollingerBands, Indicator, Rsi};

/// Strategy configuration errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StrategyConfigError {
    #[error("Invalid indicator period: {0}")]
    InvalidPeriod(String),
    #[error("Invalid RSI thresholds: {0}")]
    InvalidThresholds(String),
    #[error("Minimum candle count {min_candles} is below the {required} needed by the indicators")]
    MinCandlesTooLow { min_candles: usize, required: usize },
    #[error("Invalid backtest window: {0}")]
    InvalidBacktestWindow(String),
    #[error("Confidence weights must be non-negative and sum to 1.0, got {0}")]
    InvalidWeights(f64),
}

/// Immutable strategy parameters shared by the evaluator, backtester,
/// confidence scorer and signal generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// RSI lookback period.
    pub rsi_period: usize,

    /// Bollinger Bands window.
    pub bollinger_period: usize,

    /// Bollinger Bands standard deviation multiplier.
    pub bollinger_std_dev: f64,

    /// RSI below this (with price at/below the lower band) is oversold.
    pub rsi_oversold: f64,

    /// RSI above this (with price at/above the upper band) is overbought.
    pub rsi_overbought: f64,

    /// RSI below this (with price under the middle band) is approaching oversold.
    pub rsi_approaching_oversold: f64,

    /// RSI above this (with price over the middle band) is approaching overbought.
    pub rsi_approaching_overbought: f64,

    /// Histories shorter than this are answered with HOLD without analysis.
    pub min_candles: usize,

    /// First candle index the backtest walk evaluates.
    pub min_lookback: usize,

    /// Candles after a historical signal inspected to label it a win.
    pub lookahead: usize,

    /// Fractional move within the lookahead that counts as a win (0.01 = 1%).
    pub profit_threshold: f64,

    /// Confidence weight of the backtested win rate.
    pub win_rate_weight: f64,

    /// Confidence weight of RSI extremity.
    pub rsi_weight: f64,

    /// Confidence weight of distance beyond the band.
    pub band_weight: f64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            bollinger_period: 20,
            bollinger_std_dev: 2.0,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            rsi_approaching_oversold: 40.0,
            rsi_approaching_overbought: 60.0,
            min_candles: 100,
            min_lookback: 50,
            lookahead: 24, // one day of hourly candles
            profit_threshold: 0.01,
            win_rate_weight: 0.5,
            rsi_weight: 0.3,
            band_weight: 0.2,
        }
    }
}

impl StrategyConfig {
    /// The configured RSI indicator.
    pub fn rsi(&self) -> Rsi {
        Rsi::new(self.rsi_period)
    }

    /// The configured Bollinger Bands indicator.
    pub fn bollinger(&self) -> BollingerBands {
        BollingerBands::new(self.bollinger_period, self.bollinger_std_dev)
    }

    /// Prices needed before both indicators produce a value.
    pub fn indicator_warmup(&self) -> usize {
        self.rsi().min_periods().max(self.bollinger().min_periods())
    }

    /// Check that the parameters describe a usable strategy.
    ///
    /// A valid config guarantees the current-point indicators never fail once
    /// `min_candles` candles are available.
    pub fn validate(&self) -> Result<(), StrategyConfigError> {
        if self.rsi_period == 0 {
            return Err(StrategyConfigError::InvalidPeriod(
                "RSI period must be at least 1".to_string(),
            ));
        }
        if self.bollinger_period < 2 {
            return Err(StrategyConfigError::InvalidPeriod(
                "Bollinger period must be at least 2".to_string(),
            ));
        }
        if !(self.bollinger_std_dev > 0.0) {
            return Err(StrategyConfigError::InvalidPeriod(
                "Bollinger std dev multiplier must be positive".to_string(),
            ));
        }

        let ordered = 0.0 < self.rsi_oversold
            && self.rsi_oversold <= self.rsi_approaching_oversold
            && self.rsi_approaching_oversold <= self.rsi_approaching_overbought
            && self.rsi_approaching_overbought <= self.rsi_overbought
            && self.rsi_overbought < 100.0;
        if !ordered {
            return Err(StrategyConfigError::InvalidThresholds(format!(
                "expected 0 < {} <= {} <= {} <= {} < 100",
                self.rsi_oversold,
                self.rsi_approaching_oversold,
                self.rsi_approaching_overbought,
                self.rsi_overbought
            )));
        }

        let required = self.indicator_warmup();
        if self.min_candles < required {
            return Err(StrategyConfigError::MinCandlesTooLow {
                min_candles: self.min_candles,
                required,
            });
        }

        if self.lookahead == 0 {
            return Err(StrategyConfigError::InvalidBacktestWindow(
                "lookahead must be at least 1 candle".to_string(),
            ));
        }
        if !(self.profit_threshold >= 0.0 && self.profit_threshold < 1.0) {
            return Err(StrategyConfigError::InvalidBacktestWindow(format!(
                "profit threshold {} must be in [0, 1)",
                self.profit_threshold
            )));
        }

        let weights = [self.win_rate_weight, self.rsi_weight, self.band_weight];
        let sum: f64 = weights.iter().sum();
        if weights.iter().any(|w| *w < 0.0) || (sum - 1.0).abs() > 1e-9 {
            return Err(StrategyConfigError::InvalidWeights(sum));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = StrategyConfig::default();
        assert_eq!(config.rsi_period, 14);
        assert_eq!(config.bollinger_period, 20);
        assert_eq!(config.bollinger_std_dev, 2.0);
        assert_eq!(config.rsi_oversold, 30.0);
        assert_eq!(config.rsi_overbought, 70.0);
        assert_eq!(config.min_candles, 100);
        assert_eq!(config.min_lookback, 50);
        assert_eq!(config.lookahead, 24);
        assert_eq!(config.indicator_warmup(), 20);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(StrategyConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_min_candles_must_cover_indicators() {
        let config = StrategyConfig {
            min_candles: 10,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(StrategyConfigError::MinCandlesTooLow {
                min_candles: 10,
                required: 20,
            })
        );
    }

    #[test]
    fn test_thresholds_must_be_ordered() {
        let config = StrategyConfig {
            rsi_oversold: 45.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(StrategyConfigError::InvalidThresholds(_))
        ));
    }

    #[test]
    fn test_zero_lookahead_rejected() {
        let config = StrategyConfig {
            lookahead: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(StrategyConfigError::InvalidBacktestWindow(_))
        ));
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let config = StrategyConfig {
            band_weight: 0.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(StrategyConfigError::InvalidWeights(_))
        ));
    }

    #[test]
    fn test_bollinger_period_one_rejected() {
        let config = StrategyConfig {
            bollinger_period: 1,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(StrategyConfigError::InvalidPeriod(_))
        ));
    }

    #[test]
    fn test_config_serde_roundtrip_keeps_defaults() {
        let json = serde_json::to_string(&StrategyConfig::default()).unwrap();
        let parsed: StrategyConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, StrategyConfig::default());
    }
}
