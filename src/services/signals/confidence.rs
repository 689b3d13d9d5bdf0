//! Confidence scoring for trade signals.
//!
//! Confidence is a weighted blend (default weights in parentheses):
//! - backtested win rate (50%)
//! - RSI extremity beyond the oversold/overbought threshold (30%)
//! - distance of price beyond the Bollinger band, relative to band width (20%)

use super::evaluator::MarketConditions;
use super::strategy::StrategyConfig;
use crate::types::Signal;

/// Score how strongly `signal` should be trusted, in `[0, 100]`.
///
/// Non-trading signals always score 0.
pub fn score_confidence(
    signal: Signal,
    conditions: &MarketConditions,
    win_rate: f64,
    config: &StrategyConfig,
) -> f64 {
    if !signal.is_trade() {
        return 0.0;
    }

    let win_rate_score = win_rate * config.win_rate_weight;
    let rsi_score = rsi_extremity(signal, conditions.rsi, config) * 100.0 * config.rsi_weight;
    let band_score = band_distance(signal, conditions) * 100.0 * config.band_weight;

    (win_rate_score + rsi_score + band_score).clamp(0.0, 100.0)
}

/// How far RSI sits past the trigger threshold, as a fraction of the room
/// left on that side of the scale.
fn rsi_extremity(signal: Signal, rsi: f64, config: &StrategyConfig) -> f64 {
    let extremity = match signal {
        Signal::BuyCall => (config.rsi_oversold - rsi) / config.rsi_oversold,
        Signal::BuyPut => (rsi - config.rsi_overbought) / (100.0 - config.rsi_overbought),
        Signal::Hold | Signal::ClosePosition => 0.0,
    };
    extremity.max(0.0)
}

/// How far price sits outside the band, as a fraction of band width.
/// Collapsed bands contribute nothing.
fn band_distance(signal: Signal, c: &MarketConditions) -> f64 {
    let band_range = c.bands.width();
    if band_range <= 0.0 {
        return 0.0;
    }

    let distance = match signal {
        Signal::BuyCall => (c.bands.lower - c.price) / band_range,
        Signal::BuyPut => (c.price - c.bands.upper) / band_range,
        Signal::Hold | Signal::ClosePosition => 0.0,
    };
    distance.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::signals::indicators::assert_approx;
    use crate::types::BandSet;

    fn conditions(price: f64, rsi: f64) -> MarketConditions {
        MarketConditions {
            price,
            rsi,
            bands: BandSet {
                upper: 110.0,
                middle: 100.0,
                lower: 90.0,
            },
        }
    }

    fn score(signal: Signal, price: f64, rsi: f64, win_rate: f64) -> f64 {
        score_confidence(signal, &conditions(price, rsi), win_rate, &StrategyConfig::default())
    }

    #[test]
    fn test_hold_has_zero_confidence() {
        assert_eq!(score(Signal::Hold, 80.0, 10.0, 100.0), 0.0);
        assert_eq!(score(Signal::ClosePosition, 80.0, 10.0, 100.0), 0.0);
    }

    #[test]
    fn test_buy_call_components() {
        // win rate 60 * 0.5 = 30
        // rsi (30 - 15) / 30 = 0.5 -> 15
        // band (90 - 86) / 20 = 0.2 -> 4
        assert_approx(score(Signal::BuyCall, 86.0, 15.0, 60.0), 49.0, 1e-9);
    }

    #[test]
    fn test_buy_put_components() {
        // win rate 40 * 0.5 = 20
        // rsi (85 - 70) / 30 = 0.5 -> 15
        // band (115 - 110) / 20 = 0.25 -> 5
        assert_approx(score(Signal::BuyPut, 115.0, 85.0, 40.0), 40.0, 1e-9);
    }

    #[test]
    fn test_components_never_negative() {
        // Price inside the band and RSI on the wrong side contribute nothing
        assert_approx(score(Signal::BuyCall, 100.0, 50.0, 50.0), 25.0, 1e-9);
        assert_approx(score(Signal::BuyPut, 100.0, 50.0, 50.0), 25.0, 1e-9);
    }

    #[test]
    fn test_confidence_clamped_to_100() {
        let value = score(Signal::BuyCall, 0.0, 0.0, 100.0);
        assert_eq!(value, 100.0);
    }

    #[test]
    fn test_collapsed_bands_skip_band_component() {
        let flat = MarketConditions {
            price: 100.0,
            rsi: 0.0,
            bands: BandSet {
                upper: 100.0,
                middle: 100.0,
                lower: 100.0,
            },
        };
        let value = score_confidence(Signal::BuyCall, &flat, 50.0, &StrategyConfig::default());
        assert!(value.is_finite());
        assert_approx(value, 25.0 + 30.0, 1e-9);
    }
}
