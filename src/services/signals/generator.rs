//! Trading signal generation.
//!
//! Combines the current indicator snapshot, the rule evaluator, a
//! walk-forward backtest and the confidence scorer into one
//! [`TradingSignal`].

use tracing::{debug, warn};

use super::confidence::score_confidence;
use super::evaluator::{evaluate, MarketConditions};
use super::strategy::{StrategyConfig, StrategyConfigError};
use crate::services::backtester::Backtester;
use crate::types::{closes, BacktestOutcome, Candle, IndicatorSnapshot, TradingSignal};

/// Mean-reversion signal generator with backtested confidence.
///
/// Holds only immutable configuration, so one instance can serve concurrent
/// callers.
#[derive(Debug, Clone, Default)]
pub struct SignalGenerator {
    config: StrategyConfig,
}

impl SignalGenerator {
    /// Create a generator for a validated strategy.
    pub fn new(config: StrategyConfig) -> Result<Self, StrategyConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    /// Generate a trading signal for the newest candle.
    ///
    /// Histories shorter than `min_candles` get HOLD with zero confidence and
    /// win rate without running any analysis.
    pub fn generate_signal(&self, candles: &[Candle]) -> TradingSignal {
        if self.too_short(candles) {
            return TradingSignal::insufficient_data();
        }
        self.generate_with_snapshot(candles).0
    }

    /// Generate a trading signal together with the indicator snapshot the
    /// decision was made on.
    ///
    /// The snapshot is still returned for histories below `min_candles` when
    /// they cover the indicator windows.
    pub fn generate_with_snapshot(
        &self,
        candles: &[Candle],
    ) -> (TradingSignal, Option<IndicatorSnapshot>) {
        let closes = closes(candles);
        let snapshot = IndicatorSnapshot::from_closes(&closes, &self.config);

        if self.too_short(candles) {
            return (TradingSignal::insufficient_data(), snapshot.ok());
        }

        match snapshot {
            Ok(snapshot) => (self.decide(&closes, &snapshot), Some(snapshot)),
            Err(e) => {
                // Unreachable with a validated config
                warn!("Signal analysis failed: {}", e);
                (TradingSignal::insufficient_data(), None)
            }
        }
    }

    fn too_short(&self, candles: &[Candle]) -> bool {
        if candles.len() < self.config.min_candles {
            debug!(
                "Insufficient candles for analysis: {} < {}",
                candles.len(),
                self.config.min_candles
            );
            return true;
        }
        false
    }

    fn decide(&self, closes: &[f64], snapshot: &IndicatorSnapshot) -> TradingSignal {
        let backtest = Backtester::new(&self.config).run_closes(closes);

        let conditions = MarketConditions {
            price: snapshot.current_price,
            rsi: snapshot.rsi,
            bands: snapshot.bands,
        };
        let evaluation = evaluate(&conditions, &self.config);
        let confidence =
            score_confidence(evaluation.signal, &conditions, backtest.win_rate, &self.config);

        debug!(
            "Generated {} (confidence {:.1}, win rate {:.1}%, {} historical signals)",
            evaluation.signal, confidence, backtest.win_rate, backtest.total_signals
        );

        TradingSignal::new(
            evaluation.signal,
            round_to_tenth(confidence),
            round_to_tenth(backtest.win_rate),
            format!("{} {}", evaluation.reasoning, backtest_summary(&backtest)),
        )
    }
}

/// Round to one decimal, ties to even on the exact binary value.
///
/// `{:.1}` formats the exact value, so 0.15 (stored just below 0.15) becomes
/// 0.1 and the exact tie 6.25 becomes 6.2.
fn round_to_tenth(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}

fn backtest_summary(outcome: &BacktestOutcome) -> String {
    if outcome.has_signals() {
        format!(
            "Backtest: {:.1}% win rate over {} historical signals ({} won; {} call / {} put).",
            round_to_tenth(outcome.win_rate),
            outcome.total_signals,
            outcome.wins,
            outcome.call_signals,
            outcome.put_signals
        )
    } else {
        format!(
            "Backtest: no qualifying historical signals, assuming {:.1}% win rate.",
            BacktestOutcome::NEUTRAL_WIN_RATE
        )
    }
}
