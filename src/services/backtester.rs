//! Backtesting Engine
//!
//! Estimates the strategy win rate by walking forward over a candle history.
//! At every step the indicators only see the prefix up to that candle; a
//! qualifying oversold/overbought setup is then labeled against the closes of
//! the following `lookahead` candles.
//!
//! RSI is carried forward with [`RsiState`], which performs the same
//! floating-point operations as recomputing it on each prefix. Bollinger
//! Bands only depend on the trailing window and are recomputed per step.

use crate::services::signals::evaluator::{classify, MarketConditions, Setup};
use crate::services::signals::indicators::{bollinger_bands, RsiState};
use crate::services::signals::strategy::StrategyConfig;
use crate::types::{closes, BacktestOutcome, Candle};
use tracing::debug;

/// Running win/loss counts for a walk.
#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    wins: u32,
    call_signals: u32,
    put_signals: u32,
}

impl Tally {
    fn record_call(&mut self, won: bool) {
        self.call_signals += 1;
        if won {
            self.wins += 1;
        }
    }

    fn record_put(&mut self, won: bool) {
        self.put_signals += 1;
        if won {
            self.wins += 1;
        }
    }

    fn into_outcome(self) -> BacktestOutcome {
        let total_signals = self.call_signals + self.put_signals;
        if total_signals == 0 {
            return BacktestOutcome::no_signals();
        }

        BacktestOutcome {
            win_rate: self.wins as f64 / total_signals as f64 * 100.0,
            total_signals,
            wins: self.wins,
            call_signals: self.call_signals,
            put_signals: self.put_signals,
        }
    }
}

/// Walk-forward backtester for the mean-reversion strategy.
pub struct Backtester<'a> {
    config: &'a StrategyConfig,
}

impl<'a> Backtester<'a> {
    pub fn new(config: &'a StrategyConfig) -> Self {
        Self { config }
    }

    /// Backtest over a candle history.
    pub fn run(&self, candles: &[Candle]) -> BacktestOutcome {
        self.run_closes(&closes(candles))
    }

    /// Backtest over a close price series.
    ///
    /// Evaluates indices `min_lookback ..= len - lookahead - 1`. Steps where an
    /// indicator lacks data are skipped. With no qualifying signal the
    /// outcome carries the neutral 50% prior.
    pub fn run_closes(&self, closes: &[f64]) -> BacktestOutcome {
        let config = self.config;
        let end = closes.len().saturating_sub(config.lookahead);
        let start = config.min_lookback;

        if start >= end {
            debug!(
                "Backtest skipped: {} candles leave no room for lookback {} and lookahead {}",
                closes.len(),
                start,
                config.lookahead
            );
            return BacktestOutcome::no_signals();
        }

        let upside = 1.0 + config.profit_threshold;
        let downside = 1.0 - config.profit_threshold;

        let mut rsi_state = RsiState::new(config.rsi_period);
        for &price in &closes[..start] {
            rsi_state.push(price);
        }

        let mut tally = Tally::default();

        for i in start..end {
            let price = closes[i];
            rsi_state.push(price);

            let Some(rsi) = rsi_state.value() else {
                continue;
            };
            let Ok(bands) = bollinger_bands(
                &closes[..=i],
                config.bollinger_period,
                config.bollinger_std_dev,
            ) else {
                continue;
            };

            let future = &closes[i + 1..=i + config.lookahead];
            let conditions = MarketConditions { price, rsi, bands };

            match classify(&conditions, config) {
                Setup::Oversold => tally.record_call(max_close(future) > price * upside),
                Setup::Overbought => tally.record_put(min_close(future) < price * downside),
                Setup::ApproachingOversold | Setup::ApproachingOverbought | Setup::Neutral => {}
            }
        }

        let outcome = tally.into_outcome();
        debug!(
            "Backtest over {} candles: {} signals ({} call / {} put), {} wins, {:.1}% win rate",
            closes.len(),
            outcome.total_signals,
            outcome.call_signals,
            outcome.put_signals,
            outcome.wins,
            outcome.win_rate
        );
        outcome
    }
}

fn max_close(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

fn min_close(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}
