//! Rule-based evaluation of the current market conditions.
//!
//! Rules are checked in table order and the first match wins:
//! 1. Price at/below lower band and RSI oversold -> BUY_CALL
//! 2. Price at/above upper band and RSI overbought -> BUY_PUT
//! 3. Price below middle band and RSI approaching oversold -> HOLD
//! 4. Price above middle band and RSI approaching overbought -> HOLD
//! 5. Otherwise -> HOLD (neutral)

use super::strategy::StrategyConfig;
use crate::types::{BandSet, Signal};

/// Inputs to the rule table for a single point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketConditions {
    pub price: f64,
    pub rsi: f64,
    pub bands: BandSet,
}

/// Which rule matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setup {
    Oversold,
    Overbought,
    ApproachingOversold,
    ApproachingOverbought,
    Neutral,
}

impl Setup {
    /// Signal emitted for this setup. Only the two extremes trade.
    pub fn signal(&self) -> Signal {
        match self {
            Setup::Oversold => Signal::BuyCall,
            Setup::Overbought => Signal::BuyPut,
            Setup::ApproachingOversold | Setup::ApproachingOverbought | Setup::Neutral => {
                Signal::Hold
            }
        }
    }
}

/// Outcome of evaluating the rule table.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub setup: Setup,
    pub signal: Signal,
    pub reasoning: String,
}

type Predicate = fn(&MarketConditions, &StrategyConfig) -> bool;

const RULES: [(Predicate, Setup); 4] = [
    (is_oversold, Setup::Oversold),
    (is_overbought, Setup::Overbought),
    (is_approaching_oversold, Setup::ApproachingOversold),
    (is_approaching_overbought, Setup::ApproachingOverbought),
];

fn is_oversold(c: &MarketConditions, config: &StrategyConfig) -> bool {
    c.price <= c.bands.lower && c.rsi < config.rsi_oversold
}

fn is_overbought(c: &MarketConditions, config: &StrategyConfig) -> bool {
    c.price >= c.bands.upper && c.rsi > config.rsi_overbought
}

fn is_approaching_oversold(c: &MarketConditions, config: &StrategyConfig) -> bool {
    c.price < c.bands.middle && c.rsi < config.rsi_approaching_oversold
}

fn is_approaching_overbought(c: &MarketConditions, config: &StrategyConfig) -> bool {
    c.price > c.bands.middle && c.rsi > config.rsi_approaching_overbought
}

/// Find the first matching rule.
pub fn classify(conditions: &MarketConditions, config: &StrategyConfig) -> Setup {
    RULES
        .iter()
        .find(|(matches, _)| matches(conditions, config))
        .map(|(_, setup)| *setup)
        .unwrap_or(Setup::Neutral)
}

/// Classify the conditions and explain the result.
pub fn evaluate(conditions: &MarketConditions, config: &StrategyConfig) -> Evaluation {
    let setup = classify(conditions, config);
    Evaluation {
        setup,
        signal: setup.signal(),
        reasoning: reasoning(setup, conditions, config),
    }
}

fn reasoning(setup: Setup, c: &MarketConditions, config: &StrategyConfig) -> String {
    let MarketConditions { price, rsi, bands } = *c;
    match setup {
        Setup::Oversold => format!(
            "Oversold: Price ${price:.2} at or below lower Bollinger Band ${:.2}, \
             RSI {rsi:.2} < {}. Expecting upward reversal.",
            bands.lower, config.rsi_oversold
        ),
        Setup::Overbought => format!(
            "Overbought: Price ${price:.2} at or above upper Bollinger Band ${:.2}, \
             RSI {rsi:.2} > {}. Expecting downward reversal.",
            bands.upper, config.rsi_overbought
        ),
        Setup::ApproachingOversold => format!(
            "Approaching oversold: Price ${price:.2} below middle band ${:.2}, \
             RSI {rsi:.2}. Waiting for stronger signal.",
            bands.middle
        ),
        Setup::ApproachingOverbought => format!(
            "Approaching overbought: Price ${price:.2} above middle band ${:.2}, \
             RSI {rsi:.2}. Waiting for stronger signal.",
            bands.middle
        ),
        Setup::Neutral => format!(
            "Neutral: Price ${price:.2} within Bollinger Bands (${:.2} - ${:.2}), \
             RSI {rsi:.2} in normal range. No clear trading opportunity.",
            bands.lower, bands.upper
        ),
    }
}
