use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete trading recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    /// Oversold: expect an upward reversal.
    BuyCall,
    /// Overbought: expect a downward reversal.
    BuyPut,
    Hold,
    /// Reserved for position management. Never produced by the engine.
    ClosePosition,
}

impl Signal {
    /// Wire label (e.g. `BUY_CALL`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::BuyCall => "BUY_CALL",
            Signal::BuyPut => "BUY_PUT",
            Signal::Hold => "HOLD",
            Signal::ClosePosition => "CLOSE_POSITION",
        }
    }

    /// Whether this signal recommends opening a trade.
    pub fn is_trade(&self) -> bool {
        matches!(self, Signal::BuyCall | Signal::BuyPut)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a price sits relative to a band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PricePosition {
    Upper,
    Middle,
    Lower,
}

impl PricePosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricePosition::Upper => "UPPER",
            PricePosition::Middle => "MIDDLE",
            PricePosition::Lower => "LOWER",
        }
    }
}

impl fmt::Display for PricePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bollinger band values. `upper >= middle >= lower`; all equal when the
/// window has zero variance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandSet {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl BandSet {
    /// Distance between the outer bands.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Result of a walk-forward backtest over a candle history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestOutcome {
    /// Percentage of qualifying signals that won (0-100). 50.0 when no
    /// signal qualified.
    pub win_rate: f64,
    pub total_signals: u32,
    pub wins: u32,
    /// Oversold signals among `total_signals`.
    pub call_signals: u32,
    /// Overbought signals among `total_signals`.
    pub put_signals: u32,
}

impl BacktestOutcome {
    /// Neutral prior reported when the walk found nothing to score.
    pub const NEUTRAL_WIN_RATE: f64 = 50.0;

    pub fn no_signals() -> Self {
        Self {
            win_rate: Self::NEUTRAL_WIN_RATE,
            total_signals: 0,
            wins: 0,
            call_signals: 0,
            put_signals: 0,
        }
    }

    pub fn has_signals(&self) -> bool {
        self.total_signals > 0
    }
}

/// Current indicator readings for the newest candle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSnapshot {
    pub rsi: f64,
    pub bands: BandSet,
    pub current_price: f64,
    pub price_position: PricePosition,
}

/// Final recommendation produced by the signal generator.
///
/// Fields are read-only once constructed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingSignal {
    signal: Signal,
    confidence: f64,
    win_rate: f64,
    reasoning: String,
}

impl TradingSignal {
    pub const INSUFFICIENT_DATA: &'static str = "Insufficient data for analysis";

    pub fn new(signal: Signal, confidence: f64, win_rate: f64, reasoning: String) -> Self {
        Self {
            signal,
            confidence,
            win_rate,
            reasoning,
        }
    }

    /// HOLD with zero confidence and win rate, used for short histories.
    pub fn insufficient_data() -> Self {
        Self::new(Signal::Hold, 0.0, 0.0, Self::INSUFFICIENT_DATA.to_string())
    }

    pub fn signal(&self) -> Signal {
        self.signal
    }

    /// Confidence score (0-100, one decimal).
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Backtested win rate percentage (0-100, one decimal).
    pub fn win_rate(&self) -> f64 {
        self.win_rate
    }

    pub fn reasoning(&self) -> &str {
        &self.reasoning
    }
}
