use serde::{Deserialize, Serialize};

/// OHLCV candle, ordered oldest to newest in any series handed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candle {
    /// Unix timestamp (milliseconds) of the candle open.
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

impl Candle {
    /// Create a candle whose OHLC values all equal `price`.
    pub fn flat(timestamp: i64, price: f64) -> Self {
        Self {
            timestamp,
            open: price,
            high: price,
            low: price,
            close: price,
            volume: 0.0,
        }
    }
}

/// Extract the close price series from a candle slice.
pub fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closes_preserves_order() {
        let candles = vec![
            Candle::flat(0, 1.0),
            Candle::flat(3_600_000, 2.0),
            Candle::flat(7_200_000, 3.0),
        ];
        assert_eq!(closes(&candles), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_candle_deserialize_camel_case() {
        let json = r#"{"timestamp":1704067200000,"open":1.0,"high":2.0,"low":0.5,"close":1.5,"volume":10.0}"#;
        let candle: Candle = serde_json::from_str(json).unwrap();
        assert_eq!(candle.timestamp, 1_704_067_200_000);
        assert_eq!(candle.close, 1.5);
        assert_eq!(candle.volume, 10.0);
    }

    #[test]
    fn test_candle_volume_defaults_to_zero() {
        let json = r#"{"timestamp":0,"open":1.0,"high":1.0,"low":1.0,"close":1.0}"#;
        let candle: Candle = serde_json::from_str(json).unwrap();
        assert_eq!(candle.volume, 0.0);
    }
}
