//! Analysis API endpoints.
//!
//! Callers post an already-fetched candle history; the handlers run the
//! signal engine on it and serialize the results.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AppError, Result};
use crate::types::{closes, Candle, IndicatorSnapshot, PricePosition, Signal};
use crate::AppState;

/// Request body shared by all analysis endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    /// Trading pair label, echoed back (e.g. "ETH/USDT").
    #[serde(default)]
    pub symbol: Option<String>,
    /// Candle interval label (e.g. "1h"). Informational only.
    #[serde(default)]
    pub interval: Option<String>,
    /// Candle history, oldest first.
    pub candles: Vec<Candle>,
}

/// Current indicator values, rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorsResponse {
    pub rsi: f64,
    pub bollinger_upper: f64,
    pub bollinger_middle: f64,
    pub bollinger_lower: f64,
    pub current_price: f64,
    pub price_position: PricePosition,
}

impl From<IndicatorSnapshot> for IndicatorsResponse {
    fn from(snapshot: IndicatorSnapshot) -> Self {
        Self {
            rsi: round_cents(snapshot.rsi),
            bollinger_upper: round_cents(snapshot.bands.upper),
            bollinger_middle: round_cents(snapshot.bands.middle),
            bollinger_lower: round_cents(snapshot.bands.lower),
            current_price: round_cents(snapshot.current_price),
            price_position: snapshot.price_position,
        }
    }
}

/// Full analysis result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    pub signal: Signal,
    pub confidence: f64,
    pub win_rate: f64,
    pub reasoning: String,
    /// Omitted when the history is too short for the indicators.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicators: Option<IndicatorsResponse>,
    pub timestamp: String,
}

/// Simplified signal result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalResponse {
    pub signal: Signal,
    pub confidence: f64,
    pub timestamp: String,
}

/// Create the analysis router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/indicators", post(get_indicators))
        .route("/analyze", post(analyze))
        .route("/signal", post(get_signal))
}

/// Reject empty histories and histories above the configured bound.
fn validate_candles(state: &AppState, candles: &[Candle]) -> Result<()> {
    if candles.is_empty() {
        return Err(AppError::BadRequest("No candles provided".to_string()));
    }
    if candles.len() > state.config.max_candles {
        return Err(AppError::BadRequest(format!(
            "Too many candles: {} (max {})",
            candles.len(),
            state.config.max_candles
        )));
    }
    Ok(())
}

/// Current indicator values for the posted history.
async fn get_indicators(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<IndicatorsResponse>> {
    validate_candles(&state, &request.candles)?;

    let snapshot =
        IndicatorSnapshot::from_closes(&closes(&request.candles), state.generator.config())?;

    Ok(Json(snapshot.into()))
}

/// Full market analysis with backtested confidence.
async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResponse>> {
    validate_candles(&state, &request.candles)?;

    let (signal, snapshot) = state.generator.generate_with_snapshot(&request.candles);
    let indicators = snapshot.map(IndicatorsResponse::from);

    info!(
        "Analyzed {} ({} candles, {}): {} at {:.1}% confidence",
        request.symbol.as_deref().unwrap_or("unknown"),
        request.candles.len(),
        request.interval.as_deref().unwrap_or("n/a"),
        signal.signal(),
        signal.confidence()
    );

    Ok(Json(AnalysisResponse {
        symbol: request.symbol,
        signal: signal.signal(),
        confidence: signal.confidence(),
        win_rate: signal.win_rate(),
        reasoning: signal.reasoning().to_string(),
        indicators,
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}

/// Signal and confidence only.
async fn get_signal(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<SignalResponse>> {
    validate_candles(&state, &request.candles)?;

    let signal = state.generator.generate_signal(&request.candles);

    Ok(Json(SignalResponse {
        signal: signal.signal(),
        confidence: signal.confidence(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}

/// Two decimals, ties to even on the exact value.
fn round_cents(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::types::BandSet;

    fn state_with_max(max_candles: usize) -> AppState {
        AppState::new(Config {
            max_candles,
            ..Default::default()
        })
        .unwrap()
    }

    fn request(prices: &[f64]) -> AnalyzeRequest {
        AnalyzeRequest {
            symbol: Some("ETH/USDT".to_string()),
            interval: Some("1h".to_string()),
            candles: prices
                .iter()
                .enumerate()
                .map(|(i, &p)| Candle::flat(i as i64 * 3_600_000, p))
                .collect(),
        }
    }

    fn chop(count: usize) -> Vec<f64> {
        (0..count)
            .map(|i| if i % 2 == 0 { 100.0 } else { 101.0 })
            .collect()
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(12.345_6), 12.35);
        assert_eq!(round_cents(99.994), 99.99);
        assert_eq!(round_cents(0.125), 0.12);
        assert_eq!(round_cents(0.375), 0.38);
    }

    #[test]
    fn test_indicators_response_from_snapshot() {
        let response = IndicatorsResponse::from(IndicatorSnapshot {
            rsi: 28.123,
            bands: BandSet {
                upper: 105.126,
                middle: 100.0,
                lower: 94.874,
            },
            current_price: 94.5,
            price_position: PricePosition::Lower,
        });
        assert_eq!(response.rsi, 28.12);
        assert_eq!(response.bollinger_upper, 105.13);
        assert_eq!(response.bollinger_lower, 94.87);

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"bollingerMiddle\":100.0"));
        assert!(json.contains("\"pricePosition\":\"LOWER\""));
    }

    #[test]
    fn test_analyze_request_deserialization() {
        let json = r#"{"candles":[{"timestamp":0,"open":1.0,"high":1.0,"low":1.0,"close":1.0,"volume":5.0}]}"#;
        let request: AnalyzeRequest = serde_json::from_str(json).unwrap();
        assert!(request.symbol.is_none());
        assert_eq!(request.candles.len(), 1);
    }

    #[tokio::test]
    async fn test_analyze_handler() {
        let state = state_with_max(5000);
        let Json(response) = analyze(State(state), Json(request(&chop(150)))).await.unwrap();
        assert_eq!(response.signal, Signal::Hold);
        assert_eq!(response.confidence, 0.0);
        assert_eq!(response.win_rate, 50.0);
        assert_eq!(response.symbol.as_deref(), Some("ETH/USDT"));
        assert!(response.indicators.is_some());
    }

    #[tokio::test]
    async fn test_analyze_indicators_match_decision() {
        let state = state_with_max(5000);
        let mut prices = chop(100);
        prices.extend([98.0, 95.0, 92.0, 89.0]);

        let Json(response) = analyze(State(state.clone()), Json(request(&prices)))
            .await
            .unwrap();
        assert_eq!(response.signal, Signal::BuyCall);

        let expected = IndicatorSnapshot::from_closes(&prices, state.generator.config()).unwrap();
        assert_eq!(response.indicators, Some(IndicatorsResponse::from(expected)));
        assert_eq!(
            response.indicators.map(|i| i.price_position),
            Some(PricePosition::Lower)
        );
    }

    #[tokio::test]
    async fn test_analyze_short_history_keeps_indicators() {
        let state = state_with_max(5000);
        let Json(response) = analyze(State(state), Json(request(&chop(40)))).await.unwrap();
        assert!(response.reasoning.contains("Insufficient"));
        assert_eq!(response.indicators.map(|i| i.bollinger_middle), Some(100.5));
    }

    #[tokio::test]
    async fn test_analyze_short_history_omits_indicators() {
        let state = state_with_max(5000);
        let Json(response) = analyze(State(state), Json(request(&chop(10)))).await.unwrap();
        assert_eq!(response.signal, Signal::Hold);
        assert_eq!(response.win_rate, 0.0);
        assert!(response.reasoning.contains("Insufficient"));
        assert!(response.indicators.is_none());

        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("indicators"));
    }

    #[tokio::test]
    async fn test_indicators_handler() {
        let state = state_with_max(5000);
        let Json(response) = get_indicators(State(state), Json(request(&chop(40))))
            .await
            .unwrap();
        assert_eq!(response.current_price, 101.0);
        assert_eq!(response.bollinger_middle, 100.5);
        assert_eq!(response.price_position, PricePosition::Middle);
    }

    #[tokio::test]
    async fn test_indicators_handler_insufficient_data() {
        let state = state_with_max(5000);
        let result = get_indicators(State(state), Json(request(&chop(5)))).await;
        assert!(matches!(result, Err(AppError::Indicator(_))));
    }

    #[tokio::test]
    async fn test_signal_handler() {
        let state = state_with_max(5000);
        let Json(response) = get_signal(State(state), Json(request(&chop(120)))).await.unwrap();
        assert_eq!(response.signal, Signal::Hold);
        assert_eq!(response.confidence, 0.0);
    }

    #[tokio::test]
    async fn test_empty_candles_rejected() {
        let state = state_with_max(5000);
        let result = analyze(State(state), Json(request(&[]))).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_too_many_candles_rejected() {
        let state = state_with_max(100);
        let result = get_signal(State(state), Json(request(&chop(101)))).await;
        match result {
            Err(AppError::BadRequest(msg)) => assert!(msg.contains("max 100")),
            other => panic!("expected BadRequest, got {:?}", other.map(|j| j.0)),
        }
    }
}
