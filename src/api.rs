/// Client for the remote sentiment classification API
use gloo_net::http::Request;
use serde::{Deserialize, Serialize};

use crate::comment::Prediction;

// API base URL, read at compile time. Defaults to the local development API.
pub const API_BASE: &str = match option_env!("SENTIMENT_API_BASE") {
    Some(url) => url,
    None => "http://localhost:8000",
};

/// Batch classification request: the raw comment texts, order preserved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchRequest {
    pub texts: Vec<String>,
}

/// Batch classification response. Predictions are expected to have the same
/// length and order as the submitted texts; they are merged back by index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchResponse {
    pub predictions: Vec<Prediction>,
}

/// Classify a batch of comment texts in one request.
///
/// Returns the raw prediction list on success. A transport error or a non-2xx
/// status is a failure; no partial result is ever produced.
pub async fn predict_batch(texts: Vec<String>) -> Result<Vec<Prediction>, String> {
    let url = format!("{}/predict/batch", API_BASE);
    let body = BatchRequest { texts };

    let response = Request::post(&url)
        .header("Content-Type", "application/json")
        .json(&body)
        .map_err(|e| format!("Serialize error: {:?}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {:?}", e))?;

    if !response.ok() {
        return Err(format!("API error: {}", response.status()));
    }

    let parsed: BatchResponse = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {:?}", e))?;

    Ok(parsed.predictions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::Sentiment;

    #[test]
    fn test_batch_request_body_shape() {
        let body = BatchRequest {
            texts: vec!["Great video!".to_string(), "Nice".to_string()],
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"texts":["Great video!","Nice"]}"#);
    }

    #[test]
    fn test_batch_response_parsing() {
        let json = r#"{
            "predictions": [
                {"sentiment": 1, "confidence": 0.9},
                {"sentiment": -1, "confidence": 0.4},
                {"sentiment": 0, "confidence": 0.5}
            ]
        }"#;

        let response: BatchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.predictions.len(), 3);
        assert_eq!(response.predictions[0].sentiment, Sentiment::Positive);
        assert_eq!(response.predictions[1].sentiment, Sentiment::Negative);
        assert_eq!(response.predictions[2].sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_batch_response_rejects_bad_sentiment() {
        let json = r#"{"predictions": [{"sentiment": 3, "confidence": 0.9}]}"#;
        assert!(serde_json::from_str::<BatchResponse>(json).is_err());
    }
}
