//! Prediction orchestrator.
//!
//! Turns a raw URL into a [`PredictionResult`]: validate, invoke the
//! classifier adapter once, strictly decode its stdout. Exactly one
//! invocation per call; no retries, no caching.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::classifier::Classifier;
use crate::error::PredictError;

/// A URL submitted for classification.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionRequest {
    #[serde(default)]
    pub url: String,
}

/// Classifier verdict for one URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Phishing,
    Legitimate,
}

/// Normalized classification result returned to callers.
///
/// `confidence` is always a fraction in [0, 1]; percentage-scale classifier
/// output is normalized during decoding.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    pub url: String,
    pub prediction: Verdict,
    pub confidence: f64,
}

/// Raw record the external classifier writes to stdout.
///
/// The classifier may echo the URL; `prediction` and `confidence` are
/// required.
#[derive(Debug, Deserialize)]
struct RawPrediction {
    url: Option<String>,
    prediction: Verdict,
    confidence: f64,
}

/// Drives one classifier invocation per request.
pub struct Predictor {
    classifier: Arc<dyn Classifier>,
}

impl Predictor {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }

    /// Classify one URL.
    ///
    /// Empty/whitespace-only URLs are rejected before any process is
    /// spawned. Adapter failures surface as [`PredictError::PredictionFailed`];
    /// a successful run whose output cannot be decoded surfaces as
    /// [`PredictError::MalformedOutput`] so callers can tell the two apart.
    pub async fn predict(&self, request: PredictionRequest) -> crate::error::Result<PredictionResult> {
        let url = request.url.trim();
        if url.is_empty() {
            return Err(PredictError::InvalidInput);
        }

        let outcome = self.classifier.invoke(url).await?;
        let result = decode(url, &outcome.stdout)?;

        info!(
            url = %result.url,
            prediction = ?result.prediction,
            confidence = result.confidence,
            "URL classified"
        );
        Ok(result)
    }
}

/// Decode the classifier's single stdout record.
fn decode(url: &str, stdout: &str) -> Result<PredictionResult, PredictError> {
    let raw: RawPrediction = serde_json::from_str(stdout.trim()).map_err(|e| {
        warn!(url, error = %e, "Classifier output is not a valid prediction record");
        PredictError::MalformedOutput(e.to_string())
    })?;

    let confidence = normalize_confidence(raw.confidence).ok_or_else(|| {
        warn!(url, confidence = raw.confidence, "Confidence outside [0, 100]");
        PredictError::MalformedOutput(format!("confidence out of range: {}", raw.confidence))
    })?;

    Ok(PredictionResult {
        url: raw.url.unwrap_or_else(|| url.to_string()),
        prediction: raw.prediction,
        confidence,
    })
}

/// Canonical confidence scale is a fraction in [0, 1]. The deployed
/// classifier emits percentages in (1, 100], which are scaled down; anything
/// outside [0, 100] is malformed.
fn normalize_confidence(value: f64) -> Option<f64> {
    if !value.is_finite() || value < 0.0 {
        None
    } else if value <= 1.0 {
        Some(value)
    } else if value <= 100.0 {
        Some(value / 100.0)
    } else {
        None
    }
}
