use std::fmt;

use serde::Serialize;
use serde_json::{Number, Value};

use crate::remote::RemoteError;

pub const UNKNOWN_PREDICTION: &str = "Unknown";
pub const MISSING_CONFIDENCE: f64 = 0.0;

/// Confidence score as the endpoint reported it.
///
/// Integers stay integers and text stays text, so `87` displays as `87`
/// rather than `87.0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Confidence {
    Number(Number),
    Text(String),
}

impl Confidence {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl From<f64> for Confidence {
    fn from(value: f64) -> Self {
        Number::from_f64(value)
            .map(Self::Number)
            .unwrap_or_else(|| Self::Text(float_text(value)))
    }
}

impl From<i64> for Confidence {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => match n.as_f64() {
                Some(v) if n.is_f64() => f.write_str(&float_text(v)),
                _ => write!(f, "{}", n),
            },
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Shortest round-trip digits with at least one decimal. Exponents carry a
/// sign and two digits (`1e+16`, `2.5e-07`).
fn float_text(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let text = format!("{:?}", value);
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => text,
    }
}

/// Outcome of one classification round trip.
///
/// Displays as the text shown in the result area.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ClassificationResult {
    Prediction { label: String, confidence: Confidence },
    Failure { message: String },
}

impl ClassificationResult {
    pub fn prediction(label: impl Into<String>, confidence: impl Into<Confidence>) -> Self {
        Self::Prediction {
            label: label.into(),
            confidence: confidence.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Prediction { .. })
    }

    /// Reads a response body of the form `{"prediction": "edible", "confidence": 42.5}`.
    ///
    /// Absent or `null` fields fall back to `"Unknown"` and `0.0`. A body that
    /// carries an `error` key is a failure reported by the endpoint itself.
    pub fn from_response(body: &[u8]) -> Result<Self, RemoteError> {
        let value: Value = serde_json::from_slice(body).map_err(|e| RemoteError::Decode(e.to_string()))?;
        let object = value
            .as_object()
            .ok_or_else(|| RemoteError::Decode(format!("expected a JSON object, got {}", value)))?;

        if let Some(error) = object.get("error") {
            return Err(RemoteError::Remote(text_of(error)));
        }

        let label = match object.get("prediction") {
            None | Some(Value::Null) => UNKNOWN_PREDICTION.to_string(),
            Some(other) => text_of(other),
        };
        let confidence = match object.get("confidence") {
            None | Some(Value::Null) => Confidence::from(MISSING_CONFIDENCE),
            Some(Value::Number(n)) => Confidence::Number(n.clone()),
            Some(Value::String(s)) => Confidence::Text(s.clone()),
            Some(other) => {
                return Err(RemoteError::Decode(format!("confidence is not a number: {}", other)));
            }
        };

        Ok(Self::prediction(label, confidence))
    }
}

impl fmt::Display for ClassificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prediction { label, confidence } => {
                write!(f, "This mushroom is : {}, Confidence: {}%", label, confidence)
            }
            Self::Failure { message } => write!(f, "System Error: {}", message),
        }
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
