use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{domain::FieldName, error::PredictionError};

/// Body of `POST /predict`. Every field is always present. A field that could
/// not be read as a number holds `f64::NAN`, which serializes as JSON `null`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RequestPayload {
    #[serde(rename = "N")]
    pub nitrogen: f64,
    #[serde(rename = "P")]
    pub phosphorus: f64,
    #[serde(rename = "K")]
    pub potassium: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
}

impl RequestPayload {
    /// Builds a payload from values ordered like [`FieldName::ALL`].
    pub fn from_values(values: [f64; 7]) -> Self {
        let [nitrogen, phosphorus, potassium, temperature, humidity, ph, rainfall] = values;
        Self {
            nitrogen,
            phosphorus,
            potassium,
            temperature,
            humidity,
            ph,
            rainfall,
        }
    }

    pub fn get(&self, name: FieldName) -> f64 {
        match name {
            FieldName::Nitrogen => self.nitrogen,
            FieldName::Phosphorus => self.phosphorus,
            FieldName::Potassium => self.potassium,
            FieldName::Temperature => self.temperature,
            FieldName::Humidity => self.humidity,
            FieldName::Ph => self.ph,
            FieldName::Rainfall => self.rainfall,
        }
    }

    /// Fields that hold the not-a-number sentinel.
    pub fn unparsed_fields(&self) -> Vec<FieldName> {
        FieldName::ALL
            .into_iter()
            .filter(|name| self.get(*name).is_nan())
            .collect()
    }
}

/// Reply of `POST /predict`. The service answers either
/// `{"prediction": "..."}` or `{"error": "..."}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictionResponse {
    #[serde(default)]
    pub prediction: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl PredictionResponse {
    /// Interprets a raw response body. Status codes are not consulted: the
    /// service reports rejected input as a 400 carrying an `error` body.
    pub fn interpret(body: &[u8]) -> Result<String, PredictionError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|err| PredictionError::MalformedBody(err.to_string()))?;
        if !value.is_object() {
            return Err(PredictionError::UnexpectedFormat);
        }
        let response: PredictionResponse =
            serde_json::from_value(value).map_err(|_| PredictionError::UnexpectedFormat)?;
        response.into_outcome()
    }

    pub fn into_outcome(self) -> Result<String, PredictionError> {
        if let Some(message) = self.error.and_then(reported_error_text) {
            return Err(PredictionError::Service(message));
        }

        match self.prediction {
            Some(Value::String(crop)) if !crop.is_empty() => Ok(crop),
            _ => Err(PredictionError::UnexpectedFormat),
        }
    }
}

// Empty, null and `false` error values carry no message.
fn reported_error_text(value: Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

/// Reply of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
