use thiserror::Error;

/// Shown whenever the service cannot be reached or its reply cannot be read.
pub const CONNECTIVITY_FAILURE_MESSAGE: &str =
    "Server not reachable. Check if backend is running.";

/// Shown when the service replies with JSON that carries neither a
/// prediction nor an error.
pub const UNEXPECTED_FORMAT_MESSAGE: &str = "Unexpected response from prediction service.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field: {name}")]
pub struct UnknownFieldError {
    name: String,
}

impl UnknownFieldError {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictionError {
    #[error("prediction request failed: {0}")]
    Transport(String),
    #[error("prediction response body is not valid JSON: {0}")]
    MalformedBody(String),
    #[error("prediction service reported: {0}")]
    Service(String),
    #[error("prediction response has neither `prediction` nor `error`")]
    UnexpectedFormat,
}

impl PredictionError {
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            PredictionError::Transport(_) | PredictionError::MalformedBody(_)
        )
    }

    /// The text the result area displays for this failure.
    pub fn user_message(&self) -> String {
        match self {
            PredictionError::Transport(_) | PredictionError::MalformedBody(_) => {
                CONNECTIVITY_FAILURE_MESSAGE.to_string()
            }
            PredictionError::Service(message) => message.clone(),
            PredictionError::UnexpectedFormat => UNEXPECTED_FORMAT_MESSAGE.to_string(),
        }
    }
}
