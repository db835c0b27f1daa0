//! Backend-to-UI events and error modeling for the desktop controller.

use shared::{domain::RequestId, error::PredictionError};

pub enum UiEvent {
    Info(String),
    Error(UiError),
    ServiceStatus(Result<String, PredictionError>),
    PredictionResolved {
        request_id: RequestId,
        outcome: Result<String, PredictionError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Service,
    /// The backend worker itself could not run.
    Backend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    HealthCheck,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn new(
        category: UiErrorCategory,
        context: UiErrorContext,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            context,
            message: message.into(),
        }
    }

    pub fn from_prediction(context: UiErrorContext, err: &PredictionError) -> Self {
        let category = match err {
            PredictionError::Transport(_) | PredictionError::MalformedBody(_) => {
                UiErrorCategory::Transport
            }
            PredictionError::Service(_) | PredictionError::UnexpectedFormat => {
                UiErrorCategory::Service
            }
        };

        Self {
            category,
            context,
            message: err.user_message(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
