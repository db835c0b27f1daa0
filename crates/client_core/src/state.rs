//! What the form shows: the draft plus the outcome of the latest submission.

use shared::error::PredictionError;

use crate::draft::Draft;

pub const SUBMIT_LABEL: &str = "Get Recommendation";
pub const PENDING_LABEL: &str = "Predicting...";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResultState {
    #[default]
    Idle,
    Pending,
    Success(String),
    Failure(String),
}

impl ResultState {
    pub fn from_outcome(outcome: &Result<String, PredictionError>) -> Self {
        match outcome {
            Ok(crop) => ResultState::Success(crop.clone()),
            Err(err) => ResultState::Failure(err.user_message()),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ResultState::Pending)
    }

    /// Recommended crop, shown only on success.
    pub fn crop(&self) -> Option<&str> {
        match self {
            ResultState::Success(crop) => Some(crop),
            _ => None,
        }
    }

    /// Error text, shown only on failure.
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            ResultState::Failure(message) => Some(message),
            _ => None,
        }
    }

    pub fn trigger_label(&self) -> &'static str {
        if self.is_pending() {
            PENDING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    pub fn trigger_enabled(&self) -> bool {
        !self.is_pending()
    }
}

/// Immutable view of the whole form. The controller replaces it wholesale on
/// every change, so a render holding an older snapshot never sees a partial
/// update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    pub draft: Draft,
    pub result: ResultState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_area_is_empty_while_idle_or_pending() {
        for state in [ResultState::Idle, ResultState::Pending] {
            assert_eq!(state.crop(), None);
            assert_eq!(state.failure_message(), None);
        }
    }

    #[test]
    fn trigger_reflects_pending() {
        assert_eq!(ResultState::Pending.trigger_label(), "Predicting...");
        assert!(!ResultState::Pending.trigger_enabled());

        let failed = ResultState::Failure("invalid humidity".into());
        assert_eq!(failed.trigger_label(), "Get Recommendation");
        assert!(failed.trigger_enabled());
    }

    #[test]
    fn outcome_maps_to_success_or_failure() {
        assert_eq!(
            ResultState::from_outcome(&Ok("rice".into())),
            ResultState::Success("rice".into())
        );
        assert_eq!(
            ResultState::from_outcome(&Err(PredictionError::Transport("refused".into()))),
            ResultState::Failure("Server not reachable. Check if backend is running.".into())
        );
    }
}
