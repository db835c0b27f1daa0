//! Form controller: owns the draft and result state and the single in-flight
//! prediction request.

use std::{sync::Arc, time::Instant};

use shared::{
    domain::{FieldName, RequestId},
    error::{PredictionError, UnknownFieldError},
    protocol::RequestPayload,
};
use tracing::{debug, info, warn};

use crate::{
    state::{FormSnapshot, ResultState},
    PredictionClient,
};

/// The one request allowed to be outstanding. Carries the payload snapshot
/// taken at submission, independent of later edits.
#[derive(Debug, Clone)]
pub struct InFlightRequest {
    pub request_id: RequestId,
    pub payload: RequestPayload,
    pub started_at: Instant,
}

/// Handed out by [`FormController::begin_submit`]; whoever performs the
/// request reports back with the same id.
#[derive(Debug, Clone, Copy)]
pub struct SubmitTicket {
    pub request_id: RequestId,
    pub payload: RequestPayload,
}

#[derive(Debug)]
pub struct FormController {
    snapshot: Arc<FormSnapshot>,
    in_flight: Option<InFlightRequest>,
    last_request_id: RequestId,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new()
    }
}

impl FormController {
    pub fn new() -> Self {
        Self {
            snapshot: Arc::new(FormSnapshot::default()),
            in_flight: None,
            last_request_id: RequestId(0),
        }
    }

    /// Current state. Cheap to clone and never mutated after it is returned.
    pub fn snapshot(&self) -> Arc<FormSnapshot> {
        Arc::clone(&self.snapshot)
    }

    pub fn result(&self) -> &ResultState {
        &self.snapshot.result
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<&InFlightRequest> {
        self.in_flight.as_ref()
    }

    pub fn update_field(&mut self, name: FieldName, raw: impl Into<String>) {
        let draft = self.snapshot.draft.with_field(name, raw);
        debug!(field = %name, "draft field updated");
        self.replace(FormSnapshot {
            draft,
            result: self.snapshot.result.clone(),
        });
    }

    /// Same as [`FormController::update_field`] but addressed by wire key.
    pub fn update_field_named(
        &mut self,
        name: &str,
        raw: impl Into<String>,
    ) -> Result<(), UnknownFieldError> {
        let name = name.parse::<FieldName>()?;
        self.update_field(name, raw);
        Ok(())
    }

    /// Moves to `Pending` and returns the request to send, or `None` if a
    /// request is already in flight.
    pub fn begin_submit(&mut self) -> Option<SubmitTicket> {
        if let Some(in_flight) = &self.in_flight {
            debug!(
                request_id = %in_flight.request_id,
                "submit ignored while a prediction is pending"
            );
            return None;
        }

        let payload = self.snapshot.draft.to_payload();
        let request_id = self.last_request_id.next();
        self.last_request_id = request_id;
        self.in_flight = Some(InFlightRequest {
            request_id,
            payload,
            started_at: Instant::now(),
        });
        self.replace(FormSnapshot {
            draft: self.snapshot.draft.clone(),
            result: ResultState::Pending,
        });

        let unparsed = payload.unparsed_fields();
        if !unparsed.is_empty() {
            debug!(%request_id, ?unparsed, "submitting fields without a numeric value");
        }
        info!(%request_id, "prediction submitted");
        Some(SubmitTicket {
            request_id,
            payload,
        })
    }

    /// Resolves the in-flight request. Returns `false` and changes nothing
    /// when `request_id` is not the one in flight.
    pub fn complete(
        &mut self,
        request_id: RequestId,
        outcome: Result<String, PredictionError>,
    ) -> bool {
        let in_flight = match self.in_flight.take() {
            Some(in_flight) if in_flight.request_id == request_id => in_flight,
            other => {
                self.in_flight = other;
                warn!(%request_id, "discarding prediction outcome for a request that is not in flight");
                return false;
            }
        };

        let elapsed_ms = in_flight.started_at.elapsed().as_millis() as u64;
        match &outcome {
            Ok(crop) => info!(%request_id, elapsed_ms, crop = %crop, "prediction succeeded"),
            Err(err) => warn!(%request_id, elapsed_ms, "prediction failed: {err}"),
        }

        self.replace(FormSnapshot {
            draft: self.snapshot.draft.clone(),
            result: ResultState::from_outcome(&outcome),
        });
        true
    }

    /// Runs one full submission against `client`. A no-op returning the
    /// current state if a request is already in flight.
    pub async fn submit<C>(&mut self, client: &C) -> &ResultState
    where
        C: PredictionClient + ?Sized,
    {
        if let Some(ticket) = self.begin_submit() {
            let outcome = client.predict(&ticket.payload).await;
            self.complete(ticket.request_id, outcome);
        }
        self.result()
    }

    fn replace(&mut self, next: FormSnapshot) {
        self.snapshot = Arc::new(next);
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
