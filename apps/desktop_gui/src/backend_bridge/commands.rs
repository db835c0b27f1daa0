//! Backend commands queued from UI to backend worker.

use shared::{domain::RequestId, protocol::RequestPayload};

pub enum BackendCommand {
    Predict {
        request_id: RequestId,
        payload: RequestPayload,
    },
    CheckHealth,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Predict { .. } => "predict",
            BackendCommand::CheckHealth => "check_health",
        }
    }
}
