//! Runtime bridge between UI command queue and backend event intake.

use std::{
    sync::Arc,
    thread::{self, JoinHandle},
};

use client_core::PredictionClient;
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorCategory, UiErrorContext, UiEvent};

/// Starts the backend worker. It runs until every command sender is dropped;
/// requests still in flight at that point are abandoned.
pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    client: Arc<dyn PredictionClient>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::new(
                    UiErrorCategory::Backend,
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

        // Each command runs as its own task so a slow health check never
        // holds up a prediction.
        while let Ok(cmd) = cmd_rx.recv() {
            tracing::debug!(command = cmd.name(), "backend received command");
            runtime.spawn(handle_command(Arc::clone(&client), ui_tx.clone(), cmd));
        }
        tracing::info!("backend command queue closed; worker stopping");
    })
}

async fn handle_command(
    client: Arc<dyn PredictionClient>,
    ui_tx: Sender<UiEvent>,
    cmd: BackendCommand,
) {
    let event = match cmd {
        BackendCommand::Predict {
            request_id,
            payload,
        } => {
            tracing::info!(%request_id, "backend: predict");
            let outcome = client.predict(&payload).await;
            UiEvent::PredictionResolved {
                request_id,
                outcome,
            }
        }
        BackendCommand::CheckHealth => UiEvent::ServiceStatus(client.health().await),
    };

    // A dropped outcome would leave the form pending forever, so a full queue
    // is waited out on the blocking pool rather than on the single worker.
    let delivered = match ui_tx.try_send(event) {
        Ok(()) => true,
        Err(TrySendError::Full(event)) => {
            tracing::debug!("ui event queue is full; waiting for room");
            matches!(
                tokio::task::spawn_blocking(move || ui_tx.send(event)).await,
                Ok(Ok(()))
            )
        }
        Err(TrySendError::Disconnected(_)) => false,
    };
    if !delivered {
        tracing::debug!("ui event queue closed; dropping backend event");
    }
}
