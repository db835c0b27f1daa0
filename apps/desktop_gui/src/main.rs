use std::sync::Arc;

mod backend_bridge;
mod config;
mod controller;
mod ui;

use anyhow::{anyhow, Context};
use clap::Parser;
use client_core::HttpPredictionClient;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::config::CliArgs;
use crate::controller::events::UiEvent;
use crate::ui::CropAdvisorApp;

const WINDOW_TITLE: &str = "Crop Recommendation";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = CliArgs::parse();
    let settings = config::load_settings(&args)?;
    let endpoint = settings
        .endpoint()
        .context("prediction service endpoint is misconfigured")?;
    tracing::info!(
        predict_url = %endpoint.predict_url(),
        "using prediction service"
    );

    let service_url = settings.service_url.clone();
    let client = Arc::new(HttpPredictionClient::new(endpoint));
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, client);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([720.0, 640.0])
            .with_min_inner_size([420.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(CropAdvisorApp::new(cmd_tx, ui_rx, service_url)))),
    )
    .map_err(|err| anyhow!("desktop window failed: {err}"))
}
