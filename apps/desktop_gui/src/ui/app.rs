use std::time::Duration;

use client_core::{FormController, FormSnapshot, ResultState};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{domain::FIELD_SPECS, error::PredictionError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorCategory, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::theme;

const PENDING_REPAINT_INTERVAL: Duration = Duration::from_millis(16);
const IDLE_REPAINT_INTERVAL: Duration = Duration::from_millis(100);

fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Service => "Service",
        UiErrorCategory::Backend => "Backend",
    }
}

pub struct CropAdvisorApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    controller: FormController,
    service_url: String,
    status: String,
    status_banner: Option<UiError>,
    visuals_applied: bool,
}

impl CropAdvisorApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        service_url: impl Into<String>,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            controller: FormController::new(),
            service_url: service_url.into(),
            status: "Backend worker starting...".to_string(),
            status_banner: None,
            visuals_applied: false,
        };
        dispatch_backend_command(&app.cmd_tx, BackendCommand::CheckHealth, &mut app.status);
        app
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.handle_ui_event(event);
        }
    }

    fn handle_ui_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => {
                self.status = message;
            }
            UiEvent::Error(err) => {
                self.status = format!("{} error: {}", err_label(err.category()), err.message());
                if err.context() == UiErrorContext::BackendStartup {
                    self.status_banner = Some(err);
                }
            }
            UiEvent::ServiceStatus(Ok(status)) => {
                self.status = format!("Prediction service online: {status}");
            }
            UiEvent::ServiceStatus(Err(err)) => {
                tracing::warn!(url = %self.service_url, "health check failed: {err}");
                let err = UiError::from_prediction(UiErrorContext::HealthCheck, &err);
                self.status = err.message().to_string();
                self.status_banner = Some(err);
            }
            UiEvent::PredictionResolved {
                request_id,
                outcome,
            } => {
                let reachable = !matches!(&outcome, Err(err) if err.is_connectivity());
                let health_banner = self
                    .status_banner
                    .as_ref()
                    .is_some_and(|banner| banner.context() == UiErrorContext::HealthCheck);
                if self.controller.complete(request_id, outcome) && reachable && health_banner {
                    self.status_banner = None;
                }
            }
        }
    }

    fn submit(&mut self) {
        let Some(ticket) = self.controller.begin_submit() else {
            return;
        };

        let queued = dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Predict {
                request_id: ticket.request_id,
                payload: ticket.payload,
            },
            &mut self.status,
        );
        if !queued {
            // Never leave the trigger disabled for a request nobody will answer.
            self.controller.complete(
                ticket.request_id,
                Err(PredictionError::Transport(self.status.clone())),
            );
        }
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        let Some(banner) = self.status_banner.clone() else {
            return;
        };

        egui::Frame::NONE
            .fill(theme::BANNER_FILL)
            .stroke(egui::Stroke::new(1.0, theme::BANNER_STROKE))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(egui::RichText::new(banner.message()).color(theme::ERROR_TEXT));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Dismiss").clicked() {
                            self.status_banner = None;
                        }
                    });
                });
            });
        ui.add_space(8.0);
    }

    fn show_fields(&mut self, ui: &mut egui::Ui, snapshot: &FormSnapshot) {
        egui::Grid::new("crop_fields")
            .num_columns(2)
            .spacing(egui::vec2(16.0, 12.0))
            .show(ui, |ui| {
                for (column, spec) in FIELD_SPECS.iter().enumerate() {
                    ui.vertical(|ui| {
                        ui.label(egui::RichText::new(spec.label()).small().weak());
                        let mut text = snapshot.draft.get(spec.name).to_string();
                        let response = ui.add(
                            egui::TextEdit::singleline(&mut text)
                                .id_salt(spec.name.as_str())
                                .desired_width(220.0),
                        );
                        if response.changed() {
                            self.controller.update_field(spec.name, text);
                        }
                    });
                    if column % 2 == 1 {
                        ui.end_row();
                    }
                }
            });
    }

    fn show_result(ui: &mut egui::Ui, result: &ResultState) {
        if let Some(message) = result.failure_message() {
            ui.add_space(12.0);
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(message).color(theme::ERROR_TEXT));
            });
        }

        if let Some(crop) = result.crop() {
            ui.add_space(16.0);
            ui.vertical_centered(|ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new("🌱 Recommended Crop:")
                            .strong()
                            .size(18.0)
                            .color(theme::ACCENT_STRONG),
                    );
                    ui.label(
                        egui::RichText::new(crop)
                            .strong()
                            .underline()
                            .size(18.0)
                            .color(theme::ACCENT_STRONG),
                    );
                });
            });
        }
    }

    fn show_form(&mut self, ctx: &egui::Context) {
        // One snapshot per frame: every widget renders the same state.
        let snapshot = self.controller.snapshot();

        egui::CentralPanel::default().show(ctx, |ui| {
            let avail = ui.available_size();
            ui.add_space((avail.y * 0.08).clamp(12.0, 60.0));

            ui.vertical_centered(|ui| {
                ui.set_width(avail.x.clamp(320.0, 560.0));

                egui::Frame::NONE
                    .fill(theme::CARD_FILL)
                    .stroke(egui::Stroke::new(1.0, theme::CARD_STROKE))
                    .corner_radius(14.0)
                    .inner_margin(egui::Margin::symmetric(24, 20))
                    .show(ui, |ui| {
                        ui.vertical_centered(|ui| {
                            ui.heading("🌾 Crop Recommendation");
                        });
                        ui.add_space(12.0);
                        self.show_status_banner(ui);

                        self.show_fields(ui, &snapshot);
                        ui.add_space(16.0);

                        let result = &snapshot.result;
                        let button = egui::Button::new(
                            egui::RichText::new(result.trigger_label())
                                .strong()
                                .color(egui::Color32::WHITE),
                        )
                        .fill(theme::ACCENT)
                        .min_size(egui::vec2(ui.available_width(), 40.0));
                        if ui.add_enabled(result.trigger_enabled(), button).clicked() {
                            self.submit();
                        }

                        Self::show_result(ui, result);

                        ui.add_space(10.0);
                        ui.separator();
                        ui.horizontal_wrapped(|ui| {
                            ui.small("Status:");
                            ui.small(egui::RichText::new(&self.status).weak());
                        });
                    });
            });
        });
    }
}

impl eframe::App for CropAdvisorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.visuals_applied {
            let mut style = (*ctx.style()).clone();
            style.visuals = theme::visuals();
            style.spacing.item_spacing = egui::vec2(8.0, 6.0);
            style.spacing.button_padding = egui::vec2(10.0, 6.0);
            ctx.set_style(style);
            self.visuals_applied = true;
        }

        self.process_ui_events();
        self.show_form(ctx);

        if self.controller.is_pending() {
            ctx.request_repaint_after(PENDING_REPAINT_INTERVAL);
        } else {
            ctx.request_repaint_after(IDLE_REPAINT_INTERVAL);
        }
    }
}
