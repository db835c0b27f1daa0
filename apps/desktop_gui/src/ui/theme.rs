use eframe::egui;

pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(22, 163, 74);
pub const ACCENT_STRONG: egui::Color32 = egui::Color32::from_rgb(21, 128, 61);
pub const ERROR_TEXT: egui::Color32 = egui::Color32::from_rgb(220, 38, 38);
pub const CARD_FILL: egui::Color32 = egui::Color32::from_rgb(249, 250, 251);
pub const CARD_STROKE: egui::Color32 = egui::Color32::from_rgb(209, 213, 219);
pub const BANNER_FILL: egui::Color32 = egui::Color32::from_rgb(254, 226, 226);
pub const BANNER_STROKE: egui::Color32 = egui::Color32::from_rgb(252, 165, 165);

/// Light visuals with the green accent on selections and focused inputs.
pub fn visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::light();
    visuals.panel_fill = egui::Color32::WHITE;
    visuals.selection.bg_fill = ACCENT.gamma_multiply(0.35);
    visuals.selection.stroke = egui::Stroke::new(1.5, ACCENT);
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, ACCENT);
    visuals
}
