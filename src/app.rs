use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::{AppState, View};
use crate::ui::{frequency, items, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: navigation + filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: the selected view ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    ui.heading(RichText::new(self.state.view.title()).size(24.0));
                    ui.separator();
                    match self.state.view {
                        View::Frequency => frequency::frequency_panel(ui, &self.state.frequency_report),
                        View::Items => items::items_panel(ui, &self.state),
                    }
                });
        });
    }
}

// ---------------------------------------------------------------------------
// Startup failure page
// ---------------------------------------------------------------------------

/// Shown instead of the dashboard when settings or the dataset fail to load.
pub struct LoadFailureApp {
    message: String,
}

impl LoadFailureApp {
    pub fn new(message: String) -> Self {
        Self { message }
    }
}

impl eframe::App for LoadFailureApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(RichText::new("Failed to load the dataset").color(Color32::RED));
            ui.separator();
            ui.label(RichText::new(&self.message).monospace());
            ui.add_space(12.0);
            if ui.button("Close").clicked() {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });
    }
}
