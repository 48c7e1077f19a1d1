use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RustyRoadsApp {
    pub state: AppState,
}

impl Default for RustyRoadsApp {
    fn default() -> Self {
        Self {
            state: AppState::default(),
        }
    }
}

impl eframe::App for RustyRoadsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Cache policy: re-read the source once per validity window ----
        if self.state.cache.is_stale() {
            match self.state.cache.refresh() {
                Ok(()) => {
                    self.state.adopt_snapshot();
                    if let Some(dataset) = self.state.dataset() {
                        log::info!(
                            "Reloaded {} rows across {} roads",
                            dataset.len(),
                            dataset.road_names.len()
                        );
                    }
                }
                Err(e) => {
                    log::error!("Failed to reload dataset: {e:#}");
                    self.state.status_message = Some(format!("Error: {e:#}"));
                }
            }
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: road selection ----
        egui::SidePanel::left("road_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: query controls + profile plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::query_controls(ui, &mut self.state);
            plot::profile_plot(ui, &self.state);
        });
    }
}
