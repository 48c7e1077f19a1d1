use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

/// How many leading rows of the active road to preview in the side panel.
const PREVIEW_ROWS: usize = 5;

// ---------------------------------------------------------------------------
// Left side panel – road picker and overview
// ---------------------------------------------------------------------------

/// Render the left panel: road selection plus an overview of the active
/// road (sample count, distance range, leading rows).
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Roads");
    ui.separator();

    let Some(dataset) = state.dataset() else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the widgets.
    let road_names = dataset.road_names.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Road picker ----
            ui.strong("Active road");
            let current = state.selected_road.clone().unwrap_or_default();
            egui::ComboBox::from_id_salt("road_picker")
                .selected_text(&current)
                .show_ui(ui, |ui: &mut Ui| {
                    for name in &road_names {
                        let swatch = state.color_map.color_for(name);
                        let label = RichText::new(name).color(swatch);
                        if ui.selectable_label(current == *name, label).clicked() {
                            state.set_selected_road(name.clone());
                        }
                    }
                });
            ui.separator();

            // ---- Active road overview ----
            let Some(series) = state.selected_series() else {
                return;
            };

            ui.strong("Overview");
            ui.label(format!("Samples: {}", series.len()));
            if let Ok((min, max)) = series.bounds() {
                ui.label(format!("Range: {min:.2} m ~ {max:.2} m"));
            }
            ui.add_space(4.0);

            ui.strong("First rows");
            TableBuilder::new(ui)
                .striped(true)
                .column(Column::auto().at_least(90.0))
                .column(Column::remainder())
                .header(18.0, |mut header| {
                    header.col(|ui: &mut Ui| {
                        ui.label("Distance (m)");
                    });
                    header.col(|ui: &mut Ui| {
                        ui.label("Elevation (m)");
                    });
                })
                .body(|mut body| {
                    for sample in series.samples.iter().take(PREVIEW_ROWS) {
                        body.row(16.0, |mut row| {
                            row.col(|ui: &mut Ui| {
                                ui.label(format!("{:.2}", sample.distance));
                            });
                            row.col(|ui: &mut Ui| {
                                ui.label(format!("{:.2}", sample.elevation));
                            });
                        });
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Query controls – target distance input, compute trigger, readout
// ---------------------------------------------------------------------------

/// Render the target-distance input, the compute button, and the readout.
///
/// The input is clamped to the road's sampled range for convenience only;
/// the interpolator itself accepts any finite distance and extrapolates
/// out-of-range queries.
pub fn query_controls(ui: &mut Ui, state: &mut AppState) {
    let Some((min, max)) = state.selected_bounds() else {
        return;
    };

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Target distance:");
        ui.add(
            egui::DragValue::new(&mut state.target_distance)
                .range(min..=max)
                .speed(0.1)
                .fixed_decimals(2)
                .suffix(" m"),
        );

        if ui.button("Compute elevation").clicked() {
            state.compute();
        }

        if let Some((distance, elevation)) = state.computed {
            ui.separator();
            ui.label(
                RichText::new(format!("Elevation at {distance:.2} m: {elevation:.2} m")).strong(),
            );
        }
    });
    ui.separator();
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if state.cache.source().is_some() && ui.button("Reload").clicked() {
            state.cache.invalidate();
        }

        if let Some(dataset) = state.dataset() {
            ui.separator();
            ui.label(format!(
                "{} rows across {} roads ({} dropped)",
                dataset.len(),
                dataset.road_names.len(),
                dataset.dropped_rows
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open road elevation data")
        .add_filter("Supported files", &["parquet", "pq", "json", "csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match state.cache.load_from(path) {
            Ok(()) => {
                state.adopt_snapshot();
                if let Some(dataset) = state.dataset() {
                    log::info!(
                        "Loaded {} rows across {} roads ({} dropped)",
                        dataset.len(),
                        dataset.road_names.len(),
                        dataset.dropped_rows
                    );
                }
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
