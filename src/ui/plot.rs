use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Line, MarkerShape, Plot, PlotPoints, Points};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Elevation profile plot (central panel)
// ---------------------------------------------------------------------------

/// Render the active road's elevation profile with the queried point
/// highlighted.
pub fn profile_plot(ui: &mut Ui, state: &AppState) {
    let Some(series) = state.selected_series() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view road profiles  (File → Open…)");
        });
        return;
    };

    let color = state.color_map.color_for(&series.name);

    let line_points: PlotPoints = series
        .samples
        .iter()
        .map(|s| [s.distance, s.elevation])
        .collect();
    let line = Line::new(line_points)
        .name(&series.name)
        .color(color)
        .width(1.5);

    // The surveyed samples themselves, drawn as dots on top of the line.
    let sample_points: PlotPoints = series
        .samples
        .iter()
        .map(|s| [s.distance, s.elevation])
        .collect();
    let samples = Points::new(sample_points).color(color).radius(2.5);

    Plot::new("profile_plot")
        .legend(Legend::default())
        .x_axis_label("Distance (m)")
        .y_axis_label("Elevation (m)")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(line);
            plot_ui.points(samples);

            if let Some((distance, elevation)) = state.computed {
                let marker = Points::new(vec![[distance, elevation]])
                    .name("Interpolated point")
                    .shape(MarkerShape::Asterisk)
                    .radius(6.0)
                    .color(Color32::RED);
                plot_ui.points(marker);
            }
        });
}
