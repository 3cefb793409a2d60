use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotBounds, PlotPoints};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Concentration plot (central panel)
// ---------------------------------------------------------------------------

/// Redraw the current frame: `u` and `v` against position, with the y-axis
/// pinned to the configured range.
pub fn frame_plot(ui: &mut Ui, state: &mut AppState) {
    let Some(frame) = state.current_frame() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No frame to display");
        });
        return;
    };

    let config = &state.config;
    let colors = state.colors;

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(frame.title());
    });

    let (y_min, y_max) = config.y_range;
    let (x_min, x_max) = match frame.x_range() {
        Some((lo, hi)) if hi > lo => (lo, hi),
        Some((x, _)) => (x - 0.5, x + 0.5),
        None => (0.0, 1.0),
    };

    Plot::new("concentration_plot")
        .legend(Legend::default())
        .x_axis_label(config.x_label.as_str())
        .y_axis_label(config.y_label.as_str())
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            let u_points: PlotPoints = frame.u_points().into();
            let v_points: PlotPoints = frame.v_points().into();

            plot_ui.line(
                Line::new(u_points)
                    .name(&config.u_label)
                    .color(colors.u)
                    .width(1.5),
            );
            plot_ui.line(
                Line::new(v_points)
                    .name(&config.v_label)
                    .color(colors.v)
                    .width(1.5),
            );

            plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                [x_min, y_min],
                [x_max, y_max],
            ));
        });
}
