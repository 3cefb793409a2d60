use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the playback toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        let label = if state.playback.running {
            "⏸ Pause"
        } else {
            "▶ Resume"
        };
        if ui.button(label).clicked() {
            state.playback.toggle();
        }

        if ui
            .add_enabled(!state.playback.running, egui::Button::new("Step"))
            .clicked()
        {
            state.playback.step();
        }

        ui.separator();

        ui.label(format!(
            "Frame {}/{}  ({} rows)",
            state.playback.current() + 1,
            state.times.len(),
            state.series.row_count()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}
