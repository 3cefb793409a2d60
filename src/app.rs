use std::sync::Arc;

use eframe::egui;

use crate::config::AnimationConfig;
use crate::data::model::TimeSeries;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct AnimApp {
    pub state: AppState,
}

impl AnimApp {
    pub fn new(series: Arc<TimeSeries>, config: AnimationConfig) -> Self {
        Self {
            state: AppState::new(series, config),
        }
    }
}

impl eframe::App for AnimApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Space)) {
            self.state.playback.toggle();
        }

        let now = ctx.input(|i| i.time);
        if self.state.playback.tick(now) {
            log::debug!("Advanced to frame {}", self.state.playback.current());
        }

        // ---- Top panel: playback controls ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::frame_plot(ui, &mut self.state);
        });

        if self.state.playback.running {
            ctx.request_repaint_after(self.state.config.interval);
        }
    }
}
