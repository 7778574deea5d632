use eframe::egui;

use crate::config::ViewerConfig;
use crate::state::AppState;
use crate::ui::{dashboard, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ImpactViewerApp {
    pub state: AppState,
}

impl ImpactViewerApp {
    /// Create the app and load the configured dataset, if it exists.
    pub fn new(config: &ViewerConfig) -> Self {
        let mut state = AppState {
            chart_height: config.chart_height,
            ..AppState::default()
        };
        if config.dataset_path.exists() {
            state.load_path(&config.dataset_path);
        } else {
            log::info!(
                "No dataset at {}; waiting for File → Open…",
                config.dataset_path.display()
            );
        }
        Self { state }
    }
}

impl eframe::App for ImpactViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: dataset summary ----
        egui::SidePanel::left("summary_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts or table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard::central_panel(ui, &self.state);
        });
    }
}
