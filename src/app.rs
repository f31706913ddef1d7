use std::sync::Arc;

use eframe::egui;
use egui_extras::{Size, StripBuilder};

use crate::config::DashboardConfig;
use crate::data::model::PreparedData;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
    pub config: DashboardConfig,
}

impl DashboardApp {
    pub fn new(config: DashboardConfig, data: Arc<PreparedData>) -> Self {
        Self {
            state: AppState::new(data),
            config,
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Left side panel: region selection + guide ----
        egui::SidePanel::left("config_panel")
            .default_width(self.config.side_panel_width)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: 2×2 chart grid ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::header(ui, &self.state);

            let state = &self.state;
            let headings = &self.config.headings;
            StripBuilder::new(ui)
                .sizes(Size::remainder(), 2)
                .vertical(|mut rows| {
                    rows.strip(|builder| {
                        builder.sizes(Size::remainder(), 2).horizontal(|mut cells| {
                            cells.cell(|ui| plot::trend_panel(ui, state, &headings.trend));
                            cells.cell(|ui| plot::emissions_panel(ui, state, &headings.emissions));
                        });
                    });
                    rows.strip(|builder| {
                        builder.sizes(Size::remainder(), 2).horizontal(|mut cells| {
                            cells.cell(|ui| plot::correlation_panel(ui, state, &headings.correlation));
                            cells.cell(|ui| plot::seasonality_panel(ui, state, &headings.seasonality));
                        });
                    });
                });
        });
    }
}
