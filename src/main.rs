mod app;
mod charts;
mod color;
mod config;
mod data;
mod state;
mod stats;
mod ui;

use anyhow::Context;
use app::DashboardApp;
use config::DashboardConfig;
use data::cache::DatasetCache;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::default();

    // Load failures are fatal: no window opens without data.
    let data = DatasetCache::global()
        .get_or_load(&config.data_file)
        .with_context(|| format!("loading {}", config.data_file.display()))
        .inspect_err(|e| log::error!("Startup failed: {e:#}"))?;
    log::debug!("{} dataset load(s) in this process", DatasetCache::global().loads());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    let title = config.window_title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(config, data)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))
}
