mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::DashboardApp;
use config::{DashboardConfig, DEFAULT_CONFIG_FILE};
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = DashboardConfig::load_or_default(&config_path);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([720.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Product Pulse – Listing Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(&cc.egui_ctx, config)))),
    )
}
