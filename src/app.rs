use std::sync::mpsc::{Receiver, TryRecvError};

use eframe::egui;

use crate::config::DashboardConfig;
use crate::data::fetch::{spawn_load, DataSource, LoadResult};
use crate::state::{AppState, LoadStatus};
use crate::ui::{panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
    /// Receiver of the in-flight load, if any.
    pending: Option<Receiver<LoadResult>>,
    ctx: egui::Context,
}

impl DashboardApp {
    /// Create the app and start fetching the configured dataset.
    pub fn new(ctx: &egui::Context, config: DashboardConfig) -> Self {
        let source = DataSource::Url(config.source_url.clone());
        let mut app = Self {
            state: AppState::new(config),
            pending: None,
            ctx: ctx.clone(),
        };
        app.start_load(source);
        app
    }

    /// Replace any in-flight load with a new one.
    pub fn start_load(&mut self, source: DataSource) {
        self.state.begin_load();
        let ctx = self.ctx.clone();
        // Dropping the previous receiver makes its worker discard the result.
        self.pending = Some(spawn_load(source, move || ctx.request_repaint()));
    }

    fn poll_pending(&mut self) {
        let Some(rx) = &self.pending else {
            return;
        };
        match rx.try_recv() {
            Ok(result) => {
                self.pending = None;
                self.state.finish_load(result);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.pending = None;
                log::error!("Loader thread exited without a result");
                self.state.fail_load();
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_pending();

        let mut request = None;

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            request = panels::top_bar(ui, &mut self.state);
        });

        let status = self.state.load_status.clone();
        match status {
            LoadStatus::Loading => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.spinner();
                    });
                });
            }
            LoadStatus::Failed(msg) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    panels::load_error(ui, &msg);
                });
            }
            LoadStatus::Ready => {
                // ---- Left side panel: filters ----
                egui::SidePanel::left("filter_panel")
                    .default_width(260.0)
                    .resizable(true)
                    .show(ctx, |ui| {
                        panels::filter_panel(ui, &mut self.state);
                    });

                // ---- Central panel: results table ----
                egui::CentralPanel::default().show(ctx, |ui| {
                    table::results(ui, &self.state);
                });
            }
        }

        if let Some(source) = request {
            self.start_load(source);
        }
    }
}
