use chrono::{Local, NaiveDate};
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use crate::data::export::write_export;
use crate::data::fetch::DataSource;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn filter_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone the selector values so state can be mutated inside the widgets.
    let brands = dataset.unique_brands.clone();
    let platforms = dataset.unique_platforms.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            brand_selector(ui, state, &brands);
            ui.add_space(8.0);
            platform_selector(ui, state, &platforms);
            ui.add_space(8.0);
            pin_code_input(ui, state);
            ui.add_space(8.0);
            date_selector(ui, state);

            ui.separator();
            active_filters(ui, state);

            ui.separator();
            ui.horizontal(|ui: &mut Ui| {
                if ui.button("Clear All Filters").clicked() {
                    state.clear_filters();
                }
                if ui.button("Export CSV").clicked() {
                    export_dialog(state);
                }
            });
        });
}

fn brand_selector(ui: &mut Ui, state: &mut AppState, brands: &[String]) {
    ui.strong("Brand");
    let current = state.filters.brand.clone();
    let selected_text = current.as_deref().unwrap_or("All Brands");

    egui::ComboBox::from_id_salt("brand_filter")
        .selected_text(selected_text)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(current.is_none(), "All Brands").clicked() {
                state.set_brand(None);
            }
            for brand in brands {
                let is_selected = current.as_deref() == Some(brand.as_str());
                if ui.selectable_label(is_selected, brand.as_str()).clicked() {
                    state.set_brand(Some(brand.clone()));
                }
            }
        });
}

fn platform_selector(ui: &mut Ui, state: &mut AppState, platforms: &[String]) {
    let n_selected = state.filters.platforms.len();
    let header = if n_selected == 0 {
        "Platforms".to_string()
    } else {
        format!("Platforms  ({n_selected} selected)")
    };

    egui::CollapsingHeader::new(RichText::new(header).strong())
        .id_salt("platform_filter")
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            for platform in platforms {
                let mut checked = state.filters.platforms.contains(platform);
                let text = RichText::new(platform).color(state.color_map.color_for(platform));
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_platform(platform);
                }
            }
        });
}

fn pin_code_input(ui: &mut Ui, state: &mut AppState) {
    ui.strong("PIN Code");
    let mut pin = state.filters.pin_code.clone();
    let response = ui.add(
        egui::TextEdit::singleline(&mut pin)
            .hint_text("Enter PIN code")
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        state.set_pin_code(&pin);
    }
}

fn date_selector(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Date");
    match state.filters.date {
        Some(mut date) => {
            ui.horizontal(|ui: &mut Ui| {
                if ui
                    .add(DatePickerButton::new(&mut date).id_salt("date_filter"))
                    .changed()
                {
                    state.set_date(Some(date));
                }
                if ui.small_button("×").clicked() {
                    state.set_date(None);
                }
            });
        }
        None => {
            if ui.button("Pick a date").clicked() {
                state.set_date(Some(today()));
            }
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Removable badges for each active predicate.
fn active_filters(ui: &mut Ui, state: &mut AppState) {
    let chips = state.filters.describe();
    if chips.is_empty() {
        ui.weak("No filters applied.");
        return;
    }

    let mut removed = None;
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for chip in &chips {
            ui.label(
                RichText::new(chip.label())
                    .background_color(ui.visuals().faint_bg_color)
                    .strong(),
            );
            if ui.small_button("×").clicked() {
                removed = Some(chip.clone());
            }
        }
    });
    if let Some(chip) = removed {
        state.remove_filter(&chip);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar. Returns a source to (re)load, if the user
/// asked for one.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) -> Option<DataSource> {
    let mut request = None;

    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Reload from URL").clicked() {
                request = Some(DataSource::Url(state.config.source_url.clone()));
                ui.close_menu();
            }
            if ui.button("Open local CSV…").clicked() {
                request = open_file_dialog();
                ui.close_menu();
            }
            let can_export = state.dataset.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export CSV…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.strong("Product Analytics Dashboard");

        if state.dataset.is_some() {
            ui.separator();
            let total = ui.label(format!("{} total products", state.total_count()));
            if let Some(source) = &state.source {
                total.on_hover_text(format!("Loaded from {source}"));
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::YELLOW));
        }
    });

    request
}

/// Shown instead of the dashboard after a failed load.
pub fn load_error(ui: &mut Ui, message: &str) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.label(
            RichText::new(format!("Error loading data: {message}"))
                .color(Color32::RED)
                .heading(),
        );
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog() -> Option<DataSource> {
    rfd::FileDialog::new()
        .set_title("Open product listings")
        .add_filter("CSV", &["csv"])
        .pick_file()
        .map(DataSource::File)
}

/// Ask where to save the visible rows and write them.
pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export filtered listings")
        .set_file_name(&state.config.export_file_name)
        .add_filter("CSV", &["csv"])
        .save_file();

    let Some(path) = file else {
        return;
    };

    let contents = state.export_visible();
    match write_export(&path, &contents) {
        Ok(()) => {
            state.status_message = Some(format!(
                "Exported {} rows to {}",
                state.visible_indices.len(),
                path.display()
            ));
        }
        Err(e) => {
            log::error!("Export failed: {:#}", anyhow::Error::new(e));
            state.status_message = Some(format!("Export failed: {}", path.display()));
        }
    }
}
