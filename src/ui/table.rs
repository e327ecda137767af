use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::export::format_number;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 34.0;
const HEADERS: [&str; 9] = [
    "Product Name",
    "PIN Code",
    "Platform",
    "Price",
    "MRP",
    "Discount",
    "Position",
    "Rating",
    "Date",
];

// ---------------------------------------------------------------------------
// Results table (central panel)
// ---------------------------------------------------------------------------

/// Render the summary line and the capped results table.
pub fn results(ui: &mut Ui, state: &AppState) {
    ui.label(RichText::new(state.summary()).weak());
    ui.add_space(4.0);

    let rows = state.table_rows();
    if rows.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(RichText::new("No data found matching the selected filters.").weak());
        });
        return;
    }

    let footer_space = if state.is_truncated() { 28.0 } else { 0.0 };
    let max_h = (ui.available_height() - footer_space).max(0.0);

    TableBuilder::new(ui)
        .id_salt("results_table")
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .min_scrolled_height(0.0)
        .max_scroll_height(max_h)
        .column(Column::initial(280.0).clip(true))
        .columns(Column::auto().at_least(60.0), HEADERS.len() - 1)
        .header(22.0, |mut header| {
            for h in HEADERS {
                header.col(|ui: &mut Ui| {
                    ui.strong(h);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let rec = rows[row.index()];

                row.col(|ui: &mut Ui| {
                    ui.vertical(|ui: &mut Ui| {
                        ui.add(egui::Label::new(RichText::new(&rec.product_name).strong()).truncate())
                            .on_hover_text(rec.product_name.as_str());
                        ui.label(RichText::new(&rec.brand).small().weak());
                    });
                });
                row.col(|ui: &mut Ui| {
                    ui.label(rec.pin_code.as_str());
                });
                row.col(|ui: &mut Ui| {
                    let color = state.color_map.color_for(&rec.source);
                    ui.label(
                        RichText::new(&rec.source)
                            .color(Color32::WHITE)
                            .background_color(color),
                    );
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("₹{}", format_number(rec.price)));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(RichText::new(format!("₹{}", format_number(rec.mrp))).weak());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{}%", rec.discount_percent));
                });
                row.col(|ui: &mut Ui| {
                    let text = RichText::new(format!("#{}", format_number(rec.position)));
                    // Top-ten placements stand out.
                    let text = if rec.position <= 10.0 {
                        text.color(Color32::WHITE)
                            .background_color(Color32::from_rgb(22, 163, 74))
                    } else {
                        text
                    };
                    ui.label(text);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(RichText::new("★").color(Color32::from_rgb(234, 179, 8)));
                    ui.label(rec.rating.as_str());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(rec.date.as_str());
                });
            });
        });

    if state.is_truncated() {
        ui.separator();
        ui.vertical_centered(|ui: &mut Ui| {
            ui.weak(format!(
                "Showing first {} results. Use filters to narrow down the data.",
                state.config.table_row_limit
            ));
        });
    }
}
