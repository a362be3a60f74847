use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::report::{format, ItemReport};
use crate::state::AppState;

use super::charts;

/// Central area of the item purchased view.
pub fn items_panel(ui: &mut Ui, state: &AppState) {
    let report = &state.item_report;

    if report.is_empty() {
        ui.label(RichText::new("No purchases match the current filters.").weak());
    }

    ui.heading(format!("Top {} Most Purchased Items", state.config.top_items));
    charts::top_items_chart(ui, &report.top_items);

    ui.add_space(12.0);
    ui.heading("Distribution of Purchased Items");
    ui.label(RichText::new("Item Purchased Distribution").strong());
    charts::donut_chart(ui, &report.slices, &state.item_colors, state.config.donut_hole);

    ui.add_space(12.0);
    ui.collapsing("Item counts", |ui: &mut Ui| item_table(ui, report));
}

fn item_table(ui: &mut Ui, report: &ItemReport) {
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(160.0))
        .column(Column::auto().at_least(60.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong("Item Purchased");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Count");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Share");
            });
        })
        .body(|mut body| {
            for (item, count) in &report.item_counts {
                body.row(18.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label(item);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(count.to_string());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format::percent(report.share(*count)));
                    });
                });
            }
        });
}
