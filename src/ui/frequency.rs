use eframe::egui::{RichText, Ui};

use crate::report::FrequencyReport;

use super::charts;

/// Central area of the purchase frequency view.
pub fn frequency_panel(ui: &mut Ui, report: &FrequencyReport) {
    ui.heading(format!("Data for '{}' group", report.frequency));
    ui.add_space(6.0);

    ui.columns(3, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Total Customers", &report.customers_label());
        metric(&mut cols[1], "Total Revenue", &report.revenue_label());
        metric(&mut cols[2], "Avg. Previous Purchases", &report.avg_previous_purchases_label());
    });

    ui.add_space(12.0);
    ui.heading("Age Distribution Chart");
    ui.label(RichText::new("Customer Age Distribution").strong());
    if report.customers == 0 {
        ui.label(RichText::new("No customers in this group.").weak());
    }
    charts::age_histogram(ui, report);
}

/// A labelled headline number.
pub fn metric(ui: &mut Ui, label: &str, value: &str) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).weak());
        ui.label(RichText::new(value).size(28.0).strong());
    });
}
