use std::sync::Arc;

use eframe::egui::{self, RichText, Ui};

use crate::state::{AppState, View};

// ---------------------------------------------------------------------------
// Left side panel – navigation and filter widgets
// ---------------------------------------------------------------------------

/// Render the left panel: view selector, then the filters of that view.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Navigation");
    ui.separator();

    ui.label("Choose the analysis section:");
    let mut view = state.view;
    egui::ComboBox::from_id_salt("analysis_section")
        .selected_text(view.label())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for option in View::ALL {
                ui.selectable_value(&mut view, option, option.label());
            }
        });
    state.set_view(view);

    ui.add_space(8.0);

    match state.view {
        View::Frequency => frequency_filters(ui, state),
        View::Items => item_filters(ui, state),
    }
}

fn frequency_filters(ui: &mut Ui, state: &mut AppState) {
    let dataset = Arc::clone(&state.dataset);
    let mut selected = state.frequency.frequency.clone();

    ui.label("Select purchase frequency:");
    egui::ComboBox::from_id_salt("purchase_frequency")
        .selected_text(&selected)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for value in &dataset.frequencies {
                ui.selectable_value(&mut selected, value.clone(), value);
            }
        });
    state.set_frequency(selected);
}

fn item_filters(ui: &mut Ui, state: &mut AppState) {
    let dataset = Arc::clone(&state.dataset);

    ui.heading("Filters");
    ui.separator();

    // ---- Gender multi-select ----
    let n_selected = state.items.genders.len();
    let n_total = dataset.genders.len();
    ui.strong(format!("Select Gender:  ({n_selected}/{n_total})"));
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all_genders();
        }
        if ui.small_button("None").clicked() {
            state.select_no_genders();
        }
    });
    for gender in &dataset.genders {
        let mut checked = state.items.genders.contains(gender);
        if ui.checkbox(&mut checked, RichText::new(gender)).changed() {
            state.toggle_gender(gender);
        }
    }

    ui.add_space(8.0);

    // ---- Age range ----
    let (min, max) = dataset.age_bounds();
    let mut low = state.items.age.low;
    let mut high = state.items.age.high;
    ui.strong("Select Age Range:");
    ui.add(egui::Slider::new(&mut low, min..=max).text("from"));
    ui.add(egui::Slider::new(&mut high, min..=max).text("to"));
    state.set_age_range(low, high);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / status bar.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} rows loaded from {}, {} in view",
            state.dataset.len(),
            state.config.dataset_path.display(),
            state.visible_rows()
        ));
    });
}
