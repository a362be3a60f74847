mod app;
mod color;
mod config;
mod data;
mod report;
mod state;
mod ui;

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use app::{DashboardApp, LoadFailureApp};
use config::{DashboardConfig, CONFIG_FILE};
use data::model::ShoppingDataset;
use eframe::egui;
use state::AppState;

const WINDOW_TITLE: &str = "Shopping Trends Dashboard";

fn main() -> ExitCode {
    env_logger::init();

    match load() {
        Ok((config, dataset)) => {
            let state = AppState::new(Arc::new(dataset), config);
            run(Box::new(|_cc| Ok(Box::new(DashboardApp::new(state)))))
        }
        Err(e) => {
            log::error!("Startup failed: {e:#}");
            let message = format!("{e:#}");
            // The failure page is informational; the exit code reports the failure.
            let _ = run(Box::new(|_cc| Ok(Box::new(LoadFailureApp::new(message)))));
            ExitCode::FAILURE
        }
    }
}

/// Read settings and the dataset. Runs exactly once, before the window opens.
fn load() -> Result<(DashboardConfig, ShoppingDataset)> {
    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE))?;
    let dataset = data::loader::load_file(&config.dataset_path, &config.sheet_name)
        .with_context(|| format!("loading {}", config.dataset_path.display()))?;

    log::info!(
        "Loaded {} rows with columns {:?}",
        dataset.len(),
        dataset.column_names
    );
    Ok((config, dataset))
}

fn run(app_creator: eframe::AppCreator<'_>) -> ExitCode {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    match eframe::run_native(WINDOW_TITLE, options, app_creator) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Window error: {e}");
            ExitCode::FAILURE
        }
    }
}
