use std::path::Path;

use anyhow::Result;
use eframe::egui;
use launch_dashboard::app::LaunchDashboardApp;
use launch_dashboard::config::{DashboardConfig, CONFIG_FILE_NAME};
use launch_dashboard::data::loader::load_file;
use launch_dashboard::state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE_NAME))?;
    let title = config.title.clone();
    let dataset_path = config.dataset_path.clone();

    let mut state = AppState::new(config);
    if dataset_path.exists() {
        // A malformed startup dataset is fatal.
        state.set_dataset(load_file(&dataset_path)?);
    } else {
        log::warn!("Dataset {} not found, starting empty", dataset_path.display());
        state.status_message = Some(format!(
            "{} not found – use File → Open…",
            dataset_path.display()
        ));
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(LaunchDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard: {e}"))
}
