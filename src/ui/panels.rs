use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::{PayloadRange, SiteSelection};
use crate::state::{AppState, FilterChange};

// ---------------------------------------------------------------------------
// Left side panel – filter controls
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading(RichText::new(&state.config.title).color(Color32::from_rgb(0x50, 0x3D, 0x36)));
    ui.separator();

    site_dropdown(ui, state);
    ui.add_space(8.0);
    payload_slider(ui, state);
    ui.separator();
    site_summary(ui, state);
}

fn site_dropdown(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Launch Site");

    let current = state.filters.site.clone();
    let selected_text = match &current {
        SiteSelection::All => "All Sites".to_string(),
        SiteSelection::Site(s) => s.clone(),
    };

    let mut choice = None;
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(selected_text)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(current == SiteSelection::All, "All Sites")
                .clicked()
            {
                choice = Some(SiteSelection::All);
            }
            for site in &state.config.sites {
                let is_current = matches!(&current, SiteSelection::Site(s) if s == site);
                if ui.selectable_label(is_current, site).clicked() {
                    choice = Some(SiteSelection::Site(site.clone()));
                }
            }
        });

    if let Some(site) = choice {
        state.apply(FilterChange::Site(site));
    }
}

/// Two handles over the configured payload span. The handles never cross:
/// moving one past the other drags the other along.
fn payload_slider(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Payload range (Kg):");

    let cfg = state.config.payload_slider;
    let PayloadRange { mut lo, mut hi } = state.filters.payload;

    let lo_changed = ui
        .add(
            egui::Slider::new(&mut lo, cfg.min..=cfg.max)
                .step_by(cfg.step)
                .suffix(" kg")
                .text("min"),
        )
        .changed();
    let hi_changed = ui
        .add(
            egui::Slider::new(&mut hi, cfg.min..=cfg.max)
                .step_by(cfg.step)
                .suffix(" kg")
                .text("max"),
        )
        .changed();

    if lo_changed && lo > hi {
        hi = lo;
    } else if hi_changed && hi < lo {
        lo = hi;
    }

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for mark in cfg.marks() {
            ui.small(format!("{mark:.0}kg"));
        }
    });

    if lo_changed || hi_changed {
        state.apply(FilterChange::Payload(PayloadRange::new(lo, hi)));
    }
}

fn site_summary(ui: &mut Ui, state: &AppState) {
    if state.site_summaries.is_empty() {
        return;
    }
    ui.strong("Success rate by site");
    egui::Grid::new("site_summary")
        .striped(true)
        .num_columns(3)
        .show(ui, |ui: &mut Ui| {
            for summary in &state.site_summaries {
                ui.label(&summary.site);
                ui.label(format!("{}/{}", summary.successes, summary.launches));
                ui.label(format!("{:.0}%", 100.0 * summary.success_rate()));
                ui.end_row();
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} launches loaded, {} in range",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        ui.separator();

        if ui
            .selectable_label(state.show_table, "Records table")
            .clicked()
        {
            state.show_table = !state.show_table;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
