use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

/// Launches currently inside the scatter scope.
pub fn records_table(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };
    let records = dataset.records();
    let indices = &state.visible_indices;

    ui.strong(format!("{} launches in scope", indices.len()));

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(50.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::auto().at_least(70.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["Flight", "Launch Site", "Payload (kg)", "Outcome", "Booster"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, indices.len(), |mut row| {
                let rec = &records[indices[row.index()]];
                row.col(|ui: &mut Ui| {
                    ui.label(rec.flight_number.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.launch_site);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.1}", rec.payload_mass_kg));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(rec.outcome.tag());
                });
                row.col(|ui: &mut Ui| {
                    let color = state.booster_colors.color_for(&rec.booster_version_category);
                    ui.label(RichText::new(&rec.booster_version_category).color(color));
                });
            });
        });
}
