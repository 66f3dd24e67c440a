use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::color::ColorMap;
use crate::data::aggregate::PieChart;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Pie geometry
// ---------------------------------------------------------------------------

/// Arc resolution: vertices per full turn.
const ARC_STEPS_PER_TURN: f64 = 96.0;

/// One convex piece of a pie slice, in plot coordinates on the unit circle.
#[derive(Debug, Clone, PartialEq)]
pub struct WedgePiece {
    pub slice: usize,
    pub points: Vec<[f64; 2]>,
}

/// Angular extent of every slice, starting at 12 o'clock and going
/// clockwise. Returns `(start, end)` in radians; empty for a zero total.
pub fn slice_angles(pie: &PieChart) -> Vec<(f64, f64)> {
    let total = pie.total();
    if total == 0 {
        return Vec::new();
    }
    let mut start = 0.0;
    pie.slices
        .iter()
        .map(|s| {
            let end = start + TAU * s.value as f64 / total as f64;
            let span = (start, end);
            start = end;
            span
        })
        .collect()
}

/// Polygons for the pie. Plot polygons are only filled correctly when
/// convex, so every slice is cut into pieces of at most a quarter turn.
pub fn wedge_pieces(pie: &PieChart) -> Vec<WedgePiece> {
    let mut pieces = Vec::new();
    for (slice, (start, end)) in slice_angles(pie).into_iter().enumerate() {
        let mut a = start;
        while a < end {
            let b = (a + FRAC_PI_2).min(end);
            let steps = (((b - a) / TAU) * ARC_STEPS_PER_TURN).ceil().max(1.0) as usize;
            let mut points = Vec::with_capacity(steps + 2);
            points.push([0.0, 0.0]);
            for i in 0..=steps {
                let t = a + (b - a) * i as f64 / steps as f64;
                points.push(polar(t, 1.0));
            }
            pieces.push(WedgePiece { slice, points });
            a = b;
        }
    }
    pieces
}

/// Clockwise from 12 o'clock.
fn polar(angle: f64, radius: f64) -> [f64; 2] {
    [radius * angle.sin(), radius * angle.cos()]
}

// ---------------------------------------------------------------------------
// Success pie
// ---------------------------------------------------------------------------

pub fn success_pie_chart(ui: &mut Ui, pie: &PieChart, height: f32) {
    ui.strong(&pie.title);

    if pie.slices.is_empty() {
        ui.label("No launches for this selection.");
        return;
    }

    let colors = ColorMap::new(pie.slices.iter().map(|s| s.label.clone()));
    let total = pie.total() as f64;
    let angles = slice_angles(pie);

    Plot::new("success_pie")
        .legend(Legend::default())
        .data_aspect(1.0)
        .height(height)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_x(false)
        .show_y(false)
        .include_x(-1.1)
        .include_x(1.1)
        .include_y(-1.1)
        .include_y(1.1)
        .show(ui, |plot_ui| {
            for piece in wedge_pieces(pie) {
                let slice = &pie.slices[piece.slice];
                let color = colors.color_for(&slice.label);
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(piece.points))
                        .name(&slice.label)
                        .fill_color(color)
                        .stroke(Stroke::new(1.0, color)),
                );
            }

            for (slice, &(start, end)) in pie.slices.iter().zip(&angles) {
                let [x, y] = polar((start + end) / 2.0, 0.65);
                let pct = 100.0 * slice.value as f64 / total;
                plot_ui.text(Text::new(
                    PlotPoint::new(x, y),
                    RichText::new(format!("{pct:.1}%")).color(Color32::WHITE).strong(),
                ));
            }
        });
}

// ---------------------------------------------------------------------------
// Payload / outcome scatter
// ---------------------------------------------------------------------------

pub fn payload_scatter_chart(ui: &mut Ui, state: &AppState) {
    let scatter = &state.scatter;
    ui.strong(&scatter.title);

    Plot::new("payload_scatter")
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("class")
        .include_x(state.filters.payload.lo)
        .include_x(state.filters.payload.hi)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &scatter.series {
                let points: PlotPoints = series.points.iter().map(|p| p.as_xy()).collect();
                plot_ui.points(
                    Points::new(points)
                        .name(&series.category)
                        .color(state.booster_colors.color_for(&series.category))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(4.0),
                );
            }
        });
}

/// Central panel: pie on top, scatter below.
pub fn charts_panel(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a launch records file to begin  (File → Open…)");
        });
        return;
    }

    let half = (ui.available_height() / 2.0 - 30.0).max(120.0);
    success_pie_chart(ui, &state.pie, half);
    ui.separator();
    payload_scatter_chart(ui, state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::PieSlice;

    fn pie(values: &[usize]) -> PieChart {
        PieChart {
            title: "test".into(),
            slices: values
                .iter()
                .enumerate()
                .map(|(i, &value)| PieSlice {
                    label: format!("s{i}"),
                    value,
                })
                .collect(),
        }
    }

    #[test]
    fn test_slice_angles_cover_full_turn() {
        let angles = slice_angles(&pie(&[1, 1, 2]));
        assert_eq!(angles.len(), 3);
        assert_eq!(angles[0].0, 0.0);
        assert!((angles[0].1 - TAU / 4.0).abs() < 1e-12);
        assert!((angles[2].1 - TAU).abs() < 1e-12);
        assert!(slice_angles(&pie(&[])).is_empty());
    }

    #[test]
    fn test_single_slice_is_split_into_quarters() {
        let pieces = wedge_pieces(&pie(&[7]));
        assert_eq!(pieces.len(), 4);
        assert!(pieces.iter().all(|p| p.slice == 0 && p.points[0] == [0.0, 0.0]));
    }

    #[test]
    fn test_wedge_points_lie_on_unit_circle() {
        for piece in wedge_pieces(&pie(&[3, 1, 5])) {
            for p in &piece.points[1..] {
                let r = (p[0] * p[0] + p[1] * p[1]).sqrt();
                assert!((r - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_zero_value_slice_has_no_pieces() {
        let pieces = wedge_pieces(&pie(&[0, 4]));
        assert!(pieces.iter().all(|p| p.slice == 1));
    }
}
