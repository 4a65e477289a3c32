// src/visualization/plotter.rs

use crate::session::{DisplayHandle, PlotData, PlotSession, SeriesStyle};
use eframe::egui;
use egui_plot::{Bar, BarChart, HLine, Legend, Line, Plot, PlotBounds, PlotPoints, Points, VLine};
use std::collections::HashMap;

const PALETTE: [egui::Color32; 6] = [
    egui::Color32::from_rgb(31, 119, 180),
    egui::Color32::from_rgb(255, 127, 14),
    egui::Color32::from_rgb(44, 160, 44),
    egui::Color32::from_rgb(214, 39, 40),
    egui::Color32::from_rgb(148, 103, 189),
    egui::Color32::from_rgb(140, 86, 75),
];

/// Margin added around data extents when an axis has no explicit bounds.
const AUTO_MARGIN: f64 = 0.05;

/// Draws a `PlotSession`: parameter sliders, notes and one plot per handle.
///
/// Plot ids are stable per class and handle index, so egui keeps the user's
/// zoom and pan between recomputes. Bounds are pushed into a plot only when
/// its handle's `bounds_revision` differs from the last one applied.
#[derive(Default)]
pub struct SessionPlotter {
    class_number: Option<u32>,
    applied: HashMap<usize, u64>,
    /// Failed change or reset, shown until the next successful one.
    last_error: Option<String>,
}

impl SessionPlotter {
    pub fn new() -> Self {
        Self::default()
    }

    fn track_class(&mut self, session: &PlotSession) {
        if self.class_number != Some(session.class_number()) {
            self.class_number = Some(session.class_number());
            self.applied.clear();
            self.last_error = None;
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Handles whose bounds must be (re)applied this frame.
    pub fn pending_bounds(&mut self, session: &PlotSession) -> Vec<usize> {
        self.track_class(session);
        session
            .handles()
            .iter()
            .enumerate()
            .filter(|(i, h)| {
                h.bounds_revision() > 0 && self.applied.get(i) != Some(&h.bounds_revision())
            })
            .map(|(i, _)| i)
            .collect()
    }

    fn mark_applied(&mut self, index: usize, revision: u64) {
        self.applied.insert(index, revision);
    }

    pub fn apply_change(&mut self, session: &mut PlotSession, name: &str, value: f64) {
        self.track_class(session);
        self.last_error = session.on_parameter_change(name, value).err();
    }

    pub fn apply_reset(&mut self, session: &mut PlotSession) {
        self.track_class(session);
        self.last_error = session.reset().err();
    }

    pub fn show(&mut self, ui: &mut egui::Ui, session: &mut PlotSession, plot_height: f32) {
        self.track_class(session);
        ui.heading(format!("Clase {:02}: {}", session.class_number(), session.title()));
        ui.separator();

        self.show_controls(ui, session);
        ui.separator();

        for note in session.notes() {
            ui.label(egui::RichText::new(note).strong());
        }
        ui.add_space(6.0);

        let pending = self.pending_bounds(session);
        let class_number = session.class_number();
        egui::ScrollArea::vertical().show(ui, |ui| {
            for (index, handle) in session.handles().iter().enumerate() {
                let apply_bounds = pending.contains(&index);
                ui.label(egui::RichText::new(handle.title()).heading());
                self.plot_handle(ui, (class_number, index), handle, apply_bounds, plot_height);
                if apply_bounds {
                    self.mark_applied(index, handle.bounds_revision());
                }
                ui.add_space(10.0);
            }
        });
    }

    fn show_controls(&mut self, ui: &mut egui::Ui, session: &mut PlotSession) {
        let mut changed: Option<(String, f64)> = None;
        for parameter in session.parameters() {
            let mut value = parameter.value();
            let mut slider = egui::Slider::new(&mut value, parameter.min..=parameter.max)
                .text(&parameter.label);
            if let Some(step) = parameter.step {
                slider = slider.step_by(step);
            }
            if parameter.is_integer() {
                slider = slider.fixed_decimals(0);
            }
            if ui.add(slider).changed() {
                changed = Some((parameter.name.clone(), value));
            }
        }

        if let Some((name, value)) = changed {
            self.apply_change(session, &name, value);
        }
        if ui.button("Reset").clicked() {
            self.apply_reset(session);
        }
        if let Some(e) = &self.last_error {
            ui.colored_label(egui::Color32::RED, e);
        }
    }

    fn plot_handle(
        &self,
        ui: &mut egui::Ui,
        id: (u32, usize),
        handle: &DisplayHandle,
        apply_bounds: bool,
        plot_height: f32,
    ) {
        let data = handle.plot();
        let bounds = if apply_bounds { Some(view_bounds(data)) } else { None };

        Plot::new(("session_plot", id.0, id.1))
            .height(plot_height)
            .legend(Legend::default())
            .x_axis_label(data.x_label.clone())
            .y_axis_label(data.y_label.clone())
            .show_grid([true, true])
            .allow_zoom(true)
            .allow_drag(true)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                if let Some((min, max)) = bounds {
                    plot_ui.set_plot_bounds(PlotBounds::from_min_max(min, max));
                }
                for (i, series) in data.series.iter().enumerate() {
                    let color = PALETTE[i % PALETTE.len()];
                    let name = series.name.as_str();
                    match series.style {
                        SeriesStyle::Line => {
                            let points: PlotPoints = series.points.iter().copied().collect();
                            plot_ui.line(Line::new(points).name(name).color(color).width(1.5));
                        }
                        SeriesStyle::Step => {
                            let points: PlotPoints = step_points(&series.points).into_iter().collect();
                            plot_ui.line(Line::new(points).name(name).color(color).width(1.5));
                        }
                        SeriesStyle::Stem => {
                            let width = stem_width(&series.points);
                            let bars = series
                                .points
                                .iter()
                                .map(|p| Bar::new(p[0], p[1]).width(width).fill(color))
                                .collect();
                            plot_ui.bar_chart(BarChart::new(bars).name(name).color(color));
                            let tops: PlotPoints = series.points.iter().copied().collect();
                            plot_ui.points(Points::new(tops).name(name).color(color).radius(3.0));
                        }
                        SeriesStyle::Markers => {
                            let points: PlotPoints = series.points.iter().copied().collect();
                            plot_ui.points(
                                Points::new(points)
                                    .name(name)
                                    .color(color)
                                    .radius(4.0)
                                    .shape(egui_plot::MarkerShape::Cross),
                            );
                        }
                        SeriesStyle::HorizontalLevels => {
                            for p in &series.points {
                                plot_ui.hline(HLine::new(p[1]).name(name).color(color).width(0.5));
                            }
                        }
                        SeriesStyle::VerticalMarkers => {
                            for p in &series.points {
                                plot_ui.vline(VLine::new(p[0]).name(name).color(color).width(1.0));
                            }
                        }
                    }
                }
            });
    }
}

// -----------------------------------------------------------------------------
// GEOMETRY
// -----------------------------------------------------------------------------

/// Stair outline holding each sample over half the distance to its neighbors.
pub fn step_points(points: &[[f64; 2]]) -> Vec<[f64; 2]> {
    let n = points.len();
    if n < 2 {
        return points.to_vec();
    }
    let mut out = Vec::with_capacity(2 * n);
    for i in 0..n {
        let x = points[i][0];
        let left = if i == 0 {
            x - (points[1][0] - x) / 2.0
        } else {
            (points[i - 1][0] + x) / 2.0
        };
        let right = if i + 1 == n {
            x + (x - points[i - 1][0]) / 2.0
        } else {
            (x + points[i + 1][0]) / 2.0
        };
        out.push([left, points[i][1]]);
        out.push([right, points[i][1]]);
    }
    out
}

/// Bar width for stems: a fifth of the smallest sample spacing.
pub fn stem_width(points: &[[f64; 2]]) -> f64 {
    let spacing = points
        .windows(2)
        .map(|w| (w[1][0] - w[0][0]).abs())
        .filter(|d| *d > 0.0)
        .fold(f64::INFINITY, f64::min);
    if spacing.is_finite() {
        spacing / 5.0
    } else {
        0.05
    }
}

/// Bounds to push into a plot: explicit axis ranges where given, data extent
/// with a small margin otherwise.
pub fn view_bounds(data: &PlotData) -> ([f64; 2], [f64; 2]) {
    let (x_lo, x_hi) = data
        .x_range
        .bounds()
        .unwrap_or_else(|| padded_extent(data, 0));
    let (y_lo, y_hi) = data
        .y_range
        .bounds()
        .unwrap_or_else(|| padded_extent(data, 1));
    ([x_lo, y_lo], [x_hi, y_hi])
}

fn padded_extent(data: &PlotData, axis: usize) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for series in &data.series {
        let uses_axis = match series.style {
            SeriesStyle::HorizontalLevels => axis == 1,
            SeriesStyle::VerticalMarkers => axis == 0,
            _ => true,
        };
        if !uses_axis {
            continue;
        }
        for p in &series.points {
            lo = lo.min(p[axis]);
            hi = hi.max(p[axis]);
        }
        if series.style == SeriesStyle::Stem && axis == 1 {
            lo = lo.min(0.0);
            hi = hi.max(0.0);
        }
    }
    if !lo.is_finite() || !hi.is_finite() {
        return (-1.0, 1.0);
    }
    let span = if hi > lo { hi - lo } else { 1.0 };
    (lo - AUTO_MARGIN * span, hi + AUTO_MARGIN * span)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{AxisRange, Series};

    #[test]
    fn steps_are_centered_on_samples() {
        let steps = step_points(&[[0.0, 1.0], [1.0, 2.0], [2.0, 3.0]]);
        assert_eq!(
            steps,
            vec![
                [-0.5, 1.0],
                [0.5, 1.0],
                [0.5, 2.0],
                [1.5, 2.0],
                [1.5, 3.0],
                [2.5, 3.0]
            ]
        );
    }

    #[test]
    fn explicit_ranges_override_data_extent() {
        let data = PlotData::new("t")
            .x_range(AxisRange::Tracking(-30.0, 30.0))
            .with_series(Series::stem("x", &[0.0, 1.0], &[2.0, 4.0]));
        let (min, max) = view_bounds(&data);
        assert_eq!((min[0], max[0]), (-30.0, 30.0));
        // stems always include the baseline
        assert!(min[1] < 0.0 && max[1] > 4.0);
    }

    #[test]
    fn bounds_are_pending_only_after_a_revision_bump() {
        let mut session = PlotSession::for_class(2).unwrap();
        let mut plotter = SessionPlotter::new();
        let first = plotter.pending_bounds(&session);
        assert!(!first.is_empty());
        for &i in &first {
            plotter.mark_applied(i, session.handles()[i].bounds_revision());
        }
        assert!(plotter.pending_bounds(&session).is_empty());

        session.on_parameter_change("fs", 30.0).unwrap();
        assert!(!plotter.pending_bounds(&session).is_empty());
    }

    #[test]
    fn change_error_stays_until_the_next_successful_change() {
        let mut session = PlotSession::for_class(2).unwrap();
        let mut plotter = SessionPlotter::new();

        plotter.apply_change(&mut session, "no_such_parameter", 1.0);
        assert!(plotter.last_error().unwrap().contains("no_such_parameter"));
        // still shown on later frames
        plotter.pending_bounds(&session);
        assert!(plotter.last_error().is_some());

        plotter.apply_change(&mut session, "fs", f64::NAN);
        assert!(plotter.last_error().is_some());

        plotter.apply_change(&mut session, "fs", 30.0);
        assert!(plotter.last_error().is_none());

        plotter.apply_change(&mut session, "no_such_parameter", 1.0);
        plotter.apply_reset(&mut session);
        assert!(plotter.last_error().is_none());
    }

    #[test]
    fn switching_class_clears_the_error() {
        let mut plotter = SessionPlotter::new();
        let mut first = PlotSession::for_class(2).unwrap();
        plotter.apply_change(&mut first, "no_such_parameter", 1.0);
        assert!(plotter.last_error().is_some());

        let second = PlotSession::for_class(3).unwrap();
        plotter.pending_bounds(&second);
        assert!(plotter.last_error().is_none());
    }
}
