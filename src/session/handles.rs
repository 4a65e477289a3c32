// src/session/handles.rs

use super::frame::{AxisRange, PlotData, SeriesStyle};

/// One plot surface, created once from the first frame and updated in place.
///
/// The renderer keeps its own view state (zoom, pan) keyed on the handle and
/// only re-applies bounds when `bounds_revision` moves.
#[derive(Debug, Clone)]
pub struct DisplayHandle {
    data: PlotData,
    layout: Vec<(String, SeriesStyle)>,
    bounds_revision: u64,
    data_revision: u64,
}

impl DisplayHandle {
    pub fn create(mut data: PlotData) -> Self {
        for series in data.series.iter_mut() {
            series.sanitize();
        }
        let layout = data
            .series
            .iter()
            .map(|s| (s.name.clone(), s.style))
            .collect();
        let has_bounds = data.x_range.bounds().is_some() || data.y_range.bounds().is_some();
        Self {
            data,
            layout,
            bounds_revision: if has_bounds { 1 } else { 0 },
            data_revision: 1,
        }
    }

    /// Checks that `next` carries the same series, in the same order and style.
    pub fn check(&self, next: &PlotData) -> Result<(), String> {
        if next.series.len() != self.layout.len() {
            return Err(format!(
                "Plot '{}' expected {} series, got {}",
                self.data.title,
                self.layout.len(),
                next.series.len()
            ));
        }
        for ((name, style), series) in self.layout.iter().zip(next.series.iter()) {
            if *name != series.name || *style != series.style {
                return Err(format!(
                    "Plot '{}' expected series '{}' ({:?}), got '{}' ({:?})",
                    self.data.title, name, style, series.name, series.style
                ));
            }
        }
        Ok(())
    }

    /// Replaces the samples of every series. Labels, titles and non-tracking
    /// axes keep what the handle was created with.
    pub fn update(&mut self, next: PlotData) {
        let mut retrack = false;
        for (current, mut series) in self.data.series.iter_mut().zip(next.series) {
            series.sanitize();
            current.points = series.points;
        }
        if self.data.x_range.is_tracking() {
            self.data.x_range = next.x_range;
            retrack = true;
        }
        if self.data.y_range.is_tracking() {
            self.data.y_range = next.y_range;
            retrack = true;
        }
        if retrack {
            self.bounds_revision += 1;
        }
        self.data_revision += 1;
    }

    pub fn plot(&self) -> &PlotData {
        &self.data
    }

    pub fn title(&self) -> &str {
        &self.data.title
    }

    pub fn x_range(&self) -> AxisRange {
        self.data.x_range
    }

    pub fn y_range(&self) -> AxisRange {
        self.data.y_range
    }

    pub fn bounds_revision(&self) -> u64 {
        self.bounds_revision
    }

    pub fn data_revision(&self) -> u64 {
        self.data_revision
    }
}
