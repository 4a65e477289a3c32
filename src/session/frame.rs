// src/session/frame.rs

/// Largest magnitude a sample may carry on its way to a display handle.
pub const MAX_PLOT_MAGNITUDE: f64 = 1e12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesStyle {
    Line,
    /// Vertical stems from zero with a marker on top.
    Stem,
    /// Staircase centered on each sample.
    Step,
    Markers,
    /// One horizontal line per y value, x is ignored.
    HorizontalLevels,
    /// One vertical line per x value, y is ignored.
    VerticalMarkers,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub style: SeriesStyle,
    pub points: Vec<[f64; 2]>,
}

impl Series {
    pub fn new(name: &str, style: SeriesStyle, points: Vec<[f64; 2]>) -> Self {
        Self {
            name: name.to_string(),
            style,
            points,
        }
    }

    pub fn line(name: &str, x: &[f64], y: &[f64]) -> Self {
        Self::new(name, SeriesStyle::Line, crate::dsp::zip_points(x, y))
    }

    pub fn stem(name: &str, x: &[f64], y: &[f64]) -> Self {
        Self::new(name, SeriesStyle::Stem, crate::dsp::zip_points(x, y))
    }

    pub fn step(name: &str, x: &[f64], y: &[f64]) -> Self {
        Self::new(name, SeriesStyle::Step, crate::dsp::zip_points(x, y))
    }

    pub fn markers(name: &str, x: &[f64], y: &[f64]) -> Self {
        Self::new(name, SeriesStyle::Markers, crate::dsp::zip_points(x, y))
    }

    pub fn levels(name: &str, levels: &[f64]) -> Self {
        let points = levels.iter().map(|&y| [0.0, y]).collect();
        Self::new(name, SeriesStyle::HorizontalLevels, points)
    }

    pub fn vertical_markers(name: &str, positions: &[f64]) -> Self {
        let points = positions.iter().map(|&x| [x, 0.0]).collect();
        Self::new(name, SeriesStyle::VerticalMarkers, points)
    }

    pub fn is_finite(&self) -> bool {
        self.points
            .iter()
            .all(|p| p[0].is_finite() && p[1].is_finite())
    }

    /// Replaces NaN with 0 and clamps infinities to `±MAX_PLOT_MAGNITUDE`.
    pub fn sanitize(&mut self) -> usize {
        let mut replaced = 0;
        for point in self.points.iter_mut() {
            for v in point.iter_mut() {
                if !v.is_finite() {
                    replaced += 1;
                    *v = if v.is_nan() {
                        0.0
                    } else {
                        MAX_PLOT_MAGNITUDE.copysign(*v)
                    };
                }
                *v = v.clamp(-MAX_PLOT_MAGNITUDE, MAX_PLOT_MAGNITUDE);
            }
        }
        replaced
    }
}

/// How an axis of a plot behaves across recomputes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisRange {
    /// Fitted by the plotting surface, user zoom preserved.
    Auto,
    /// Applied when the handle is created, then left to the user.
    Fixed(f64, f64),
    /// Re-applied on every recompute; the span depends on a parameter.
    Tracking(f64, f64),
}

impl AxisRange {
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match *self {
            AxisRange::Auto => None,
            AxisRange::Fixed(lo, hi) | AxisRange::Tracking(lo, hi) => Some((lo, hi)),
        }
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self, AxisRange::Tracking(..))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotData {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_range: AxisRange,
    pub y_range: AxisRange,
    pub series: Vec<Series>,
}

impl PlotData {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            x_label: String::new(),
            y_label: String::new(),
            x_range: AxisRange::Auto,
            y_range: AxisRange::Auto,
            series: Vec::new(),
        }
    }

    pub fn labels(mut self, x_label: &str, y_label: &str) -> Self {
        self.x_label = x_label.to_string();
        self.y_label = y_label.to_string();
        self
    }

    pub fn x_range(mut self, range: AxisRange) -> Self {
        self.x_range = range;
        self
    }

    pub fn y_range(mut self, range: AxisRange) -> Self {
        self.y_range = range;
        self
    }

    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }
}

/// Output of one `compute` call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub plots: Vec<PlotData>,
    pub notes: Vec<String>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plot(mut self, plot: PlotData) -> Self {
        self.plots.push(plot);
        self
    }

    pub fn with_note(mut self, note: String) -> Self {
        self.notes.push(note);
        self
    }

    pub fn is_finite(&self) -> bool {
        self.plots
            .iter()
            .all(|p| p.series.iter().all(Series::is_finite))
    }

    pub fn sanitize(&mut self) -> usize {
        self.plots
            .iter_mut()
            .flat_map(|p| p.series.iter_mut())
            .map(Series::sanitize)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_non_finite_values() {
        let mut series = Series::new(
            "s",
            SeriesStyle::Line,
            vec![[0.0, f64::NAN], [1.0, f64::INFINITY], [2.0, f64::NEG_INFINITY], [3.0, 1.0]],
        );
        assert!(!series.is_finite());
        assert_eq!(series.sanitize(), 3);
        assert!(series.is_finite());
        assert_eq!(series.points[0][1], 0.0);
        assert_eq!(series.points[1][1], MAX_PLOT_MAGNITUDE);
        assert_eq!(series.points[2][1], -MAX_PLOT_MAGNITUDE);
        assert_eq!(series.points[3][1], 1.0);
    }

    #[test]
    fn level_and_marker_series_layout() {
        let levels = Series::levels("q", &[-1.0, 1.0]);
        assert_eq!(levels.points, vec![[0.0, -1.0], [0.0, 1.0]]);
        let markers = Series::vertical_markers("nyquist", &[5.0]);
        assert_eq!(markers.points, vec![[5.0, 0.0]]);
    }
}
