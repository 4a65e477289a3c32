// Class 02: sampling a cosine and folding its frequency.

use crate::dsp::{self, sampling};
use crate::session::{AxisRange, Frame, Parameter, ParameterValues, PlotData, Series, SignalModel};
use std::f64::consts::PI;

const T_MAX: f64 = 1.0;
const POINTS: usize = 1000;
const REPLICAS: i32 = 3;
const PEAK_WIDTH: f64 = 0.2;

pub struct Aliasing;

impl SignalModel for Aliasing {
    fn class_number(&self) -> u32 {
        2
    }

    fn title(&self) -> &str {
        "Muestreo, aliasing y reconstrucción"
    }

    fn parameters(&self) -> Vec<Parameter> {
        vec![
            Parameter::new("f", "f [Hz]", 0.1, 40.0, 10.0),
            Parameter::new("fs", "fs [Hz]", 2.0, 50.0, 12.0),
        ]
    }

    fn compute(&self, values: &ParameterValues) -> Frame {
        let f = values.get("f");
        let fs = values.get("fs");
        let fa = sampling::alias_frequency(f, fs);

        let t = dsp::linspace(0.0, T_MAX, POINTS);
        let x: Vec<f64> = t.iter().map(|&ti| (2.0 * PI * f * ti).cos()).collect();
        let alias: Vec<f64> = t.iter().map(|&ti| (2.0 * PI * fa * ti).cos()).collect();
        let n = dsp::arange(0.0, T_MAX, 1.0 / fs);
        let samples: Vec<f64> = n.iter().map(|&ti| (2.0 * PI * f * ti).cos()).collect();

        let time = PlotData::new("Señal y muestras")
            .labels("t [s]", "x(t)")
            .x_range(AxisRange::Fixed(0.0, T_MAX))
            .y_range(AxisRange::Fixed(-1.2, 1.2))
            .with_series(Series::line("x(t)", &t, &x))
            .with_series(Series::stem("x[n]", &n, &samples))
            .with_series(Series::line("alias", &t, &alias));

        let span = REPLICAS as f64 * fs;
        let f_axis = dsp::linspace(-span, span, 2000);
        let replicated = sampling::replicated_spectrum(&f_axis, f, fs, REPLICAS, PEAK_WIDTH);
        let spectrum = PlotData::new("Espectro del muestreo")
            .labels("f [Hz]", "|X_s(f)|")
            .x_range(AxisRange::Tracking(-span, span))
            .with_series(Series::line("réplicas", &f_axis, &replicated))
            .with_series(Series::vertical_markers("±fs/2", &[-fs / 2.0, fs / 2.0]));

        let sweep = dsp::linspace(0.0, 2.0 * fs, 400);
        let folded: Vec<f64> = sweep
            .iter()
            .map(|&fi| sampling::alias_frequency(fi, fs))
            .collect();
        let fold = PlotData::new("Frecuencia aparente")
            .labels("f [Hz]", "f_alias [Hz]")
            .x_range(AxisRange::Tracking(0.0, 2.0 * fs))
            .y_range(AxisRange::Tracking(-fs / 2.0 - 1.0, fs / 2.0 + 1.0))
            .with_series(Series::line("f_alias(f)", &sweep, &folded))
            .with_series(Series::markers("actual", &[f], &[fa]));

        let verdict = if sampling::is_aliased(f, fs) {
            "hay aliasing (f > fs/2)"
        } else {
            "sin aliasing"
        };
        Frame::new()
            .with_plot(time)
            .with_plot(spectrum)
            .with_plot(fold)
            .with_note(format!("f = {:.2} Hz, fs = {:.2} Hz", f, fs))
            .with_note(format!("frecuencia alias = {:.2} Hz, {}", fa, verdict))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_of_signal_and_alias_coincide() {
        let model = Aliasing;
        let values = ParameterValues::from_parameters(&model.parameters());
        let frame = model.compute(&values);

        // default f = 10, fs = 12 folds to -2 Hz
        assert!(frame.notes[1].contains("-2.00"));
        let fa = -2.0;
        for p in &frame.plots[0].series[1].points {
            let alias = (2.0 * PI * fa * p[0]).cos();
            assert!((p[1] - alias).abs() < 1e-9);
        }
    }

    #[test]
    fn sample_count_follows_fs() {
        let model = Aliasing;
        let mut params = model.parameters();
        params[1].set(20.0);
        let frame = model.compute(&ParameterValues::from_parameters(&params));
        assert_eq!(frame.plots[0].series[1].points.len(), 20);
        assert_eq!(frame.plots[1].x_range, AxisRange::Tracking(-60.0, 60.0));
    }
}
