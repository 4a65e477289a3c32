// Class 11: window length and shape against frequency resolution.

use crate::dsp::{
    self, fourier,
    windows::{self, WindowKind},
};
use crate::session::{
    AxisRange, Frame, Parameter, ParameterValues, PlotData, Series, SeriesStyle, SignalModel,
};
use std::f64::consts::PI;

const FS: f64 = 1000.0;
const F0: f64 = 50.0;
const NFFT: usize = 2048;

pub struct Windowing;

pub fn cosine(len: usize, f0: f64, fs: f64) -> Vec<f64> {
    let w0 = 2.0 * PI * f0 / fs;
    (0..len).map(|n| (w0 * n as f64).cos()).collect()
}

impl SignalModel for Windowing {
    fn class_number(&self) -> u32 {
        11
    }

    fn title(&self) -> &str {
        "Resolución en frecuencia y ventanas"
    }

    fn parameters(&self) -> Vec<Parameter> {
        vec![Parameter::integer("len", "L (longitud ventana)", 20, 400, 100)]
    }

    fn compute(&self, values: &ParameterValues) -> Frame {
        let len = values.get_usize("len").max(1);
        let n = dsp::index_axis(len);
        let x = cosine(len, F0, FS);

        let mut window_plot = PlotData::new("Ventanas").labels("n", "w[n]");
        let mut windowed_plot = PlotData::new("Señal ventaneada").labels("n", "x[n]·w[n]");
        let mut spectrum_plot = PlotData::new("Espectro |X(f)|")
            .labels("f [Hz]", "|X(f)|")
            .x_range(AxisRange::Fixed(0.0, FS / 2.0));

        for kind in WindowKind::ALL {
            let w = windows::window(kind, len);
            let xw = windows::apply(&x, &w);
            let spectrum = fourier::one_sided_magnitude(&xw, NFFT, FS);
            window_plot = window_plot.with_series(Series::line(kind.label(), &n, &w));
            windowed_plot = windowed_plot.with_series(Series::line(kind.label(), &n, &xw));
            spectrum_plot =
                spectrum_plot.with_series(Series::new(kind.label(), SeriesStyle::Line, spectrum));
        }

        Frame::new()
            .with_plot(
                PlotData::new("Señal original x[n]")
                    .labels("n", "x[n]")
                    .with_series(Series::line("x[n]", &n, &x)),
            )
            .with_plot(window_plot)
            .with_plot(windowed_plot)
            .with_plot(spectrum_plot)
            .with_note(format!(
                "L = {}, resolución ≈ fs/L = {:.2} Hz",
                len,
                FS / len as f64
            ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peak_frequency(points: &[[f64; 2]]) -> f64 {
        points
            .iter()
            .max_by(|a, b| a[1].total_cmp(&b[1]))
            .map(|p| p[0])
            .unwrap()
    }

    #[test]
    fn every_window_peaks_at_the_tone() {
        let model = Windowing;
        let frame = model.compute(&ParameterValues::from_parameters(&model.parameters()));
        let spectra = &frame.plots[3];
        assert_eq!(spectra.series.len(), 4);
        for series in &spectra.series {
            assert!((peak_frequency(&series.points) - F0).abs() < 1.0, "{}", series.name);
        }
    }

    #[test]
    fn rectangular_peak_is_highest() {
        // the rectangular window has the largest coherent gain
        let model = Windowing;
        let frame = model.compute(&ParameterValues::from_parameters(&model.parameters()));
        let peaks: Vec<f64> = frame.plots[3]
            .series
            .iter()
            .map(|s| s.points.iter().map(|p| p[1]).fold(0.0, f64::max))
            .collect();
        assert!(peaks[1..].iter().all(|&p| p < peaks[0]));
    }
}
