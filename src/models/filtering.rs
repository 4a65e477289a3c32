// Class 01: two tones through a windowed-sinc low-pass.

use crate::dsp::{self, convolution, filters, fourier};
use crate::session::{
    AxisRange, Frame, Parameter, ParameterValues, PlotData, Series, SeriesStyle, SignalModel,
};
use std::f64::consts::PI;

const FS: f64 = 1000.0;
const TAPS: usize = 101;
/// Part of the one-second record shown on the time plot.
const TIME_VIEW: f64 = 0.1;

pub struct TwoToneFiltering;

impl SignalModel for TwoToneFiltering {
    fn class_number(&self) -> u32 {
        1
    }

    fn title(&self) -> &str {
        "Señales analógicas y muestreo: filtrado de dos tonos"
    }

    fn parameters(&self) -> Vec<Parameter> {
        vec![
            Parameter::new("a1", "A1", 0.0, 2.0, 1.0),
            Parameter::new("f1", "f1 [Hz]", 10.0, 400.0, 50.0),
            Parameter::new("a2", "A2", 0.0, 2.0, 0.5),
            Parameter::new("f2", "f2 [Hz]", 10.0, 400.0, 200.0),
            Parameter::new("fc", "fc [Hz]", 10.0, 400.0, 100.0),
        ]
    }

    fn compute(&self, values: &ParameterValues) -> Frame {
        let (a1, f1) = (values.get("a1"), values.get("f1"));
        let (a2, f2) = (values.get("a2"), values.get("f2"));
        let fc = values.get("fc");

        let t = dsp::linspace_open(0.0, 1.0, FS as usize);
        let x: Vec<f64> = t
            .iter()
            .map(|&ti| a1 * (2.0 * PI * f1 * ti).cos() + a2 * (2.0 * PI * f2 * ti).cos())
            .collect();
        let h = filters::windowed_sinc_lowpass(fc, FS, TAPS);
        let y = convolution::same(&x, &h);

        let n = x.len();
        let scale = |spectrum: Vec<[f64; 2]>| -> Vec<[f64; 2]> {
            spectrum.into_iter().map(|[f, m]| [f, m / n as f64]).collect()
        };
        let x_spectrum = scale(fourier::one_sided_magnitude(&x, n, FS));
        let y_spectrum = scale(fourier::one_sided_magnitude(&y, n, FS));

        let (freqs, response) = fourier::frequency_response(&h, &[1.0], 512, FS);
        let gain = dsp::magnitude(&response);

        let time = PlotData::new("Señal en el tiempo")
            .labels("t [s]", "amplitud")
            .x_range(AxisRange::Fixed(0.0, TIME_VIEW))
            .with_series(Series::line("x(t)", &t, &x))
            .with_series(Series::line("y(t) filtrada", &t, &y));

        let spectrum = PlotData::new("Espectro")
            .labels("f [Hz]", "|X(f)|")
            .x_range(AxisRange::Fixed(0.0, FS / 2.0))
            .with_series(Series::new("|X(f)|", SeriesStyle::Line, x_spectrum))
            .with_series(Series::new("|Y(f)|", SeriesStyle::Line, y_spectrum))
            .with_series(Series::vertical_markers("fc", &[fc]));

        let filter = PlotData::new("Respuesta del filtro")
            .labels("f [Hz]", "|H(f)|")
            .x_range(AxisRange::Fixed(0.0, FS / 2.0))
            .with_series(Series::line("|H(f)|", &freqs, &gain))
            .with_series(Series::vertical_markers("fc", &[fc]));

        let passed: Vec<String> = [(f1, a1), (f2, a2)]
            .iter()
            .filter(|(f, a)| *f <= fc && *a > 0.0)
            .map(|(f, _)| format!("{:.0} Hz", f))
            .collect();
        let note = if passed.is_empty() {
            format!("fc = {:.0} Hz: ningún tono en la banda de paso", fc)
        } else {
            format!("fc = {:.0} Hz: pasan {}", fc, passed.join(", "))
        };

        Frame::new()
            .with_plot(time)
            .with_plot(spectrum)
            .with_plot(filter)
            .with_note(note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peak_near(points: &[[f64; 2]], f: f64) -> f64 {
        points
            .iter()
            .filter(|p| (p[0] - f).abs() <= 1.0)
            .map(|p| p[1])
            .fold(0.0, f64::max)
    }

    #[test]
    fn tone_above_cutoff_is_attenuated() {
        let model = TwoToneFiltering;
        let values = ParameterValues::from_parameters(&model.parameters());
        let frame = model.compute(&values);
        let spectrum = &frame.plots[1];
        let x = &spectrum.series[0].points;
        let y = &spectrum.series[1].points;

        // cos amplitude A shows up as A/2 in the normalized one-sided FFT
        assert!((peak_near(x, 50.0) - 0.5).abs() < 0.05);
        assert!((peak_near(x, 200.0) - 0.25).abs() < 0.05);
        assert!(peak_near(y, 50.0) > 0.4);
        assert!(peak_near(y, 200.0) < 0.02);
    }
}
