// Class 06: uniform quantizer with range R and B bits.

use crate::dsp::{self, quantization};
use crate::session::{AxisRange, Frame, Parameter, ParameterValues, PlotData, Series, SignalModel};
use std::f64::consts::PI;

const F0: f64 = 1000.0;
const DURATION: f64 = 1e-3;
const POINTS: usize = 1000;
/// Beyond this the level plot shows every k-th level only.
const MAX_DRAWN_LEVELS: usize = 64;

pub struct Quantization;

impl SignalModel for Quantization {
    fn class_number(&self) -> u32 {
        6
    }

    fn title(&self) -> &str {
        "Cuantización"
    }

    fn parameters(&self) -> Vec<Parameter> {
        vec![
            Parameter::new("range", "Rango R [V]", 1.0, 20.0, 10.0),
            Parameter::integer("bits", "Bits B", 2, 20, 4),
        ]
    }

    fn compute(&self, values: &ParameterValues) -> Frame {
        let range = values.get("range");
        let bits = values.get_usize("bits").clamp(1, 24) as u32;
        let q = quantization::quantization_step(range, bits);

        let t = dsp::linspace(0.0, DURATION, POINTS);
        let t_ms: Vec<f64> = t.iter().map(|v| v * 1e3).collect();
        let x: Vec<f64> = t
            .iter()
            .map(|&ti| range / 2.0 * (2.0 * PI * F0 * ti).sin())
            .collect();
        let xq = quantization::quantize(&x, range, bits);
        let error: Vec<f64> = xq.iter().zip(x.iter()).map(|(a, b)| a - b).collect();

        let signals = PlotData::new("Señal original vs cuantizada")
            .labels("t [ms]", "amplitud [V]")
            .with_series(Series::line("original", &t_ms, &x))
            .with_series(Series::step("cuantizada", &t_ms, &xq));

        let error_plot = PlotData::new("Error de cuantización")
            .labels("t [ms]", "error [V]")
            .with_series(Series::line("error", &t_ms, &error));

        let bit_axis: Vec<f64> = (2..=20).map(|b| b as f64).collect();
        let rms_uv: Vec<f64> = (2..=20)
            .map(|b| quantization::rms_error(range, b) * 1e6)
            .collect();
        let snr: Vec<f64> = (2..=20).map(quantization::snr_db).collect();
        let trends = PlotData::new("Error RMS y SNR vs bits")
            .labels("bits", "error RMS [µV] / SNR [dB]")
            .with_series(Series::line("error RMS [µV]", &bit_axis, &rms_uv))
            .with_series(Series::line("SNR [dB]", &bit_axis, &snr));

        let levels = quantization::quantization_levels(range, bits);
        let stride = (levels.len() / MAX_DRAWN_LEVELS).max(1);
        let drawn: Vec<f64> = levels.iter().step_by(stride).copied().collect();
        let level_plot = PlotData::new("Niveles de cuantización")
            .labels("", "nivel [V]")
            .x_range(AxisRange::Fixed(0.0, 1.0))
            .y_range(AxisRange::Tracking(-range / 2.0 - 0.1, range / 2.0 + 0.1))
            .with_series(Series::levels("niveles", &drawn));

        Frame::new()
            .with_plot(signals)
            .with_plot(error_plot)
            .with_plot(trends)
            .with_plot(level_plot)
            .with_note(format!(
                "Q = {:.4e} V, error RMS = {:.4e} V, SNR ≈ {:.0} dB, {} niveles",
                q,
                quantization::rms_error(range, bits),
                quantization::snr_db(bits),
                levels.len()
            ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_stays_within_half_a_step_inside_the_range() {
        let model = Quantization;
        let frame = model.compute(&ParameterValues::from_parameters(&model.parameters()));
        let q = quantization::quantization_step(10.0, 4);
        let signal = &frame.plots[0].series[0].points;
        let error = &frame.plots[1].series[0].points;
        for (s, e) in signal.iter().zip(error.iter()) {
            // the top level is R/2 - Q, so peaks near +R/2 may clip by up to Q
            if s[1] < 5.0 - q {
                assert!(e[1].abs() <= q / 2.0 + 1e-9);
            } else {
                assert!(e[1].abs() <= q + 1e-9);
            }
        }
    }

    #[test]
    fn level_plot_is_thinned_for_many_bits() {
        let model = Quantization;
        let mut params = model.parameters();
        params[1].set(16.0);
        let frame = model.compute(&ParameterValues::from_parameters(&params));
        let drawn = frame.plots[3].series[0].points.len();
        assert!(drawn <= MAX_DRAWN_LEVELS);
        assert!(frame.notes[0].ends_with("65536 niveles"));
    }
}
