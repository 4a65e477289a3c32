// Class 05: ideal (sinc) against staircase (zero-order hold) reconstruction.

use crate::dsp::{self, sampling::ReconstructionKernel};
use crate::session::{AxisRange, Frame, Parameter, ParameterValues, PlotData, Series, SignalModel};
use std::f64::consts::PI;

const RECORD: f64 = 2.0;

pub struct Reconstruction;

impl SignalModel for Reconstruction {
    fn class_number(&self) -> u32 {
        5
    }

    fn title(&self) -> &str {
        "Reconstrucciones ideales y tipo escalera"
    }

    fn parameters(&self) -> Vec<Parameter> {
        vec![
            Parameter::new("f0", "f0 [Hz]", 0.5, 4.0, 2.0),
            Parameter::new("fs", "fs [Hz]", 6.0, 30.0, 10.0),
        ]
    }

    fn compute(&self, values: &ParameterValues) -> Frame {
        let f0 = values.get("f0");
        let fs = values.get("fs");
        let period = 1.0 / fs;
        let ideal = ReconstructionKernel::Ideal { fs };
        let staircase = ReconstructionKernel::Staircase { period };

        let t = dsp::linspace(-1.0, 2.0, 2000);
        let n = dsp::arange(0.0, RECORD, period);
        let xn: Vec<f64> = n.iter().map(|&tn| (2.0 * PI * f0 * tn).cos()).collect();
        let original: Vec<f64> = t.iter().map(|&ti| (2.0 * PI * f0 * ti).cos()).collect();
        let y_ideal = dsp::sampling::reconstruct(&xn, &n, &t, ideal);
        let y_stair = dsp::sampling::reconstruct(&xn, &n, &t, staircase);

        let signals = PlotData::new("Reconstrucción ideal vs escalera")
            .labels("t [s]", "x(t)")
            .x_range(AxisRange::Fixed(-0.2, RECORD))
            .y_range(AxisRange::Fixed(-1.5, 1.5))
            .with_series(Series::line("señal original", &t, &original))
            .with_series(Series::stem("muestras", &n, &xn))
            .with_series(Series::line("ideal", &t, &y_ideal))
            .with_series(Series::line("escalera", &t, &y_stair));

        let t_h = dsp::linspace(-1.0, 1.0, 1000);
        let h_ideal: Vec<f64> = t_h.iter().map(|&v| ideal.response(v)).collect();
        let h_stair: Vec<f64> = t_h.iter().map(|&v| staircase.response(v)).collect();
        let kernels = PlotData::new("Respuestas al impulso h(t)")
            .labels("t [s]", "h(t)")
            .x_range(AxisRange::Fixed(-0.5, 0.5))
            .with_series(Series::line("ideal", &t_h, &h_ideal))
            .with_series(Series::line("escalera", &t_h, &h_stair));

        Frame::new()
            .with_plot(signals)
            .with_plot(kernels)
            .with_note(format!(
                "T = {:.3} s, {} muestras en [0, {}) s",
                period,
                n.len(),
                RECORD
            ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ideal_reconstruction_passes_through_the_samples() {
        let fs = 10.0;
        let n = dsp::arange(0.0, RECORD, 1.0 / fs);
        let xn: Vec<f64> = n.iter().map(|&tn| (2.0 * PI * 2.0 * tn).cos()).collect();
        let y = dsp::sampling::reconstruct(&xn, &n, &n, ReconstructionKernel::Ideal { fs });
        for (a, b) in y.iter().zip(xn.iter()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn staircase_holds_between_samples() {
        let fs = 10.0;
        let n = vec![0.0, 0.1];
        let xn = vec![1.0, -1.0];
        let y = dsp::sampling::reconstruct(
            &xn,
            &n,
            &[0.05, 0.15],
            ReconstructionKernel::Staircase { period: 1.0 / fs },
        );
        assert_eq!(y, vec![1.0, -1.0]);
    }
}
