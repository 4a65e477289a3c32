// Class 12: DFT by direct summation, its inverse and the basis sequences.

use crate::dsp::{self, fourier, Complex64};
use crate::session::{Frame, Parameter, ParameterValues, PlotData, Series, SignalModel};
use std::f64::consts::PI;

/// Below this `|X(k)|` the phase is drawn as zero instead of rounding noise.
const PHASE_FLOOR: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestSignal {
    Impulse,
    Step,
    Cosine,
    Exponential,
}

impl TestSignal {
    pub const ALL: [TestSignal; 4] = [
        TestSignal::Impulse,
        TestSignal::Step,
        TestSignal::Cosine,
        TestSignal::Exponential,
    ];

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    pub fn label(&self) -> &'static str {
        match self {
            TestSignal::Impulse => "Impulso",
            TestSignal::Step => "Escalón",
            TestSignal::Cosine => "Senoidal",
            TestSignal::Exponential => "Exponencial",
        }
    }

    pub fn generate(&self, len: usize) -> Vec<f64> {
        let n_len = len as f64;
        (0..len)
            .map(|n| {
                let n = n as f64;
                match self {
                    TestSignal::Impulse => {
                        if n == 0.0 {
                            1.0
                        } else {
                            0.0
                        }
                    }
                    TestSignal::Step => 1.0,
                    TestSignal::Cosine => (2.0 * PI * n / n_len).cos(),
                    TestSignal::Exponential => (-n / n_len).exp(),
                }
            })
            .collect()
    }
}

pub struct DiscreteFourier;

impl SignalModel for DiscreteFourier {
    fn class_number(&self) -> u32 {
        12
    }

    fn title(&self) -> &str {
        "DFT y DFT inversa"
    }

    fn parameters(&self) -> Vec<Parameter> {
        vec![
            Parameter::integer("n", "N", 4, 32, 8),
            Parameter::integer("signal", "Señal (impulso, escalón, senoidal, exponencial)", 0, 3, 2),
            Parameter::integer("k", "k (base)", 0, 31, 1),
        ]
    }

    fn compute(&self, values: &ParameterValues) -> Frame {
        let len = values.get_usize("n").max(1);
        let signal = TestSignal::from_index(values.get_usize("signal"));
        let k = values.get_usize("k") % len;

        let x = signal.generate(len);
        let spectrum = fourier::dft_real(&x);
        let back = fourier::idft(&spectrum);
        let axis = dsp::index_axis(len);

        let magnitude = dsp::magnitude(&spectrum);
        let phase: Vec<f64> = spectrum
            .iter()
            .map(|v| if v.norm() < PHASE_FLOOR { 0.0 } else { v.arg() })
            .collect();
        let reconstructed: Vec<f64> = back.iter().map(|v| v.re).collect();
        let basis: Vec<Complex64> = (0..len)
            .map(|n| Complex64::from_polar(1.0, 2.0 * PI * (k * n) as f64 / len as f64))
            .collect();
        let basis_re: Vec<f64> = basis.iter().map(|v| v.re).collect();
        let basis_im: Vec<f64> = basis.iter().map(|v| v.im).collect();

        let energy_time: f64 = x.iter().map(|v| v * v).sum();
        let energy_freq: f64 = magnitude.iter().map(|v| v * v).sum::<f64>() / len as f64;

        Frame::new()
            .with_plot(
                PlotData::new("Señal x(n)")
                    .labels("n", "x(n)")
                    .with_series(Series::stem("x(n)", &axis, &x)),
            )
            .with_plot(
                PlotData::new("Magnitud |X(k)|")
                    .labels("k", "|X(k)|")
                    .with_series(Series::stem("|X(k)|", &axis, &magnitude)),
            )
            .with_plot(
                PlotData::new("Fase ∠X(k)")
                    .labels("k", "∠X(k) [rad]")
                    .with_series(Series::stem("∠X(k)", &axis, &phase)),
            )
            .with_plot(
                PlotData::new("DFT inversa")
                    .labels("n", "x(n)")
                    .with_series(Series::stem("IDFT{X}", &axis, &reconstructed))
                    .with_series(Series::markers("x(n)", &axis, &x)),
            )
            .with_plot(
                PlotData::new("Base e^{j2πkn/N}")
                    .labels("n", "amplitud")
                    .with_series(Series::stem("Re", &axis, &basis_re))
                    .with_series(Series::stem("Im", &axis, &basis_im)),
            )
            .with_note(format!("{} con N = {}, base k = {}", signal.label(), len, k))
            .with_note(format!(
                "Parseval: Σ|x(n)|² = {:.4}, (1/N)Σ|X(k)|² = {:.4}",
                energy_time, energy_freq
            ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_concentrates_in_bins_one_and_n_minus_one() {
        let model = DiscreteFourier;
        let frame = model.compute(&ParameterValues::from_parameters(&model.parameters()));
        let magnitude: Vec<f64> = frame.plots[1].series[0].points.iter().map(|p| p[1]).collect();
        assert_eq!(magnitude.len(), 8);
        assert!((magnitude[1] - 4.0).abs() < 1e-9);
        assert!((magnitude[7] - 4.0).abs() < 1e-9);
        for k in [0, 2, 3, 4, 5, 6] {
            assert!(magnitude[k] < 1e-9);
        }
    }

    #[test]
    fn inverse_recovers_the_signal() {
        let model = DiscreteFourier;
        let mut params = model.parameters();
        params[1].set(3.0);
        params[0].set(13.0);
        let frame = model.compute(&ParameterValues::from_parameters(&params));
        let plot = &frame.plots[3];
        for (a, b) in plot.series[0].points.iter().zip(plot.series[1].points.iter()) {
            assert!((a[1] - b[1]).abs() < 1e-9);
        }
    }

    #[test]
    fn basis_index_wraps_modulo_n() {
        let model = DiscreteFourier;
        let mut params = model.parameters();
        params[2].set(9.0);
        let frame = model.compute(&ParameterValues::from_parameters(&params));
        assert!(frame.notes[0].ends_with("base k = 1"));
    }
}
