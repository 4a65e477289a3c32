// Class 13: zero padding samples the DTFT more densely, it adds no resolution.

use crate::dsp::{
    self,
    fourier::{self, PaddingMode},
};
use crate::session::{AxisRange, Frame, Parameter, ParameterValues, PlotData, Series, SignalModel};
use std::f64::consts::PI;

const DTFT_POINTS: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingSignal {
    Sinusoid,
    Pulse,
    Exponential,
    Chirp,
}

impl PaddingSignal {
    pub const ALL: [PaddingSignal; 4] = [
        PaddingSignal::Sinusoid,
        PaddingSignal::Pulse,
        PaddingSignal::Exponential,
        PaddingSignal::Chirp,
    ];

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaddingSignal::Sinusoid => "senoidal",
            PaddingSignal::Pulse => "pulso rectangular",
            PaddingSignal::Exponential => "exponencial",
            PaddingSignal::Chirp => "chirp",
        }
    }

    /// `freq` is in cycles per record of `len` samples.
    pub fn generate(&self, len: usize, freq: f64) -> Vec<f64> {
        let l = len as f64;
        let pulse_width = (len / 4).max(1);
        (0..len)
            .map(|i| {
                let n = i as f64;
                match self {
                    PaddingSignal::Sinusoid => (2.0 * PI * freq * n / l).cos(),
                    PaddingSignal::Pulse => {
                        if i < pulse_width {
                            1.0
                        } else {
                            0.0
                        }
                    }
                    PaddingSignal::Exponential => (-0.3 * n).exp(),
                    PaddingSignal::Chirp => (2.0 * PI * freq * n * n / (2.0 * l)).cos(),
                }
            })
            .collect()
    }
}

pub struct ZeroPadding;

impl SignalModel for ZeroPadding {
    fn class_number(&self) -> u32 {
        13
    }

    fn title(&self) -> &str {
        "Zero padding"
    }

    fn parameters(&self) -> Vec<Parameter> {
        vec![
            Parameter::integer("len", "L (muestras)", 4, 64, 16),
            Parameter::integer("zeros", "D (ceros)", 0, 128, 48),
            Parameter::integer("mode", "Tipo (asimétrico, simétrico, inicial)", 0, 2, 0),
            Parameter::integer("signal", "Señal (senoidal, pulso, exponencial, chirp)", 0, 3, 0),
            Parameter::new("freq", "Frecuencia [ciclos/L]", 1.0, 8.0, 2.0),
        ]
    }

    fn compute(&self, values: &ParameterValues) -> Frame {
        let len = values.get_usize("len").max(1);
        let zeros = values.get_usize("zeros");
        let mode = PaddingMode::from_index(values.get_usize("mode"));
        let signal = PaddingSignal::from_index(values.get_usize("signal"));
        let freq = values.get("freq");

        let x = signal.generate(len, freq);
        let padded = fourier::zero_pad(&x, zeros, mode);
        let total = padded.len();

        let x_spectrum = dsp::magnitude(&fourier::fft(&x));
        let padded_spectrum = dsp::magnitude(&fourier::fft(&padded));
        let f_orig: Vec<f64> = (0..len).map(|k| k as f64 / len as f64).collect();
        let f_padded: Vec<f64> = (0..total).map(|k| k as f64 / total as f64).collect();

        let omega = dsp::linspace_open(0.0, 2.0 * PI, DTFT_POINTS);
        let dtft = dsp::magnitude(&fourier::dtft(&x, &omega));
        let f_dtft: Vec<f64> = omega.iter().map(|w| w / (2.0 * PI)).collect();

        let time_view = AxisRange::Tracking(-1.0, (len + zeros) as f64 + 1.0);
        Frame::new()
            .with_plot(
                PlotData::new("Señal original")
                    .labels("n", "x(n)")
                    .x_range(time_view)
                    .with_series(Series::stem("x(n)", &dsp::index_axis(len), &x)),
            )
            .with_plot(
                PlotData::new("Señal con zero padding")
                    .labels("n", "x_p(n)")
                    .x_range(time_view)
                    .with_series(Series::stem("x_p(n)", &dsp::index_axis(total), &padded)),
            )
            .with_plot(
                PlotData::new("DFT sobre la DTFT")
                    .labels("f normalizada (ciclos/muestra)", "magnitud")
                    .x_range(AxisRange::Fixed(0.0, 1.0))
                    .with_series(Series::line("|X(e^jω)|", &f_dtft, &dtft))
                    .with_series(Series::stem("DFT L puntos", &f_orig, &x_spectrum))
                    .with_series(Series::markers("DFT L+D puntos", &f_padded, &padded_spectrum)),
            )
            .with_note(format!(
                "{}, relleno {}: L = {}, D = {}, N = {}",
                signal.label(),
                mode.label(),
                len,
                zeros,
                total
            ))
            .with_note(format!(
                "separación entre bins: {:.4} → {:.4} ciclos/muestra",
                1.0 / len as f64,
                1.0 / total as f64
            ))
    }
}
