// Class 03: the spectrum of a sampled sinusoid repeats every fs.

use crate::dsp::{self, sampling};
use crate::session::{AxisRange, Frame, Parameter, ParameterValues, PlotData, Series, SignalModel};

const F_MAX: f64 = 50.0;
const POINTS: usize = 2000;
const REPLICAS: i32 = 5;
const PEAK_WIDTH: f64 = 0.1;

pub struct SpectrumReplication;

impl SignalModel for SpectrumReplication {
    fn class_number(&self) -> u32 {
        3
    }

    fn title(&self) -> &str {
        "Espectro de señales muestreadas y replicación"
    }

    fn parameters(&self) -> Vec<Parameter> {
        vec![
            Parameter::new("f0", "f0 [Hz]", 0.5, 20.0, 5.0),
            Parameter::new("fs", "fs [Hz]", 5.0, 40.0, 20.0),
        ]
    }

    fn compute(&self, values: &ParameterValues) -> Frame {
        let f0 = values.get("f0");
        let fs = values.get("fs");
        let f_axis = dsp::linspace(-F_MAX, F_MAX, POINTS);

        let original = PlotData::new("Espectro de la señal original")
            .labels("f [Hz]", "|X(f)|")
            .x_range(AxisRange::Fixed(-F_MAX, F_MAX))
            .y_range(AxisRange::Fixed(0.0, 1.2))
            .with_series(Series::line(
                "X(f)",
                &f_axis,
                &sampling::sinusoid_spectrum(&f_axis, f0, PEAK_WIDTH),
            ));

        let sampled = PlotData::new("Espectro tras muestreo (réplicas cada fs)")
            .labels("f [Hz]", "|X̂(f)|")
            .x_range(AxisRange::Fixed(-F_MAX, F_MAX))
            .y_range(AxisRange::Fixed(0.0, 1.2))
            .with_series(Series::line(
                "X̂(f)",
                &f_axis,
                &sampling::replicated_spectrum(&f_axis, f0, fs, REPLICAS, PEAK_WIDTH),
            ))
            .with_series(Series::vertical_markers("Nyquist", &[-fs / 2.0, fs / 2.0]));

        let note = if sampling::is_aliased(f0, fs) {
            "¡Hay aliasing! (f0 > fs/2)"
        } else {
            "No hay aliasing (f0 ≤ fs/2)"
        };
        Frame::new()
            .with_plot(original)
            .with_plot(sampled)
            .with_note(note.to_string())
    }
}
