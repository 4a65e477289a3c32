// Class 08: FIR against IIR low-pass on a two-tone signal.

use crate::dsp::{self, filters};
use crate::session::{AxisRange, Frame, Parameter, ParameterValues, PlotData, Series, SignalModel};
use std::f64::consts::PI;

const FS: f64 = 8000.0;
const DURATION: f64 = 0.04;
const IIR_IMPULSE_LEN: usize = 100;

pub struct ImpulseResponse;

impl SignalModel for ImpulseResponse {
    fn class_number(&self) -> u32 {
        8
    }

    fn title(&self) -> &str {
        "Respuesta al impulso: FIR vs IIR"
    }

    fn parameters(&self) -> Vec<Parameter> {
        vec![
            Parameter::integer("fir_order", "Orden FIR", 10, 200, 100),
            Parameter::integer("iir_order", "Orden IIR", 1, 8, 2),
            Parameter::new("cutoff", "Corte [Hz]", 200.0, 3000.0, 1000.0).with_step(10.0),
        ]
    }

    fn compute(&self, values: &ParameterValues) -> Frame {
        let fir_order = values.get_usize("fir_order");
        let iir_order = values.get_usize("iir_order").max(1);
        let cutoff = values.get("cutoff");

        let t = dsp::linspace_open(0.0, DURATION, (FS * DURATION) as usize);
        let t_ms: Vec<f64> = t.iter().map(|v| v * 1e3).collect();
        let x: Vec<f64> = t
            .iter()
            .map(|&ti| (2.0 * PI * 440.0 * ti).sin() + 0.5 * (2.0 * PI * 2000.0 * ti).sin())
            .collect();

        let fir = filters::firwin_lowpass(fir_order + 1, cutoff, FS);
        let y_fir = filters::lfilter(&fir, &[1.0], &x);

        let mut notes = Vec::new();
        let (y_iir, h_iir) = match filters::ButterworthLowPass::new(iir_order, cutoff, FS) {
            Ok(mut iir) => {
                let y = iir.filter_signal(&x);
                let (b, a) = iir.coefficients();
                let h = filters::lfilter(&b, &a, &filters::unit_impulse(IIR_IMPULSE_LEN));
                (y, h)
            }
            Err(e) => {
                notes.push(e);
                (vec![0.0; x.len()], vec![0.0; IIR_IMPULSE_LEN])
            }
        };

        let view = AxisRange::Fixed(0.0, DURATION * 1e3);
        let mut frame = Frame::new()
            .with_plot(
                PlotData::new("Original y salida FIR (pasa bajas)")
                    .labels("t [ms]", "amplitud")
                    .x_range(view)
                    .with_series(Series::line("original", &t_ms, &x))
                    .with_series(Series::line("FIR", &t_ms, &y_fir)),
            )
            .with_plot(
                PlotData::new("Original y salida IIR (pasa bajas)")
                    .labels("t [ms]", "amplitud")
                    .x_range(view)
                    .with_series(Series::line("original", &t_ms, &x))
                    .with_series(Series::line("IIR", &t_ms, &y_iir)),
            )
            .with_plot(
                PlotData::new("Respuesta al impulso FIR")
                    .labels("n", "h[n]")
                    .with_series(Series::stem("h_FIR", &dsp::index_axis(fir.len()), &fir)),
            )
            .with_plot(
                PlotData::new("Respuesta al impulso IIR")
                    .labels("n", "h[n]")
                    .with_series(Series::stem(
                        "h_IIR",
                        &dsp::index_axis(h_iir.len()),
                        &h_iir,
                    )),
            )
            .with_note(format!(
                "FIR: {} coeficientes (fase lineal); IIR: Butterworth de orden {}",
                fir.len(),
                iir_order
            ));
        frame.notes.extend(notes);
        frame
    }
}
