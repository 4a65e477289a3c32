// Class 10: direct against circular convolution of two short sequences.

use crate::dsp::{self, convolution};
use crate::session::{Frame, Parameter, ParameterValues, PlotData, Series, SignalModel};

pub struct Convolution;

impl SignalModel for Convolution {
    fn class_number(&self) -> u32 {
        10
    }

    fn title(&self) -> &str {
        "Convolución directa y circular"
    }

    fn parameters(&self) -> Vec<Parameter> {
        vec![
            Parameter::new("x2", "x[2]", 0.0, 5.0, 3.0),
            Parameter::new("h1", "h[1]", -2.0, 2.0, -1.0),
        ]
    }

    fn compute(&self, values: &ParameterValues) -> Frame {
        let x = [1.0, 2.0, values.get("x2"), 4.0, 5.0];
        let h = [1.0, values.get("h1"), 2.0, 0.0];
        let y_direct = convolution::direct(&x, &h);
        let y_circular = convolution::circular(&x, &h);

        let stems = |title: &str, label: &str, v: &[f64]| {
            PlotData::new(title)
                .labels("n", label)
                .with_series(Series::stem(label, &dsp::index_axis(v.len()), v))
        };

        Frame::new()
            .with_plot(stems("Señal x[n]", "x[n]", &x))
            .with_plot(stems("Señal h[n]", "h[n]", &h))
            .with_plot(stems(
                "Convolución directa (longitud L+M)",
                "y[n]",
                &y_direct,
            ))
            .with_plot(stems(
                "Convolución circular (longitud N = max(L, M+1))",
                "y_circ[n]",
                &y_circular,
            ))
            .with_note(format!(
                "directa: {} muestras, circular: {} muestras",
                y_direct.len(),
                y_circular.len()
            ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circular_result_is_the_wrapped_direct_result() {
        let model = Convolution;
        let frame = model.compute(&ParameterValues::from_parameters(&model.parameters()));
        let direct: Vec<f64> = frame.plots[2].series[0].points.iter().map(|p| p[1]).collect();
        let circular: Vec<f64> = frame.plots[3].series[0].points.iter().map(|p| p[1]).collect();
        assert_eq!(circular.len(), 5);

        let mut wrapped = vec![0.0; 5];
        for (i, v) in direct.iter().enumerate() {
            wrapped[i % 5] += v;
        }
        assert_eq!(circular, wrapped);
        assert_eq!(circular, vec![4.0, 11.0, 3.0, 5.0, 7.0]);
    }
}
