// Class 07: a weighted-sum system and a scaling system on the same input.

use crate::dsp::{self, convolution};
use crate::session::{Frame, Parameter, ParameterValues, PlotData, Series, SignalModel};

const N: usize = 20;

pub struct LinearSystems;

fn input() -> Vec<f64> {
    let mut x = vec![0.0; N];
    x[2] = 1.0;
    x[5] = 0.5;
    x[10] = 1.0;
    x
}

/// `y[n] = a x[n] + b x[n-1] + c x[n-2]`, truncated to the input length.
pub fn weighted_sum(x: &[f64], a: f64, b: f64, c: f64) -> Vec<f64> {
    let mut y = convolution::direct(x, &[a, b, c]);
    y.truncate(x.len());
    y
}

impl SignalModel for LinearSystems {
    fn class_number(&self) -> u32 {
        7
    }

    fn title(&self) -> &str {
        "Sistemas en tiempo discreto"
    }

    fn parameters(&self) -> Vec<Parameter> {
        vec![
            Parameter::new("a", "a", 0.0, 5.0, 2.0),
            Parameter::new("b", "b", 0.0, 5.0, 3.0),
            Parameter::new("c", "c", 0.0, 5.0, 4.0),
            Parameter::new("k", "k", 0.0, 5.0, 2.0),
        ]
    }

    fn compute(&self, values: &ParameterValues) -> Frame {
        let (a, b, c) = (values.get("a"), values.get("b"), values.get("c"));
        let k = values.get("k");
        let n = dsp::index_axis(N);
        let x = input();
        let y = weighted_sum(&x, a, b, c);
        let scaled: Vec<f64> = x.iter().map(|v| k * v).collect();

        Frame::new()
            .with_plot(
                PlotData::new("Sistema lineal: y(n) = a x(n) + b x(n-1) + c x(n-2)")
                    .labels("n", "amplitud")
                    .with_series(Series::stem("x(n)", &n, &x))
                    .with_series(Series::stem("y(n)", &n, &y)),
            )
            .with_plot(
                PlotData::new("Sistema de escalamiento: y(n) = k x(n)")
                    .labels("n", "amplitud")
                    .with_series(Series::stem("x(n)", &n, &x))
                    .with_series(Series::stem("y(n)", &n, &scaled)),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weighted_sum_spreads_each_impulse_over_three_samples() {
        let y = weighted_sum(&input(), 2.0, 3.0, 4.0);
        assert_eq!(&y[2..5], &[2.0, 3.0, 4.0]);
        assert_eq!(&y[5..8], &[1.0, 1.5, 2.0]);
        assert_eq!(y[10], 2.0);
        assert_eq!(y.len(), N);
    }

    #[test]
    fn superposition_holds() {
        let x1 = input();
        let x2: Vec<f64> = (0..N).map(|i| (i % 3) as f64).collect();
        let sum: Vec<f64> = x1.iter().zip(x2.iter()).map(|(p, q)| 2.0 * p + q).collect();
        let lhs = weighted_sum(&sum, 1.0, -0.5, 0.25);
        let y1 = weighted_sum(&x1, 1.0, -0.5, 0.25);
        let y2 = weighted_sum(&x2, 1.0, -0.5, 0.25);
        for i in 0..N {
            assert!((lhs[i] - (2.0 * y1[i] + y2[i])).abs() < 1e-12);
        }
    }
}
