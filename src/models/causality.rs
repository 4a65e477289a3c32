// Class 09: causal and anticausal exponentials, and when each is stable.

use crate::session::{Frame, Parameter, ParameterValues, PlotData, Series, SignalModel};

const N_MIN: i32 = -20;
const N_MAX: i32 = 20;

pub struct CausalityStability;

/// `h(n) = a^n u(n)`.
pub fn causal_exponential(base: f64, n: i32) -> f64 {
    if n >= 0 {
        base.powi(n)
    } else {
        0.0
    }
}

/// `h(n) = -a^n u(-n-1)`.
pub fn anticausal_exponential(base: f64, n: i32) -> f64 {
    if n <= -1 {
        -base.powi(n)
    } else {
        0.0
    }
}

/// Causal `a^n u(n)` is BIBO stable for `|a| < 1`, the anticausal one for `|a| > 1`.
pub fn is_stable(base: f64, causal: bool) -> bool {
    if causal {
        base.abs() < 1.0
    } else {
        base.abs() > 1.0
    }
}

impl SignalModel for CausalityStability {
    fn class_number(&self) -> u32 {
        9
    }

    fn title(&self) -> &str {
        "Causalidad y estabilidad"
    }

    fn parameters(&self) -> Vec<Parameter> {
        vec![Parameter::new("base", "a", 0.1, 3.0, 0.5)]
    }

    fn compute(&self, values: &ParameterValues) -> Frame {
        let base = values.get("base");
        let n: Vec<i32> = (N_MIN..N_MAX).collect();
        let axis: Vec<f64> = n.iter().map(|&v| v as f64).collect();
        let causal: Vec<f64> = n.iter().map(|&v| causal_exponential(base, v)).collect();
        let anticausal: Vec<f64> = n
            .iter()
            .map(|&v| anticausal_exponential(base, v))
            .collect();
        let running = |h: &[f64]| -> Vec<f64> {
            h.iter()
                .scan(0.0, |acc, v| {
                    *acc += v.abs();
                    Some(*acc)
                })
                .collect()
        };
        let verdict = |stable: bool| if stable { "estable" } else { "inestable" };

        Frame::new()
            .with_plot(
                PlotData::new("h(n) = a^n u(n) (causal)")
                    .labels("n", "h(n)")
                    .with_series(Series::stem("h(n)", &axis, &causal)),
            )
            .with_plot(
                PlotData::new("h(n) = -a^n u(-n-1) (anticausal)")
                    .labels("n", "h(n)")
                    .with_series(Series::stem("h(n)", &axis, &anticausal)),
            )
            .with_plot(
                PlotData::new("Suma acumulada de |h(n)|")
                    .labels("n", "Σ|h(k)|")
                    .with_series(Series::line("causal", &axis, &running(&causal)))
                    .with_series(Series::line("anticausal", &axis, &running(&anticausal))),
            )
            .with_note(format!(
                "a = {:.2}: causal {}, anticausal {}",
                base,
                verdict(is_stable(base, true)),
                verdict(is_stable(base, false))
            ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_examples() {
        assert_eq!(causal_exponential(0.5, 3), 0.125);
        assert_eq!(causal_exponential(0.5, -1), 0.0);
        assert_eq!(anticausal_exponential(2.0, -2), -0.25);
        assert_eq!(anticausal_exponential(2.0, 0), 0.0);
        assert!(is_stable(0.5, true));
        assert!(!is_stable(0.5, false));
        assert!(!is_stable(2.0, true));
        assert!(is_stable(2.0, false));
    }

    #[test]
    fn note_reports_both_verdicts() {
        let model = CausalityStability;
        let frame = model.compute(&ParameterValues::from_parameters(&model.parameters()));
        assert_eq!(frame.notes[0], "a = 0.50: causal estable, anticausal inestable");
    }
}
