// Class 04: how far must fs move the first replica to meet the
// attenuation requirement at f_max. Frequencies in kHz.

use crate::dsp::{self, sampling};
use crate::session::{AxisRange, Frame, Parameter, ParameterValues, PlotData, Series, SignalModel};

const F_MAX: f64 = 20.0;
const FS_MIN: f64 = 25.0;
const FS_MAX: f64 = 200.0;
const REQUIRED_DB: f64 = 60.0;

pub struct AntiAliasPrefilter;

impl SignalModel for AntiAliasPrefilter {
    fn class_number(&self) -> u32 {
        4
    }

    fn title(&self) -> &str {
        "Prefiltros antialias"
    }

    fn parameters(&self) -> Vec<Parameter> {
        vec![Parameter::new("fs", "fs [kHz]", FS_MIN, FS_MAX, 60.0)]
    }

    fn compute(&self, values: &ParameterValues) -> Frame {
        let fs = values.get("fs");

        let f_axis = dsp::linspace(0.0, FS_MAX, 2000);
        let baseband: Vec<f64> = f_axis.iter().map(|&f| sampling::input_spectrum(f)).collect();
        let replica: Vec<f64> = f_axis
            .iter()
            .map(|&f| sampling::replica_spectrum(f, fs))
            .collect();
        let spectra = PlotData::new("Espectro original y réplica desplazada")
            .labels("f [kHz]", "amplitud normalizada")
            .x_range(AxisRange::Fixed(0.0, FS_MAX))
            .y_range(AxisRange::Fixed(-0.05, 1.05))
            .with_series(Series::line("|X_in(f)|", &f_axis, &baseband))
            .with_series(Series::line("|X_in(f - fs)|", &f_axis, &replica))
            .with_series(Series::vertical_markers("f_max", &[F_MAX]))
            .with_series(Series::vertical_markers("fs", &[fs]));

        let fs_sweep = dsp::linspace(FS_MIN, FS_MAX, 300);
        let curve: Vec<f64> = fs_sweep
            .iter()
            .map(|&f| -sampling::replica_attenuation_db(F_MAX, f))
            .collect();
        let attenuation = sampling::replica_attenuation_db(F_MAX, fs);
        let requirement = PlotData::new("Atenuación de la réplica en f_max")
            .labels("fs [kHz]", "atenuación [dB]")
            .x_range(AxisRange::Fixed(FS_MIN, FS_MAX))
            .y_range(AxisRange::Fixed(-100.0, 0.0))
            .with_series(Series::line("atenuación", &fs_sweep, &curve))
            .with_series(Series::markers("fs actual", &[fs], &[-attenuation]))
            .with_series(Series::levels("requerido", &[-REQUIRED_DB]));

        let note = if attenuation >= REQUIRED_DB {
            format!(
                "¡Cumple! Atenuación = {:.1} dB ≥ {} dB",
                attenuation, REQUIRED_DB
            )
        } else {
            format!(
                "No cumple: Atenuación = {:.1} dB < {} dB",
                attenuation, REQUIRED_DB
            )
        };
        Frame::new()
            .with_plot(spectra)
            .with_plot(requirement)
            .with_note(note)
    }
}

/// Smallest fs on a 0.1 kHz grid that meets `required_db` at `F_MAX`.
pub fn minimum_sampling_rate(required_db: f64) -> Option<f64> {
    let steps = ((FS_MAX - FS_MIN) * 10.0).round() as usize;
    (0..=steps)
        .map(|i| FS_MIN + i as f64 / 10.0)
        .find(|&fs| sampling::replica_attenuation_db(F_MAX, fs) >= required_db)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rate_misses_requirement_and_high_rate_meets_it() {
        let model = AntiAliasPrefilter;
        let mut params = model.parameters();
        let frame = model.compute(&ParameterValues::from_parameters(&params));
        assert!(frame.notes[0].starts_with("No cumple"));

        params[0].set(150.0);
        let frame = model.compute(&ParameterValues::from_parameters(&params));
        assert!(frame.notes[0].starts_with("¡Cumple!"));
    }

    #[test]
    fn minimum_rate_sits_between_the_two() {
        let fs = minimum_sampling_rate(REQUIRED_DB).unwrap();
        assert!(fs > 60.0 && fs < 150.0);
        assert!(sampling::replica_attenuation_db(F_MAX, fs - 0.1) < REQUIRED_DB);
    }
}
