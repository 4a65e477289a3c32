// Class 14: pole/zero placement on the z-plane and the filter it produces.

use crate::dsp::{
    self,
    ztransform::{FilterShape, PoleZeroSystem, MAGNITUDE_CLIP},
};
use crate::session::{AxisRange, Frame, Parameter, ParameterValues, PlotData, Series, SignalModel};
use std::f64::consts::PI;

const RESPONSE_POINTS: usize = 512;
const IMPULSE_LEN: usize = 30;
const SURFACE_EXTENT: f64 = 1.5;
const SURFACE_GRID: usize = 50;

pub struct ZPlane;

impl SignalModel for ZPlane {
    fn class_number(&self) -> u32 {
        14
    }

    fn title(&self) -> &str {
        "Transformada Z: polos, ceros y diseño de filtros"
    }

    fn parameters(&self) -> Vec<Parameter> {
        vec![
            Parameter::integer("shape", "Tipo (pasa bajas, pasa altas, pasa banda, rechaza banda)", 0, 3, 0),
            Parameter::new("fc", "fc (ciclos/muestra)", 0.05, 0.45, 0.25),
            Parameter::integer("order", "Orden", 1, 4, 2),
            Parameter::new("r", "Radio r", 0.1, 0.95, 0.8),
        ]
    }

    fn compute(&self, values: &ParameterValues) -> Frame {
        let shape = FilterShape::from_index(values.get_usize("shape"));
        let fc = values.get("fc");
        let order = values.get_usize("order").max(1);
        let r = values.get("r");
        let system = PoleZeroSystem::design(shape, fc, order, r);

        let circle = dsp::linspace(0.0, 2.0 * PI, 200);
        let circle_re: Vec<f64> = circle.iter().map(|a| a.cos()).collect();
        let circle_im: Vec<f64> = circle.iter().map(|a| a.sin()).collect();
        let poles_re: Vec<f64> = system.poles.iter().map(|p| p.re).collect();
        let poles_im: Vec<f64> = system.poles.iter().map(|p| p.im).collect();
        let zeros_re: Vec<f64> = system.zeros.iter().map(|z| z.re).collect();
        let zeros_im: Vec<f64> = system.zeros.iter().map(|z| z.im).collect();
        let plane = PlotData::new("Plano Z")
            .labels("Re{z}", "Im{z}")
            .x_range(AxisRange::Fixed(-SURFACE_EXTENT, SURFACE_EXTENT))
            .y_range(AxisRange::Fixed(-SURFACE_EXTENT, SURFACE_EXTENT))
            .with_series(Series::line("círculo unitario", &circle_re, &circle_im))
            .with_series(Series::markers("polos", &poles_re, &poles_im))
            .with_series(Series::markers("ceros", &zeros_re, &zeros_im));

        let omega = dsp::linspace(0.0, PI, RESPONSE_POINTS);
        let freq_norm: Vec<f64> = omega.iter().map(|w| w / PI).collect();
        let magnitude_db: Vec<f64> = system
            .frequency_magnitude(&omega)
            .iter()
            .map(|m| 20.0 * (m + 1e-10).log10())
            .collect();
        let magnitude = PlotData::new("Respuesta en frecuencia: magnitud")
            .labels("frecuencia normalizada (×π)", "|H(ω)| [dB]")
            .with_series(Series::line("|H(ω)|", &freq_norm, &magnitude_db))
            .with_series(Series::vertical_markers("fc", &[2.0 * fc]));

        let phase = PlotData::new("Respuesta en frecuencia: fase")
            .labels("frecuencia normalizada (×π)", "∠H(ω) [rad]")
            .with_series(Series::line(
                "∠H(ω)",
                &freq_norm,
                &system.phase_response(&omega),
            ));

        let h = system.impulse_response(IMPULSE_LEN);
        let impulse = PlotData::new("Respuesta al impulso h(n)")
            .labels("n", "h(n)")
            .with_series(Series::stem("h(n)", &dsp::index_axis(h.len()), &h));

        // |H(z)| grid, projected onto each axis by its maximum
        let surface = system.magnitude_surface(SURFACE_EXTENT, SURFACE_GRID);
        let axis = dsp::linspace(-SURFACE_EXTENT, SURFACE_EXTENT, SURFACE_GRID);
        let over_re: Vec<f64> = (0..SURFACE_GRID)
            .map(|col| surface.iter().map(|row| row[col]).fold(0.0, f64::max))
            .collect();
        let over_im: Vec<f64> = surface
            .iter()
            .map(|row| row.iter().copied().fold(0.0, f64::max))
            .collect();
        let profile = PlotData::new("Superficie |H(z)| (máximo por eje)")
            .labels("Re{z} / Im{z}", "|H(z)|")
            .y_range(AxisRange::Fixed(0.0, MAGNITUDE_CLIP))
            .with_series(Series::line("máx sobre Im{z}", &axis, &over_re))
            .with_series(Series::line("máx sobre Re{z}", &axis, &over_im));

        let max_radius = system.poles.iter().map(|p| p.norm()).fold(0.0, f64::max);
        let verdict = if system.is_stable() {
            "estable (todos los polos dentro del círculo unitario)"
        } else {
            "inestable"
        };
        Frame::new()
            .with_plot(plane)
            .with_plot(magnitude)
            .with_plot(phase)
            .with_plot(impulse)
            .with_plot(profile)
            .with_note(format!(
                "Filtro {}: {} polos, {} ceros, ganancia {:.4}",
                shape.label(),
                system.poles.len(),
                system.zeros.len(),
                system.gain
            ))
            .with_note(format!("|p| máx = {:.2}: {}", max_radius, verdict))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_design_is_stable_low_pass() {
        let model = ZPlane;
        let frame = model.compute(&ParameterValues::from_parameters(&model.parameters()));
        assert!(frame.notes[0].starts_with("Filtro low-pass: 2 polos, 2 ceros"));
        assert!(frame.notes[1].contains("estable"));

        let db = &frame.plots[1].series[0].points;
        assert!(db[0][1] > db[db.len() - 1][1]);
    }

    #[test]
    fn surface_profiles_respect_the_clip() {
        let model = ZPlane;
        let mut params = model.parameters();
        params[3].set(0.95);
        params[2].set(4.0);
        let frame = model.compute(&ParameterValues::from_parameters(&params));
        for series in &frame.plots[4].series {
            assert_eq!(series.points.len(), SURFACE_GRID);
            assert!(series.points.iter().all(|p| p[1] <= MAGNITUDE_CLIP));
        }
    }
}
