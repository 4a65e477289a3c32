// src/session/mod.rs

pub mod frame;
pub mod handles;
pub mod parameter;

pub use frame::{AxisRange, Frame, PlotData, Series, SeriesStyle, MAX_PLOT_MAGNITUDE};
pub use handles::DisplayHandle;
pub use parameter::{Parameter, ParameterValues};

// -----------------------------------------------------------------------------
// SIGNAL MODEL
// -----------------------------------------------------------------------------

/// A deterministic parameters-to-curves function bound to one class.
pub trait SignalModel: Send {
    fn class_number(&self) -> u32;
    fn title(&self) -> &str;
    /// Parameter declarations with their defaults, in slider order.
    fn parameters(&self) -> Vec<Parameter>;
    /// Must return the same plots and series layout for every input.
    fn compute(&self, values: &ParameterValues) -> Frame;
}

// -----------------------------------------------------------------------------
// PLOT SESSION
// -----------------------------------------------------------------------------

pub struct PlotSession {
    model: Box<dyn SignalModel>,
    parameters: Vec<Parameter>,
    handles: Vec<DisplayHandle>,
    notes: Vec<String>,
    revision: u64,
}

impl PlotSession {
    pub fn initialize(model: Box<dyn SignalModel>) -> Self {
        let parameters = model.parameters();
        let frame = model.compute(&ParameterValues::from_parameters(&parameters));
        let handles = frame.plots.into_iter().map(DisplayHandle::create).collect();
        Self {
            model,
            parameters,
            handles,
            notes: frame.notes,
            revision: 1,
        }
    }

    /// Session of the built-in model for `class_number`, if there is one.
    pub fn for_class(class_number: u32) -> Option<Self> {
        crate::models::model_for_class(class_number).map(Self::initialize)
    }

    /// Clamps and stores `value`, then redraws. On failure the previous value
    /// is restored and no handle is touched. Returns the value actually used.
    pub fn on_parameter_change(&mut self, name: &str, value: f64) -> Result<f64, String> {
        if !value.is_finite() {
            return Err(format!("Value for '{}' is not a finite number", name));
        }
        let index = self
            .parameters
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| format!("Unknown parameter '{}' in {}", name, self.model.title()))?;

        let previous = self.parameters[index].value();
        let applied = self.parameters[index].set(value);
        if let Err(e) = self.redraw() {
            self.parameters[index].set(previous);
            return Err(e);
        }
        Ok(applied)
    }

    /// Restores every default and redraws through the same path as a change.
    pub fn reset(&mut self) -> Result<(), String> {
        let previous: Vec<f64> = self.parameters.iter().map(Parameter::value).collect();
        for parameter in self.parameters.iter_mut() {
            parameter.reset();
        }
        if let Err(e) = self.redraw() {
            for (parameter, value) in self.parameters.iter_mut().zip(previous) {
                parameter.set(value);
            }
            return Err(e);
        }
        Ok(())
    }

    fn redraw(&mut self) -> Result<(), String> {
        let frame = self.model.compute(&self.values());
        if frame.plots.len() != self.handles.len() {
            return Err(format!(
                "{} produced {} plots, expected {}",
                self.model.title(),
                frame.plots.len(),
                self.handles.len()
            ));
        }
        // validate everything before the first handle changes
        for (handle, plot) in self.handles.iter().zip(frame.plots.iter()) {
            handle.check(plot)?;
        }
        for (handle, plot) in self.handles.iter_mut().zip(frame.plots) {
            handle.update(plot);
        }
        self.notes = frame.notes;
        self.revision += 1;
        Ok(())
    }

    pub fn values(&self) -> ParameterValues {
        ParameterValues::from_parameters(&self.parameters)
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn handles(&self) -> &[DisplayHandle] {
        &self.handles
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub fn title(&self) -> &str {
        self.model.title()
    }

    pub fn class_number(&self) -> u32 {
        self.model.class_number()
    }

    /// Incremented on every successful redraw.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Ramp {
        calls: Arc<AtomicUsize>,
    }

    impl SignalModel for Ramp {
        fn class_number(&self) -> u32 {
            99
        }

        fn title(&self) -> &str {
            "ramp"
        }

        fn parameters(&self) -> Vec<Parameter> {
            vec![
                Parameter::new("slope", "Slope", 0.0, 20.0, 2.0),
                Parameter::integer("len", "Length", 1, 8, 4),
            ]
        }

        fn compute(&self, values: &ParameterValues) -> Frame {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let slope = values.get("slope");
            let n = crate::dsp::index_axis(values.get_usize("len"));
            let y: Vec<f64> = n.iter().map(|v| slope * v).collect();
            Frame::new()
                .with_plot(PlotData::new("ramp").with_series(Series::stem("y", &n, &y)))
                .with_note(format!("slope {}", slope))
        }
    }

    /// Changes its layout once `flip` goes above zero.
    struct Unstable;

    impl SignalModel for Unstable {
        fn class_number(&self) -> u32 {
            98
        }

        fn title(&self) -> &str {
            "unstable"
        }

        fn parameters(&self) -> Vec<Parameter> {
            vec![Parameter::new("flip", "Flip", 0.0, 1.0, 0.0)]
        }

        fn compute(&self, values: &ParameterValues) -> Frame {
            let mut plot = PlotData::new("p").with_series(Series::line("a", &[0.0], &[0.0]));
            if values.get("flip") > 0.0 {
                plot = plot.with_series(Series::line("b", &[0.0], &[0.0]));
            }
            Frame::new().with_plot(plot)
        }
    }

    fn ramp() -> (PlotSession, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let session = PlotSession::initialize(Box::new(Ramp {
            calls: calls.clone(),
        }));
        (session, calls)
    }

    #[test]
    fn change_below_minimum_reaches_compute_clamped() {
        let (mut session, _) = ramp();
        assert_eq!(session.on_parameter_change("slope", -10.0).unwrap(), 0.0);
        let points = &session.handles()[0].plot().series[0].points;
        assert!(points.iter().all(|p| p[1] == 0.0));
        assert_eq!(session.notes(), ["slope 0".to_string()]);
    }

    #[test]
    fn unknown_or_non_finite_changes_are_rejected() {
        let (mut session, calls) = ramp();
        let before = calls.load(Ordering::SeqCst);
        assert!(session.on_parameter_change("gain", 1.0).is_err());
        assert!(session.on_parameter_change("slope", f64::NAN).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), before);
        assert_eq!(session.revision(), 1);
    }

    #[test]
    fn handles_are_updated_in_place() {
        let (mut session, _) = ramp();
        session.on_parameter_change("slope", 3.0).unwrap();
        session.on_parameter_change("len", 6.0).unwrap();
        assert_eq!(session.handles().len(), 1);
        assert_eq!(session.handles()[0].data_revision(), 3);
        assert_eq!(session.handles()[0].plot().series[0].points.len(), 6);
    }

    #[test]
    fn reset_twice_matches_reset_once() {
        let (mut session, _) = ramp();
        session.on_parameter_change("slope", 7.5).unwrap();
        session.reset().unwrap();
        let once = session.handles()[0].plot().clone();
        session.reset().unwrap();
        assert_eq!(session.handles()[0].plot(), &once);
        assert_eq!(session.parameter("slope").map(Parameter::value), Some(2.0));
    }

    #[test]
    fn layout_change_is_refused_and_value_restored() {
        let mut session = PlotSession::initialize(Box::new(Unstable));
        assert!(session.on_parameter_change("flip", 1.0).is_err());
        assert_eq!(session.parameter("flip").map(Parameter::value), Some(0.0));
        assert_eq!(session.handles()[0].data_revision(), 1);
    }
}
