// src/session/parameter.rs

/// Named, range-bounded numeric input of a plot session.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    /// Snap interval measured from `min`, `None` for a continuous slider.
    pub step: Option<f64>,
    value: f64,
}

impl Parameter {
    pub fn new(name: &str, label: &str, min: f64, max: f64, default: f64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let mut parameter = Parameter {
            name: name.to_string(),
            label: label.to_string(),
            min,
            max,
            default,
            step: None,
            value: default,
        };
        parameter.default = parameter.clamp(default);
        parameter.value = parameter.default;
        parameter
    }

    /// Integer-valued slider.
    pub fn integer(name: &str, label: &str, min: i64, max: i64, default: i64) -> Self {
        Self::new(name, label, min as f64, max as f64, default as f64).with_step(1.0)
    }

    pub fn with_step(mut self, step: f64) -> Self {
        if step > 0.0 && step.is_finite() {
            self.step = Some(step);
            self.default = self.clamp(self.default);
            self.value = self.default;
        }
        self
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_integer(&self) -> bool {
        matches!(self.step, Some(s) if s.fract() == 0.0)
    }

    /// Clamps to `[min, max]`, then snaps to the step grid.
    pub fn clamp(&self, value: f64) -> f64 {
        let clamped = value.clamp(self.min, self.max);
        match self.step {
            Some(step) => {
                let snapped = self.min + ((clamped - self.min) / step).round() * step;
                // snapping can overshoot when (max - min) is not a multiple of step
                if snapped > self.max {
                    snapped - step
                } else {
                    snapped
                }
            }
            None => clamped,
        }
    }

    /// Stores the clamped value and returns it.
    pub fn set(&mut self, value: f64) -> f64 {
        self.value = self.clamp(value);
        self.value
    }

    pub fn reset(&mut self) {
        self.value = self.default;
    }
}

/// Immutable snapshot of every parameter value, handed to `compute`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterValues {
    values: Vec<(String, f64)>,
}

impl ParameterValues {
    pub fn from_parameters(parameters: &[Parameter]) -> Self {
        Self {
            values: parameters
                .iter()
                .map(|p| (p.name.clone(), p.value()))
                .collect(),
        }
    }

    pub fn try_get(&self, name: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    /// Value of `name`, 0.0 when the session has no such parameter.
    pub fn get(&self, name: &str) -> f64 {
        self.try_get(name).unwrap_or(0.0)
    }

    pub fn get_usize(&self, name: &str) -> usize {
        self.get(name).round().max(0.0) as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(n, v)| (n.as_str(), *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_minimum_is_clamped() {
        let mut p = Parameter::new("a", "a", 0.0, 20.0, 5.0);
        assert_eq!(p.set(-10.0), 0.0);
        assert_eq!(p.set(25.0), 20.0);
        assert_eq!(p.set(7.5), 7.5);
    }

    #[test]
    fn integer_parameters_snap() {
        let mut bits = Parameter::integer("bits", "Bits", 2, 20, 4);
        assert_eq!(bits.set(6.4), 6.0);
        assert_eq!(bits.set(6.6), 7.0);
        assert!(bits.is_integer());
    }

    #[test]
    fn step_never_overshoots_max() {
        let mut p = Parameter::new("x", "x", 0.0, 1.0, 0.0).with_step(0.3);
        assert!(p.set(1.0) <= 1.0);
    }

    #[test]
    fn default_outside_range_is_clamped() {
        let p = Parameter::new("x", "x", 1.0, 2.0, 10.0);
        assert_eq!(p.default, 2.0);
        assert_eq!(p.value(), 2.0);
    }

    #[test]
    fn snapshot_lookup() {
        let params = vec![
            Parameter::new("f", "f", 0.0, 10.0, 3.0),
            Parameter::integer("n", "n", 1, 8, 4),
        ];
        let values = ParameterValues::from_parameters(&params);
        assert_eq!(values.get("f"), 3.0);
        assert_eq!(values.get_usize("n"), 4);
        assert_eq!(values.try_get("missing"), None);
    }
}
