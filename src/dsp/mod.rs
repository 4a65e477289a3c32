// src/dsp/mod.rs

pub mod convolution;
pub mod filters;
pub mod fourier;
pub mod quantization;
pub mod sampling;
pub mod windows;
pub mod ztransform;

pub use rustfft::num_complex::Complex64;

/// `n` evenly spaced points over `[start, stop]`, endpoints included.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Same as `linspace` but without the endpoint.
pub fn linspace_open(start: f64, stop: f64, n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let step = (stop - start) / n as f64;
    (0..n).map(|i| start + step * i as f64).collect()
}

/// Values `start, start + step, ...` strictly below `stop`.
pub fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 || !step.is_finite() || stop <= start {
        return Vec::new();
    }
    let count = ((stop - start) / step).ceil() as usize;
    (0..count)
        .map(|i| start + step * i as f64)
        .filter(|&v| v < stop)
        .collect()
}

/// Sample indices `0..n` as floats, handy for stem plots.
pub fn index_axis(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}

/// Normalized sinc, `sin(pi x) / (pi x)` with `sinc(0) = 1`.
pub fn sinc(x: f64) -> f64 {
    if x.abs() < 1e-12 {
        1.0
    } else {
        let px = std::f64::consts::PI * x;
        px.sin() / px
    }
}

pub fn magnitude(values: &[Complex64]) -> Vec<f64> {
    values.iter().map(|v| v.norm()).collect()
}

pub fn zip_points(x: &[f64], y: &[f64]) -> Vec<[f64; 2]> {
    x.iter().zip(y.iter()).map(|(&a, &b)| [a, b]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn linspace_includes_both_ends() {
        let v = linspace(0.0, 1.0, 5);
        assert_eq!(v.len(), 5);
        assert_relative_eq!(v[0], 0.0);
        assert_relative_eq!(v[4], 1.0);
        assert_relative_eq!(v[1], 0.25);
    }

    #[test]
    fn arange_stops_before_end() {
        let v = arange(0.0, 1.0, 0.25);
        assert_eq!(v, vec![0.0, 0.25, 0.5, 0.75]);
        assert!(arange(0.0, 1.0, 0.0).is_empty());
    }

    #[test]
    fn sinc_is_one_at_origin_and_zero_at_integers() {
        assert_relative_eq!(sinc(0.0), 1.0);
        assert_relative_eq!(sinc(1.0), 0.0, epsilon = 1e-12);
        assert_relative_eq!(sinc(-3.0), 0.0, epsilon = 1e-12);
    }
}
