// src/dsp/filters.rs

use super::{sinc, windows};
use std::f64::consts::PI;

// -----------------------------------------------------------------------------
// SECOND ORDER SECTION
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    LowPass,
    HighPass,
}

/// Cookbook biquad, direct form I.
#[derive(Debug, Clone)]
pub struct SecondOrderFilter {
    a: [f64; 3],
    b: [f64; 3],
    x: [f64; 2],
    y: [f64; 2],
}

impl SecondOrderFilter {
    pub fn new(f0: f64, fs: f64, q: f64, kind: SectionKind) -> Self {
        let omega = 2.0 * PI * f0 / fs;
        let alpha = omega.sin() / (2.0 * q);
        let cos_w = omega.cos();

        let (b0, b1, b2) = match kind {
            SectionKind::HighPass => ((1.0 + cos_w) / 2.0, -(1.0 + cos_w), (1.0 + cos_w) / 2.0),
            SectionKind::LowPass => ((1.0 - cos_w) / 2.0, 1.0 - cos_w, (1.0 - cos_w) / 2.0),
        };
        let (a0, a1, a2) = (1.0 + alpha, -2.0 * cos_w, 1.0 - alpha);

        SecondOrderFilter {
            a: [1.0, a1 / a0, a2 / a0],
            b: [b0 / a0, b1 / a0, b2 / a0],
            x: [0.0, 0.0],
            y: [0.0, 0.0],
        }
    }

    /// Butterworth section, `Q = 1/sqrt(2)`.
    pub fn butterworth(f0: f64, fs: f64, kind: SectionKind) -> Self {
        Self::new(f0, fs, std::f64::consts::FRAC_1_SQRT_2, kind)
    }

    pub fn process_sample(&mut self, input: f64) -> f64 {
        let output = self.b[0] * input + self.b[1] * self.x[0] + self.b[2] * self.x[1]
            - self.a[1] * self.y[0]
            - self.a[2] * self.y[1];

        self.x[1] = self.x[0];
        self.x[0] = input;
        self.y[1] = self.y[0];
        self.y[0] = output;

        output
    }

    pub fn reset(&mut self) {
        self.x = [0.0; 2];
        self.y = [0.0; 2];
    }

    pub fn coefficients(&self) -> (Vec<f64>, Vec<f64>) {
        (self.b.to_vec(), self.a.to_vec())
    }
}

// FIRST ORDER SECTION (odd Butterworth orders) -------------------------------

#[derive(Debug, Clone)]
struct FirstOrderLowPass {
    b: [f64; 2],
    a1: f64,
    x1: f64,
    y1: f64,
}

impl FirstOrderLowPass {
    fn new(fc: f64, fs: f64) -> Self {
        let k = (PI * fc / fs).tan();
        Self {
            b: [k / (1.0 + k), k / (1.0 + k)],
            a1: (k - 1.0) / (k + 1.0),
            x1: 0.0,
            y1: 0.0,
        }
    }

    fn process_sample(&mut self, input: f64) -> f64 {
        let output = self.b[0] * input + self.b[1] * self.x1 - self.a1 * self.y1;
        self.x1 = input;
        self.y1 = output;
        output
    }
}

// -----------------------------------------------------------------------------
// BUTTERWORTH LOW-PASS (cascade of sections)
// -----------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ButterworthLowPass {
    order: usize,
    sections: Vec<SecondOrderFilter>,
    first_order: Option<FirstOrderLowPass>,
}

impl ButterworthLowPass {
    /// `order` is clamped to at least 1; `cutoff` must lie in `(0, fs/2)`.
    pub fn new(order: usize, cutoff: f64, fs: f64) -> Result<Self, String> {
        if !(cutoff > 0.0 && cutoff < fs / 2.0) {
            return Err(format!(
                "Cutoff {} Hz is outside (0, {}) Hz",
                cutoff,
                fs / 2.0
            ));
        }
        let order = order.max(1);
        let sections = (0..order / 2)
            .map(|k| {
                // angle of the k-th conjugate pole pair from the negative real axis
                let theta = (order - 1 - 2 * k) as f64 * PI / (2 * order) as f64;
                let q = 1.0 / (2.0 * theta.cos());
                SecondOrderFilter::new(cutoff, fs, q, SectionKind::LowPass)
            })
            .collect();
        let first_order = (order % 2 == 1).then(|| FirstOrderLowPass::new(cutoff, fs));

        Ok(Self {
            order,
            sections,
            first_order,
        })
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn process_sample(&mut self, input: f64) -> f64 {
        let mut value = input;
        if let Some(first) = self.first_order.as_mut() {
            value = first.process_sample(value);
        }
        for section in self.sections.iter_mut() {
            value = section.process_sample(value);
        }
        value
    }

    pub fn filter_signal(&mut self, x: &[f64]) -> Vec<f64> {
        x.iter().map(|&v| self.process_sample(v)).collect()
    }

    /// Transfer function `(b, a)` of the whole cascade.
    pub fn coefficients(&self) -> (Vec<f64>, Vec<f64>) {
        let mut b = vec![1.0];
        let mut a = vec![1.0];
        if let Some(first) = &self.first_order {
            b = poly_mul(&b, &first.b);
            a = poly_mul(&a, &[1.0, first.a1]);
        }
        for section in &self.sections {
            let (sb, sa) = section.coefficients();
            b = poly_mul(&b, &sb);
            a = poly_mul(&a, &sa);
        }
        (b, a)
    }
}

fn poly_mul(p: &[f64], q: &[f64]) -> Vec<f64> {
    super::convolution::direct(p, q)
}

// -----------------------------------------------------------------------------
// FIR DESIGN AND GENERIC FILTERING
// -----------------------------------------------------------------------------

/// Hamming-windowed sinc low-pass with `numtaps` taps, scaled to unit gain at DC.
pub fn firwin_lowpass(numtaps: usize, cutoff: f64, fs: f64) -> Vec<f64> {
    if numtaps == 0 {
        return Vec::new();
    }
    let c = (cutoff / (fs / 2.0)).clamp(0.0, 1.0);
    let alpha = (numtaps - 1) as f64 / 2.0;
    let w = windows::window(windows::WindowKind::Hamming, numtaps);
    let h: Vec<f64> = (0..numtaps)
        .map(|n| {
            let m = n as f64 - alpha;
            c * sinc(c * m) * w[n]
        })
        .collect();
    let dc: f64 = h.iter().sum();
    if dc.abs() < 1e-12 {
        return h;
    }
    h.iter().map(|v| v / dc).collect()
}

/// Truncated ideal low-pass `2 fc/fs sinc(2 fc t / fs)` on `t = -ceil(N/2)..=floor(N/2)`,
/// Hamming windowed, not renormalized.
pub fn windowed_sinc_lowpass(fc: f64, fs: f64, n: usize) -> Vec<f64> {
    let start = -(((n + 1) / 2) as i64);
    let stop = (n / 2) as i64;
    let len = (stop - start + 1) as usize;
    let w = windows::window(windows::WindowKind::Hamming, len);
    (start..=stop)
        .zip(w)
        .map(|(t, wi)| 2.0 * fc / fs * sinc(2.0 * fc * t as f64 / fs) * wi)
        .collect()
}

/// Direct-form difference equation, normalized by `a[0]`.
pub fn lfilter(b: &[f64], a: &[f64], x: &[f64]) -> Vec<f64> {
    let a0 = a.first().copied().unwrap_or(1.0);
    if a0 == 0.0 {
        return vec![0.0; x.len()];
    }
    let mut y = vec![0.0; x.len()];
    for n in 0..x.len() {
        let mut acc = 0.0;
        for (k, &bk) in b.iter().enumerate() {
            if k <= n {
                acc += bk * x[n - k];
            }
        }
        for (k, &ak) in a.iter().enumerate().skip(1) {
            if k <= n {
                acc -= ak * y[n - k];
            }
        }
        y[n] = acc / a0;
    }
    y
}

pub fn unit_impulse(len: usize) -> Vec<f64> {
    let mut x = vec![0.0; len];
    if let Some(first) = x.first_mut() {
        *first = 1.0;
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::fourier::frequency_response;
    use approx::assert_relative_eq;

    #[test]
    fn firwin_has_unit_dc_gain_and_is_symmetric() {
        let h = firwin_lowpass(101, 1000.0, 8000.0);
        assert_eq!(h.len(), 101);
        assert_relative_eq!(h.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
        for i in 0..h.len() {
            assert_relative_eq!(h[i], h[h.len() - 1 - i], epsilon = 1e-12);
        }
    }

    #[test]
    fn windowed_sinc_length_follows_tap_count() {
        assert_eq!(windowed_sinc_lowpass(100.0, 1000.0, 101).len(), 102);
        assert_eq!(windowed_sinc_lowpass(100.0, 1000.0, 100).len(), 101);
    }

    #[test]
    fn butterworth_has_unit_dc_gain_and_minus_3db_at_cutoff() {
        for order in 1..=6 {
            let filter = ButterworthLowPass::new(order, 1000.0, 8000.0).unwrap();
            let (b, a) = filter.coefficients();
            assert_eq!(a.len(), order + 1);
            let dc = b.iter().sum::<f64>() / a.iter().sum::<f64>();
            assert_relative_eq!(dc, 1.0, epsilon = 1e-9);

            // 1000 Hz sits on the evaluation grid: 1000 / (4000 / 400) = bin 100
            let (freqs, h) = frequency_response(&b, &a, 400, 8000.0);
            assert_relative_eq!(freqs[100], 1000.0, epsilon = 1e-9);
            assert_relative_eq!(h[100].norm(), std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-6);
        }
    }

    #[test]
    fn cascade_matches_difference_equation() {
        let mut filter = ButterworthLowPass::new(3, 500.0, 8000.0).unwrap();
        let (b, a) = filter.coefficients();
        let x: Vec<f64> = (0..64).map(|n| ((n * 7) % 5) as f64 - 2.0).collect();
        let direct = lfilter(&b, &a, &x);
        let cascade = filter.filter_signal(&x);
        for (p, q) in direct.iter().zip(cascade.iter()) {
            assert_relative_eq!(p, q, epsilon = 1e-9);
        }
    }

    #[test]
    fn butterworth_rejects_cutoff_above_nyquist() {
        assert!(ButterworthLowPass::new(2, 5000.0, 8000.0).is_err());
    }

    #[test]
    fn high_pass_section_blocks_dc() {
        let mut hp = SecondOrderFilter::butterworth(10.0, 1000.0, SectionKind::HighPass);
        let mut last = 1.0;
        for _ in 0..5000 {
            last = hp.process_sample(1.0);
        }
        assert!(last.abs() < 1e-6);
    }

    #[test]
    fn lfilter_of_fir_returns_taps_as_impulse_response() {
        let b = [0.5, 0.25, 0.25];
        let y = lfilter(&b, &[1.0], &unit_impulse(5));
        assert_eq!(y, vec![0.5, 0.25, 0.25, 0.0, 0.0]);
    }
}
