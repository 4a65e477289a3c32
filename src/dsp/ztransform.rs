use super::Complex64;
use rayon::prelude::*;
use std::f64::consts::PI;

/// Distance to a pole below which `|H(z)|` is treated as singular.
pub const POLE_EPSILON: f64 = 1e-6;
/// Display ceiling for `|H(z)|`.
pub const MAGNITUDE_CLIP: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoleStability {
    Stable,
    Marginal,
    Unstable,
}

pub fn classify_pole(pole: Complex64) -> PoleStability {
    let r = pole.norm();
    if (r - 1.0).abs() < 1e-9 {
        PoleStability::Marginal
    } else if r < 1.0 {
        PoleStability::Stable
    } else {
        PoleStability::Unstable
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterShape {
    LowPass,
    HighPass,
    BandPass,
    BandStop,
}

impl FilterShape {
    pub const ALL: [FilterShape; 4] = [
        FilterShape::LowPass,
        FilterShape::HighPass,
        FilterShape::BandPass,
        FilterShape::BandStop,
    ];

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterShape::LowPass => "low-pass",
            FilterShape::HighPass => "high-pass",
            FilterShape::BandPass => "band-pass",
            FilterShape::BandStop => "band-stop",
        }
    }
}

// -----------------------------------------------------------------------------
// POLE-ZERO SYSTEM
// -----------------------------------------------------------------------------

/// `H(z) = gain * prod(z - zero) / prod(z - pole)`.
#[derive(Debug, Clone, PartialEq)]
pub struct PoleZeroSystem {
    pub poles: Vec<Complex64>,
    pub zeros: Vec<Complex64>,
    pub gain: f64,
}

impl PoleZeroSystem {
    pub fn new(poles: Vec<Complex64>, zeros: Vec<Complex64>, gain: f64) -> Self {
        Self { poles, zeros, gain }
    }

    /// Pole/zero placement used in class to sketch the four basic shapes.
    /// `fc` is normalized (cycles per sample).
    pub fn design(shape: FilterShape, fc: f64, order: usize, r: f64) -> Self {
        let order = order.max(1);
        let wc = 2.0 * PI * fc;
        let half = order / 2;

        match shape {
            FilterShape::LowPass | FilterShape::HighPass => {
                let angles = super::linspace(PI / 4.0, 2.0 * PI - PI / 4.0, order);
                let poles = angles.iter().map(|&a| Complex64::from_polar(r, a)).collect();
                let zero = if shape == FilterShape::LowPass { -1.0 } else { 1.0 };
                let zeros = vec![Complex64::new(zero, 0.0); order];
                Self::new(poles, zeros, (1.0 - r).powi(order as i32))
            }
            FilterShape::BandPass => {
                let mut poles = Vec::with_capacity(order);
                for i in 0..half {
                    let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
                    let angle = wc + sign * PI / 8.0;
                    poles.push(Complex64::from_polar(r, angle));
                    poles.push(Complex64::from_polar(r, -angle));
                }
                poles.truncate(order);
                let zeros = [1.0, -1.0]
                    .iter()
                    .cycle()
                    .take(2 * half)
                    .take(order)
                    .map(|&v| Complex64::new(v, 0.0))
                    .collect();
                Self::new(poles, zeros, (1.0 - r).powi(half as i32))
            }
            FilterShape::BandStop => {
                let pole_angles = [wc + PI / 2.0, wc - PI / 2.0];
                let poles = pole_angles
                    .iter()
                    .cycle()
                    .take(2 * half)
                    .take(order)
                    .map(|&a| Complex64::from_polar(r, a))
                    .collect();
                let zero_angles = [wc, -wc];
                let zeros = zero_angles
                    .iter()
                    .cycle()
                    .take(2 * half)
                    .take(order)
                    .map(|&a| Complex64::from_polar(0.9, a))
                    .collect();
                Self::new(poles, zeros, 1.0)
            }
        }
    }

    /// `|H(z)|`, clipped to `MAGNITUDE_CLIP`; within `POLE_EPSILON` of a pole
    /// the clip value is returned instead of infinity.
    pub fn magnitude_at(&self, z: Complex64) -> f64 {
        if self.poles.iter().any(|&p| (z - p).norm() <= POLE_EPSILON) {
            return MAGNITUDE_CLIP;
        }
        let mut h = Complex64::new(self.gain, 0.0);
        for &zero in &self.zeros {
            h *= z - zero;
        }
        for &pole in &self.poles {
            h /= z - pole;
        }
        let mag = h.norm();
        if mag.is_finite() {
            mag.min(MAGNITUDE_CLIP)
        } else {
            MAGNITUDE_CLIP
        }
    }

    /// `|H(e^{jw})|` for each `omega`.
    pub fn frequency_magnitude(&self, omega: &[f64]) -> Vec<f64> {
        omega
            .iter()
            .map(|&w| self.magnitude_at(Complex64::from_polar(1.0, w)))
            .collect()
    }

    /// Unwrapped phase of `H(e^{jw})`. Poles closer than `POLE_EPSILON` to
    /// the unit circle are left out of the product.
    pub fn phase_response(&self, omega: &[f64]) -> Vec<f64> {
        let mut phases = Vec::with_capacity(omega.len());
        let mut offset = 0.0;
        let mut last: Option<f64> = None;
        for &w in omega {
            let z = Complex64::from_polar(1.0, w);
            let mut h = Complex64::new(self.gain, 0.0);
            for &zero in &self.zeros {
                h *= z - zero;
            }
            for &pole in &self.poles {
                let d = z - pole;
                if d.norm() > POLE_EPSILON {
                    h /= d;
                }
            }
            let raw = h.arg();
            if let Some(previous) = last {
                let mut delta = raw + offset - previous;
                while delta > PI {
                    offset -= 2.0 * PI;
                    delta -= 2.0 * PI;
                }
                while delta < -PI {
                    offset += 2.0 * PI;
                    delta += 2.0 * PI;
                }
            }
            let value = raw + offset;
            phases.push(value);
            last = Some(value);
        }
        phases
    }

    /// `|H(z)|` over an `n x n` grid spanning `[-extent, extent]` on both axes,
    /// row-major with the imaginary part varying by row.
    pub fn magnitude_surface(&self, extent: f64, n: usize) -> Vec<Vec<f64>> {
        let axis = super::linspace(-extent, extent, n);
        axis.par_iter()
            .map(|&im| {
                axis.iter()
                    .map(|&re| self.magnitude_at(Complex64::new(re, im)))
                    .collect()
            })
            .collect()
    }

    pub fn is_stable(&self) -> bool {
        self.poles
            .iter()
            .all(|&p| classify_pole(p) == PoleStability::Stable)
    }

    /// Sketch of `h[n]`: an FIR expansion when there are no poles, otherwise
    /// the sum of `p^n` over the stable poles scaled by `gain / #poles`.
    pub fn impulse_response(&self, len: usize) -> Vec<f64> {
        if self.poles.is_empty() {
            let mut h = vec![0.0; len];
            if len == 0 {
                return h;
            }
            h[0] = self.gain;
            for (i, zero) in self.zeros.iter().enumerate() {
                if i + 1 < len {
                    h[i + 1] = -self.gain * zero.re;
                }
            }
            return h;
        }
        let scale = self.gain / self.poles.len() as f64;
        (0..len)
            .map(|n| {
                self.poles
                    .iter()
                    .filter(|p| p.norm() < 1.0)
                    .map(|p| p.powu(n as u32) * scale)
                    .sum::<Complex64>()
                    .re
            })
            .collect()
    }
}

/// `X(z) = sum_n x[n] z^-n` at each point; `z = 0` is evaluated at
/// `POLE_EPSILON` instead.
pub fn evaluate_sequence(x: &[f64], z_values: &[Complex64]) -> Vec<Complex64> {
    z_values
        .iter()
        .map(|&z| {
            let z = if z.norm() < POLE_EPSILON {
                Complex64::new(POLE_EPSILON, 0.0)
            } else {
                z
            };
            let z_inv = z.inv();
            let mut power = Complex64::new(1.0, 0.0);
            let mut acc = Complex64::new(0.0, 0.0);
            for &v in x {
                acc += power * v;
                power *= z_inv;
            }
            acc
        })
        .collect()
}
