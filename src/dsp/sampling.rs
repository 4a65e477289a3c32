use super::sinc;

// -----------------------------------------------------------------------------
// ALIASING
// -----------------------------------------------------------------------------

/// Folds `f` into the Nyquist interval `[-fs/2, fs/2)`.
pub fn alias_frequency(f: f64, fs: f64) -> f64 {
    if fs <= 0.0 {
        return f;
    }
    (f + fs / 2.0).rem_euclid(fs) - fs / 2.0
}

pub fn is_aliased(f: f64, fs: f64) -> bool {
    f > fs / 2.0
}

/// Narrow gaussian bump standing in for a spectral delta at `f0`.
pub fn narrow_peak(f_axis: &[f64], f0: f64, width: f64) -> Vec<f64> {
    f_axis
        .iter()
        .map(|&f| (-((f - f0) / width).powi(2)).exp())
        .collect()
}

/// Two-sided line spectrum of a real sinusoid, peaks at `±f0`.
pub fn sinusoid_spectrum(f_axis: &[f64], f0: f64, width: f64) -> Vec<f64> {
    let pos = narrow_peak(f_axis, f0, width);
    let neg = narrow_peak(f_axis, -f0, width);
    pos.iter().zip(neg.iter()).map(|(a, b)| a + b).collect()
}

/// Spectrum of the sampled sinusoid: copies of the analog spectrum shifted
/// by every multiple of `fs` in `-replicas..=replicas`.
pub fn replicated_spectrum(
    f_axis: &[f64],
    f0: f64,
    fs: f64,
    replicas: i32,
    width: f64,
) -> Vec<f64> {
    let mut spectrum = vec![0.0; f_axis.len()];
    for m in -replicas..=replicas {
        let shifted = sinusoid_spectrum(f_axis, f0 + m as f64 * fs, width);
        for (acc, v) in spectrum.iter_mut().zip(shifted) {
            *acc += v;
        }
    }
    spectrum
}

/// Same as `replicated_spectrum` but only the positive-frequency line of
/// each copy, as drawn on the aliasing overview.
pub fn one_sided_replicas(f_axis: &[f64], f0: f64, fs: f64, replicas: i32, width: f64) -> Vec<f64> {
    let mut spectrum = vec![0.0; f_axis.len()];
    for m in -replicas..=replicas {
        let shifted = narrow_peak(f_axis, f0 + m as f64 * fs, width);
        for (acc, v) in spectrum.iter_mut().zip(shifted) {
            *acc += v;
        }
    }
    spectrum
}

// -----------------------------------------------------------------------------
// ANTI-ALIAS PREFILTER (frequencies in kHz)
// -----------------------------------------------------------------------------

pub fn input_spectrum(f: f64) -> f64 {
    1.0 / (1.0 + (0.1 * f).powi(8)).sqrt()
}

/// First replica of the input spectrum, centered at `fs`.
pub fn replica_spectrum(f: f64, fs: f64) -> f64 {
    input_spectrum(f - fs)
}

/// Attenuation of the first replica at `f` relative to the baseband, in dB.
pub fn replica_attenuation_db(f: f64, fs: f64) -> f64 {
    -20.0 * (replica_spectrum(f, fs) / input_spectrum(f)).log10()
}

// -----------------------------------------------------------------------------
// RECONSTRUCTION
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReconstructionKernel {
    /// Ideal low-pass interpolator, `sinc(fs t)`.
    Ideal { fs: f64 },
    /// Zero-order hold, 1 on `[0, T]`.
    Staircase { period: f64 },
}

impl ReconstructionKernel {
    pub fn response(&self, t: f64) -> f64 {
        match *self {
            ReconstructionKernel::Ideal { fs } => sinc(fs * t),
            ReconstructionKernel::Staircase { period } => {
                if t >= 0.0 && t <= period {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

/// `y(t) = sum_n x[n] h(t - t_n)`.
pub fn reconstruct(
    samples: &[f64],
    sample_times: &[f64],
    t: &[f64],
    kernel: ReconstructionKernel,
) -> Vec<f64> {
    t.iter()
        .map(|&ti| {
            samples
                .iter()
                .zip(sample_times.iter())
                .map(|(&x, &tn)| x * kernel.response(ti - tn))
                .sum()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn alias_folds_into_nyquist_band() {
        assert_relative_eq!(alias_frequency(10.0, 12.0), -2.0, epsilon = 1e-12);
        assert_relative_eq!(alias_frequency(5.0, 12.0), 5.0, epsilon = 1e-12);
        assert_relative_eq!(alias_frequency(13.0, 12.0), 1.0, epsilon = 1e-12);
        // fs/2 itself wraps to -fs/2
        assert_relative_eq!(alias_frequency(6.0, 12.0), -6.0, epsilon = 1e-12);
    }

    #[test]
    fn alias_of_negative_frequency_uses_floor_modulo() {
        assert_relative_eq!(alias_frequency(-7.0, 12.0), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn attenuation_grows_with_sampling_rate() {
        // at fs = 2 f the replica overlaps the baseband exactly
        assert_relative_eq!(replica_attenuation_db(20.0, 40.0), 0.0, epsilon = 1e-9);
        let mid = replica_attenuation_db(20.0, 80.0);
        let high = replica_attenuation_db(20.0, 120.0);
        assert!(mid > 0.0 && high > mid);
        assert_relative_eq!(high, 55.90, epsilon = 0.01);
    }

    #[test]
    fn staircase_holds_each_sample() {
        let samples = [1.0, -1.0];
        let times = [0.0, 1.0];
        let kernel = ReconstructionKernel::Staircase { period: 1.0 };
        let y = reconstruct(&samples, &times, &[0.5, 1.5], kernel);
        assert_eq!(y, vec![1.0, -1.0]);
    }

    #[test]
    fn ideal_reconstruction_hits_the_samples() {
        let fs = 10.0;
        let times: Vec<f64> = (0..20).map(|i| i as f64 / fs).collect();
        let samples: Vec<f64> = times.iter().map(|t| (2.0 * std::f64::consts::PI * t).cos()).collect();
        let y = reconstruct(&samples, &times, &times, ReconstructionKernel::Ideal { fs });
        for (a, b) in y.iter().zip(samples.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-9);
        }
    }
}
