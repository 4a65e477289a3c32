use super::Complex64;
use rustfft::FftPlanner;
use std::f64::consts::PI;

// -----------------------------------------------------------------------------
// DFT BY DIRECT SUMMATION
// -----------------------------------------------------------------------------

/// `X[k] = sum_n x[n] e^{-j 2 pi k n / N}`.
pub fn dft(x: &[Complex64]) -> Vec<Complex64> {
    let n_len = x.len();
    (0..n_len)
        .map(|k| {
            x.iter()
                .enumerate()
                .map(|(n, &v)| v * twiddle(k, n, n_len, -1.0))
                .sum()
        })
        .collect()
}

/// `x[n] = (1/N) sum_k X[k] e^{+j 2 pi k n / N}`.
pub fn idft(spectrum: &[Complex64]) -> Vec<Complex64> {
    let n_len = spectrum.len();
    if n_len == 0 {
        return Vec::new();
    }
    let scale = 1.0 / n_len as f64;
    (0..n_len)
        .map(|n| {
            spectrum
                .iter()
                .enumerate()
                .map(|(k, &v)| v * twiddle(k, n, n_len, 1.0))
                .sum::<Complex64>()
                * scale
        })
        .collect()
}

pub fn dft_real(x: &[f64]) -> Vec<Complex64> {
    dft(&to_complex(x))
}

fn twiddle(k: usize, n: usize, n_len: usize, sign: f64) -> Complex64 {
    // reduce k*n first so large products keep their precision
    let kn = (k * n) % n_len;
    Complex64::from_polar(1.0, sign * 2.0 * PI * kn as f64 / n_len as f64)
}

pub fn to_complex(x: &[f64]) -> Vec<Complex64> {
    x.iter().map(|&v| Complex64::new(v, 0.0)).collect()
}

// -----------------------------------------------------------------------------
// FFT
// -----------------------------------------------------------------------------

/// FFT of `x` truncated or zero-padded to `nfft` points.
pub fn fft_padded(x: &[f64], nfft: usize) -> Vec<Complex64> {
    if nfft == 0 {
        return Vec::new();
    }
    let mut buffer: Vec<Complex64> = (0..nfft)
        .map(|i| Complex64::new(x.get(i).copied().unwrap_or(0.0), 0.0))
        .collect();
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(nfft);
    fft.process(&mut buffer);
    buffer
}

pub fn fft(x: &[f64]) -> Vec<Complex64> {
    fft_padded(x, x.len())
}

/// Bin frequencies in FFT order, `[0, 1, ..., N/2 - 1, -N/2, ..., -1] * fs / N`.
pub fn fft_frequencies(n: usize, fs: f64) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let df = fs / n as f64;
    let half = (n - 1) / 2 + 1;
    (0..n)
        .map(|i| {
            if i < half {
                i as f64 * df
            } else {
                (i as f64 - n as f64) * df
            }
        })
        .collect()
}

/// Moves the zero-frequency bin to the center.
pub fn fft_shift<T: Clone>(values: &[T]) -> Vec<T> {
    let n = values.len();
    let split = n - n / 2;
    values[split..]
        .iter()
        .chain(values[..split].iter())
        .cloned()
        .collect()
}

/// One-sided magnitude spectrum on `[0, fs/2]`, as `(frequency, |X|)` pairs.
pub fn one_sided_magnitude(x: &[f64], nfft: usize, fs: f64) -> Vec<[f64; 2]> {
    let spectrum = fft_padded(x, nfft);
    let freqs = fft_frequencies(nfft, fs);
    freqs
        .iter()
        .zip(spectrum.iter())
        .filter(|(&f, _)| f >= 0.0 && f <= fs / 2.0)
        .map(|(&f, v)| [f, v.norm()])
        .collect()
}

// -----------------------------------------------------------------------------
// DTFT AND FREQUENCY RESPONSE
// -----------------------------------------------------------------------------

/// `X(e^{jw}) = sum_n x[n] e^{-j w n}` at each `omega`.
pub fn dtft(x: &[f64], omega: &[f64]) -> Vec<Complex64> {
    omega
        .iter()
        .map(|&w| {
            x.iter()
                .enumerate()
                .map(|(n, &v)| v * Complex64::from_polar(1.0, -w * n as f64))
                .sum()
        })
        .collect()
}

/// `H(e^{jw}) = B(e^{jw}) / A(e^{jw})` at `n_points` frequencies on
/// `[0, fs/2)`. Returns `(frequency_hz, H)`.
pub fn frequency_response(
    b: &[f64],
    a: &[f64],
    n_points: usize,
    fs: f64,
) -> (Vec<f64>, Vec<Complex64>) {
    let freqs: Vec<f64> = (0..n_points)
        .map(|i| i as f64 * fs / 2.0 / n_points as f64)
        .collect();
    let omega: Vec<f64> = freqs.iter().map(|f| 2.0 * PI * f / fs).collect();
    let num = dtft(b, &omega);
    let den = if a.is_empty() {
        vec![Complex64::new(1.0, 0.0); omega.len()]
    } else {
        dtft(a, &omega)
    };
    let response = num
        .iter()
        .zip(den.iter())
        .map(|(n, d)| {
            if d.norm() < 1e-12 {
                *n / Complex64::new(1e-12, 0.0)
            } else {
                n / d
            }
        })
        .collect();
    (freqs, response)
}

// -----------------------------------------------------------------------------
// ZERO PADDING
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingMode {
    /// Zeros appended at the end.
    Asymmetric,
    /// `D/2` zeros before, the rest after.
    Symmetric,
    /// Zeros prepended.
    Initial,
}

impl PaddingMode {
    pub const ALL: [PaddingMode; 3] = [
        PaddingMode::Asymmetric,
        PaddingMode::Symmetric,
        PaddingMode::Initial,
    ];

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaddingMode::Asymmetric => "asymmetric",
            PaddingMode::Symmetric => "symmetric",
            PaddingMode::Initial => "initial",
        }
    }
}

pub fn zero_pad(x: &[f64], zeros: usize, mode: PaddingMode) -> Vec<f64> {
    let (before, after) = match mode {
        PaddingMode::Asymmetric => (0, zeros),
        PaddingMode::Symmetric => (zeros / 2, zeros - zeros / 2),
        PaddingMode::Initial => (zeros, 0),
    };
    let mut padded = vec![0.0; before];
    padded.extend_from_slice(x);
    padded.extend(std::iter::repeat(0.0).take(after));
    padded
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn dft_of_impulse_is_flat() {
        let x = [1.0, 0.0, 0.0, 0.0];
        for v in dft_real(&x) {
            assert_relative_eq!(v.re, 1.0, epsilon = 1e-12);
            assert_relative_eq!(v.im, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn four_point_dft_matches_textbook() {
        // x = [0, 1, 2, 3] -> X = [6, -2+2j, -2, -2-2j]
        let spectrum = dft_real(&[0.0, 1.0, 2.0, 3.0]);
        let expected = [(6.0, 0.0), (-2.0, 2.0), (-2.0, 0.0), (-2.0, -2.0)];
        for (v, (re, im)) in spectrum.iter().zip(expected) {
            assert_relative_eq!(v.re, re, epsilon = 1e-9);
            assert_relative_eq!(v.im, im, epsilon = 1e-9);
        }
    }

    #[test]
    fn direct_dft_agrees_with_fft() {
        let x: Vec<f64> = (0..16).map(|n| (0.3 * n as f64).sin() + 0.1 * n as f64).collect();
        let slow = dft_real(&x);
        let fast = fft(&x);
        for (a, b) in slow.iter().zip(fast.iter()) {
            assert_relative_eq!(a.re, b.re, epsilon = 1e-9);
            assert_relative_eq!(a.im, b.im, epsilon = 1e-9);
        }
    }

    #[test]
    fn idft_inverts_dft() {
        let x = to_complex(&[1.0, -2.0, 0.5, 4.0, 3.0]);
        let back = idft(&dft(&x));
        for (a, b) in back.iter().zip(x.iter()) {
            assert_relative_eq!(a.re, b.re, epsilon = 1e-9);
            assert_relative_eq!(a.im, b.im, epsilon = 1e-9);
        }
    }

    #[test]
    fn fft_frequencies_follow_numpy_layout() {
        assert_eq!(fft_frequencies(4, 4.0), vec![0.0, 1.0, -2.0, -1.0]);
        assert_eq!(fft_frequencies(5, 5.0), vec![0.0, 1.0, 2.0, -2.0, -1.0]);
        assert_eq!(fft_shift(&[0.0, 1.0, -2.0, -1.0]), vec![-2.0, -1.0, 0.0, 1.0]);
    }

    #[test]
    fn zero_padding_modes() {
        let x = [1.0, 2.0];
        assert_eq!(zero_pad(&x, 3, PaddingMode::Asymmetric), vec![1.0, 2.0, 0.0, 0.0, 0.0]);
        assert_eq!(zero_pad(&x, 3, PaddingMode::Symmetric), vec![0.0, 1.0, 2.0, 0.0, 0.0]);
        assert_eq!(zero_pad(&x, 3, PaddingMode::Initial), vec![0.0, 0.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn dtft_at_zero_is_the_sum() {
        let x = [1.0, 2.0, 3.0];
        let v = dtft(&x, &[0.0]);
        assert_relative_eq!(v[0].re, 6.0, epsilon = 1e-12);
    }
}
