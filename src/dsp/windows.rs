use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    Rectangular,
    Hamming,
    Hann,
    Blackman,
}

impl WindowKind {
    pub const ALL: [WindowKind; 4] = [
        WindowKind::Rectangular,
        WindowKind::Hamming,
        WindowKind::Hann,
        WindowKind::Blackman,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WindowKind::Rectangular => "Rectangular",
            WindowKind::Hamming => "Hamming",
            WindowKind::Hann => "Hann",
            WindowKind::Blackman => "Blackman",
        }
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }
}

/// Symmetric window of length `len` (denominator `len - 1`).
pub fn window(kind: WindowKind, len: usize) -> Vec<f64> {
    if len == 0 {
        return Vec::new();
    }
    if len == 1 {
        return vec![1.0];
    }
    let denom = (len - 1) as f64;
    (0..len)
        .map(|n| {
            let phase = 2.0 * PI * n as f64 / denom;
            match kind {
                WindowKind::Rectangular => 1.0,
                WindowKind::Hamming => 0.54 - 0.46 * phase.cos(),
                WindowKind::Hann => 0.5 - 0.5 * phase.cos(),
                WindowKind::Blackman => 0.42 - 0.5 * phase.cos() + 0.08 * (2.0 * phase).cos(),
            }
        })
        .collect()
}

pub fn apply(x: &[f64], w: &[f64]) -> Vec<f64> {
    x.iter().zip(w.iter()).map(|(a, b)| a * b).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn windows_are_symmetric() {
        for kind in WindowKind::ALL {
            let w = window(kind, 31);
            for i in 0..w.len() {
                assert_relative_eq!(w[i], w[w.len() - 1 - i], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn hann_and_hamming_edges() {
        let hann = window(WindowKind::Hann, 11);
        assert_relative_eq!(hann[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(hann[5], 1.0, epsilon = 1e-12);
        let hamming = window(WindowKind::Hamming, 11);
        assert_relative_eq!(hamming[0], 0.08, epsilon = 1e-12);
    }
}
