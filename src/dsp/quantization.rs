/// Quantizer step `Q = R / 2^B`.
pub fn quantization_step(range: f64, bits: u32) -> f64 {
    range / 2f64.powi(bits as i32)
}

/// Rounds to the nearest level and clips to `[-R/2, R/2 - Q]`.
pub fn quantize(x: &[f64], range: f64, bits: u32) -> Vec<f64> {
    let q = quantization_step(range, bits);
    let lo = -range / 2.0;
    let hi = range / 2.0 - q;
    x.iter()
        .map(|&v| {
            // f64::round rounds halves away from zero, numpy rounds to even
            let level = round_half_even(v / q) * q;
            level.clamp(lo, hi)
        })
        .collect()
}

fn round_half_even(v: f64) -> f64 {
    let r = v.round();
    if (v - v.trunc()).abs() == 0.5 && r % 2.0 != 0.0 {
        r - v.signum()
    } else {
        r
    }
}

pub fn rms_error(range: f64, bits: u32) -> f64 {
    quantization_step(range, bits) / 12f64.sqrt()
}

/// Rule-of-thumb SNR, 6 dB per bit.
pub fn snr_db(bits: u32) -> f64 {
    6.0 * bits as f64
}

/// All `2^B` levels from `-R/2` upwards.
pub fn quantization_levels(range: f64, bits: u32) -> Vec<f64> {
    let q = quantization_step(range, bits);
    let count = 1usize << bits.min(24);
    (0..count).map(|i| -range / 2.0 + q * i as f64).collect()
}
