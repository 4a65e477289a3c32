/// Linear convolution by the direct double sum, output length `L + M`
/// where `M = len(h) - 1`.
pub fn direct(x: &[f64], h: &[f64]) -> Vec<f64> {
    if x.is_empty() || h.is_empty() {
        return Vec::new();
    }
    let l = x.len();
    let m = h.len() - 1;
    let mut y = vec![0.0; l + m];
    for (n, out) in y.iter_mut().enumerate() {
        let m_min = (n + 1).saturating_sub(l);
        let m_max = n.min(m);
        for k in m_min..=m_max {
            *out += h[k] * x[n - k];
        }
    }
    y
}

/// Circular convolution over `N = max(len x, len h)`, the shorter input
/// zero-padded and indices wrapped modulo `N`.
pub fn circular(x: &[f64], h: &[f64]) -> Vec<f64> {
    let n_len = x.len().max(h.len());
    let at = |v: &[f64], i: usize| v.get(i).copied().unwrap_or(0.0);
    (0..n_len)
        .map(|n| {
            (0..n_len)
                .map(|m| at(x, m) * at(h, (n + n_len - m) % n_len))
                .sum()
        })
        .collect()
}

/// Central part of the linear convolution, same length as `x`.
pub fn same(x: &[f64], h: &[f64]) -> Vec<f64> {
    let full = direct(x, h);
    if full.is_empty() {
        return full;
    }
    let start = (h.len() - 1) / 2;
    full[start..start + x.len()].to_vec()
}
