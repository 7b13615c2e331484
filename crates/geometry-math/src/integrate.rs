// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Trapezoidal Quadrature
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Trapezoidal rule on non-uniform 1-D samples.

use ndarray::{Array1, ArrayView1};

/// Definite integral of `y` over `x`. Returns 0 for fewer than two samples.
///
/// Panics if `y` and `x` differ in length.
pub fn trapezoid(y: ArrayView1<f64>, x: ArrayView1<f64>) -> f64 {
    assert_eq!(y.len(), x.len(), "trapezoid: y and x lengths differ");
    (1..x.len())
        .map(|i| 0.5 * (y[i] + y[i - 1]) * (x[i] - x[i - 1]))
        .sum()
}

/// Running integral `out[i] = ∫_{x[0]}^{x[i]} y dx`, with `out[0] = 0`.
///
/// Accumulated least-index first, so `out[i]` equals
/// `trapezoid(y[..=i], x[..=i])`.
///
/// Panics if `y` and `x` differ in length.
pub fn cumulative_trapezoid(y: ArrayView1<f64>, x: ArrayView1<f64>) -> Array1<f64> {
    assert_eq!(y.len(), x.len(), "cumulative_trapezoid: y and x lengths differ");
    let n = x.len();
    let mut out = Array1::zeros(n);
    for i in 1..n {
        out[i] = out[i - 1] + 0.5 * (y[i] + y[i - 1]) * (x[i] - x[i - 1]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::s;

    #[test]
    fn test_trapezoid_linear_exact() {
        let x = Array1::from(vec![0.0, 0.2, 0.7, 1.0]);
        let y = x.mapv(|v| 4.0 * v + 1.0);
        // ∫_0^1 (4x + 1) dx = 3
        assert!((trapezoid(y.view(), x.view()) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_trapezoid_degenerate() {
        let x = Array1::from(vec![0.5]);
        let y = Array1::from(vec![10.0]);
        assert_eq!(trapezoid(y.view(), x.view()), 0.0);
    }

    #[test]
    fn test_cumulative_matches_prefix_integrals() {
        let x = Array1::linspace(0.0, 2.0, 9);
        let y = x.mapv(|v: f64| v.sin());
        let running = cumulative_trapezoid(y.view(), x.view());
        assert_eq!(running[0], 0.0);
        for i in 1..x.len() {
            let prefix = trapezoid(y.slice(s![..=i]), x.slice(s![..=i]));
            assert!(
                (running[i] - prefix).abs() < 1e-14,
                "running[{i}] = {}, prefix = {prefix}",
                running[i]
            );
        }
    }

    #[test]
    fn test_cumulative_quadratic_converges() {
        let x = Array1::linspace(0.0, 1.0, 401);
        let y = x.mapv(|v| v * v);
        let running = cumulative_trapezoid(y.view(), x.view());
        // Trapezoid error for x² is h²/6 over [0, 1].
        assert!((running[400] - 1.0 / 3.0).abs() < 2e-6);
    }
}
