//! Piecewise-linear interpolation and non-uniform finite differences on
//! 1-D radial profiles.
//!
//! `interp1d` follows the clamped-extrapolation convention of the
//! equilibrium-mapping code: queries left of the first knot return the first
//! sample, queries right of the last knot return the last sample.

use geometry_types::error::{GeometryError, GeometryResult};
use ndarray::{Array1, ArrayView1};

/// Fail with `NonMonotonic` unless `x` is strictly increasing.
pub fn check_strictly_increasing(name: &str, x: ArrayView1<f64>) -> GeometryResult<()> {
    for i in 1..x.len() {
        // Written as a negated comparison so NaN also fails.
        if !(x[i] > x[i - 1]) {
            return Err(GeometryError::NonMonotonic {
                name: name.to_string(),
                index: i,
            });
        }
    }
    Ok(())
}

fn check_same_length(name: &str, expected: usize, actual: usize) -> GeometryResult<()> {
    if expected != actual {
        return Err(GeometryError::ProfileLengthMismatch {
            name: name.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

/// Interpolate one point. `xp` must be non-empty and strictly increasing;
/// use [`interp1d`] for the checked variant.
pub fn interp1d_point(x: f64, xp: ArrayView1<f64>, fp: ArrayView1<f64>) -> f64 {
    let n = xp.len();
    if x <= xp[0] {
        return fp[0];
    }
    if x >= xp[n - 1] {
        return fp[n - 1];
    }
    // Bisection for the bracketing knot pair xp[lo] <= x < xp[hi].
    let (mut lo, mut hi) = (0, n - 1);
    while hi - lo > 1 {
        let mid = (lo + hi) / 2;
        if xp[mid] <= x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    let t = (x - xp[lo]) / (xp[hi] - xp[lo]);
    fp[lo] + t * (fp[hi] - fp[lo])
}

/// Piecewise-linear interpolation of samples `(xp, fp)` at every query in `x`.
///
/// Exact at the knots. Out-of-range queries are clamped to the end samples.
pub fn interp1d(
    x: ArrayView1<f64>,
    xp: ArrayView1<f64>,
    fp: ArrayView1<f64>,
) -> GeometryResult<Array1<f64>> {
    if xp.is_empty() {
        return Err(GeometryError::PhysicsViolation(
            "interp1d requires at least one knot".to_string(),
        ));
    }
    check_same_length("interp1d values", xp.len(), fp.len())?;
    check_strictly_increasing("interp1d knots", xp)?;
    Ok(x.mapv(|xi| interp1d_point(xi, xp, fp)))
}

/// Derivative `df/dx` on a non-uniform abscissa.
///
/// Interior points use the second-order three-point formula for unequal
/// spacing, the two end points use first-order one-sided differences.
/// The second-order stencil is exact for quadratics.
pub fn gradient(f: ArrayView1<f64>, x: ArrayView1<f64>) -> GeometryResult<Array1<f64>> {
    let n = x.len();
    check_same_length("gradient values", n, f.len())?;
    if n < 2 {
        return Err(GeometryError::PhysicsViolation(format!(
            "gradient requires at least 2 samples, got {n}"
        )));
    }
    check_strictly_increasing("gradient abscissa", x)?;

    let mut df = Array1::zeros(n);
    df[0] = (f[1] - f[0]) / (x[1] - x[0]);
    df[n - 1] = (f[n - 1] - f[n - 2]) / (x[n - 1] - x[n - 2]);
    for i in 1..n - 1 {
        let hs = x[i] - x[i - 1];
        let hd = x[i + 1] - x[i];
        let a = -hd / (hs * (hd + hs));
        let b = (hd - hs) / (hd * hs);
        let c = hs / (hd * (hd + hs));
        df[i] = a * f[i - 1] + b * f[i] + c * f[i + 1];
    }
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interp1d_exact_at_knots() {
        let xp = Array1::from(vec![0.0, 0.1, 0.35, 0.7, 1.0]);
        let fp = Array1::from(vec![3.0, -1.0, 2.5, 8.0, 0.25]);
        let out = interp1d(xp.view(), xp.view(), fp.view()).unwrap();
        assert_eq!(out, fp);
    }

    #[test]
    fn test_interp1d_midpoint() {
        let xp = Array1::from(vec![0.0, 1.0, 3.0]);
        let fp = Array1::from(vec![0.0, 2.0, 6.0]);
        let x = Array1::from(vec![0.5, 2.0]);
        let out = interp1d(x.view(), xp.view(), fp.view()).unwrap();
        assert!((out[0] - 1.0).abs() < 1e-12, "out[0] = {}", out[0]);
        assert!((out[1] - 4.0).abs() < 1e-12, "out[1] = {}", out[1]);
    }

    #[test]
    fn test_interp1d_clamps_outside_range() {
        let xp = Array1::from(vec![0.2, 0.6]);
        let fp = Array1::from(vec![5.0, 7.0]);
        let x = Array1::from(vec![-1.0, 0.0, 2.0]);
        let out = interp1d(x.view(), xp.view(), fp.view()).unwrap();
        assert_eq!(out.to_vec(), vec![5.0, 5.0, 7.0]);
    }

    #[test]
    fn test_interp1d_single_knot() {
        let xp = Array1::from(vec![0.5]);
        let fp = Array1::from(vec![9.0]);
        let x = Array1::linspace(0.0, 1.0, 5);
        let out = interp1d(x.view(), xp.view(), fp.view()).unwrap();
        assert!(out.iter().all(|&v| v == 9.0));
    }

    #[test]
    fn test_interp1d_rejects_bad_knots() {
        let x = Array1::from(vec![0.5]);
        let xp = Array1::from(vec![0.0, 1.0, 1.0]);
        let fp = Array1::from(vec![0.0, 1.0, 2.0]);
        assert!(matches!(
            interp1d(x.view(), xp.view(), fp.view()),
            Err(GeometryError::NonMonotonic { index: 2, .. })
        ));
        let short = Array1::from(vec![0.0, 1.0]);
        assert!(matches!(
            interp1d(x.view(), xp.view(), short.view()),
            Err(GeometryError::ProfileLengthMismatch { .. })
        ));
        let empty = Array1::<f64>::zeros(0);
        assert!(interp1d(x.view(), empty.view(), empty.view()).is_err());
    }

    #[test]
    fn test_gradient_quadratic_nonuniform() {
        let x = Array1::from(vec![0.0, 0.1, 0.25, 0.5, 0.6, 1.0]);
        let f = x.mapv(|v| 2.0 * v * v - v + 4.0);
        let df = gradient(f.view(), x.view()).unwrap();
        for i in 1..x.len() - 1 {
            let exact = 4.0 * x[i] - 1.0;
            assert!(
                (df[i] - exact).abs() < 1e-12,
                "df[{i}] = {}, expected {exact}",
                df[i]
            );
        }
        // One-sided ends are first order: exact slope of the end chord.
        assert!((df[0] - (f[1] - f[0]) / 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_gradient_linear_everywhere() {
        let x = Array1::from(vec![0.0, 0.3, 0.4, 0.9]);
        let f = x.mapv(|v| 3.0 * v + 1.0);
        let df = gradient(f.view(), x.view()).unwrap();
        for &d in df.iter() {
            assert!((d - 3.0).abs() < 1e-12, "d = {d}");
        }
    }

    #[test]
    fn test_gradient_two_points() {
        let x = Array1::from(vec![1.0, 3.0]);
        let f = Array1::from(vec![2.0, 8.0]);
        let df = gradient(f.view(), x.view()).unwrap();
        assert_eq!(df.to_vec(), vec![3.0, 3.0]);
    }

    #[test]
    fn test_gradient_rejects_repeated_abscissa() {
        let x = Array1::from(vec![0.0, 0.5, 0.5]);
        let f = Array1::from(vec![0.0, 1.0, 2.0]);
        assert!(gradient(f.view(), x.view()).is_err());
    }
}
