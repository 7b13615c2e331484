//! Ratios that are 0/0 on the magnetic axis.
//!
//! On the face grid index 0 sits at ρ = 0 where V', ρ and similar
//! denominators vanish. The analytic limit of each ratio is known (usually
//! 0 or 1), so it is written in directly instead of dividing.

use ndarray::{Array1, ArrayView1};

/// `out[0] = axis_value`, `out[i] = num[i] / den[i]` for `i >= 1`.
///
/// Panics if `num` and `den` differ in length.
pub fn ratio_with_axis_limit(
    num: ArrayView1<f64>,
    den: ArrayView1<f64>,
    axis_value: f64,
) -> Array1<f64> {
    assert_eq!(num.len(), den.len(), "ratio_with_axis_limit: length mismatch");
    Array1::from_shape_fn(num.len(), |i| {
        if i == 0 {
            axis_value
        } else {
            num[i] / den[i]
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_value_replaces_singular_division() {
        let num = Array1::from(vec![0.0, 2.0, 6.0]);
        let den = Array1::from(vec![0.0, 1.0, 3.0]);
        let out = ratio_with_axis_limit(num.view(), den.view(), 1.0);
        assert_eq!(out.to_vec(), vec![1.0, 2.0, 2.0]);
        assert!(out.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_zero_limit() {
        let r = Array1::linspace(0.0, 1.0, 5);
        let num = r.mapv(|v| v * v);
        let out = ratio_with_axis_limit(num.view(), r.view(), 0.0);
        for i in 0..5 {
            assert!((out[i] - r[i]).abs() < 1e-15);
        }
    }

    #[test]
    fn test_empty_input() {
        let empty = Array1::<f64>::zeros(0);
        assert_eq!(ratio_with_axis_limit(empty.view(), empty.view(), 1.0).len(), 0);
    }
}
