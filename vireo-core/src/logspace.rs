//! Log-space arithmetic for numerically stable probability computation.
//!
//! Probability chains over hundreds of frames underflow `f64` quickly, so
//! every recursion in the Vireo engine works with natural logarithms. This
//! module provides the two primitives those recursions need: stable
//! log-sum-exp reductions and an epsilon-floored logarithm that keeps
//! structural zeros finite.

/// Smoothing floor applied before every logarithm.
///
/// Small enough that `ln(p + EPSILON) ≈ ln(p)` for any probability that
/// matters, large enough that exact zeros stay finite (`ln(1e-200) ≈ -460`).
pub const DEFAULT_EPSILON: f64 = 1e-200;

/// Epsilon-floored natural logarithm: `ln(p + eps)`.
///
/// Used both when converting a probability parameter into the log domain and
/// when re-deriving a distribution from counts, so that zero entries map to
/// a large negative value instead of negative infinity.
#[inline]
pub fn ln_floored(p: f64, eps: f64) -> f64 {
    (p + eps).ln()
}

/// Numerically stable computation of `ln(exp(a) + exp(b))`.
///
/// Handles the cases where `a` or `b` are negative infinity. The engine's
/// recursions reduce whole predecessor rows with [`log_sum_exp_slice`]; this
/// pairwise form is the standalone primitive for callers accumulating
/// incrementally (a streaming sum, a two-hypothesis combination).
pub fn log_sum_exp(a: f64, b: f64) -> f64 {
    if a == f64::NEG_INFINITY {
        return b;
    }
    if b == f64::NEG_INFINITY {
        return a;
    }
    let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
    hi + (lo - hi).exp().ln_1p()
}

/// Log-sum-exp over a slice: `ln(Σ exp(x))`.
///
/// Subtracts the running maximum before exponentiating to avoid overflow
/// and underflow. Returns negative infinity for an empty slice.
pub fn log_sum_exp_slice(xs: &[f64]) -> f64 {
    let max = xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if max == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    let sum: f64 = xs.iter().map(|&x| (x - max).exp()).sum();
    max + sum.ln()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ln_floored_recovers_probability() {
        let eps = DEFAULT_EPSILON;
        for &p in &[1.0, 0.9, 0.5, 0.1, 1e-6] {
            let stored = ln_floored(p, eps);
            assert!(stored.is_finite());
            assert!((stored.exp() - eps - p).abs() < 1e-12);
        }
        // Exact zero stays finite.
        assert_eq!(ln_floored(0.0, eps), eps.ln());
    }

    #[test]
    fn log_sum_exp_basic_identities() {
        // ln(exp(0) + exp(0)) = ln(2)
        assert!((log_sum_exp(0.0, 0.0) - 2.0_f64.ln()).abs() < 1e-12);

        // Negative infinity is the additive identity.
        assert_eq!(log_sum_exp(f64::NEG_INFINITY, 5.0), 5.0);
        assert_eq!(log_sum_exp(5.0, f64::NEG_INFINITY), 5.0);
    }

    #[test]
    fn log_sum_exp_does_not_overflow() {
        let big = log_sum_exp(700.0, 700.0);
        assert!(big.is_finite());
        assert!((big - (700.0 + 2.0_f64.ln())).abs() < 1e-10);

        let small = log_sum_exp(-1000.0, -1001.0);
        assert!(small.is_finite());
        assert!(small >= -1000.0 && small < -999.0);
    }

    #[test]
    fn log_sum_exp_slice_matches_pairwise() {
        let xs = [-2.0, -1.5, -30.0, -0.7];
        let pairwise = xs.iter().fold(f64::NEG_INFINITY, |acc, &x| log_sum_exp(acc, x));
        assert!((log_sum_exp_slice(&xs) - pairwise).abs() < 1e-12);
    }

    #[test]
    fn log_sum_exp_slice_empty_is_impossible() {
        assert_eq!(log_sum_exp_slice(&[]), f64::NEG_INFINITY);
    }
}
