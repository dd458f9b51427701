/// `log(exp(a) + exp(b))` without overflow.
///
/// The larger operand is factored out so the remaining exponent is <= 0,
/// bounding `exp` in (0, 1]. A `NEG_INFINITY` operand contributes nothing
/// and short-circuits, which also covers the all-`NEG_INFINITY` case
/// without producing NaN. Inputs must not be NaN or `INFINITY`.
pub fn log_sum_exp_pair(a: f32, b: f32) -> f32 {
    let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
    if lo == f32::NEG_INFINITY {
        hi
    } else {
        hi + (lo - hi).exp().ln_1p()
    }
}

/// `log(sum(exp(terms)))` as a left fold of [`log_sum_exp_pair`].
///
/// Commutative and associative up to floating-point rounding, so fold
/// order only affects rounding noise.
pub fn log_sum_exp<const N: usize>(terms: [f32; N]) -> f32 {
    terms.into_iter().fold(f32::NEG_INFINITY, log_sum_exp_pair)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_is_bounded_by_max_and_max_plus_ln2() {
        let cases = [(-0.1f32, -0.1), (-1.0, -2.0), (-3.5, -40.0), (0.0, -0.7)];
        for (a, b) in cases {
            let hi = a.max(b);
            let result = log_sum_exp_pair(a, b);
            assert!(result >= hi, "logsumexp({a}, {b}) = {result} < {hi}");
            assert!(
                result <= hi + std::f32::consts::LN_2 + 1e-6,
                "logsumexp({a}, {b}) = {result} above upper bound"
            );
        }
    }

    #[test]
    fn pair_neg_infinity_is_identity() {
        for x in [-5.0f32, -0.5, 0.0] {
            assert_eq!(log_sum_exp_pair(x, f32::NEG_INFINITY), x);
            assert_eq!(log_sum_exp_pair(f32::NEG_INFINITY, x), x);
        }
    }

    #[test]
    fn pair_all_neg_infinity_stays_neg_infinity() {
        assert_eq!(
            log_sum_exp_pair(f32::NEG_INFINITY, f32::NEG_INFINITY),
            f32::NEG_INFINITY
        );
    }

    #[test]
    fn pair_is_commutative() {
        let cases = [(-1.0f32, -2.5), (-0.3, -0.3), (0.0, -10.0)];
        for (a, b) in cases {
            assert_eq!(log_sum_exp_pair(a, b), log_sum_exp_pair(b, a));
        }
    }

    #[test]
    fn pair_matches_direct_formula_in_safe_range() {
        let (a, b) = ((0.3f32).ln(), (0.2f32).ln());
        let direct = (0.3f32 + 0.2).ln();
        assert!((log_sum_exp_pair(a, b) - direct).abs() < 1e-6);
    }

    #[test]
    fn fold_sums_probabilities() {
        // 0.1 + 0.2 + 0.3 + 0.4 = 1 exactly in log space.
        let terms = [
            (0.1f32).ln(),
            (0.2f32).ln(),
            (0.3f32).ln(),
            (0.4f32).ln(),
        ];
        assert!(log_sum_exp(terms).abs() < 1e-5);
    }

    #[test]
    fn fold_ignores_impossible_terms() {
        let with_zero = [(0.5f32).ln(), f32::NEG_INFINITY, (0.5f32).ln()];
        assert!(log_sum_exp(with_zero).abs() < 1e-6);
        assert_eq!(
            log_sum_exp([f32::NEG_INFINITY; 3]),
            f32::NEG_INFINITY
        );
    }

    #[test]
    fn fold_does_not_overflow_on_large_magnitudes() {
        let result = log_sum_exp([-1000.0f32, -1000.0]);
        assert!((result - (-1000.0 + std::f32::consts::LN_2)).abs() < 1e-3);
    }
}
