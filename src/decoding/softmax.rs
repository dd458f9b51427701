use crate::error::DecodeError;

/// Normalize each row of raw scores into a categorical distribution.
///
/// The row maximum is subtracted before exponentiating, which leaves the
/// result unchanged but keeps every exponent <= 0 so `exp` cannot
/// overflow. Row sums are accumulated in `f64` before dividing.
///
/// Fails fast on malformed input (empty or ragged rows, non-finite
/// values); never returns NaN.
pub fn softmax_rows(scores: &[Vec<f32>]) -> Result<Vec<Vec<f32>>, DecodeError> {
    let width = scores.first().map(Vec::len).unwrap_or(0);

    let mut rows = Vec::with_capacity(scores.len());
    for (t, row) in scores.iter().enumerate() {
        if row.is_empty() {
            return Err(DecodeError::invalid_input(format!(
                "score row {t} is empty"
            )));
        }
        if row.len() != width {
            return Err(DecodeError::invalid_input(format!(
                "score row {t} has {} entries, expected {width}",
                row.len()
            )));
        }
        if let Some(bad) = row.iter().find(|v| !v.is_finite()) {
            return Err(DecodeError::invalid_input(format!(
                "score row {t} contains non-finite value {bad}"
            )));
        }

        let max = row.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let shifted: Vec<f32> = row.iter().map(|&v| (v - max).exp()).collect();
        // The max entry contributes exp(0) = 1, so the sum is >= 1.
        let sum: f64 = shifted.iter().map(|&e| e as f64).sum();
        rows.push(shifted.iter().map(|&e| (e as f64 / sum) as f32).collect());
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_sum(row: &[f32]) -> f32 {
        row.iter().sum()
    }

    #[test]
    fn rows_sum_to_one() {
        let probs = softmax_rows(&[vec![1.0, 2.0, 3.0], vec![-4.0, 0.0, 4.0]]).expect("valid");
        for row in &probs {
            assert!((row_sum(row) - 1.0).abs() < 1e-6);
            assert!(row.iter().all(|&p| p > 0.0 && p <= 1.0));
        }
    }

    #[test]
    fn shift_invariance() {
        let base = softmax_rows(&[vec![0.5, -1.0, 2.0]]).expect("valid");
        let shifted = softmax_rows(&[vec![100.5, 99.0, 102.0]]).expect("valid");
        for (a, b) in base[0].iter().zip(shifted[0].iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn large_magnitudes_do_not_overflow() {
        let probs = softmax_rows(&[vec![1000.0, 999.0]]).expect("valid");
        assert!((row_sum(&probs[0]) - 1.0).abs() < 1e-6);
        assert!(probs[0].iter().all(|p| p.is_finite()));
    }

    #[test]
    fn uniform_row_stays_uniform() {
        let probs = softmax_rows(&[vec![7.0; 4]]).expect("valid");
        for &p in &probs[0] {
            assert!((p - 0.25).abs() < 1e-6);
        }
    }

    #[test]
    fn empty_matrix_is_valid() {
        assert!(softmax_rows(&[]).expect("valid").is_empty());
    }

    #[test]
    fn rejects_empty_row() {
        assert!(matches!(
            softmax_rows(&[Vec::new()]),
            Err(DecodeError::InvalidInput { .. })
        ));
    }

    #[test]
    fn rejects_ragged_rows() {
        assert!(matches!(
            softmax_rows(&[vec![1.0, 2.0], vec![1.0]]),
            Err(DecodeError::InvalidInput { .. })
        ));
    }

    #[test]
    fn rejects_non_finite_values() {
        for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            assert!(
                softmax_rows(&[vec![0.0, bad]]).is_err(),
                "{bad} was accepted"
            );
        }
    }
}
