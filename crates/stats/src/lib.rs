//! Statistical helper functions shared across the OMI pipeline.

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Population standard deviation (N denominator).
///
/// This matches the convention used for PC normalization in the reference
/// OMI product. Returns 0.0 if empty.
pub fn std_pop(data: &[f64]) -> f64 {
    let n = data.len();
    if n == 0 {
        return 0.0;
    }
    let nf = n as f64;
    let m = data.iter().sum::<f64>() / nf;
    (data.iter().map(|&x| (x - m) * (x - m)).sum::<f64>() / nf).sqrt()
}

/// Sample standard deviation (N-1 denominator).
/// Returns 0.0 if fewer than 2 elements.
pub fn std_sample(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let m = data.iter().sum::<f64>() / nf;
    (data.iter().map(|&x| (x - m) * (x - m)).sum::<f64>() / (nf - 1.0)).sqrt()
}

/// Linear-interpolation percentile, `p` in percent (0..=100).
///
/// **Expects pre-sorted input** (caller's responsibility).
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    assert!(!sorted.is_empty(), "percentile: input must not be empty");
    let n = sorted.len();
    let h = (n - 1) as f64 * p / 100.0;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    sorted[lo] + (h - h.floor()) * (sorted[hi] - sorted[lo])
}

/// Pearson correlation coefficient.
///
/// Filters to indices where both `x[i]` and `y[i]` are finite.
/// Returns `None` if fewer than 3 finite pairs or if the denominator is zero
/// (constant input).
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter(|(xi, yi)| xi.is_finite() && yi.is_finite())
        .map(|(xi, yi)| (*xi, *yi))
        .collect();

    if pairs.len() < 3 {
        return None;
    }

    let n = pairs.len() as f64;
    let mx: f64 = pairs.iter().map(|(xi, _)| xi).sum::<f64>() / n;
    let my: f64 = pairs.iter().map(|(_, yi)| yi).sum::<f64>() / n;

    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    let mut sum_yy = 0.0;
    for &(xi, yi) in &pairs {
        let dx = xi - mx;
        let dy = yi - my;
        sum_xy += dx * dy;
        sum_xx += dx * dx;
        sum_yy += dy * dy;
    }

    let denom = (sum_xx * sum_yy).sqrt();
    if denom == 0.0 {
        return None;
    }

    Some(sum_xy / denom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&data), 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_std_pop() {
        // [2, 4, 4, 4, 5, 5, 7, 9]: classic example with population sd = 2.
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(std_pop(&data), 2.0, epsilon = 1e-10);
    }

    #[test]
    fn test_std_pop_empty() {
        assert_eq!(std_pop(&[]), 0.0);
    }

    #[test]
    fn test_std_sample() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(std_sample(&data), 2.138090, epsilon = 1e-6);
    }

    #[test]
    fn test_std_sample_single() {
        assert_eq!(std_sample(&[5.0]), 0.0);
    }

    #[test]
    fn test_percentile_median() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(percentile(&sorted, 50.0), 3.0, epsilon = 1e-10);
    }

    #[test]
    fn test_percentile_bounds() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(percentile(&sorted, 0.0), 1.0, epsilon = 1e-10);
        assert_relative_eq!(percentile(&sorted, 100.0), 5.0, epsilon = 1e-10);
    }

    #[test]
    fn test_percentile_interpolation() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        // p=10 → h=0.4, lo=0, hi=1 → 1 + 0.4*(2-1) = 1.4
        assert_relative_eq!(percentile(&sorted, 10.0), 1.4, epsilon = 1e-10);
    }

    #[test]
    fn test_percentile_68_crossvalidation() {
        // numpy: np.percentile(np.arange(1, 11), 68.0) = 7.12
        let sorted: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        assert_relative_eq!(percentile(&sorted, 68.0), 7.12, epsilon = 1e-10);
    }

    #[test]
    #[should_panic(expected = "percentile: input must not be empty")]
    fn test_percentile_empty_panics() {
        percentile(&[], 50.0);
    }

    #[test]
    fn test_pearson_correlation_perfect() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 6.0, 8.0, 10.0];
        let r = pearson_correlation(&x, &y);
        assert_relative_eq!(r.unwrap(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_pearson_correlation_anticorrelated() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [10.0, 8.0, 6.0, 4.0, 2.0];
        let r = pearson_correlation(&x, &y);
        assert_relative_eq!(r.unwrap(), -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_pearson_correlation_insufficient() {
        let x = [1.0, 2.0];
        let y = [3.0, 4.0];
        assert!(pearson_correlation(&x, &y).is_none());
    }

    #[test]
    fn test_pearson_correlation_constant() {
        let x = [1.0, 1.0, 1.0, 1.0];
        let y = [2.0, 4.0, 6.0, 8.0];
        assert!(pearson_correlation(&x, &y).is_none());
    }

    #[test]
    fn test_pearson_correlation_with_nan() {
        let x = [1.0, f64::NAN, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, f64::NAN, 8.0, 10.0];
        // Finite pairs: (1,2), (4,8), (5,10) — 3 pairs, perfect linear
        let r = pearson_correlation(&x, &y);
        assert_relative_eq!(r.unwrap(), 1.0, epsilon = 1e-6);
    }
}
