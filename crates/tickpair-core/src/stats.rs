//! Return statistics and cross-instrument correlation.
//!
//! Degenerate inputs are not errors: too few observations or a flat series
//! yield `NaN`, which callers print as-is.

use statrs::statistics::Statistics;
use time::Date;

use crate::series::{align, AlignedReturns, PriceSeries, ReturnSeries};

/// Mean and sample standard deviation of one instrument's defined daily returns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStatistics {
    pub mean: f64,
    pub std_dev: f64,
    pub observations: usize,
}

impl SummaryStatistics {
    pub fn from_returns(returns: &ReturnSeries) -> Self {
        Self::from_values(&returns.defined_values())
    }

    /// `std_dev` uses the N-1 denominator.
    pub fn from_values(values: &[f64]) -> Self {
        Self {
            mean: values.iter().mean(),
            std_dev: values.iter().std_dev(),
            observations: values.len(),
        }
    }
}

/// Pearson coefficient over date-aligned pairs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correlation {
    pub coefficient: f64,
    pub observations: usize,
}

impl Correlation {
    pub fn between(aligned: &AlignedReturns) -> Self {
        Self {
            coefficient: pearson(&aligned.left, &aligned.right),
            observations: aligned.len(),
        }
    }

    pub fn is_defined(&self) -> bool {
        self.coefficient.is_finite()
    }
}

/// Pearson correlation of two equally long samples.
///
/// Returns `NaN` for mismatched lengths, fewer than two pairs, or when either
/// side has zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.len() < 2 {
        return f64::NAN;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }

    (covariance / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0)
}

/// Everything the report and the charts need for one instrument pair.
#[derive(Debug, Clone, PartialEq)]
pub struct PairAnalysis {
    pub left: SummaryStatistics,
    pub right: SummaryStatistics,
    pub correlation: Correlation,
    /// Scatter input: the same date-aligned pairs the correlation uses.
    pub aligned: AlignedReturns,
    pub left_normalized: Vec<(Date, f64)>,
    pub right_normalized: Vec<(Date, f64)>,
}

/// Reference value for normalized price curves.
pub const NORMALIZED_BASE: f64 = 100.0;

impl PairAnalysis {
    pub fn compute(left: &PriceSeries, right: &PriceSeries) -> Self {
        let left_returns = left.daily_returns();
        let right_returns = right.daily_returns();
        let aligned = align(&left_returns, &right_returns);

        let analysis = Self {
            left: SummaryStatistics::from_returns(&left_returns),
            right: SummaryStatistics::from_returns(&right_returns),
            correlation: Correlation::between(&aligned),
            aligned,
            left_normalized: left.normalized(NORMALIZED_BASE),
            right_normalized: right.normalized(NORMALIZED_BASE),
        };

        tracing::debug!(
            left = %left.symbol,
            right = %right.symbol,
            left_mean = analysis.left.mean,
            right_mean = analysis.right.mean,
            correlation = analysis.correlation.coefficient,
            paired = analysis.correlation.observations,
            "computed pair statistics"
        );

        analysis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_matches_closed_form() {
        let values = [0.02, 101.0 / 102.0 - 1.0, 105.0 / 101.0 - 1.0];
        let stats = SummaryStatistics::from_values(&values);

        let mean = values.iter().sum::<f64>() / 3.0;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / 2.0;

        assert_eq!(stats.observations, 3);
        assert!((stats.mean - mean).abs() < 1e-12);
        assert!((stats.mean - 0.0166).abs() < 1e-3);
        assert!((stats.std_dev - variance.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn summary_of_too_few_values_is_nan() {
        assert!(SummaryStatistics::from_values(&[]).mean.is_nan());
        assert!(SummaryStatistics::from_values(&[0.01]).std_dev.is_nan());
    }

    #[test]
    fn identical_series_correlate_perfectly() {
        let x = [0.01, -0.02, 0.03, 0.005];
        assert!((pearson(&x, &x) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn negated_series_anti_correlate() {
        let x = [0.01, -0.02, 0.03, 0.005];
        let y: Vec<f64> = x.iter().map(|v| -v).collect();
        assert!((pearson(&x, &y) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn flat_series_is_indeterminate() {
        let x = [0.5, 0.5, 0.5];
        let y = [0.1, 0.2, 0.4];
        assert!(pearson(&x, &y).is_nan());
        assert!(pearson(&y, &x).is_nan());
    }

    #[test]
    fn single_pair_is_indeterminate() {
        assert!(pearson(&[0.1], &[0.2]).is_nan());
        assert!(pearson(&[0.1, 0.2], &[0.2]).is_nan());
    }
}
