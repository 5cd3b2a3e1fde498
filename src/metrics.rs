use itertools::Itertools;
use serde::Serialize;

use crate::{
    error::RegressionError,
    lin_reg::{check_samples, LinearRegression},
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoodnessOfFit {
    pub r_squared: f64,
    pub residual_std_error: f64,
    pub f_statistic: f64,
}

/// R², residual standard error and F-statistic of `fit` over the samples.
///
/// A single predictor is assumed, so the F-statistic has 1 and n - 2 degrees
/// of freedom. A perfect fit gives an infinite F-statistic.
pub fn goodness_of_fit(
    xs: &[f64],
    ys: &[f64],
    fit: &LinearRegression,
) -> Result<GoodnessOfFit, RegressionError> {
    check_samples(xs, ys, 3)?;
    if ys.iter().all_equal() {
        return Err(RegressionError::DegenerateInput("all y values are identical"));
    }

    let n = xs.len() as f64;
    let mean_y = ys.iter().sum::<f64>() / n;

    let (rss, tss) = xs
        .iter()
        .zip(ys)
        .fold((0.0, 0.0), |(rss, tss), (x, y)| {
            let residual = y - fit.predict(*x);
            (rss + residual * residual, tss + (y - mean_y) * (y - mean_y))
        });

    if !(tss > 0.0 && tss.is_finite()) {
        return Err(RegressionError::DegenerateInput("y variance is zero or not finite"));
    }
    if !rss.is_finite() {
        return Err(RegressionError::DegenerateInput("residuals are not finite"));
    }

    let residual_variance = rss / (n - 2.0);
    Ok(GoodnessOfFit {
        r_squared: 1.0 - rss / tss,
        residual_std_error: residual_variance.sqrt(),
        f_statistic: (tss - rss) / residual_variance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lin_reg::lin_reg, quartet::QUARTET};

    #[test]
    fn perfect_fit() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = [2.0, 4.0, 6.0, 8.0, 10.0];
        let fit = lin_reg(&xs, &ys).unwrap();
        let gof = goodness_of_fit(&xs, &ys, &fit).unwrap();
        assert!((gof.r_squared - 1.0).abs() < 1e-4);
        assert!(gof.residual_std_error < 1e-4);
        assert!(gof.f_statistic > 1000.0);
    }

    #[test]
    fn anscombe_set_one() {
        let set = &QUARTET[0];
        let fit = lin_reg(&set.xs, &set.ys).unwrap();
        let gof = goodness_of_fit(&set.xs, &set.ys, &fit).unwrap();
        assert!((gof.r_squared - 0.6665).abs() < 1e-3, "{:?}", gof);
        assert!((gof.residual_std_error - 1.237).abs() < 1e-2, "{:?}", gof);
        assert!((gof.f_statistic - 17.99).abs() < 1e-2, "{:?}", gof);
    }

    #[test]
    fn r_squared_never_exceeds_one() {
        for set in QUARTET.iter() {
            let fit = lin_reg(&set.xs, &set.ys).unwrap();
            let gof = goodness_of_fit(&set.xs, &set.ys, &fit).unwrap();
            assert!(gof.r_squared <= 1.0, "{}: {:?}", set.name, gof);
        }
    }

    #[test]
    fn worse_than_mean_gives_negative_r_squared() {
        let xs = [1.0, 2.0, 3.0];
        let ys = [1.0, 2.0, 3.0];
        let backwards = LinearRegression {
            slope: -1.0,
            intercept: 0.0,
        };
        let gof = goodness_of_fit(&xs, &ys, &backwards).unwrap();
        assert!(gof.r_squared < 0.0);
    }

    #[test]
    fn shifting_y_keeps_metrics() {
        let set = &QUARTET[1];
        let shifted = set.ys.iter().map(|y| y - 2.5).collect_vec();
        let fit = lin_reg(&set.xs, &set.ys).unwrap();
        let moved = lin_reg(&set.xs, &shifted).unwrap();
        let gof = goodness_of_fit(&set.xs, &set.ys, &fit).unwrap();
        let moved_gof = goodness_of_fit(&set.xs, &shifted, &moved).unwrap();
        assert!((gof.r_squared - moved_gof.r_squared).abs() < 1e-9);
        assert!((gof.residual_std_error - moved_gof.residual_std_error).abs() < 1e-9);
    }

    #[test]
    fn two_samples_are_not_enough() {
        let fit = LinearRegression {
            slope: 1.0,
            intercept: 0.0,
        };
        assert_eq!(
            goodness_of_fit(&[1.0, 2.0], &[1.0, 2.0], &fit),
            Err(RegressionError::InsufficientSamples {
                required: 3,
                found: 2
            })
        );
    }

    #[test]
    fn mismatched_lengths() {
        let fit = LinearRegression {
            slope: 1.0,
            intercept: 0.0,
        };
        assert_eq!(
            goodness_of_fit(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0, 4.0], &fit),
            Err(RegressionError::DimensionMismatch { x_len: 3, y_len: 4 })
        );
    }

    #[test]
    fn vanishing_y_variance_is_degenerate() {
        let xs = [1.0, 2.0, 3.0];
        let ys = [0.0, 1e-200, 2e-200];
        let fit = LinearRegression {
            slope: 1e-200,
            intercept: -1e-200,
        };
        let result = goodness_of_fit(&xs, &ys, &fit);
        assert!(matches!(result, Err(RegressionError::DegenerateInput(_))));
    }

    #[test]
    fn overflowing_residuals_are_degenerate() {
        let wild = LinearRegression {
            slope: 1e300,
            intercept: 0.0,
        };
        let result = goodness_of_fit(&[1e10, 2e10, 3e10], &[1.0, 2.0, 3.0], &wild);
        assert!(matches!(result, Err(RegressionError::DegenerateInput(_))));
    }

    #[test]
    fn constant_y_is_degenerate() {
        let fit = LinearRegression {
            slope: 0.0,
            intercept: 4.0,
        };
        let result = goodness_of_fit(&[1.0, 2.0, 3.0], &[4.0, 4.0, 4.0], &fit);
        assert!(matches!(result, Err(RegressionError::DegenerateInput(_))));
    }
}
