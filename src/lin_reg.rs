use itertools::Itertools;
use serde::Serialize;

use crate::error::RegressionError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearRegression {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearRegression {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Closed-form least squares fit of `ys` against `xs`.
///
/// Works on deviations from the means. Fails instead of returning a
/// non-finite line when x has no usable variance.
pub fn lin_reg(xs: &[f64], ys: &[f64]) -> Result<LinearRegression, RegressionError> {
    check_samples(xs, ys, 2)?;
    if xs.iter().all_equal() {
        return Err(RegressionError::DegenerateInput("all x values are identical"));
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let (xy, x_squared) = xs.iter().zip(ys).fold((0.0, 0.0), |(xy, xx), (x, y)| {
        let dev_x = x - mean_x;
        (xy + dev_x * (y - mean_y), xx + dev_x * dev_x)
    });
    if !(x_squared > 0.0 && x_squared.is_finite()) {
        return Err(RegressionError::DegenerateInput("x variance is zero or not finite"));
    }

    let slope = xy / x_squared;
    let intercept = mean_y - slope * mean_x;
    if !(slope.is_finite() && intercept.is_finite()) {
        return Err(RegressionError::DegenerateInput("fitted line is not finite"));
    }
    Ok(LinearRegression { slope, intercept })
}

pub(crate) fn check_samples(
    xs: &[f64],
    ys: &[f64],
    required: usize,
) -> Result<(), RegressionError> {
    if xs.len() != ys.len() {
        return Err(RegressionError::DimensionMismatch {
            x_len: xs.len(),
            y_len: ys.len(),
        });
    }
    if xs.len() < required {
        return Err(RegressionError::InsufficientSamples {
            required,
            found: xs.len(),
        });
    }
    if !xs.iter().chain(ys).all(|v| v.is_finite()) {
        return Err(RegressionError::DegenerateInput("samples must be finite"));
    }
    Ok(())
}
