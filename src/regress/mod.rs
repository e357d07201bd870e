//! Ordinary least-squares regression of the target column on raw features.
//!
//! Used as a side-channel to score single new samples; it does not take part
//! in map training.

use crate::data::DataFrame;
use crate::error::{Error, Result};
use crate::ParseEnumError;
use log::{info, warn};
use ndarray::{s, Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// When the regression model is fitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegressionMode {
    /// Fit on first use and reuse for all later queries.
    FitOnce,
    /// Fit again from the full training set on every query.
    RefitPerQuery,
}

impl Default for RegressionMode {
    fn default() -> Self {
        RegressionMode::FitOnce
    }
}

impl FromStr for RegressionMode {
    type Err = ParseEnumError;
    /// Parse a string to a `RegressionMode`.
    ///
    /// Accepts `"fit_once" | "refit_per_query"`.
    fn from_str(str: &str) -> std::result::Result<Self, Self::Err> {
        match str {
            "fit_once" => Ok(RegressionMode::FitOnce),
            "refit_per_query" => Ok(RegressionMode::RefitPerQuery),
            _ => Err(ParseEnumError(format!(
                "Not a regression mode: {}. Must be one of (fit_once|refit_per_query)",
                str
            ))),
        }
    }
}

/// Fitted linear model `y = x . coefficients + intercept`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegression {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearRegression {
    /// Fits the model by ordinary least squares.
    ///
    /// Columns are centered and scaled to unit norm before the normal equations
    /// are solved, so features of very different magnitude are fitted alike.
    /// Columns without variance get a zero coefficient.
    pub fn fit(x: &DataFrame, y: &[f64]) -> Result<Self> {
        let n = x.nrows();
        let p = x.ncols();
        if n == 0 {
            return Err(Error::InsufficientData(
                "cannot fit a regression on zero samples".to_string(),
            ));
        }
        if y.len() != n {
            return Err(Error::DimensionMismatch {
                expected: n,
                actual: y.len(),
            });
        }

        let x = to_array(x)?;
        let y = Array1::from(y.to_vec());
        let x_mean = x.sum_axis(Axis(0)) / n as f64;
        let y_mean = y.sum() / n as f64;

        let mut z = &x - &x_mean;
        let yc = &y - y_mean;

        // unit-norm columns; constant ones are left out of the system
        let mut scales = Array1::<f64>::zeros(p);
        let mut active = vec![];
        for (j, mut col) in z.axis_iter_mut(Axis(1)).enumerate() {
            let norm = col.dot(&col).sqrt();
            let magnitude = x.column(j).fold(0.0_f64, |m, v| m.max(v.abs()));
            if norm > VARIANCE_EPS * magnitude * (n as f64).sqrt() {
                col /= norm;
                scales[j] = norm;
                active.push(j);
            }
        }
        let z = z.select(Axis(1), &active);

        let gram = z.t().dot(&z);
        let rhs = z.t().dot(&yc);
        let solution = match cholesky_solve(&gram, &rhs) {
            Some(solution) => solution,
            None => {
                warn!(
                    "Features are collinear, adding ridge {:e} to the normal equations",
                    RIDGE
                );
                let ridged = &gram + &(Array2::<f64>::eye(active.len()) * RIDGE);
                cholesky_solve(&ridged, &rhs).ok_or_else(|| {
                    Error::SingularSystem(
                        "normal equations cannot be solved even with ridge stabilisation"
                            .to_string(),
                    )
                })?
            }
        };

        let mut coefficients = vec![0.0; p];
        for (b, j) in solution.iter().zip(&active) {
            coefficients[*j] = b / scales[*j];
        }
        let intercept = y_mean - Array1::from(coefficients.clone()).dot(&x_mean);

        Ok(LinearRegression {
            coefficients,
            intercept,
        })
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Predicts the target for one sample.
    pub fn predict(&self, sample: &[f64]) -> Result<f64> {
        if sample.len() != self.coefficients.len() {
            return Err(Error::DimensionMismatch {
                expected: self.coefficients.len(),
                actual: sample.len(),
            });
        }
        Ok(self.intercept
            + self
                .coefficients
                .iter()
                .zip(sample)
                .map(|(c, v)| c * v)
                .sum::<f64>())
    }

    /// Coefficient of determination R² on the given data.
    pub fn score(&self, x: &DataFrame, y: &[f64]) -> Result<f64> {
        if y.len() != x.nrows() {
            return Err(Error::DimensionMismatch {
                expected: x.nrows(),
                actual: y.len(),
            });
        }
        if x.ncols() != self.coefficients.len() {
            return Err(Error::DimensionMismatch {
                expected: self.coefficients.len(),
                actual: x.ncols(),
            });
        }
        if y.is_empty() {
            return Ok(1.0);
        }
        let y = ArrayView1::from(y);
        let predicted = to_array(x)?.dot(&ArrayView1::from(&self.coefficients[..])) + self.intercept;
        let y_mean = y.sum() / y.len() as f64;
        let ss_res = (&predicted - &y).mapv(|r| r * r).sum();
        let ss_tot = y.mapv(|v| (v - y_mean).powi(2)).sum();
        if ss_tot == 0.0 {
            return Ok(1.0);
        }
        Ok(1.0 - ss_res / ss_tot)
    }
}

/// Result of a single-sample regression.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Estimate {
    pub value: f64,
    /// R² of the model on its training data.
    pub r2: f64,
}

/// Fits a model on the full training set, then evaluates it at `query`.
///
/// The R² of the fit is logged and returned alongside the prediction.
pub fn fit_predict(features: &DataFrame, targets: &[f64], query: &[f64]) -> Result<Estimate> {
    if query.len() != features.ncols() {
        return Err(Error::DimensionMismatch {
            expected: features.ncols(),
            actual: query.len(),
        });
    }
    let model = LinearRegression::fit(features, targets)?;
    estimate(&model, features, targets, query)
}

/// Evaluates a fitted model at `query`, logging its R² on the training data.
pub fn estimate(
    model: &LinearRegression,
    features: &DataFrame,
    targets: &[f64],
    query: &[f64],
) -> Result<Estimate> {
    let value = model.predict(query)?;
    let r2 = model.score(features, targets)?;
    info!("Regression score = {:.6}", r2);
    Ok(Estimate { value, r2 })
}

/// Relative spread below which a column counts as constant.
const VARIANCE_EPS: f64 = 1e-12;
/// Ridge added to the unit-diagonal normal equations of collinear features.
const RIDGE: f64 = 1e-8;
/// Smallest accepted Cholesky pivot. The normal equations have a unit diagonal.
const PIVOT_EPS: f64 = 1e-12;

fn to_array(df: &DataFrame) -> Result<Array2<f64>> {
    Array2::from_shape_vec((df.nrows(), df.ncols()), df.data().to_vec()).map_err(|_| {
        Error::DimensionMismatch {
            expected: df.nrows() * df.ncols(),
            actual: df.data().len(),
        }
    })
}

/// Solves the symmetric positive-definite system `a * x = b` by Cholesky decomposition.
///
/// Returns `None` if `a` is not (numerically) positive definite.
fn cholesky_solve(a: &Array2<f64>, b: &Array1<f64>) -> Option<Array1<f64>> {
    let n = a.nrows();
    let mut l = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in 0..=i {
            let sum = l.row(i).slice(s![..j]).dot(&l.row(j).slice(s![..j]));
            if i == j {
                let diag = a[[i, i]] - sum;
                if !(diag > PIVOT_EPS) {
                    return None;
                }
                l[[i, j]] = diag.sqrt();
            } else {
                l[[i, j]] = (a[[i, j]] - sum) / l[[j, j]];
            }
        }
    }

    // L * y = b
    let mut y = Array1::<f64>::zeros(n);
    for i in 0..n {
        let sum = l.row(i).slice(s![..i]).dot(&y.slice(s![..i]));
        y[i] = (b[i] - sum) / l[[i, i]];
    }
    // L^T * x = y
    let mut x = Array1::<f64>::zeros(n);
    for i in (0..n).rev() {
        let sum = l.column(i).slice(s![i + 1..]).dot(&x.slice(s![i + 1..]));
        x[i] = (y[i] - sum) / l[[i, i]];
    }
    Some(x)
}
