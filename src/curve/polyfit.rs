//! Least-squares polynomial fitting and goodness of fit.

use nalgebra::{DMatrix, DVector, SVD};

/// Singular values below this fraction of the largest are treated as zero.
const SVD_EPS: f64 = 1e-12;

/// A fitted polynomial with its R² statistic.
///
/// The solve runs on x mapped onto [-1, 1], which keeps the Vandermonde
/// matrix bounded whatever the magnitude of the data. `coefficients` are the
/// same polynomial expanded back into raw x.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialFit {
    /// Coefficients in raw x, highest-degree term first.
    pub coefficients: Vec<f64>,
    /// Coefficient of determination over the fitted points.
    pub r_squared: f64,
    /// Coefficients in mapped x, highest-degree term first.
    mapped: Vec<f64>,
    center: f64,
    half_span: f64,
}

impl PolynomialFit {
    /// Fit a polynomial of `degree` to `(x, y)` by least squares.
    ///
    /// A degree at or above the number of distinct points is not rejected:
    /// the system is underdetermined, the minimum-norm solution is used, and
    /// R² comes out at (or near) 1. Returns `None` when the inputs are not
    /// finite or the decomposition does not converge.
    pub fn fit(x: &[f64], y: &[f64], degree: usize) -> Option<Self> {
        let n = x.len();
        if n == 0 || y.len() != n {
            return None;
        }
        if !x.iter().chain(y).all(|v| v.is_finite()) {
            tracing::warn!("Polynomial fit skipped: non-finite input");
            return None;
        }

        let (min, max) = x
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        // Halve before combining so extreme bounds cannot overflow
        let center = min / 2.0 + max / 2.0;
        let half_span = match max / 2.0 - min / 2.0 {
            s if s > 0.0 => s,
            _ => 1.0,
        };
        let mapped_x: Vec<f64> = x.iter().map(|&v| (v - center) / half_span).collect();

        let cols = degree + 1;
        let vandermonde = DMatrix::from_fn(n, cols, |r, c| mapped_x[r].powi(c as i32));
        if vandermonde.iter().any(|v| !v.is_finite()) {
            tracing::warn!("Polynomial fit skipped: design matrix is not finite");
            return None;
        }
        let rhs = DVector::from_column_slice(y);

        let Some(svd) = SVD::try_new(vandermonde, true, true, f64::EPSILON * 5.0, 0) else {
            tracing::warn!("Polynomial fit failed: SVD did not converge");
            return None;
        };
        let eps = SVD_EPS * svd.singular_values.max();
        let solution = match svd.solve(&rhs, eps) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("Polynomial fit failed: {}", e);
                return None;
            }
        };

        let mut mapped: Vec<f64> = solution.iter().copied().collect();
        mapped.reverse();
        let coefficients = expand(&mapped, center, half_span);

        let r_squared = r_squared(&mapped_x, y, |u| eval_poly(&mapped, u));
        Some(Self {
            coefficients,
            r_squared,
            mapped,
            center,
            half_span,
        })
    }

    /// Polynomial degree.
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Evaluate the polynomial.
    pub fn eval(&self, x: f64) -> f64 {
        eval_poly(&self.mapped, (x - self.center) / self.half_span)
    }

    /// Equation text, e.g. `y = 1.0000x^2 - 3.0000x + 0.5000`.
    pub fn equation(&self) -> String {
        format_equation(&self.coefficients)
    }

    /// R² text to four decimal places.
    pub fn r_squared_text(&self) -> String {
        format!("R² = {:.4}", self.r_squared)
    }
}

/// Horner evaluation of highest-first coefficients.
fn eval_poly(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().fold(0.0, |acc, c| acc * x + c)
}

/// Rewrite p((x - center) / half_span) as highest-first coefficients in x.
fn expand(mapped: &[f64], center: f64, half_span: f64) -> Vec<f64> {
    let len = mapped.len();
    // Lowest-first accumulator and the running power of (x - center) / half_span
    let mut out = vec![0.0; len];
    let mut power = vec![1.0];
    for &a in mapped.iter().rev() {
        for (o, p) in out.iter_mut().zip(&power) {
            *o += a * p;
        }
        let mut next = vec![0.0; power.len() + 1];
        for (k, &p) in power.iter().enumerate() {
            next[k] -= p * center / half_span;
            next[k + 1] += p / half_span;
        }
        power = next;
    }
    out.reverse();
    out
}

/// R² = 1 - SS_res / SS_tot.
///
/// When every y is equal SS_tot is zero; the fit then scores 1 if it is exact
/// and 0 otherwise.
pub fn r_squared(x: &[f64], y: &[f64], model: impl Fn(f64) -> f64) -> f64 {
    if y.is_empty() {
        return 0.0;
    }
    let mean = y.iter().sum::<f64>() / y.len() as f64;
    let ss_tot: f64 = y.iter().map(|v| (v - mean).powi(2)).sum();
    let ss_res: f64 = x
        .iter()
        .zip(y.iter())
        .map(|(&xi, &yi)| (yi - model(xi)).powi(2))
        .sum();

    if ss_tot == 0.0 {
        let scale = y.iter().fold(1.0_f64, |m, v| m.max(v.abs()));
        return if ss_res <= 1e-20 * scale * scale * y.len() as f64 {
            1.0
        } else {
            0.0
        };
    }
    1.0 - ss_res / ss_tot
}

fn format_equation(coefficients: &[f64]) -> String {
    let degree = coefficients.len().saturating_sub(1);
    let mut out = String::from("y = ");

    for (i, &c) in coefficients.iter().enumerate() {
        let power = degree - i;
        let rounded = (c * 1e4).round() / 1e4;
        let magnitude = format!("{:.4}", rounded.abs());

        match (i, rounded < 0.0) {
            (0, true) => out.push('-'),
            (0, false) => {}
            (_, true) => out.push_str(" - "),
            (_, false) => out.push_str(" + "),
        }
        match power {
            0 => out.push_str(&magnitude),
            1 => out.push_str(&format!("{}x", magnitude)),
            p => out.push_str(&format!("{}x^{}", magnitude, p)),
        }
    }

    out
}
