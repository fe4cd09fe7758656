//! Piecewise-polynomial interpolants: linear, C1 quadratic and natural cubic.
//!
//! All three are stored the same way: on interval `i` the interpolant is
//! `y[i] + b[i]*dx + c[i]*dx^2 + d[i]*dx^3` with `dx = x - x[i]`.

use super::config::InterpolationKind;

/// A fitted piecewise polynomial through strictly increasing knots.
#[derive(Debug, Clone)]
pub struct Interpolant {
    x: Vec<f64>,
    y: Vec<f64>,
    b: Vec<f64>,
    c: Vec<f64>,
    d: Vec<f64>,
}

impl Interpolant {
    /// Fit an interpolant of `kind` through `(x, y)`.
    ///
    /// Returns `None` when there are fewer than two knots, the slices differ
    /// in length, or `x` is not strictly increasing.
    pub fn fit(kind: InterpolationKind, x: &[f64], y: &[f64]) -> Option<Self> {
        let n = x.len();
        if n < 2 || y.len() != n || x.windows(2).any(|w| w[1] <= w[0]) {
            return None;
        }

        let h = spacings(x);
        let slopes: Vec<f64> = (0..n - 1).map(|i| (y[i + 1] - y[i]) / h[i]).collect();

        let (b, c, d) = match kind {
            InterpolationKind::Linear => (slopes, vec![0.0; n - 1], vec![0.0; n - 1]),
            InterpolationKind::Quadratic => quadratic_coeffs(&h, &slopes),
            InterpolationKind::Cubic => natural_cubic_coeffs(&h, y, &slopes),
        };

        Some(Self {
            x: x.to_vec(),
            y: y.to_vec(),
            b,
            c,
            d,
        })
    }

    /// Evaluate at `xq`. Values outside the knot range extend the end pieces.
    pub fn eval(&self, xq: f64) -> f64 {
        let i = find_interval(&self.x, xq);
        let dx = xq - self.x[i];
        self.y[i] + dx * (self.b[i] + dx * (self.c[i] + dx * self.d[i]))
    }

    /// Evaluate at every abscissa.
    pub fn eval_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&xq| self.eval(xq)).collect()
    }
}

fn spacings(x: &[f64]) -> Vec<f64> {
    x.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Index of the interval containing `xq`, clamped to the end pieces.
fn find_interval(x: &[f64], xq: f64) -> usize {
    let mut lo = 0;
    let mut hi = x.len() - 1;

    while lo + 1 < hi {
        let mid = (lo + hi) / 2;
        if x[mid] <= xq {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    lo
}

/// C1 quadratic spline. The starting slope is taken from the parabola through
/// the first three knots, so quadratic data is reproduced exactly.
fn quadratic_coeffs(h: &[f64], slopes: &[f64]) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let m = slopes.len();
    let mut b = vec![0.0; m];
    let mut c = vec![0.0; m];

    b[0] = if m >= 2 {
        slopes[0] - h[0] * (slopes[1] - slopes[0]) / (h[0] + h[1])
    } else {
        slopes[0]
    };

    for i in 0..m {
        if i > 0 {
            b[i] = 2.0 * slopes[i - 1] - b[i - 1];
        }
        c[i] = (slopes[i] - b[i]) / h[i];
    }

    (b, c, vec![0.0; m])
}

/// Natural cubic spline (zero curvature at both ends).
fn natural_cubic_coeffs(
    h: &[f64],
    y: &[f64],
    slopes: &[f64],
) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let n = y.len();
    let c_full = solve_natural_curvature(h, slopes);

    let mut b = vec![0.0; n - 1];
    let mut d = vec![0.0; n - 1];
    for i in 0..n - 1 {
        b[i] = slopes[i] - h[i] * (2.0 * c_full[i] + c_full[i + 1]) / 3.0;
        d[i] = (c_full[i + 1] - c_full[i]) / (3.0 * h[i]);
    }

    let mut c = c_full;
    c.truncate(n - 1);
    (b, c, d)
}

/// Solve the tridiagonal system for the interior second-order coefficients
/// with the Thomas algorithm. End coefficients are zero.
fn solve_natural_curvature(h: &[f64], slopes: &[f64]) -> Vec<f64> {
    let n = h.len() + 1;
    let m = n.saturating_sub(2);
    let mut c_full = vec![0.0; n];
    if m == 0 {
        return c_full;
    }

    // Row k covers knot i = k + 1:
    //   h[i-1] c[i-1] + 2(h[i-1] + h[i]) c[i] + h[i] c[i+1] = 3 (s[i] - s[i-1])
    let mut diag = vec![0.0; m];
    let mut sup = vec![0.0; m];
    let mut rhs = vec![0.0; m];

    for k in 0..m {
        let i = k + 1;
        let sub = h[i - 1];
        let mut dk = 2.0 * (h[i - 1] + h[i]);
        let mut rk = 3.0 * (slopes[i] - slopes[i - 1]);
        if k > 0 {
            let w = sub / diag[k - 1];
            dk -= w * sup[k - 1];
            rk -= w * rhs[k - 1];
        }
        diag[k] = dk;
        sup[k] = h[i];
        rhs[k] = rk;
    }

    for k in (0..m).rev() {
        let next = if k + 1 < m { c_full[k + 2] } else { 0.0 };
        c_full[k + 1] = (rhs[k] - sup[k] * next) / diag[k];
    }

    c_full
}
