//! Plot configuration.

use std::fmt;
use std::str::FromStr;

/// Smallest allowed resample count for smooth curves.
pub const MIN_SAMPLES: usize = 100;
/// Largest allowed resample count for smooth curves.
pub const MAX_SAMPLES: usize = 10_000;
/// Smallest polynomial degree.
pub const MIN_DEGREE: usize = 1;
/// Largest polynomial degree.
pub const MAX_DEGREE: usize = 10;

/// How the points are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotStyle {
    /// Straight segments between consecutive points.
    #[default]
    Lines,
    /// Interpolated curve resampled across the x range.
    SmoothCurve,
    /// Least-squares polynomial.
    PolynomialFit,
}

impl PlotStyle {
    /// Get the next style in the cycle.
    pub fn next(self) -> Self {
        match self {
            PlotStyle::Lines => PlotStyle::SmoothCurve,
            PlotStyle::SmoothCurve => PlotStyle::PolynomialFit,
            PlotStyle::PolynomialFit => PlotStyle::Lines,
        }
    }

    /// Get display name.
    pub fn name(self) -> &'static str {
        match self {
            PlotStyle::Lines => "Connecting Lines",
            PlotStyle::SmoothCurve => "Smooth Curve",
            PlotStyle::PolynomialFit => "Polynomial Fit",
        }
    }
}

impl FromStr for PlotStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lines" | "line" => Ok(PlotStyle::Lines),
            "smooth" | "smooth-curve" | "curve" => Ok(PlotStyle::SmoothCurve),
            "poly" | "polynomial" | "fit" => Ok(PlotStyle::PolynomialFit),
            other => Err(format!("unknown plot style '{}'", other)),
        }
    }
}

impl fmt::Display for PlotStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Interpolant used by [`PlotStyle::SmoothCurve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationKind {
    /// Piecewise linear.
    #[default]
    Linear,
    /// C1 quadratic spline.
    Quadratic,
    /// Natural cubic spline.
    Cubic,
}

impl InterpolationKind {
    /// Get the next kind in the cycle.
    pub fn next(self) -> Self {
        match self {
            InterpolationKind::Linear => InterpolationKind::Quadratic,
            InterpolationKind::Quadratic => InterpolationKind::Cubic,
            InterpolationKind::Cubic => InterpolationKind::Linear,
        }
    }

    /// Get display name.
    pub fn name(self) -> &'static str {
        match self {
            InterpolationKind::Linear => "linear",
            InterpolationKind::Quadratic => "quadratic",
            InterpolationKind::Cubic => "cubic",
        }
    }

    /// Kind for a piece order, capped at cubic. Order 0 has no interpolant.
    pub fn from_order(order: usize) -> Option<Self> {
        match order {
            0 => None,
            1 => Some(InterpolationKind::Linear),
            2 => Some(InterpolationKind::Quadratic),
            _ => Some(InterpolationKind::Cubic),
        }
    }
}

impl FromStr for InterpolationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linear" => Ok(InterpolationKind::Linear),
            "quadratic" => Ok(InterpolationKind::Quadratic),
            "cubic" => Ok(InterpolationKind::Cubic),
            other => Err(format!("unknown interpolation kind '{}'", other)),
        }
    }
}

impl fmt::Display for InterpolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything the curve builder reads. Passed by value per build.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfiguration {
    /// Drawing style.
    pub style: PlotStyle,
    /// Interpolant for smooth curves.
    pub interpolation: InterpolationKind,
    sample_count: usize,
    polynomial_degree: usize,
    /// Request math-mode labels.
    pub use_latex: bool,
    /// X and Y axis labels. Empty strings fall back to "X" and "Y".
    pub axis_labels: (String, String),
    /// Graph title.
    pub title: String,
}

impl Default for PlotConfiguration {
    fn default() -> Self {
        Self {
            style: PlotStyle::default(),
            interpolation: InterpolationKind::default(),
            sample_count: 500,
            polynomial_degree: 2,
            use_latex: false,
            axis_labels: (String::new(), String::new()),
            title: "Line Plot".to_string(),
        }
    }
}

impl PlotConfiguration {
    /// Resample count for smooth curves.
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Set the resample count, clamped into range.
    pub fn set_sample_count(&mut self, count: usize) {
        self.sample_count = count.clamp(MIN_SAMPLES, MAX_SAMPLES);
    }

    /// Builder form of [`Self::set_sample_count`].
    pub fn with_sample_count(mut self, count: usize) -> Self {
        self.set_sample_count(count);
        self
    }

    /// Degree of the fitted polynomial.
    pub fn polynomial_degree(&self) -> usize {
        self.polynomial_degree
    }

    /// Set the polynomial degree, clamped into range.
    pub fn set_polynomial_degree(&mut self, degree: usize) {
        self.polynomial_degree = degree.clamp(MIN_DEGREE, MAX_DEGREE);
    }

    /// Builder form of [`Self::set_polynomial_degree`].
    pub fn with_polynomial_degree(mut self, degree: usize) -> Self {
        self.set_polynomial_degree(degree);
        self
    }

    /// Builder for the style.
    pub fn with_style(mut self, style: PlotStyle) -> Self {
        self.style = style;
        self
    }

    /// Builder for the interpolation kind.
    pub fn with_interpolation(mut self, kind: InterpolationKind) -> Self {
        self.interpolation = kind;
        self
    }
}
