//! Curve construction.
//!
//! [`build_curve`] is a pure function from a [`PointSet`] and a
//! [`PlotConfiguration`] to a renderable [`Curve`]. Drawing the curve is left
//! to the terminal chart and the raster exporter.

mod config;
mod interpolate;
mod polyfit;

pub use config::{
    InterpolationKind, PlotConfiguration, PlotStyle, MAX_DEGREE, MAX_SAMPLES, MIN_DEGREE,
    MIN_SAMPLES,
};
pub use interpolate::Interpolant;
pub use polyfit::{r_squared, PolynomialFit};

use crate::data::PointSet;
use crate::error::{PlotError, Result};
use ndarray::Array1;

/// Number of abscissas a polynomial fit is drawn with.
pub const FIT_SAMPLES: usize = 100;

/// How a segment is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Connected line.
    Line,
    /// Unconnected point markers.
    Markers,
}

/// One drawable series.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Line or markers.
    pub kind: SegmentKind,
    /// Points in drawing order.
    pub points: Vec<(f64, f64)>,
}

impl Segment {
    fn line(points: Vec<(f64, f64)>) -> Self {
        Self {
            kind: SegmentKind::Line,
            points,
        }
    }

    fn markers(points: Vec<(f64, f64)>) -> Self {
        Self {
            kind: SegmentKind::Markers,
            points,
        }
    }
}

/// Degradation applied because the requested interpolant was ill-defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// The raw points were joined with straight lines.
    RawPolyline,
    /// Duplicate x values were averaged and a spline of this order drawn.
    SmoothingSpline {
        /// Piece order (1 to 3).
        order: usize,
    },
}

impl Fallback {
    /// Short description for the status bar.
    pub fn describe(self) -> String {
        match self {
            Fallback::RawPolyline => "too few distinct x values, drawing raw polyline".to_string(),
            Fallback::SmoothingSpline { order } => {
                format!("duplicate x values, drawing order-{} smoothing spline", order)
            }
        }
    }
}

/// Axis limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// X min and max.
    pub x: [f64; 2],
    /// Y min and max.
    pub y: [f64; 2],
}

impl Bounds {
    /// Bounds covering a point set.
    pub fn of_points(points: &PointSet) -> Option<Self> {
        let (x0, x1) = points.x_range()?;
        let (y0, y1) = points.y_range()?;
        Some(Self {
            x: [x0, x1],
            y: [y0, y1],
        })
    }

    /// Bounds covering every point of every segment.
    pub fn of_segments(segments: &[Segment]) -> Option<Self> {
        let mut iter = segments.iter().flat_map(|s| s.points.iter());
        let &(x, y) = iter.next()?;
        let mut b = Self {
            x: [x, x],
            y: [y, y],
        };
        for &(x, y) in iter {
            b.x = [b.x[0].min(x), b.x[1].max(x)];
            b.y = [b.y[0].min(y), b.y[1].max(y)];
        }
        Some(b)
    }

    /// Widen each axis by `factor` of its span, giving zero-width axes a unit span.
    pub fn padded(self, factor: f64) -> Self {
        fn pad([lo, hi]: [f64; 2], factor: f64) -> [f64; 2] {
            let span = hi - lo;
            if span.abs() < f64::EPSILON {
                [lo - 0.5, hi + 0.5]
            } else {
                [lo - span * factor, hi + span * factor]
            }
        }
        Self {
            x: pad(self.x, factor),
            y: pad(self.y, factor),
        }
    }
}

/// A renderable curve.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    /// Series to draw, bottom first.
    pub segments: Vec<Segment>,
    /// Fit details for [`PlotStyle::PolynomialFit`].
    pub fit: Option<PolynomialFit>,
    /// Degradation applied, if any.
    pub fallback: Option<Fallback>,
}

impl Curve {
    /// Bounds of everything drawn.
    pub fn data_bounds(&self) -> Option<Bounds> {
        Bounds::of_segments(&self.segments)
    }

    /// Segments of the given kind.
    pub fn segments_of(&self, kind: SegmentKind) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(move |s| s.kind == kind)
    }
}

/// A curve together with the axis limits it is drawn in.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// What to draw.
    pub curve: Curve,
    /// Fixed axis limits.
    pub bounds: Bounds,
}

impl Frame {
    /// Build the full curve, with limits covering everything drawn.
    pub fn plot(points: &PointSet, config: &PlotConfiguration) -> Result<Self> {
        let curve = build_curve(points, config)?;
        let bounds = curve
            .data_bounds()
            .or_else(|| Bounds::of_points(points))
            .ok_or_else(|| PlotError::insufficient(points.len()))?;
        Ok(Self { curve, bounds })
    }

    /// Build a curve inside externally fixed limits.
    pub fn within(points: &PointSet, config: &PlotConfiguration, bounds: Bounds) -> Result<Self> {
        Ok(Self {
            curve: build_curve(points, config)?,
            bounds,
        })
    }
}

/// `count` evenly spaced values across `[lo, hi]`.
pub fn linspace(lo: f64, hi: f64, count: usize) -> Vec<f64> {
    Array1::linspace(lo, hi, count).to_vec()
}

/// Build the curve for `points` under `config`.
///
/// Refuses with [`PlotError::InsufficientData`] when there are fewer than two
/// points.
pub fn build_curve(points: &PointSet, config: &PlotConfiguration) -> Result<Curve> {
    if points.len() < 2 {
        return Err(PlotError::insufficient(points.len()));
    }

    let curve = match config.style {
        PlotStyle::Lines => Curve {
            segments: vec![
                Segment::line(points.tuples()),
                Segment::markers(points.tuples()),
            ],
            fit: None,
            fallback: None,
        },
        PlotStyle::SmoothCurve => smooth_curve(points, config),
        PlotStyle::PolynomialFit => polynomial_curve(points, config),
    };

    if let Some(fallback) = curve.fallback {
        tracing::info!("Curve fallback: {}", fallback.describe());
    }
    Ok(curve)
}

fn raw_polyline(points: &PointSet) -> Curve {
    Curve {
        segments: vec![
            Segment::line(points.tuples()),
            Segment::markers(points.tuples()),
        ],
        fit: None,
        fallback: Some(Fallback::RawPolyline),
    }
}

fn smooth_curve(points: &PointSet, config: &PlotConfiguration) -> Curve {
    let distinct = points.distinct_x_count();
    let kind = config.interpolation;

    if kind == InterpolationKind::Cubic && distinct <= 3 {
        return raw_polyline(points);
    }

    let (knots, kind, fallback) = if points.has_duplicate_x() {
        let order = 3.min(distinct - 1);
        match InterpolationKind::from_order(order) {
            Some(kind) => (
                points.collapse_duplicates(),
                kind,
                Some(Fallback::SmoothingSpline { order }),
            ),
            None => return raw_polyline(points),
        }
    } else {
        (points.clone(), kind, None)
    };

    let interpolant = match Interpolant::fit(kind, &knots.xs(), &knots.ys()) {
        Some(f) => f,
        None => return raw_polyline(points),
    };

    // Non-empty: at least two points were checked by the caller.
    let (lo, hi) = points.x_range().unwrap_or((0.0, 0.0));
    let xs = linspace(lo, hi, config.sample_count());
    let ys = interpolant.eval_many(&xs);

    Curve {
        segments: vec![
            Segment::line(xs.into_iter().zip(ys).collect()),
            Segment::markers(points.tuples()),
        ],
        fit: None,
        fallback,
    }
}

fn polynomial_curve(points: &PointSet, config: &PlotConfiguration) -> Curve {
    let xs = points.xs();
    let ys = points.ys();

    let Some(fit) = PolynomialFit::fit(&xs, &ys, config.polynomial_degree()) else {
        return raw_polyline(points);
    };

    let (lo, hi) = points.x_range().unwrap_or((0.0, 0.0));
    let samples = linspace(lo, hi, FIT_SAMPLES);
    let fitted: Vec<(f64, f64)> = samples.iter().map(|&x| (x, fit.eval(x))).collect();

    tracing::debug!("Fitted {} ({})", fit.equation(), fit.r_squared_text());

    Curve {
        segments: vec![Segment::line(fitted), Segment::markers(points.tuples())],
        fit: Some(fit),
        fallback: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Point;

    fn set(points: &[(f64, f64)]) -> PointSet {
        PointSet::new(points.iter().map(|&p| Point::from(p)))
    }

    fn smooth(kind: InterpolationKind) -> PlotConfiguration {
        PlotConfiguration::default()
            .with_style(PlotStyle::SmoothCurve)
            .with_interpolation(kind)
    }

    #[test]
    fn refuses_fewer_than_two_points() {
        for style in [PlotStyle::Lines, PlotStyle::SmoothCurve, PlotStyle::PolynomialFit] {
            let config = PlotConfiguration::default().with_style(style);
            assert!(matches!(
                build_curve(&set(&[]), &config),
                Err(PlotError::InsufficientData { found: 0 })
            ));
            assert!(matches!(
                build_curve(&set(&[(1.0, 1.0)]), &config),
                Err(PlotError::InsufficientData { found: 1 })
            ));
        }
    }

    #[test]
    fn lines_follow_sorted_points() {
        let curve = build_curve(
            &set(&[(2.0, 0.0), (0.0, 1.0), (1.0, 5.0)]),
            &PlotConfiguration::default(),
        )
        .unwrap();
        assert_eq!(curve.segments.len(), 2);
        assert_eq!(curve.segments[0].kind, SegmentKind::Line);
        assert_eq!(
            curve.segments[0].points,
            vec![(0.0, 1.0), (1.0, 5.0), (2.0, 0.0)]
        );
        assert_eq!(curve.segments[1].kind, SegmentKind::Markers);
        assert!(curve.fallback.is_none());
    }

    #[test]
    fn smooth_curve_resamples_and_overlays_points() {
        let points = set(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 2.0)]);
        let config = smooth(InterpolationKind::Cubic).with_sample_count(250);
        let curve = build_curve(&points, &config).unwrap();

        let line = &curve.segments[0];
        assert_eq!(line.kind, SegmentKind::Line);
        assert_eq!(line.points.len(), 250);
        assert_eq!(line.points[0].0, 0.0);
        assert!((line.points[249].0 - 3.0).abs() < 1e-12);
        assert_eq!(curve.segments[1].points, points.tuples());
        assert!(curve.fallback.is_none());
    }

    #[test]
    fn cubic_with_three_distinct_x_falls_back() {
        let points = set(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
        let curve = build_curve(&points, &smooth(InterpolationKind::Cubic)).unwrap();
        assert_eq!(curve.fallback, Some(Fallback::RawPolyline));
        assert_eq!(curve.segments[0].points, points.tuples());

        let dupes = set(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (2.0, 0.0), (2.0, 3.0)]);
        let curve = build_curve(&dupes, &smooth(InterpolationKind::Cubic)).unwrap();
        assert_eq!(curve.fallback, Some(Fallback::RawPolyline));
    }

    #[test]
    fn cubic_with_four_distinct_x_never_falls_back_to_polyline() {
        let unique = set(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 1.0)]);
        let curve = build_curve(&unique, &smooth(InterpolationKind::Cubic)).unwrap();
        assert_ne!(curve.fallback, Some(Fallback::RawPolyline));

        let dupes = set(&[(0.0, 0.0), (1.0, 1.0), (1.0, 3.0), (2.0, 0.0), (3.0, 1.0)]);
        let curve = build_curve(&dupes, &smooth(InterpolationKind::Cubic)).unwrap();
        assert_eq!(curve.fallback, Some(Fallback::SmoothingSpline { order: 3 }));
    }

    #[test]
    fn duplicate_x_uses_smoothing_spline_order() {
        let points = set(&[(0.0, 0.0), (0.0, 2.0), (1.0, 1.0), (2.0, 4.0)]);
        let curve = build_curve(&points, &smooth(InterpolationKind::Linear)).unwrap();
        assert_eq!(curve.fallback, Some(Fallback::SmoothingSpline { order: 2 }));
        // The duplicate pair is averaged: the curve starts at (0, 1).
        assert!((curve.segments[0].points[0].1 - 1.0).abs() < 1e-12);
        // Every original point is still overlaid.
        assert_eq!(curve.segments[1].points.len(), 4);
    }

    #[test]
    fn single_distinct_x_draws_raw_polyline() {
        let points = set(&[(1.0, 0.0), (1.0, 2.0)]);
        let curve = build_curve(&points, &smooth(InterpolationKind::Quadratic)).unwrap();
        assert_eq!(curve.fallback, Some(Fallback::RawPolyline));
    }

    #[test]
    fn polynomial_fit_of_exact_line() {
        let points = set(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
        let config = PlotConfiguration::default()
            .with_style(PlotStyle::PolynomialFit)
            .with_polynomial_degree(1);
        let curve = build_curve(&points, &config).unwrap();

        let fit = curve.fit.as_ref().unwrap();
        assert_eq!(fit.equation(), "y = 1.0000x + 0.0000");
        assert_eq!(fit.r_squared_text(), "R² = 1.0000");
        assert_eq!(curve.segments[0].points.len(), FIT_SAMPLES);
        assert_eq!(curve.segments[1].kind, SegmentKind::Markers);
    }

    #[test]
    fn polynomial_fit_of_huge_x_stays_finite() {
        let points = set(&[(1e16, 0.0), (1e16 + 4.0, 1.0), (1e16 + 8.0, 3.0)]);
        let config = PlotConfiguration::default()
            .with_style(PlotStyle::PolynomialFit)
            .with_polynomial_degree(10);
        let curve = build_curve(&points, &config).unwrap();

        assert!(curve.fallback.is_none());
        assert!(curve.fit.is_some());
        assert!(curve.segments[0]
            .points
            .iter()
            .all(|(x, y)| x.is_finite() && y.is_finite()));
    }

    #[test]
    fn bounds_padding() {
        let b = Bounds {
            x: [0.0, 10.0],
            y: [3.0, 3.0],
        }
        .padded(0.1);
        assert_eq!(b.x, [-1.0, 11.0]);
        assert_eq!(b.y, [2.5, 3.5]);
    }
}
