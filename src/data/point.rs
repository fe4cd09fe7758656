//! Points, point sets and the normalizer that builds them from grid text.

use std::fmt;

/// A single finite (x, y) data point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Abscissa.
    pub x: f64,
    /// Ordinate.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point as a tuple, the shape chart widgets expect.
    pub fn as_tuple(self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Points sorted ascending by x. Duplicate x values are kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet {
    points: Vec<Point>,
}

impl PointSet {
    /// Build a point set, stable-sorting the input by x.
    ///
    /// Non-finite points are discarded; ties keep their input order.
    pub fn new(points: impl IntoIterator<Item = Point>) -> Self {
        let mut points: Vec<Point> = points
            .into_iter()
            .filter(|p| p.x.is_finite() && p.y.is_finite())
            .collect();
        // `sort_by` is stable, and every value is finite so the comparison is total.
        points.sort_by(|a, b| a.x.total_cmp(&b.x));
        Self { points }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The sorted points.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// X values in sorted order.
    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    /// Y values in x-sorted order.
    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }

    /// Points as tuples.
    pub fn tuples(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| p.as_tuple()).collect()
    }

    /// Number of distinct x values.
    pub fn distinct_x_count(&self) -> usize {
        // Sorted, so equal values are adjacent.
        let mut count = 0;
        let mut last: Option<f64> = None;
        for p in &self.points {
            if last != Some(p.x) {
                count += 1;
                last = Some(p.x);
            }
        }
        count
    }

    /// Whether any x value occurs more than once.
    pub fn has_duplicate_x(&self) -> bool {
        self.distinct_x_count() < self.len()
    }

    /// Minimum and maximum x.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        Some((self.points.first()?.x, self.points.last()?.x))
    }

    /// Minimum and maximum y.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        if self.points.is_empty() {
            return None;
        }
        Some(self.points.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(min, max), p| (min.min(p.y), max.max(p.y)),
        ))
    }

    /// Collapse duplicate x values to a single point at their mean y.
    pub fn collapse_duplicates(&self) -> PointSet {
        let mut out: Vec<Point> = Vec::with_capacity(self.len());
        let mut run_sum = 0.0;
        let mut run_len = 0usize;

        for p in &self.points {
            match out.last_mut() {
                Some(last) if last.x == p.x => {
                    run_sum += p.y;
                    run_len += 1;
                    last.y = run_sum / run_len as f64;
                }
                _ => {
                    run_sum = p.y;
                    run_len = 1;
                    out.push(*p);
                }
            }
        }

        PointSet { points: out }
    }
}

/// Why a grid row was left out of the point set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowProblem {
    /// One of the two cells is empty.
    MissingValue,
    /// A cell did not parse as a finite number.
    NotANumber(String),
}

impl fmt::Display for RowProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowProblem::MissingValue => write!(f, "missing value"),
            RowProblem::NotANumber(text) => write!(f, "'{}' is not a number", text),
        }
    }
}

/// A rejected grid row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowIssue {
    /// 1-based row index in the grid.
    pub row: usize,
    /// What was wrong with it.
    pub problem: RowProblem,
}

/// Result of normalizing the entry grid.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    /// Surviving points, sorted by x.
    pub points: PointSet,
    /// Rows that were excluded.
    pub rejected: Vec<RowIssue>,
}

fn parse_cell(text: &str) -> std::result::Result<f64, RowProblem> {
    let text = text.trim();
    if text.is_empty() {
        return Err(RowProblem::MissingValue);
    }
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(RowProblem::NotANumber(text.to_string())),
    }
}

/// Turn grid rows into a sorted point set.
///
/// Rows whose cells are both blank are treated as absent. Any other row that
/// does not yield two finite numbers is skipped and reported by its 1-based
/// index; processing always continues with the next row.
pub fn normalize<I, S>(rows: I) -> Normalized
where
    I: IntoIterator<Item = (S, S)>,
    S: AsRef<str>,
{
    let mut points = Vec::new();
    let mut rejected = Vec::new();

    for (idx, (x, y)) in rows.into_iter().enumerate() {
        let row = idx + 1;
        let (x, y) = (x.as_ref(), y.as_ref());

        if x.trim().is_empty() && y.trim().is_empty() {
            continue;
        }

        match parse_cell(x).and_then(|x| parse_cell(y).map(|y| Point::new(x, y))) {
            Ok(point) => points.push(point),
            Err(problem) => {
                tracing::warn!("Invalid data in row {}: {}", row, problem);
                rejected.push(RowIssue { row, problem });
            }
        }
    }

    Normalized {
        points: PointSet::new(points),
        rejected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[(&str, &str)]) -> Vec<(String, String)> {
        data.iter()
            .map(|(x, y)| (x.to_string(), y.to_string()))
            .collect()
    }

    #[test]
    fn sorts_by_x() {
        let out = normalize(rows(&[("3", "1"), ("1", "2"), ("2", "3")]));
        assert_eq!(out.points.tuples(), vec![(1.0, 2.0), (2.0, 3.0), (3.0, 1.0)]);
        assert!(out.rejected.is_empty());
    }

    #[test]
    fn bad_rows_are_reported_with_one_based_index() {
        let out = normalize(rows(&[("1", "1"), ("abc", "2"), ("3", ""), ("4", "4")]));
        assert_eq!(out.points.len(), 2);
        assert_eq!(out.rejected.len(), 2);
        assert_eq!(out.rejected[0].row, 2);
        assert_eq!(
            out.rejected[0].problem,
            RowProblem::NotANumber("abc".to_string())
        );
        assert_eq!(out.rejected[1].row, 3);
        assert_eq!(out.rejected[1].problem, RowProblem::MissingValue);
    }

    #[test]
    fn blank_rows_are_absent_not_errors() {
        let out = normalize(rows(&[("", ""), ("1", "2"), ("  ", "")]));
        assert_eq!(out.points.len(), 1);
        assert!(out.rejected.is_empty());
    }

    #[test]
    fn non_finite_text_is_rejected() {
        let out = normalize(rows(&[("inf", "1"), ("1", "NaN"), ("2", "2")]));
        assert_eq!(out.points.tuples(), vec![(2.0, 2.0)]);
        assert_eq!(out.rejected.len(), 2);
    }

    #[test]
    fn stable_for_equal_x() {
        let out = normalize(rows(&[("1", "5"), ("0", "0"), ("1", "3"), ("1", "4")]));
        assert_eq!(
            out.points.tuples(),
            vec![(0.0, 0.0), (1.0, 5.0), (1.0, 3.0), (1.0, 4.0)]
        );
    }

    #[test]
    fn distinct_and_duplicates() {
        let set = PointSet::new(vec![
            Point::new(1.0, 1.0),
            Point::new(1.0, 3.0),
            Point::new(2.0, 0.0),
        ]);
        assert_eq!(set.distinct_x_count(), 2);
        assert!(set.has_duplicate_x());

        let collapsed = set.collapse_duplicates();
        assert_eq!(collapsed.tuples(), vec![(1.0, 2.0), (2.0, 0.0)]);
    }

    #[test]
    fn ranges() {
        let set = PointSet::new(vec![Point::new(2.0, -1.0), Point::new(-3.0, 4.0)]);
        assert_eq!(set.x_range(), Some((-3.0, 2.0)));
        assert_eq!(set.y_range(), Some((-1.0, 4.0)));
        assert_eq!(PointSet::default().x_range(), None);
    }
}
