//! Image export of a plotted frame.
//!
//! The file extension picks the backend: `.svg` is written as SVG, anything
//! else as a PNG bitmap.

use crate::curve::{Frame, SegmentKind};
use crate::error::{PlotError, Result};
use crate::labels::Labels;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// Colours and size of an exported image.
#[derive(Debug, Clone)]
pub struct ExportStyle {
    /// Image size in pixels.
    pub size: (u32, u32),
    /// Background fill.
    pub background: RGBColor,
    /// Caption, tick label and axis description colour.
    pub text: RGBColor,
    /// Axis and mesh colour.
    pub axis: RGBColor,
    /// Curve colour.
    pub line: RGBColor,
    /// Data point marker colour.
    pub marker: RGBColor,
}

impl ExportStyle {
    /// Palette for a dark or light surface.
    pub fn new(dark_theme: bool) -> Self {
        if dark_theme {
            Self {
                size: (1000, 700),
                background: RGBColor(40, 40, 40),
                text: RGBColor(235, 219, 178),
                axis: RGBColor(102, 92, 84),
                line: RGBColor(131, 165, 152),
                marker: RGBColor(251, 73, 52),
            }
        } else {
            Self {
                size: (1000, 700),
                background: RGBColor(255, 255, 255),
                text: RGBColor(40, 40, 40),
                axis: RGBColor(160, 160, 160),
                line: RGBColor(31, 119, 180),
                marker: RGBColor(214, 39, 40),
            }
        }
    }
}

impl Default for ExportStyle {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Write `frame` to `path`.
///
/// Fails with [`PlotError::NothingToExport`] when nothing has been plotted.
pub fn export_frame(
    path: &Path,
    frame: Option<&Frame>,
    labels: &Labels,
    style: &ExportStyle,
) -> Result<()> {
    let frame = frame.ok_or(PlotError::NothingToExport)?;

    let is_svg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));

    if is_svg {
        let root = SVGBackend::new(path, style.size).into_drawing_area();
        draw_frame(&root, frame, labels, style)?;
    } else {
        let root = BitMapBackend::new(path, style.size).into_drawing_area();
        draw_frame(&root, frame, labels, style)?;
    }

    tracing::info!("Exported plot to {}", path.display());
    Ok(())
}

fn draw_frame<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    frame: &Frame,
    labels: &Labels,
    style: &ExportStyle,
) -> Result<()> {
    root.fill(&style.background).map_err(PlotError::export)?;

    let bounds = frame.bounds.padded(0.05);
    let mut chart = ChartBuilder::on(root)
        .margin(20)
        .caption(
            labels.title.as_str(),
            ("sans-serif", 24).into_font().color(&style.text),
        )
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(bounds.x[0]..bounds.x[1], bounds.y[0]..bounds.y[1])
        .map_err(PlotError::export)?;

    chart
        .configure_mesh()
        .x_desc(labels.x.as_str())
        .y_desc(labels.y.as_str())
        .axis_desc_style(("sans-serif", 16).into_font().color(&style.text))
        .label_style(("sans-serif", 14).into_font().color(&style.text))
        .axis_style(&style.axis)
        .light_line_style(&style.axis.mix(0.2))
        .bold_line_style(&style.axis.mix(0.4))
        .draw()
        .map_err(PlotError::export)?;

    for segment in frame.curve.segments_of(SegmentKind::Line) {
        chart
            .draw_series(LineSeries::new(
                segment.points.iter().copied(),
                style.line.stroke_width(2),
            ))
            .map_err(PlotError::export)?;
    }
    for segment in frame.curve.segments_of(SegmentKind::Markers) {
        chart
            .draw_series(
                segment
                    .points
                    .iter()
                    .map(|&p| Circle::new(p, 4, style.marker.filled())),
            )
            .map_err(PlotError::export)?;
    }

    root.present().map_err(PlotError::export)?;
    Ok(())
}
