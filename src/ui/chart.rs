//! Chart panel and fit summary.

use super::{fit_width, format_axis_label, ThemeColors};
use crate::app::App;
use crate::curve::{PlotStyle, SegmentKind};
use crate::util::layout_config::ChartLayoutConfig;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Wrap},
    Frame,
};

/// Draw the chart with the info panel below it.
pub(super) fn draw_chart_panel(
    f: &mut Frame<'_>,
    app: &App,
    area: Rect,
    colors: &ThemeColors,
    layout: &ChartLayoutConfig,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(layout.info_height)])
        .split(area);

    draw_chart(f, app, chunks[0], colors, layout);
    draw_info(f, app, chunks[1], colors);
}

fn draw_chart(
    f: &mut Frame<'_>,
    app: &App,
    area: Rect,
    colors: &ThemeColors,
    layout: &ChartLayoutConfig,
) {
    let block = Block::default()
        .title(format!(" {} ", app.labels.title))
        .title_style(Style::default().fg(colors.heading).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border))
        .style(Style::default().bg(colors.bg));

    let Some(frame) = app.frame.as_ref() else {
        let para = Paragraph::new(vec![
            Line::from(""),
            Line::from("Enter at least two points and press p to plot"),
            Line::from("or press o to import a CSV/TSV file"),
        ])
        .style(Style::default().fg(colors.text))
        .alignment(Alignment::Center)
        .block(block);
        f.render_widget(para, area);
        return;
    };

    let datasets: Vec<Dataset<'_>> = frame
        .curve
        .segments
        .iter()
        .map(|segment| match segment.kind {
            SegmentKind::Line => Dataset::default()
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(colors.line))
                .data(&segment.points),
            SegmentKind::Markers => Dataset::default()
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(colors.marker))
                .data(&segment.points),
        })
        .collect();

    let bounds = frame.bounds.padded(layout.axis_padding_factor);
    let ticks = |[lo, hi]: [f64; 2]| {
        vec![
            format_axis_label(lo),
            format_axis_label((lo + hi) / 2.0),
            format_axis_label(hi),
        ]
    };

    let label_width = (area.width as usize).saturating_sub(4);
    let x_axis = Axis::default()
        .title(fit_width(&app.labels.x, label_width / 2))
        .style(Style::default().fg(colors.text))
        .bounds(bounds.x)
        .labels(ticks(bounds.x));
    let y_axis = Axis::default()
        .title(fit_width(&app.labels.y, label_width / 2))
        .style(Style::default().fg(colors.text))
        .bounds(bounds.y)
        .labels(ticks(bounds.y));

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(x_axis)
        .y_axis(y_axis);

    f.render_widget(chart, area);
}

fn draw_info(f: &mut Frame<'_>, app: &App, area: Rect, colors: &ThemeColors) {
    let label = Style::default().fg(colors.label);
    let value = Style::default().fg(colors.value);
    let warning = Style::default().fg(colors.warning);

    let detail = match app.config.style {
        PlotStyle::Lines => String::new(),
        PlotStyle::SmoothCurve => format!(
            "  {} | {} samples",
            app.config.interpolation,
            app.config.sample_count()
        ),
        PlotStyle::PolynomialFit => format!("  degree {}", app.config.polynomial_degree()),
    };
    let animation = match app.sequencer.progress() {
        Some(p) => format!("  animating {:.0}%", p * 100.0),
        None => String::new(),
    };

    let mut lines = vec![Line::from(vec![
        Span::styled("Style: ", label),
        Span::styled(format!("{}{}", app.config.style, detail), value),
        Span::styled(animation, warning),
    ])];

    if let Some(curve) = app.frame.as_ref().map(|frame| &frame.curve) {
        if let Some(fit) = &curve.fit {
            lines.push(Line::from(vec![
                Span::styled(fit.equation(), value),
                Span::styled(format!("   {}", fit.r_squared_text()), label),
            ]));
        }
        if let Some(fallback) = curve.fallback {
            lines.push(Line::from(Span::styled(
                format!("Fallback: {}", fallback.describe()),
                warning,
            )));
        }
    }
    if app.labels.fallback {
        lines.push(Line::from(Span::styled(
            "LaTeX unavailable, labels use superscripts",
            warning,
        )));
    }

    let para = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.border))
                .style(Style::default().bg(colors.bg)),
        );

    f.render_widget(para, area);
}
