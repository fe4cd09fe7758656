//! Entry grid panel.

use super::{format_number, ThemeColors};
use crate::app::App;
use crate::data::Column;
use crate::util::layout_config::GridLayoutConfig;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

/// Draw the editable data table.
pub(super) fn draw_grid(
    f: &mut Frame<'_>,
    app: &mut App,
    area: Rect,
    colors: &ThemeColors,
    layout: &GridLayoutConfig,
) {
    let visible = (area.height as usize).saturating_sub(layout.border_padding);
    let offset = app.grid.scroll_for(visible);
    let (cursor_row, cursor_col) = app.grid.cursor();

    let rows: Vec<Row<'_>> = app
        .grid
        .rows()
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(idx, (x, y))| {
            let skipped = app.rejected.iter().any(|r| r.row == idx + 1);
            let value_style = if skipped {
                Style::default().fg(colors.warning)
            } else {
                Style::default().fg(colors.value)
            };
            let cell = |text: &str, column: Column| {
                let style = if idx == cursor_row && column == cursor_col {
                    Style::default()
                        .fg(colors.cursor_fg)
                        .bg(colors.cursor_bg)
                        .add_modifier(Modifier::BOLD)
                } else {
                    value_style
                };
                Cell::from(text.to_string()).style(style)
            };

            Row::new(vec![
                Cell::from(format!("{:>4}", idx + 1)).style(Style::default().fg(colors.label)),
                cell(x, Column::X),
                cell(y, Column::Y),
            ])
        })
        .collect();

    let header = Row::new(vec![
        Cell::from(""),
        Cell::from(Column::X.name()),
        Cell::from(Column::Y.name()),
    ])
    .style(Style::default().fg(colors.heading).add_modifier(Modifier::BOLD));

    let widths = [
        Constraint::Length(layout.row_header_width),
        Constraint::Length(layout.column_width),
        Constraint::Length(layout.column_width),
    ];

    let title = format!(" Data ({} rows) ", format_number(app.grid.len()));
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.border))
            .style(Style::default().bg(colors.bg)),
    );

    f.render_widget(table, area);
}
