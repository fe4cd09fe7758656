//! User interface rendering.

mod chart;
mod formatters;
mod grid;
mod keymap_bar;
mod status_bar;
mod theme;

use crate::app::App;
use crate::util::layout_config::LayoutConfig;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub use formatters::{fit_width, format_axis_label, format_number, format_range};
pub use keymap_bar::KEY_BINDINGS;
pub use theme::ThemeColors;

/// Draw the UI.
pub fn draw(f: &mut Frame<'_>, app: &mut App) {
    let colors = ThemeColors::from_theme(&app.theme);
    let layout = LayoutConfig::default();

    // Content, status bar, key map bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1), Constraint::Length(1)])
        .split(f.area());

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(layout.grid.panel_width), Constraint::Min(10)])
        .split(chunks[0]);

    grid::draw_grid(f, app, content[0], &colors, &layout.grid);
    chart::draw_chart_panel(f, app, content[1], &colors, &layout.chart);

    status_bar::draw_status(f, chunks[1], &app.status, app.prompt.as_ref(), &colors);
    keymap_bar::draw_keymap(
        f,
        chunks[2],
        app.prompt.is_some(),
        app.sequencer.is_running(),
        &colors,
    );

    if app.show_help {
        draw_help(f, &colors);
    }
}

fn draw_help(f: &mut Frame<'_>, colors: &ThemeColors) {
    let area = centered_rect(60, 80, f.area());
    f.render_widget(Clear, area);

    let lines: Vec<Line<'_>> = KEY_BINDINGS
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(
                    format!("{:>10}  ", key),
                    Style::default().fg(colors.label).add_modifier(Modifier::BOLD),
                ),
                Span::styled(*action, Style::default().fg(colors.text)),
            ])
        })
        .collect();

    let help = Paragraph::new(lines).block(
        Block::default()
            .title(" Keys ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.heading))
            .style(Style::default().bg(colors.bg)),
    );
    f.render_widget(help, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::PlotConfiguration;
    use crate::data::EntryGrid;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn draws_empty_state() {
        let mut app = App::new(PlotConfiguration::default(), 500);
        let screen = render(&mut app);
        assert!(screen.contains("Data (0 rows)"));
        assert!(screen.contains("press p to plot"));
        assert!(screen.contains("Ready"));
    }

    #[test]
    fn draws_fit_summary() {
        let mut app = App::new(
            PlotConfiguration::default()
                .with_style(crate::curve::PlotStyle::PolynomialFit)
                .with_polynomial_degree(1),
            500,
        );
        app.grid = EntryGrid::from_rows(vec![
            ("0".into(), "1".into()),
            ("1".into(), "3".into()),
            ("2".into(), "5".into()),
        ]);
        app.plot();
        let screen = render(&mut app);
        assert!(screen.contains("y = 2.0000x + 1.0000"));
        assert!(screen.contains("Line Plot"));
    }

    #[test]
    fn draws_prompt_and_help() {
        let mut app = App::new(PlotConfiguration::default(), 500);
        app.open_prompt(crate::app::PromptKind::Title);
        app.show_help = true;
        let screen = render(&mut app);
        assert!(screen.contains("Title: Line Plot_"));
        assert!(screen.contains("cycle plot style"));
    }
}
