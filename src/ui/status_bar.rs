//! Status bar UI component.

use crate::app::Prompt;
use crate::ui::ThemeColors;
use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

/// Draw the status bar, or the open prompt in its place.
pub fn draw_status(
    f: &mut Frame<'_>,
    area: Rect,
    status: &str,
    prompt: Option<&Prompt>,
    colors: &ThemeColors,
) {
    let text = match prompt {
        Some(prompt) => format!("{}: {}_", prompt.kind.caption(), prompt.buffer),
        None => status.to_string(),
    };

    let paragraph =
        Paragraph::new(text).style(Style::default().fg(colors.status_fg).bg(colors.status_bg));

    f.render_widget(paragraph, area);
}
