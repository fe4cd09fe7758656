//! Keymap help bar UI component.

use crate::ui::ThemeColors;
use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

/// Every key binding, as shown in the help panel.
pub const KEY_BINDINGS: &[(&str, &str)] = &[
    ("q", "quit"),
    ("j/k ↑/↓", "move between rows"),
    ("Tab", "switch X/Y column"),
    ("Enter", "edit cell"),
    ("a / d", "add / delete row"),
    ("p", "plot"),
    ("Space", "start / stop animation"),
    ("+ / -", "animation faster / slower"),
    ("s", "cycle plot style"),
    ("i", "cycle interpolation"),
    ("[ / ]", "fewer / more samples"),
    ("< / >", "lower / raise polynomial degree"),
    ("L", "toggle LaTeX labels"),
    ("t", "edit title"),
    ("x / y", "edit axis label"),
    ("o", "import CSV/TSV"),
    ("e", "export PNG/SVG"),
    ("c", "copy equation"),
    ("T", "cycle theme"),
    ("?", "toggle this help"),
];

/// Draw the keymap help bar.
pub fn draw_keymap(
    f: &mut Frame<'_>,
    area: Rect,
    prompt_active: bool,
    animating: bool,
    colors: &ThemeColors,
) {
    let keymap_text = if prompt_active {
        "Enter:apply | Esc:cancel | Type to edit"
    } else if animating {
        "Space:stop | +-:speed | q:quit"
    } else {
        "q:quit | jk:nav | Tab:col | Enter:edit | a/d:row | p:plot | Space:animate | s:style | i:interp | e:export | ?:help"
    };

    let paragraph =
        Paragraph::new(keymap_text).style(Style::default().fg(colors.text).bg(colors.bg));

    f.render_widget(paragraph, area);
}
