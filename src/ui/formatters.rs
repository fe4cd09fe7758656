//! Shared formatting utilities for UI components.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Format a number with thousand separators.
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format a statistic value with smart precision.
pub fn format_stat_value(val: f64) -> String {
    if !val.is_finite() {
        return if val.is_nan() {
            "NaN".to_string()
        } else if val.is_sign_positive() {
            "+Inf".to_string()
        } else {
            "-Inf".to_string()
        };
    }
    if val == 0.0 {
        return "0".to_string();
    }
    format_at_scale(val, val.abs())
}

/// Format `[lo, hi]` with one precision, picked from the larger bound.
pub fn format_range(lo: f64, hi: f64) -> String {
    let scale = lo.abs().max(hi.abs());
    if !lo.is_finite() || !hi.is_finite() || scale == 0.0 {
        return format!("[{}, {}]", format_stat_value(lo), format_stat_value(hi));
    }
    format!(
        "[{}, {}]",
        format_at_scale(lo, scale),
        format_at_scale(hi, scale)
    )
}

fn format_at_scale(val: f64, scale: f64) -> String {
    if !(1e-3..1e6).contains(&scale) {
        format!("{:.3e}", val)
    } else if scale >= 100.0 {
        format!("{:.2}", val)
    } else if scale >= 1.0 {
        format!("{:.4}", val)
    } else {
        format!("{:.5}", val)
    }
}

/// Format an axis tick label, shorter than [`format_stat_value`].
pub fn format_axis_label(val: f64) -> String {
    if !val.is_finite() {
        return "?".to_string();
    }
    let abs_val = val.abs();
    if abs_val == 0.0 {
        "0".to_string()
    } else if !(1e-2..1e5).contains(&abs_val) {
        format!("{:.1e}", val)
    } else if abs_val >= 100.0 {
        format!("{:.0}", val)
    } else if abs_val >= 1.0 {
        format!("{:.1}", val)
    } else {
        format!("{:.2}", val)
    }
}

/// Truncate `text` to at most `width` terminal columns, marking the cut with `…`.
///
/// Superscript glyphs and other wide or combining characters are measured by
/// display width, not by byte or char count.
pub fn fit_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
