//! Axis and title labels: math-mode rendering with a superscript fallback.

use crate::curve::PlotConfiguration;
use crate::error::{PlotError, Result};

/// Unicode superscript for a character, if one exists.
fn superscript(c: char) -> Option<char> {
    let s = match c {
        '0' => '⁰',
        '1' => '¹',
        '2' => '²',
        '3' => '³',
        '4' => '⁴',
        '5' => '⁵',
        '6' => '⁶',
        '7' => '⁷',
        '8' => '⁸',
        '9' => '⁹',
        'a' => 'ᵃ',
        'b' => 'ᵇ',
        'c' | 'C' => 'ᶜ',
        'd' => 'ᵈ',
        'e' => 'ᵉ',
        'f' | 'F' => 'ᶠ',
        'g' => 'ᵍ',
        'h' => 'ʰ',
        'i' => 'ⁱ',
        'j' => 'ʲ',
        'k' => 'ᵏ',
        'l' => 'ˡ',
        'm' => 'ᵐ',
        'n' => 'ⁿ',
        'o' => 'ᵒ',
        'p' => 'ᵖ',
        'r' => 'ʳ',
        's' | 'S' => 'ˢ',
        't' => 'ᵗ',
        'u' => 'ᵘ',
        'v' => 'ᵛ',
        'w' => 'ʷ',
        'x' | 'X' => 'ˣ',
        'y' | 'Y' => 'ʸ',
        'z' | 'Z' => 'ᶻ',
        'A' => 'ᴬ',
        'B' => 'ᴮ',
        'D' => 'ᴰ',
        'E' => 'ᴱ',
        'G' => 'ᴳ',
        'H' => 'ᴴ',
        'I' => 'ᴵ',
        'J' => 'ᴶ',
        'K' => 'ᴷ',
        'L' => 'ᴸ',
        'M' => 'ᴹ',
        'N' => 'ᴺ',
        'O' => 'ᴼ',
        'P' => 'ᴾ',
        'R' => 'ᴿ',
        'T' => 'ᵀ',
        'U' => 'ᵁ',
        'V' => 'ⱽ',
        'W' => 'ᵂ',
        '+' => '⁺',
        '-' => '⁻',
        '=' => '⁼',
        '(' => '⁽',
        ')' => '⁾',
        ':' => '︓',
        '>' => '˃',
        '<' => '˂',
        '/' => 'ᐟ',
        '\\' => '˂',
        _ => return None,
    };
    Some(s)
}

/// Length in chars of a valid exponent at the start of `rest`, if any.
///
/// Accepted forms: `-?digits`, `(-?anything-without-parens)`, `letters`.
fn exponent_len(rest: &[char]) -> Option<usize> {
    let first = *rest.first()?;

    if first == '(' {
        let close = rest.iter().skip(1).position(|&c| c == '(' || c == ')')? + 1;
        // A nested '(' or an empty body is not an exponent.
        return (rest[close] == ')' && close > 1).then_some(close + 1);
    }

    let sign = usize::from(first == '-');
    let digits = rest[sign..].iter().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        return Some(sign + digits);
    }

    let letters = rest.iter().take_while(|c| c.is_ascii_alphabetic()).count();
    (letters > 0).then_some(letters)
}

/// Rewrite every `^exponent` as Unicode superscripts.
///
/// Parentheses wrapping the exponent are dropped. Characters without a
/// superscript glyph are kept as they are. A caret with no valid exponent
/// after it stays literal.
pub fn format_superscript(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '^' {
            if let Some(len) = exponent_len(&chars[i + 1..]) {
                let mut exp = &chars[i + 1..i + 1 + len];
                if exp.first() == Some(&'(') && exp.last() == Some(&')') {
                    exp = &exp[1..exp.len() - 1];
                }
                out.extend(exp.iter().map(|&c| superscript(c).unwrap_or(c)));
                i += 1 + len;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }

    out
}

/// Typesets `$…$` math-mode text for a drawing surface.
pub trait MathRenderer {
    /// Render a math-mode source string.
    fn render(&self, source: &str) -> Result<String>;
}

/// Surface with no math typesetting, such as a terminal or a bitmap.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMath;

impl MathRenderer for NoMath {
    fn render(&self, _source: &str) -> Result<String> {
        Err(PlotError::MathUnavailable(
            "no TeX typesetting on this surface".to_string(),
        ))
    }
}

/// Keeps the `$…$` source for consumers that typeset it themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct Delimited;

impl MathRenderer for Delimited {
    fn render(&self, source: &str) -> Result<String> {
        Ok(source.to_string())
    }
}

/// Resolved labels ready to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    /// X axis label.
    pub x: String,
    /// Y axis label.
    pub y: String,
    /// Graph title.
    pub title: String,
    /// Math mode was requested but the superscript fallback was used.
    pub fallback: bool,
}

/// Build labels from the configuration. Empty axis labels become `X` and `Y`.
pub fn resolve_labels(config: &PlotConfiguration, renderer: &dyn MathRenderer) -> Labels {
    let x = non_empty(&config.axis_labels.0, "X");
    let y = non_empty(&config.axis_labels.1, "Y");
    let title = config.title.as_str();

    if config.use_latex {
        let math = |label: &str| renderer.render(&format!("${}$", label));
        match (math(x), math(y), math(title)) {
            (Ok(x), Ok(y), Ok(title)) => {
                return Labels {
                    x,
                    y,
                    title,
                    fallback: false,
                };
            }
            (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
                tracing::warn!("LaTeX rendering failed: {}", e);
                tracing::warn!("Falling back to standard text rendering with superscript formatting");
            }
        }

        return Labels {
            fallback: true,
            ..superscript_labels(x, y, title)
        };
    }

    superscript_labels(x, y, title)
}

fn superscript_labels(x: &str, y: &str, title: &str) -> Labels {
    Labels {
        x: format_superscript(x),
        y: format_superscript(y),
        title: format_superscript(title),
        fallback: false,
    }
}

fn non_empty<'a>(text: &'a str, default: &'a str) -> &'a str {
    if text.trim().is_empty() {
        default
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn superscript_forms() {
        assert_eq!(format_superscript("x^2"), "x²");
        assert_eq!(format_superscript("x^-3"), "x⁻³");
        assert_eq!(format_superscript("x^(a+b)"), "xᵃ⁺ᵇ");
        assert_eq!(format_superscript("e^iq"), "eⁱq");
        assert_eq!(format_superscript("t^q"), "tq");
    }

    #[test]
    fn superscript_leaves_other_text_alone() {
        assert_eq!(format_superscript("Distance (m)"), "Distance (m)");
        assert_eq!(format_superscript("a^ b"), "a^ b");
        assert_eq!(format_superscript("x^"), "x^");
        assert_eq!(format_superscript("x^((a))"), "x^((a))");
        assert_eq!(format_superscript("m/s^2 and s^10"), "m/s² and s¹⁰");
    }

    #[test]
    fn superscript_keeps_unicode() {
        assert_eq!(format_superscript("Δt^2 (µs)"), "Δt² (µs)");
    }

    #[test]
    fn defaults_for_empty_axis_labels() {
        let labels = resolve_labels(&PlotConfiguration::default(), &NoMath);
        assert_eq!(labels.x, "X");
        assert_eq!(labels.y, "Y");
        assert_eq!(labels.title, "Line Plot");
        assert!(!labels.fallback);
    }

    #[test]
    fn latex_without_typesetting_falls_back() {
        let mut config = PlotConfiguration::default();
        config.use_latex = true;
        config.axis_labels = ("t^2".into(), "v".into());
        let labels = resolve_labels(&config, &NoMath);
        assert!(labels.fallback);
        assert_eq!(labels.x, "t²");
    }

    #[test]
    fn latex_with_typesetting_wraps_math_mode() {
        let mut config = PlotConfiguration::default();
        config.use_latex = true;
        config.title = "E = mc^2".into();
        let labels = resolve_labels(&config, &Delimited);
        assert!(!labels.fallback);
        assert_eq!(labels.title, "$E = mc^2$");
        assert_eq!(labels.x, "$X$");
    }
}
