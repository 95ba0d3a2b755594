/// SGR escape formatting for syntect styles.
///
/// Only the foreground colour and font style are emitted; theme backgrounds
/// are left to the terminal so output blends with the user's colour scheme.
///
/// Colour depth:
/// - `TrueColor`: `ESC[38;2;R;G;Bm`, used when `COLORTERM` is `truecolor` or `24bit`.
/// - `Ansi256`: `ESC[38;5;Nm`, nearest entry of the xterm 6×6×6 cube or grey ramp.
use syntect::highlighting::{Color, FontStyle, Style};

/// Resets every SGR attribute.
pub const RESET: &str = "\x1b[0m";

/// Dim attribute, used for the line-number gutter.
pub const DIM: &str = "\x1b[2m";

/// How many colours the terminal can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorDepth {
    TrueColor,
    Ansi256,
}

impl ColorDepth {
    /// Pick the depth advertised by the `COLORTERM` environment variable.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_colorterm(std::env::var("COLORTERM").ok().as_deref())
    }

    fn from_colorterm(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("truecolor") || v.eq_ignore_ascii_case("24bit") => {
                Self::TrueColor
            }
            _ => Self::Ansi256,
        }
    }
}

/// Format the SGR sequence that switches to `style`.
///
/// Returns an empty string when the style carries nothing to emit.
#[must_use]
pub fn sgr(style: Style, depth: ColorDepth) -> String {
    let mut params: Vec<String> = Vec::with_capacity(4);

    if style.font_style.contains(FontStyle::BOLD) {
        params.push("1".to_owned());
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        params.push("3".to_owned());
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        params.push("4".to_owned());
    }

    // Alpha 0 marks "no colour" in some themes.
    let fg = style.foreground;
    if fg.a != 0 {
        params.push(match depth {
            ColorDepth::TrueColor => format!("38;2;{};{};{}", fg.r, fg.g, fg.b),
            ColorDepth::Ansi256 => format!("38;5;{}", ansi256(fg)),
        });
    }

    if params.is_empty() {
        return String::new();
    }

    format!("\x1b[{}m", params.join(";"))
}

/// Nearest xterm-256 palette index for an RGB colour.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn ansi256(color: Color) -> u8 {
    let Color { r, g, b, .. } = color;

    if r == g && g == b {
        return match r {
            0..=7 => 16,
            249..=255 => 231,
            // 24-step grey ramp, 232..=255
            v => 232 + ((u16::from(v) - 8) * 24 / 247) as u8,
        };
    }

    16 + 36 * cube_step(r) + 6 * cube_step(g) + cube_step(b)
}

/// Map a channel value to the 0..=5 step of the xterm colour cube.
fn cube_step(v: u8) -> u8 {
    match v {
        0..=47 => 0,
        48..=114 => 1,
        v => (v - 35) / 40,
    }
}
