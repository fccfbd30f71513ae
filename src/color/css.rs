//! Best-effort parsing of CSS color strings.
//!
//! `lch()` and `oklch()` are read straight into the perceptual pipeline so
//! out-of-gamut coordinates survive until display. Every other form (hex,
//! named colors, `rgb()`, `hsl()`, `hwb()`, `lab()`) goes through
//! `csscolorparser`.

use super::Color;
use crate::error::{GradientError, Result};

pub fn parse_css_color(input: &str) -> Result<Color> {
    let s = input.trim();

    if let Some(body) = function_body(s, "oklch") {
        let [l, c, h] = perceptual_args(input, body)?;
        return Ok(Color::from_oklch(l.fraction(), c.value, h.value));
    }
    if let Some(body) = function_body(s, "lch") {
        let [l, c, h] = perceptual_args(input, body)?;
        return Ok(Color::from_lch(l.value, c.value, h.value));
    }

    let parsed =
        csscolorparser::parse(s).map_err(|e| GradientError::color_parse(input, e.to_string()))?;
    Ok(Color::from_rgb(
        f64::from(parsed.r) * 255.0,
        f64::from(parsed.g) * 255.0,
        f64::from(parsed.b) * 255.0,
    ))
}

/// The text between the parentheses of `name(...)`, case-insensitive.
fn function_body<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    let open = s.find('(')?;
    if !s[..open].trim().eq_ignore_ascii_case(name) {
        return None;
    }
    Some(s[open + 1..].strip_suffix(')').unwrap_or(&s[open + 1..]))
}

#[derive(Debug, Clone, Copy)]
struct Arg {
    value: f64,
    percent: bool,
}

impl Arg {
    /// Percentages become `[0, 1]`, plain numbers pass through.
    fn fraction(self) -> f64 {
        if self.percent {
            self.value / 100.0
        } else {
            self.value
        }
    }
}

/// Three components plus an optional alpha, separated by spaces, commas or `/`.
fn perceptual_args(input: &str, body: &str) -> Result<[Arg; 3]> {
    if !input.trim_end().ends_with(')') {
        return Err(GradientError::color_parse(input, "missing closing parenthesis"));
    }
    let args = body
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            let (number, percent) = match token.strip_suffix('%') {
                Some(number) => (number, true),
                None => (token.strip_suffix("deg").unwrap_or(token), false),
            };
            number
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(|value| Arg { value, percent })
                .ok_or_else(|| {
                    GradientError::color_parse(input, format!("invalid number '{token}'"))
                })
        })
        .collect::<Result<Vec<_>>>()?;

    match args[..] {
        [a, b, c] | [a, b, c, _] => Ok([a, b, c]),
        _ => Err(GradientError::color_parse(
            input,
            format!("expected 3 components, got {}", args.len()),
        )),
    }
}
