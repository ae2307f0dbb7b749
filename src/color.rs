use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

static RGB_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^rgba?\(\s*([^,()]+),\s*([^,()]+),\s*([^,()]+)(?:,\s*([^,()]+))?\s*\)$").unwrap()
});

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ColorError {
    #[error("can't figure out color `{0}`")]
    Unparseable(String),
    #[error("invalid color component in `{0}`")]
    InvalidComponent(String),
}

/// An sRGB color with an optional alpha channel.
///
/// Channels are kept as parsed; `scale` truncates them back to integers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub alpha: Option<f64>,
}

impl Color {
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self {
            r,
            g,
            b,
            alpha: None,
        }
    }

    /// Darken (`amount < 1`) or lighten (`amount > 1`) the color.
    pub fn scale(self, amount: f64) -> Self {
        let channel = |value: f64| (amount * value).clamp(0.0, 255.0).trunc();
        Self {
            r: channel(self.r),
            g: channel(self.g),
            b: channel(self.b),
            alpha: self.alpha,
        }
    }

    pub fn to_rgba(&self, opacity: f64) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, opacity)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.alpha {
            Some(alpha) => write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, alpha),
            None => write!(f, "rgb({},{},{})", self.r, self.g, self.b),
        }
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ColorError::InvalidComponent(input.to_string()));
        }
        let is_rgba = trimmed.starts_with("rgba(");
        if !is_rgba && !trimmed.starts_with("rgb(") {
            return Err(ColorError::Unparseable(input.to_string()));
        }
        let caps = RGB_RE
            .captures(trimmed)
            .ok_or_else(|| ColorError::InvalidComponent(input.to_string()))?;
        let component = |idx: usize| -> Result<f64, ColorError> {
            caps.get(idx)
                .and_then(|m| m.as_str().trim().parse::<f64>().ok())
                .ok_or_else(|| ColorError::InvalidComponent(input.to_string()))
        };
        let alpha = if is_rgba {
            Some(component(4)?)
        } else if caps.get(4).is_some() {
            return Err(ColorError::InvalidComponent(input.to_string()));
        } else {
            None
        };
        Ok(Self {
            r: component(1)?,
            g: component(2)?,
            b: component(3)?,
            alpha,
        })
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(f64::from);
    // Digits past the sixth (e.g. an `#RRGGBBAA` alpha pair) are ignored.
    match hex.len() {
        len if len >= 6 => Some(Color::rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => {
            let expand = |idx: usize| {
                let digit = &hex[idx..idx + 1];
                channel(&format!("{digit}{digit}"))
            };
            Some(Color::rgb(expand(0)?, expand(1)?, expand(2)?))
        }
        _ => None,
    }
}
