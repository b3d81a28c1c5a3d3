use std::fmt;
use std::str::FromStr;

/// Linear RGB color parsed from a `#rrggbb` hex string.
///
/// Hex strings are treated as sRGB and converted to linear on parse, so the
/// values can be written straight into the HDR scene target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid hex color {0:?}")]
pub struct InvalidColor(pub String);

impl Rgb {
    pub fn from_hex(s: &str) -> Result<Self, InvalidColor> {
        let digits = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(InvalidColor(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| InvalidColor(s.to_string()))
        };
        Ok(Self::from_srgb8(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn from_srgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: srgb_to_linear(r as f32 / 255.0),
            g: srgb_to_linear(g as f32 / 255.0),
            b: srgb_to_linear(b as f32 / 255.0),
        }
    }

    /// Hex form for `<input type="color">`.
    pub fn to_hex(&self) -> String {
        let q = |c: f32| (linear_to_srgb(c.clamp(0.0, 1.0)) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", q(self.r), q(self.g), q(self.b))
    }

    #[inline]
    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    #[inline]
    pub fn with_alpha(&self, a: f32) -> [f32; 4] {
        [self.r, self.g, self.b, a]
    }
}

impl FromStr for Rgb {
    type Err = InvalidColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
pub fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}
