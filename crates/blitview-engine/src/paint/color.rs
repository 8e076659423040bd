use std::fmt;
use std::str::FromStr;

/// Straight-alpha sRGB RGBA color, components in `[0, 1]`.
///
/// The canvas stores sRGB-encoded bytes, so this value is written to it
/// unchanged by the fill kernel.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from sRGB bytes (`0`–`255`).
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Components clamped to `[0, 1]`, in RGBA order.
    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
            self.a.clamp(0.0, 1.0),
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::RED
    }
}

/// Error returned when a hex color literal cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError(String);

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color `{}`: expected #rrggbb or #rrggbbaa", self.0)
    }
}

impl std::error::Error for ParseColorError {}

impl FromStr for Color {
    type Err = ParseColorError;

    /// Parses `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);

        // `from_str_radix` alone would also accept a leading `+` per pair.
        if !(hex.len() == 6 || hex.len() == 8) || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }

        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        let a = if hex.len() == 8 { byte(6)? } else { 255 };

        Ok(Self::from_srgb_u8(byte(0)?, byte(2)?, byte(4)?, a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_fill_is_opaque_red() {
        assert_eq!(Color::default().to_array(), [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn parses_rgb_hex() {
        let c: Color = "#00ff00".parse().unwrap();
        assert_eq!(c.to_array(), [0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn parses_rgba_hex_without_hash() {
        let c: Color = "ff000080".parse().unwrap();
        assert_eq!(c.r, 1.0);
        assert!((c.a - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_bad_length() {
        assert!("#fff".parse::<Color>().is_err());
    }

    #[test]
    fn rejects_non_hex_digits() {
        assert!("#gg0000".parse::<Color>().is_err());
    }

    #[test]
    fn rejects_sign_characters() {
        assert!("#+f+f+f".parse::<Color>().is_err());
        assert!("+f+f+f+f".parse::<Color>().is_err());
        assert!("#-f0000".parse::<Color>().is_err());
    }

    #[test]
    fn rejects_multibyte_input() {
        assert!("#ffé000".parse::<Color>().is_err());
    }

    #[test]
    fn to_array_clamps_out_of_range() {
        let c = Color::new(2.0, -1.0, 0.5, 1.5);
        assert_eq!(c.to_array(), [1.0, 0.0, 0.5, 1.0]);
    }
}
