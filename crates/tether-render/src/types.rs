//! Basic geometric and color types shared by the render collaborator and widgets.

/// A size in 2D space (width and height), in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Check if the size has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

impl From<(f32, f32)> for Size {
    fn from((width, height): (f32, f32)) -> Self {
        Self { width, height }
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
        }
    }
}

/// An opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a color from 8-bit channels.
    #[inline]
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` hex string (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self::from_rgb8(r, g, b))
    }

    /// Format as a lowercase `#rrggbb` string.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub const BLACK: Self = Self::from_rgb8(0, 0, 0);
    pub const WHITE: Self = Self::from_rgb8(255, 255, 255);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_is_empty() {
        assert!(Size::ZERO.is_empty());
        assert!(Size::new(10.0, 0.0).is_empty());
        assert!(!Size::new(18.0, 18.0).is_empty());
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::from_hex("#ff8000"), Some(Color::from_rgb8(255, 128, 0)));
        assert_eq!(Color::from_hex("00ff00"), Some(Color::from_rgb8(0, 255, 0)));
        assert_eq!(Color::from_hex("#fff"), None);
        assert_eq!(Color::from_hex("#gg0000"), None);
        assert_eq!(Color::from_rgb8(1, 2, 255).to_hex(), "#0102ff");
    }
}
