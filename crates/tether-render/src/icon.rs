//! Icon handles and icon sizes.
//!
//! An [`Icon`] is an opaque, cheaply cloneable handle. Widgets store and
//! compare icons but never look inside them; producing pixels is the job of
//! a [`FrameRenderer`](crate::FrameRenderer).

use std::fmt;
use std::sync::Arc;

use crate::error::{RenderError, RenderResult};
use crate::types::Size;

/// Largest icon edge accepted, in logical pixels.
pub const MAX_ICON_EDGE: u32 = 4096;

/// The pixel size an icon is displayed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconSize {
    pub width: u32,
    pub height: u32,
}

impl IconSize {
    /// Create an icon size, rejecting zero or oversized edges.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        if width == 0 || height == 0 || width > MAX_ICON_EDGE || height > MAX_ICON_EDGE {
            return Err(RenderError::InvalidIconSize {
                width: width as f32,
                height: height as f32,
            });
        }
        Ok(Self { width, height })
    }

    /// A square icon size.
    pub fn square(edge: u32) -> RenderResult<Self> {
        Self::new(edge, edge)
    }

    /// Convert to a floating point [`Size`].
    pub fn to_size(self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }
}

impl Default for IconSize {
    fn default() -> Self {
        Self {
            width: 18,
            height: 18,
        }
    }
}

impl TryFrom<Size> for IconSize {
    type Error = RenderError;

    /// Fractional sizes are rounded to the nearest pixel.
    fn try_from(size: Size) -> RenderResult<Self> {
        let invalid = || RenderError::InvalidIconSize {
            width: size.width,
            height: size.height,
        };

        if !size.width.is_finite() || !size.height.is_finite() {
            return Err(invalid());
        }
        let width = size.width.round();
        let height = size.height.round();
        if width < 1.0 || height < 1.0 {
            return Err(invalid());
        }
        if width > MAX_ICON_EDGE as f32 || height > MAX_ICON_EDGE as f32 {
            return Err(invalid());
        }

        Ok(Self {
            width: width as u32,
            height: height as u32,
        })
    }
}

impl From<IconSize> for Size {
    fn from(size: IconSize) -> Self {
        size.to_size()
    }
}

/// Premultiplication-free RGBA8 pixels.
#[derive(Clone, PartialEq, Eq)]
pub struct IconPixels {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl IconPixels {
    /// Wrap an RGBA8 buffer of `width * height * 4` bytes.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> RenderResult<Self> {
        if data.len() != width as usize * height as usize * 4 {
            return Err(RenderError::PixelBufferMismatch {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes, row major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The RGBA value at `(x, y)`, or `None` if out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }
}

impl fmt::Debug for IconPixels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IconPixels")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Where an icon's content comes from.
#[derive(Debug, Clone)]
pub enum IconSource {
    /// No icon.
    Empty,
    /// A named icon, resolved by the platform theme at display time.
    Named(Arc<str>),
    /// Pre-rendered pixels.
    Pixels(Arc<IconPixels>),
}

/// An opaque icon handle.
///
/// Equality compares names for named icons and buffer identity for pixel
/// icons, so two separately rendered frames are never equal even when their
/// pixels match.
#[derive(Debug, Clone)]
pub struct Icon {
    source: IconSource,
}

impl Icon {
    /// The empty icon.
    pub fn empty() -> Self {
        Self {
            source: IconSource::Empty,
        }
    }

    /// An icon referred to by theme name.
    pub fn named(name: impl AsRef<str>) -> Self {
        Self {
            source: IconSource::Named(Arc::from(name.as_ref())),
        }
    }

    /// An icon backed by rendered pixels.
    pub fn from_pixels(pixels: IconPixels) -> Self {
        Self {
            source: IconSource::Pixels(Arc::new(pixels)),
        }
    }

    pub fn source(&self) -> &IconSource {
        &self.source
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.source, IconSource::Empty)
    }

    /// The theme name, if this is a named icon.
    pub fn name(&self) -> Option<&str> {
        match &self.source {
            IconSource::Named(name) => Some(name),
            _ => None,
        }
    }

    /// The pixel buffer, if this icon was rendered.
    pub fn pixels(&self) -> Option<&IconPixels> {
        match &self.source {
            IconSource::Pixels(pixels) => Some(pixels),
            _ => None,
        }
    }
}

impl Default for Icon {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for Icon {
    fn eq(&self, other: &Self) -> bool {
        match (&self.source, &other.source) {
            (IconSource::Empty, IconSource::Empty) => true,
            (IconSource::Named(a), IconSource::Named(b)) => a == b,
            (IconSource::Pixels(a), IconSource::Pixels(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for Icon {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_size_from_size() {
        let size = IconSize::try_from(Size::new(18.0, 24.0)).unwrap();
        assert_eq!(size, IconSize::new(18, 24).unwrap());

        let rounded = IconSize::try_from(Size::new(15.6, 16.2)).unwrap();
        assert_eq!((rounded.width, rounded.height), (16, 16));
    }

    #[test]
    fn test_icon_size_rejects_invalid() {
        for size in [
            Size::new(0.0, 18.0),
            Size::new(18.0, -1.0),
            Size::new(f32::NAN, 18.0),
            Size::new(18.0, f32::INFINITY),
            Size::new(5000.0, 18.0),
        ] {
            assert!(
                matches!(IconSize::try_from(size), Err(RenderError::InvalidIconSize { .. })),
                "{size:?} should be rejected"
            );
        }
        assert!(IconSize::new(0, 1).is_err());
        assert!(IconSize::square(MAX_ICON_EDGE).is_ok());
    }

    #[test]
    fn test_icon_equality() {
        assert_eq!(Icon::empty(), Icon::default());
        assert_eq!(Icon::named("media-playback-start"), Icon::named("media-playback-start"));
        assert_ne!(Icon::named("a"), Icon::named("b"));
        assert_ne!(Icon::named("a"), Icon::empty());

        let pixels = IconPixels::new(1, 1, vec![0, 0, 0, 255]).unwrap();
        let first = Icon::from_pixels(pixels.clone());
        let second = Icon::from_pixels(pixels);
        assert_eq!(first, first.clone());
        assert_ne!(first, second);
    }

    #[test]
    fn test_pixels_validate_length() {
        assert!(matches!(
            IconPixels::new(2, 2, vec![0; 15]),
            Err(RenderError::PixelBufferMismatch { len: 15, .. })
        ));

        let pixels = IconPixels::new(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        assert_eq!(pixels.pixel(1, 0), Some([5, 6, 7, 8]));
        assert_eq!(pixels.pixel(2, 0), None);
    }
}
