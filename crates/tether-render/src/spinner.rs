//! Spinner graphics and the frame renderer that rotates them.
//!
//! A [`SpinnerGraphic`] is a parsed SVG document. A [`FrameRenderer`] turns
//! it into an [`Icon`] for a given rotation angle, icon size, and display
//! scale factor. Widgets only ever see the trait, so tests can substitute a
//! recording renderer.
//!
//! # Example
//!
//! ```
//! use tether_render::{FrameRenderer, IconSize, SpinnerGraphic, SvgSpinnerRenderer};
//!
//! let graphic = SpinnerGraphic::default_spinner();
//! let renderer = SvgSpinnerRenderer::new(graphic);
//!
//! let frame = renderer.render_frame(90.0, IconSize::default(), 2.0);
//! let pixels = frame.pixels().unwrap();
//! assert_eq!((pixels.width(), pixels.height()), (36, 36));
//! ```

use std::fmt;
use std::sync::Arc;

use resvg::tiny_skia;
use resvg::usvg;

use crate::error::{RenderError, RenderResult};
use crate::icon::{Icon, IconPixels, IconSize};
use crate::types::{Color, Size};

/// The built-in spinner: an open dashed ring drawn in `currentColor`.
pub const DEFAULT_SPINNER_SVG: &str = r#"<svg viewBox="0 0 50 50" xmlns="http://www.w3.org/2000/svg">
  <circle cx="25" cy="25" r="20"
          fill="none"
          stroke="currentColor"
          stroke-width="4"
          stroke-linecap="round"
          stroke-dasharray="31.4 31.4"/>
</svg>
"#;

const CURRENT_COLOR: &str = "currentColor";

/// A parsed, validated vector graphic used as the spinner.
#[derive(Clone)]
pub struct SpinnerGraphic {
    source: Arc<str>,
    tree: Arc<usvg::Tree>,
    natural_size: Size,
}

impl SpinnerGraphic {
    /// Parse an SVG document.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidGraphic`] if the document is not valid SVG.
    pub fn from_svg(svg: &str) -> RenderResult<Self> {
        let options = usvg::Options::default();
        let tree = usvg::Tree::from_str(svg, &options)
            .map_err(|e| RenderError::InvalidGraphic(e.to_string()))?;

        let size = tree.size();
        let natural_size = Size::new(size.width(), size.height());
        if natural_size.is_empty() {
            return Err(RenderError::InvalidGraphic("graphic has no area".into()));
        }

        Ok(Self {
            source: Arc::from(svg),
            tree: Arc::new(tree),
            natural_size,
        })
    }

    /// The built-in spinner graphic.
    pub fn default_spinner() -> Self {
        match Self::from_svg(DEFAULT_SPINNER_SVG) {
            Ok(graphic) => graphic,
            Err(e) => unreachable!("built-in spinner failed to parse: {e}"),
        }
    }

    /// Re-parse the graphic with every `currentColor` replaced by `color`.
    pub fn with_color(&self, color: Color) -> RenderResult<Self> {
        let recolored = self.source.replace(CURRENT_COLOR, &color.to_hex());
        Self::from_svg(&recolored)
    }

    /// The SVG text this graphic was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Size declared by the document's `width`/`height` or `viewBox`.
    pub fn natural_size(&self) -> Size {
        self.natural_size
    }

    /// Render into straight (non-premultiplied) RGBA pixels.
    ///
    /// The graphic is fitted to `size`, rotated clockwise by `angle` degrees
    /// about the centre, and rasterised at `size * scale_factor` physical
    /// pixels on a transparent background. Returns `None` if the pixel
    /// dimensions cannot be allocated.
    pub fn render_rgba(&self, angle: f32, size: IconSize, scale_factor: f32) -> Option<IconPixels> {
        let scale = if scale_factor.is_finite() && scale_factor > 0.0 {
            scale_factor
        } else {
            1.0
        };
        let width = (size.width as f32 * scale).round().max(1.0) as u32;
        let height = (size.height as f32 * scale).round().max(1.0) as u32;
        let mut pixmap = tiny_skia::Pixmap::new(width, height)?;

        let logical = size.to_size();
        let sx = logical.width / self.natural_size.width;
        let sy = logical.height / self.natural_size.height;
        let transform = tiny_skia::Transform::from_scale(scale, scale)
            .pre_concat(tiny_skia::Transform::from_rotate_at(
                angle,
                logical.width / 2.0,
                logical.height / 2.0,
            ))
            .pre_scale(sx, sy);

        resvg::render(&self.tree, transform, &mut pixmap.as_mut());

        let data = pixmap.data();
        let mut rgba = Vec::with_capacity(data.len());
        for chunk in data.chunks_exact(4) {
            let a = chunk[3] as f32 / 255.0;
            if a > 0.0 {
                rgba.push((chunk[0] as f32 / a).min(255.0) as u8);
                rgba.push((chunk[1] as f32 / a).min(255.0) as u8);
                rgba.push((chunk[2] as f32 / a).min(255.0) as u8);
                rgba.push(chunk[3]);
            } else {
                rgba.extend_from_slice(&[0, 0, 0, 0]);
            }
        }

        IconPixels::new(width, height, rgba).ok()
    }
}

impl Default for SpinnerGraphic {
    fn default() -> Self {
        Self::default_spinner()
    }
}

impl fmt::Debug for SpinnerGraphic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpinnerGraphic")
            .field("natural_size", &self.natural_size)
            .finish_non_exhaustive()
    }
}

/// Produces one spinner frame as an icon.
///
/// Rendering is synchronous and runs on the event-loop thread.
pub trait FrameRenderer: Send + Sync {
    /// Render the frame for `angle_degrees` at `size` logical pixels.
    fn render_frame(&self, angle_degrees: f32, size: IconSize, scale_factor: f32) -> Icon;
}

/// Rasterises a [`SpinnerGraphic`] with resvg.
#[derive(Debug, Clone, Default)]
pub struct SvgSpinnerRenderer {
    graphic: SpinnerGraphic,
}

impl SvgSpinnerRenderer {
    pub fn new(graphic: SpinnerGraphic) -> Self {
        Self { graphic }
    }

    pub fn graphic(&self) -> &SpinnerGraphic {
        &self.graphic
    }
}

impl FrameRenderer for SvgSpinnerRenderer {
    fn render_frame(&self, angle_degrees: f32, size: IconSize, scale_factor: f32) -> Icon {
        match self.graphic.render_rgba(angle_degrees, size, scale_factor) {
            Some(pixels) => Icon::from_pixels(pixels),
            None => {
                tracing::warn!(
                    target: "tether_render::spinner",
                    ?size,
                    scale_factor,
                    "could not allocate spinner frame"
                );
                Icon::empty()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A square that fills only the top-left quadrant of its view box.
    const QUADRANT_SVG: &str = r#"<svg viewBox="0 0 20 20" xmlns="http://www.w3.org/2000/svg">
  <rect x="0" y="0" width="10" height="10" fill="currentColor"/>
</svg>"#;

    #[test]
    fn test_rejects_invalid_svg() {
        assert!(matches!(
            SpinnerGraphic::from_svg("<svg"),
            Err(RenderError::InvalidGraphic(_))
        ));
        assert!(matches!(
            SpinnerGraphic::from_svg("not svg at all"),
            Err(RenderError::InvalidGraphic(_))
        ));
    }

    #[test]
    fn test_default_spinner_parses() {
        let graphic = SpinnerGraphic::default_spinner();
        assert_eq!(graphic.natural_size(), Size::new(50.0, 50.0));
    }

    #[test]
    fn test_frame_dimensions_follow_scale_factor() {
        let graphic = SpinnerGraphic::from_svg(QUADRANT_SVG).unwrap();
        let size = IconSize::new(20, 10).unwrap();

        let pixels = graphic.render_rgba(0.0, size, 1.5).unwrap();
        assert_eq!((pixels.width(), pixels.height()), (30, 15));

        let fallback = graphic.render_rgba(0.0, size, f32::NAN).unwrap();
        assert_eq!((fallback.width(), fallback.height()), (20, 10));
    }

    #[test]
    fn test_rotation_moves_content() {
        let graphic = SpinnerGraphic::from_svg(QUADRANT_SVG)
            .unwrap()
            .with_color(Color::from_rgb8(255, 0, 0))
            .unwrap();
        let size = IconSize::square(20).unwrap();

        let upright = graphic.render_rgba(0.0, size, 1.0).unwrap();
        assert_eq!(upright.pixel(5, 5), Some([255, 0, 0, 255]));
        assert_eq!(upright.pixel(15, 5).map(|p| p[3]), Some(0));

        // Clockwise quarter turn carries the top-left quadrant to the top-right.
        let turned = graphic.render_rgba(90.0, size, 1.0).unwrap();
        assert_eq!(turned.pixel(15, 5), Some([255, 0, 0, 255]));
        assert_eq!(turned.pixel(5, 5).map(|p| p[3]), Some(0));
    }

    #[test]
    fn test_with_color_replaces_current_color() {
        let graphic = SpinnerGraphic::default_spinner()
            .with_color(Color::from_hex("#336699").unwrap())
            .unwrap();
        assert!(graphic.source().contains("#336699"));
        assert!(!graphic.source().contains(CURRENT_COLOR));
    }

    #[test]
    fn test_renderer_produces_distinct_frames() {
        let renderer = SvgSpinnerRenderer::default();
        let a = renderer.render_frame(0.0, IconSize::default(), 1.0);
        let b = renderer.render_frame(0.0, IconSize::default(), 1.0);
        assert!(a.pixels().is_some());
        assert_ne!(a, b);
    }
}
