//! Shared button state.
//!
//! [`ButtonBase`] holds what every push-style button needs: a text label,
//! the icon currently shown, the icon display size, and text metrics for
//! the default size hint. Concrete buttons embed it and add behaviour.

use tether_render::{Icon, IconSize, Size};

use crate::widget::{SizeHint, WidgetBase};

/// Horizontal padding on each side of the label.
const HORIZONTAL_PADDING: f32 = 8.0;
/// Vertical padding above and below the label.
const VERTICAL_PADDING: f32 = 4.0;
const MIN_WIDTH: f32 = 64.0;
const MIN_HEIGHT: f32 = 24.0;

/// Average advance of a glyph relative to the font size.
const AVERAGE_GLYPH_ADVANCE: f32 = 0.6;
const LINE_HEIGHT: f32 = 1.2;

/// Common functionality for button widgets.
#[derive(Debug)]
pub struct ButtonBase {
    /// Widget base for common widget functionality.
    base: WidgetBase,

    /// The button's text label.
    text: String,

    /// The icon currently shown. Empty means text only.
    icon: Icon,

    /// Display size of the icon, in logical pixels.
    icon_size: IconSize,

    /// Font size in points used for text metrics.
    font_size: f32,

    /// Physical pixels per logical pixel of the display the button is on.
    scale_factor: f32,
}

impl ButtonBase {
    /// Create a button base registered as an object of type `T`.
    pub fn new<T: 'static>(text: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::new::<T>(),
            text: text.into(),
            icon: Icon::empty(),
            icon_size: IconSize::default(),
            font_size: 14.0,
            scale_factor: 1.0,
        }
    }

    pub fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    pub fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    // =========================================================================
    // Text
    // =========================================================================

    /// Get the button's text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Set the button's text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let new_text = text.into();
        if self.text != new_text {
            self.text = new_text;
            self.base.update();
        }
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn set_font_size(&mut self, font_size: f32) {
        if (self.font_size - font_size).abs() > f32::EPSILON {
            self.font_size = font_size;
            self.base.update();
        }
    }

    // =========================================================================
    // Icon
    // =========================================================================

    /// The icon currently shown.
    pub fn icon(&self) -> &Icon {
        &self.icon
    }

    /// Replace the shown icon.
    pub fn set_icon(&mut self, icon: Icon) {
        if self.icon != icon {
            self.icon = icon;
            self.base.update();
        }
    }

    pub fn icon_size(&self) -> IconSize {
        self.icon_size
    }

    pub fn set_icon_size(&mut self, size: IconSize) {
        if self.icon_size != size {
            self.icon_size = size;
            self.base.update();
        }
    }

    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    /// Set the device pixel ratio. Non-positive or non-finite values are ignored.
    pub fn set_scale_factor(&mut self, scale_factor: f32) {
        if scale_factor.is_finite() && scale_factor > 0.0 && self.scale_factor != scale_factor {
            self.scale_factor = scale_factor;
            self.base.update();
        }
    }

    // =========================================================================
    // Size Hint
    // =========================================================================

    /// Estimated size of the text label.
    pub fn text_size(&self) -> Size {
        let height = self.font_size * LINE_HEIGHT;
        let glyphs = self.text.chars().count() as f32;
        Size::new(glyphs * self.font_size * AVERAGE_GLYPH_ADVANCE, height)
    }

    /// Size hint for the label alone.
    ///
    /// Buttons that reserve room for an icon add it on top of this.
    pub fn default_size_hint(&self) -> SizeHint {
        let text_size = self.text_size();
        let preferred = Size::new(
            (text_size.width + HORIZONTAL_PADDING * 2.0).max(MIN_WIDTH),
            (text_size.height + VERTICAL_PADDING * 2.0).max(MIN_HEIGHT),
        );

        SizeHint::new(preferred).with_minimum(Size::new(MIN_WIDTH, MIN_HEIGHT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Marker;

    #[test]
    fn test_short_text_uses_minimum() {
        let button = ButtonBase::new::<Marker>("Go");
        let hint = button.default_size_hint();
        assert_eq!(hint.preferred, Size::new(MIN_WIDTH, MIN_HEIGHT));
    }

    #[test]
    fn test_long_text_grows() {
        let mut button = ButtonBase::new::<Marker>("");
        button.set_font_size(10.0);
        button.set_text("0123456789");

        let hint = button.default_size_hint();
        // 10 glyphs * 6px + 16px padding
        assert!((hint.preferred.width - 76.0).abs() < 1e-4);
        assert_eq!(hint.preferred.height, MIN_HEIGHT);
    }

    #[test]
    fn test_set_icon_requests_repaint() {
        let mut button = ButtonBase::new::<Marker>("Sync");
        button.widget_base_mut().take_repaint();

        button.set_icon(Icon::empty());
        assert!(!button.widget_base().needs_repaint());

        button.set_icon(Icon::named("view-refresh"));
        assert!(button.widget_base_mut().take_repaint());
        assert_eq!(button.icon().name(), Some("view-refresh"));
    }

    #[test]
    fn test_scale_factor_ignores_invalid() {
        let mut button = ButtonBase::new::<Marker>("Sync");
        button.set_scale_factor(0.0);
        button.set_scale_factor(f32::NAN);
        assert_eq!(button.scale_factor(), 1.0);
        button.set_scale_factor(2.0);
        assert_eq!(button.scale_factor(), 2.0);
    }
}
