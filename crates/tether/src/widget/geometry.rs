//! Size hints for widget layout.
//!
//! A [`SizeHint`] is what a widget reports to whoever lays it out: the size
//! it would like, plus optional lower and upper bounds.

use tether_render::Size;

/// Size hint for layout negotiation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeHint {
    /// The preferred size for the widget to display optimally.
    pub preferred: Size,

    /// The minimum acceptable size. If `None`, the widget can shrink to zero.
    pub minimum: Option<Size>,

    /// The maximum size. If `None`, the widget can grow indefinitely.
    pub maximum: Option<Size>,
}

impl Default for SizeHint {
    fn default() -> Self {
        Self {
            preferred: Size::ZERO,
            minimum: None,
            maximum: None,
        }
    }
}

impl SizeHint {
    /// Create a new size hint with the specified preferred size.
    pub fn new(preferred: Size) -> Self {
        Self {
            preferred,
            minimum: None,
            maximum: None,
        }
    }

    /// Set the minimum size.
    pub fn with_minimum(mut self, minimum: Size) -> Self {
        self.minimum = Some(minimum);
        self
    }

    /// Widen the preferred size by `extra` horizontally and grow its height
    /// to at least `min_height`. Bounds are adjusted the same way.
    pub fn widened(self, extra: f32, min_height: f32) -> Self {
        let grow = |size: Size| Size::new(size.width + extra, size.height.max(min_height));
        Self {
            preferred: grow(self.preferred),
            minimum: self.minimum.map(grow),
            maximum: self.maximum.map(grow),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unbounded() {
        let hint = SizeHint::default();
        assert_eq!(hint.preferred, Size::ZERO);
        assert_eq!(hint.minimum, None);
        assert_eq!(hint.maximum, None);
    }

    #[test]
    fn test_widened() {
        let hint = SizeHint::new(Size::new(80.0, 24.0)).with_minimum(Size::new(64.0, 24.0));
        let wide = hint.widened(24.0, 30.0);

        assert_eq!(wide.preferred, Size::new(104.0, 30.0));
        assert_eq!(wide.minimum, Some(Size::new(88.0, 30.0)));
        assert_eq!(wide.maximum, None);
    }
}
