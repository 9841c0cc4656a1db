//! Widget base implementation.
//!
//! This module provides `WidgetBase`, the state every widget carries: its
//! object identity, enabled flag, and pending repaint request.

use tether_core::{global_registry, ObjectId, ObjectResult};

/// The base implementation for all widgets.
///
/// Widget implementations include this as a field and delegate common
/// operations to it. The widget is registered in the global object registry
/// on creation and removed from it when the base is dropped.
#[derive(Debug)]
pub struct WidgetBase {
    object_id: ObjectId,

    /// Whether the widget is enabled (can receive input).
    enabled: bool,

    /// Whether the widget needs to be repainted.
    needs_repaint: bool,
}

impl WidgetBase {
    /// Create a new widget base, registering `T` as the object's type.
    pub fn new<T: 'static>() -> Self {
        let object_id = global_registry().register::<T>();
        Self {
            object_id,
            enabled: true,
            needs_repaint: true,
        }
    }

    // =========================================================================
    // Object System Delegation
    // =========================================================================

    /// Get the widget's unique object ID.
    #[inline]
    pub fn object_id(&self) -> ObjectId {
        self.object_id
    }

    /// Get the widget's name.
    pub fn name(&self) -> String {
        global_registry()
            .object_name(self.object_id)
            .unwrap_or_default()
    }

    /// Set the widget's name.
    pub fn set_name(&self, name: impl Into<String>) -> ObjectResult<()> {
        global_registry().set_object_name(self.object_id, name)
    }

    /// Get the parent object, if any.
    pub fn parent(&self) -> Option<ObjectId> {
        global_registry().parent(self.object_id).ok().flatten()
    }

    /// Reparent the widget. `None` makes it a root object.
    pub fn set_parent(&self, parent: Option<ObjectId>) -> ObjectResult<()> {
        global_registry().set_parent(self.object_id, parent)
    }

    // =========================================================================
    // Enabled State
    // =========================================================================

    /// Check if the widget is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Set the enabled state. Returns `true` if it changed.
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        if self.enabled == enabled {
            return false;
        }
        self.enabled = enabled;
        self.needs_repaint = true;
        true
    }

    // =========================================================================
    // Repaint
    // =========================================================================

    /// Check if the widget needs to be repainted.
    pub fn needs_repaint(&self) -> bool {
        self.needs_repaint
    }

    /// Request a repaint of the widget.
    pub fn update(&mut self) {
        self.needs_repaint = true;
    }

    /// Clear the repaint request, returning whether one was pending.
    pub fn take_repaint(&mut self) -> bool {
        std::mem::take(&mut self.needs_repaint)
    }
}

impl Drop for WidgetBase {
    fn drop(&mut self) {
        // Already gone if an ancestor was destroyed first.
        if let Err(err) = global_registry().destroy(self.object_id) {
            tracing::debug!(target: "tether::widget", id = ?self.object_id, %err, "widget already unregistered");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Marker;

    #[test]
    fn test_enabled_and_repaint() {
        let mut base = WidgetBase::new::<Marker>();
        assert!(base.is_enabled());
        assert!(base.take_repaint());
        assert!(!base.needs_repaint());

        assert!(base.set_enabled(false));
        assert!(!base.set_enabled(false));
        assert!(base.needs_repaint());
    }

    #[test]
    fn test_registration_lifecycle() {
        let id = {
            let base = WidgetBase::new::<Marker>();
            base.set_name("status").unwrap();
            assert_eq!(base.name(), "status");
            assert!(global_registry().contains(base.object_id()));
            base.object_id()
        };
        assert!(!global_registry().contains(id));
    }

    #[test]
    fn test_parenting() {
        let parent = WidgetBase::new::<Marker>();
        let child = WidgetBase::new::<Marker>();
        child.set_parent(Some(parent.object_id())).unwrap();
        assert_eq!(child.parent(), Some(parent.object_id()));

        drop(parent);
        // The cascade removed the child too; dropping it must not panic.
        assert!(!global_registry().contains(child.object_id()));
        drop(child);
    }
}
