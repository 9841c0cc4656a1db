//! Object model for Tether.
//!
//! Provides the base object system with:
//! - Unique object identifiers via arena-based storage
//! - Parent-child ownership relationships with cascade removal
//! - Object naming
//!
//! Widgets register here at construction so that an optional parent/owner can
//! be recorded and queried by [`ObjectId`].

use std::fmt;
use std::sync::OnceLock;

use parking_lot::RwLock;
use slotmap::{new_key_type, SlotMap};

use crate::logging::targets;

new_key_type! {
    /// A unique identifier for an object in the registry.
    ///
    /// `ObjectId`s are stable handles that remain valid even as the object tree changes.
    /// They become invalid when the object is destroyed.
    pub struct ObjectId;
}

/// Errors that can occur during object operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectError {
    /// The object ID is invalid or has been destroyed.
    InvalidObjectId,
    /// Attempted to set an object as its own parent/ancestor.
    CircularParentage,
}

impl fmt::Display for ObjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidObjectId => write!(f, "Invalid or destroyed object ID"),
            Self::CircularParentage => {
                write!(f, "Cannot set an object as its own parent or ancestor")
            }
        }
    }
}

impl std::error::Error for ObjectError {}

/// Result type for object operations.
pub type ObjectResult<T> = std::result::Result<T, ObjectError>;

/// Base trait for everything that lives in the object registry.
pub trait Object {
    /// The registry handle of this object.
    fn object_id(&self) -> ObjectId;
}

/// Internal data stored in the registry for each object.
struct ObjectData {
    name: String,
    type_name: &'static str,
    parent: Option<ObjectId>,
    children: Vec<ObjectId>,
}

/// The central registry that manages all objects and their relationships.
pub struct ObjectRegistry {
    objects: SlotMap<ObjectId, ObjectData>,
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectRegistry {
    /// Create a new empty object registry.
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
        }
    }

    /// Register a new object of type `T` and return its ID.
    pub fn register<T: 'static>(&mut self) -> ObjectId {
        let type_name = std::any::type_name::<T>();
        let id = self.objects.insert(ObjectData {
            name: String::new(),
            type_name,
            parent: None,
            children: Vec::new(),
        });
        tracing::trace!(target: targets::OBJECT, ?id, type_name, "registered object");
        id
    }

    /// Remove an object and all its descendants from the registry.
    ///
    /// Returns the removed IDs, children before parents.
    pub fn destroy(&mut self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        let mut removed = Vec::new();
        self.collect_descendants(id, &mut removed)?;
        tracing::trace!(target: targets::OBJECT, ?id, descendant_count = removed.len(), "destroying object tree");

        if let Some(parent_id) = self.objects.get(id).and_then(|d| d.parent) {
            if let Some(parent_data) = self.objects.get_mut(parent_id) {
                parent_data.children.retain(|&child| child != id);
            }
        }

        removed.push(id);
        for object_id in &removed {
            self.objects.remove(*object_id);
        }
        Ok(removed)
    }

    fn collect_descendants(&self, id: ObjectId, result: &mut Vec<ObjectId>) -> ObjectResult<()> {
        let data = self.objects.get(id).ok_or(ObjectError::InvalidObjectId)?;
        for &child_id in &data.children {
            self.collect_descendants(child_id, result)?;
            result.push(child_id);
        }
        Ok(())
    }

    /// Check if an object exists in the registry.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    /// Set the parent of an object.
    ///
    /// Passing `None` makes the object a root object.
    pub fn set_parent(&mut self, id: ObjectId, new_parent: Option<ObjectId>) -> ObjectResult<()> {
        if !self.objects.contains_key(id) {
            return Err(ObjectError::InvalidObjectId);
        }

        if let Some(parent_id) = new_parent {
            if !self.objects.contains_key(parent_id) {
                return Err(ObjectError::InvalidObjectId);
            }
            if self.is_ancestor_of(id, parent_id) {
                return Err(ObjectError::CircularParentage);
            }
        }

        if let Some(old_parent_id) = self.objects.get(id).and_then(|d| d.parent) {
            if let Some(parent_data) = self.objects.get_mut(old_parent_id) {
                parent_data.children.retain(|&child| child != id);
            }
        }

        if let Some(data) = self.objects.get_mut(id) {
            data.parent = new_parent;
        }

        if let Some(parent_id) = new_parent {
            if let Some(parent_data) = self.objects.get_mut(parent_id) {
                parent_data.children.push(id);
            }
        }

        Ok(())
    }

    fn is_ancestor_of(&self, potential_ancestor: ObjectId, id: ObjectId) -> bool {
        let mut current = Some(id);
        while let Some(current_id) = current {
            if current_id == potential_ancestor {
                return true;
            }
            current = self.objects.get(current_id).and_then(|d| d.parent);
        }
        false
    }

    /// Get the parent of an object.
    pub fn parent(&self, id: ObjectId) -> ObjectResult<Option<ObjectId>> {
        self.objects
            .get(id)
            .map(|d| d.parent)
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Get the children of an object.
    pub fn children(&self, id: ObjectId) -> ObjectResult<&[ObjectId]> {
        self.objects
            .get(id)
            .map(|d| d.children.as_slice())
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Get the object's name.
    pub fn object_name(&self, id: ObjectId) -> ObjectResult<&str> {
        self.objects
            .get(id)
            .map(|d| d.name.as_str())
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Set the object's name.
    pub fn set_object_name(&mut self, id: ObjectId, name: String) -> ObjectResult<()> {
        self.objects
            .get_mut(id)
            .map(|d| d.name = name)
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Get the type name an object was registered with.
    pub fn type_name(&self, id: ObjectId) -> ObjectResult<&'static str> {
        self.objects
            .get(id)
            .map(|d| d.type_name)
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Number of registered objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }
}

/// Thread-safe wrapper around [`ObjectRegistry`].
#[derive(Default)]
pub struct SharedObjectRegistry {
    inner: RwLock<ObjectRegistry>,
}

impl SharedObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T: 'static>(&self) -> ObjectId {
        self.inner.write().register::<T>()
    }

    pub fn destroy(&self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        self.inner.write().destroy(id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.inner.read().contains(id)
    }

    pub fn set_parent(&self, id: ObjectId, parent: Option<ObjectId>) -> ObjectResult<()> {
        self.inner.write().set_parent(id, parent)
    }

    pub fn parent(&self, id: ObjectId) -> ObjectResult<Option<ObjectId>> {
        self.inner.read().parent(id)
    }

    pub fn children(&self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        self.inner.read().children(id).map(|c| c.to_vec())
    }

    pub fn object_name(&self, id: ObjectId) -> ObjectResult<String> {
        self.inner.read().object_name(id).map(str::to_owned)
    }

    pub fn set_object_name(&self, id: ObjectId, name: impl Into<String>) -> ObjectResult<()> {
        self.inner.write().set_object_name(id, name.into())
    }

    pub fn type_name(&self, id: ObjectId) -> ObjectResult<&'static str> {
        self.inner.read().type_name(id)
    }

    pub fn object_count(&self) -> usize {
        self.inner.read().object_count()
    }
}

static GLOBAL_REGISTRY: OnceLock<SharedObjectRegistry> = OnceLock::new();

/// Get the process-wide object registry, creating it on first use.
pub fn global_registry() -> &'static SharedObjectRegistry {
    GLOBAL_REGISTRY.get_or_init(SharedObjectRegistry::new)
}
