//! Registry of active colliders, addressed by generational handles.

use glam::Vec3;
use slotmap::{SlotMap, new_key_type};

use crate::Collider;

new_key_type! {
    /// Stable handle to a shape stored in a [`CollisionWorld`].
    pub struct ColliderHandle;
}

/// Owns every active collision shape and answers overlap queries.
///
/// Entities hold [`ColliderHandle`]s; shape storage lives here. Handles
/// are generational, so a handle whose shape was removed stays safe to
/// query and simply matches nothing.
#[derive(Debug, Default)]
pub struct CollisionWorld {
    shapes: SlotMap<ColliderHandle, Collider>,
}

impl CollisionWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shape, returning the handle the owning entity keeps.
    pub fn insert(&mut self, shape: Collider) -> ColliderHandle {
        self.shapes.insert(shape)
    }

    /// Remove a shape. Removing through a stale handle is a no-op.
    pub fn remove(&mut self, handle: ColliderHandle) -> Option<Collider> {
        self.shapes.remove(handle)
    }

    pub fn get(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.shapes.get(handle)
    }

    /// Resynchronize a stored shape from its owner's transform.
    pub fn sync(&mut self, handle: ColliderHandle, position: Vec3, scale: Vec3) {
        if let Some(shape) = self.shapes.get_mut(handle) {
            shape.sync(position, scale);
        }
    }

    /// Every other registered collider overlapping the probe, unordered.
    ///
    /// The probe never matches itself. A stale or never-registered probe
    /// handle yields an empty result rather than an error.
    pub fn overlaps(&self, probe: ColliderHandle) -> Vec<ColliderHandle> {
        let Some(probe_shape) = self.shapes.get(probe) else {
            return Vec::new();
        };
        self.shapes
            .iter()
            .filter(|&(handle, shape)| handle != probe && shape.intersects(probe_shape))
            .map(|(handle, _)| handle)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
