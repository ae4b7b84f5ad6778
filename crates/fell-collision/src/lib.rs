//! Collision shapes and the collider registry for the Fell Engine.

mod shape;
mod world;

pub use shape::Collider;
pub use world::{ColliderHandle, CollisionWorld};
