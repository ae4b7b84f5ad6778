//! Physics bodies and the player controller for the Fell Engine.

mod body;
mod player;

pub use body::{GRAVITY, PhysicsBody};
pub use player::{Player, PlayerParams};
