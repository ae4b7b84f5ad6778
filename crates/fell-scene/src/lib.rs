//! Scene model for the Fell Engine: entities, scripted motion primitives,
//! particle bursts, and draw-order resolution.

mod draw;
mod entity;
mod particles;

pub use draw::{
    DrawItem, NullRenderer, RecordingRenderer, RenderableId, Renderer, order_draw_list,
    submit_draw_list,
};
pub use entity::{ARRIVAL_THRESHOLD, Entity, PatrolRoute};
pub use particles::{Particle, ParticleSystem};
