//! Deterministic procedural terrain heightfield for the Fell Engine.

mod heightfield;

pub use heightfield::{TerrainParams, TerrainSampler};
