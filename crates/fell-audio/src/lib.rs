//! Audio event seam for the Fell Engine.
//!
//! The simulation fires positional events through [`AudioSink`] and never
//! consults a return value; mixing, spatialization, and device lifetime
//! all live with the audio collaborator behind the trait.

use glam::Vec3;

/// Gameplay events the simulation can voice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AudioEvent {
    /// The player left the ground under jump input.
    Jump,
    /// The player transitioned from airborne to grounded.
    Land,
    /// A particle burst was triggered.
    Burst,
}

impl AudioEvent {
    /// Stable name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Jump => "jump",
            Self::Land => "land",
            Self::Burst => "burst",
        }
    }
}

/// Interface to the audio playback collaborator.
///
/// Fire-and-forget: the simulation supplies the event, where it happened,
/// and where the listener is; it never waits on playback.
pub trait AudioSink {
    fn play_event(
        &mut self,
        event: AudioEvent,
        source_position: Vec3,
        listener_position: Vec3,
        listener_facing: Vec3,
    );
}

/// Sink that discards every event, for headless runs and tests.
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_event(&mut self, _event: AudioEvent, _source: Vec3, _listener: Vec3, _facing: Vec3) {}
}
