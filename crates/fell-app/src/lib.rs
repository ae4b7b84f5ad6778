//! Fell Engine application framework.
//!
//! Provides the simulation session, input mapping, frame timing, platform
//! directories, and the demo scene behind the `fell-app` binary.

pub mod demo;
pub mod frame_clock;
pub mod input;
pub mod platform;
pub mod session;
