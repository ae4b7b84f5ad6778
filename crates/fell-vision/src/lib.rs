//! Camera-vision pipeline for the Fell Engine: frame capture, target
//! color detection, crosshair overlay, and budget-limited JPEG encoding,
//! all running on dedicated worker threads behind bounded queues.

mod detect;
mod encode;
mod error;
mod frame;
mod overlay;
mod pipeline;
mod source;

pub use detect::{Detection, DetectionParams, HueBand, detect_target};
pub use encode::{EncodedFrame, encode_within_budget};
pub use error::VisionError;
pub use frame::Frame;
pub use overlay::{CROSS_SIZE, draw_cross};
pub use pipeline::{DetectionFlag, PipelineConfig, VisionPipeline};
pub use source::{FrameDirSource, ScriptedSource, VideoSource};
