//! JPEG encoding under a byte budget.

use image::codecs::jpeg::JpegEncoder;

use crate::error::VisionError;
use crate::frame::Frame;

/// First quality tried by the stepping loop.
const START_QUALITY: u8 = 100;
/// Quality drop per retry, which is also the quality floor.
const QUALITY_STEP: u8 = 5;

/// One budget-encoded frame.
#[derive(Clone, Debug)]
pub struct EncodedFrame {
    pub bytes: Vec<u8>,
    /// JPEG quality the bytes were produced at.
    pub quality: u8,
}

/// JPEG-encode `frame`, stepping the quality down until the output fits
/// the budget.
///
/// The budget is `budget_ratio` of the raw buffer size. Quality starts at
/// 100 and drops in steps of 5; the attempt at the floor quality is
/// returned even if it still misses the budget, so callers always get
/// bytes back for a non-empty frame. The sentinel encodes to no bytes.
pub fn encode_within_budget(frame: &Frame, budget_ratio: f32) -> Result<EncodedFrame, VisionError> {
    if frame.is_empty() {
        return Ok(EncodedFrame {
            bytes: Vec::new(),
            quality: START_QUALITY,
        });
    }
    let budget = (frame.byte_len() as f32 * budget_ratio) as usize;
    let mut quality = START_QUALITY;
    loop {
        let mut bytes = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut bytes, quality);
        frame
            .image()
            .write_with_encoder(encoder)
            .map_err(VisionError::Encode)?;
        if bytes.len() <= budget || quality <= QUALITY_STEP {
            return Ok(EncodedFrame { bytes, quality });
        }
        quality -= QUALITY_STEP;
    }
}
