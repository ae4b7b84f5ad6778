//! Frame buffers flowing through the vision pipeline.

use image::{Rgb, RgbImage};

/// One captured RGB frame.
///
/// A zero-sized frame is the end-of-stream sentinel: sources return it
/// when they run dry, and the capture worker shuts the pipeline down once
/// the sentinel arrives with nothing left in the queue.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    image: RgbImage,
}

impl Frame {
    pub fn new(image: RgbImage) -> Self {
        Self { image }
    }

    /// The end-of-stream sentinel.
    pub fn empty() -> Self {
        Self {
            image: RgbImage::new(0, 0),
        }
    }

    /// A frame filled with a single color, mostly for tests and the
    /// synthetic demo source.
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, Rgb(rgb)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.image.width() == 0 || self.image.height() == 0
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Raw buffer size in bytes, the reference point for encode budgets.
    pub fn byte_len(&self) -> usize {
        self.image.as_raw().len()
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn image_mut(&mut self) -> &mut RgbImage {
        &mut self.image
    }
}
