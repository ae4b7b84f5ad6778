//! Target-color detection over RGB frames.
//!
//! Classification happens in HSV space. The target hue (red by default)
//! wraps around the hue circle, so the detector carries two bands: one
//! hugging 0 degrees and one hugging 360.

use glam::Vec2;

use crate::frame::Frame;

/// Inclusive hue interval in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HueBand {
    pub lo: f32,
    pub hi: f32,
}

impl HueBand {
    pub fn new(lo: f32, hi: f32) -> Self {
        Self { lo, hi }
    }

    pub fn contains(&self, hue: f32) -> bool {
        (self.lo..=self.hi).contains(&hue)
    }
}

/// Tuning for the color detector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectionParams {
    /// Band at the bottom of the hue circle.
    pub low_band: HueBand,
    /// Band at the top of the hue circle.
    pub high_band: HueBand,
    /// Pixels below this saturation are ignored, whatever their hue.
    pub min_saturation: f32,
    /// Pixels darker than this are ignored.
    pub min_value: f32,
}

impl Default for DetectionParams {
    /// Saturated red with headroom for camera noise.
    fn default() -> Self {
        Self {
            low_band: HueBand::new(0.0, 20.0),
            high_band: HueBand::new(340.0, 360.0),
            min_saturation: 0.4,
            min_value: 0.4,
        }
    }
}

/// Outcome of scanning one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Detection {
    /// Pixels that fell inside either hue band.
    pub pixel_count: usize,
    /// Mean position of matching pixels, each axis normalized to [0, 1].
    pub centroid: Option<Vec2>,
}

impl Detection {
    /// A single matching pixel counts as presence.
    pub fn target_present(&self) -> bool {
        self.pixel_count > 0
    }
}

/// Scan `frame` for pixels matching `params`.
///
/// Empty frames yield the zero detection rather than an error; sentinels
/// never reach here in the pipeline, but callers poking frames directly
/// should not have to care.
pub fn detect_target(frame: &Frame, params: &DetectionParams) -> Detection {
    if frame.is_empty() {
        return Detection::default();
    }
    let mut count = 0usize;
    let mut sum_x = 0.0f64;
    let mut sum_y = 0.0f64;
    for (x, y, pixel) in frame.image().enumerate_pixels() {
        let [r, g, b] = pixel.0;
        let (h, s, v) = rgb_to_hsv(r, g, b);
        if s < params.min_saturation || v < params.min_value {
            continue;
        }
        if params.low_band.contains(h) || params.high_band.contains(h) {
            count += 1;
            sum_x += f64::from(x);
            sum_y += f64::from(y);
        }
    }
    let centroid = (count > 0).then(|| {
        Vec2::new(
            (sum_x / count as f64 / f64::from(frame.width())) as f32,
            (sum_y / count as f64 / f64::from(frame.height())) as f32,
        )
    });
    Detection {
        pixel_count: count,
        centroid,
    }
}

/// Hue in degrees [0, 360), saturation and value in [0, 1].
fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let r = f32::from(r) / 255.0;
    let g = f32::from(g) / 255.0;
    let b = f32::from(b) / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;
    let s = if max > 0.0 { delta / max } else { 0.0 };
    let h = if delta <= f32::EPSILON {
        0.0
    } else if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    (h, s, v)
}
