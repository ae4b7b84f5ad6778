//! Crosshair overlay for processed frames.

use glam::Vec2;
use image::Rgb;

use crate::frame::Frame;

/// Default crosshair arm span in pixels.
pub const CROSS_SIZE: u32 = 30;

const CROSS_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
const CROSS_THICKNESS: i64 = 3;

/// Draw a crosshair into `frame` at a normalized position.
///
/// `center` components are clamped into [0, 1] and every pixel write is
/// bounds-checked, so raw detection output is safe to pass straight in.
pub fn draw_cross(frame: &mut Frame, center: Vec2, size: u32) {
    if frame.is_empty() {
        return;
    }
    let width = i64::from(frame.width());
    let height = i64::from(frame.height());
    let cx = ((center.x.clamp(0.0, 1.0) * frame.width() as f32) as i64).min(width - 1);
    let cy = ((center.y.clamp(0.0, 1.0) * frame.height() as f32) as i64).min(height - 1);

    let size = i64::from(size.min(frame.width().max(frame.height())).max(2));
    let half = size / 2;
    let reach = CROSS_THICKNESS / 2;

    // Horizontal arm.
    for y in (cy - reach)..=(cy + reach) {
        for x in (cx - half)..=(cx + half) {
            put(frame, x, y);
        }
    }
    // Vertical arm.
    for x in (cx - reach)..=(cx + reach) {
        for y in (cy - half)..=(cy + half) {
            put(frame, x, y);
        }
    }
}

fn put(frame: &mut Frame, x: i64, y: i64) {
    if x >= 0 && y >= 0 && x < i64::from(frame.width()) && y < i64::from(frame.height()) {
        frame.image_mut().put_pixel(x as u32, y as u32, CROSS_COLOR);
    }
}
