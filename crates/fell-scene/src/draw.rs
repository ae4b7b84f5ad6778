//! Draw-list assembly: opaque submissions first, transparent ones
//! depth-sorted back to front so blending composites correctly.

use glam::Vec3;

/// Identifier for a renderable owned by the render collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RenderableId(pub u32);

/// One draw submission: which renderable, where, how opaque.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawItem {
    pub renderable: RenderableId,
    pub position: Vec3,
    /// Euler angles in degrees.
    pub orientation: Vec3,
    pub alpha: f32,
}

/// Interface to the render collaborator.
///
/// GPU resource lifetime stays entirely on the other side; the simulation
/// only pushes transforms, alpha, and draw calls through this seam.
pub trait Renderer {
    fn set_transform(&mut self, id: RenderableId, position: Vec3, orientation: Vec3);
    fn set_alpha(&mut self, id: RenderableId, alpha: f32);
    fn submit_draw(&mut self, id: RenderableId);
}

/// Renderer that discards everything, for headless runs.
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn set_transform(&mut self, _id: RenderableId, _position: Vec3, _orientation: Vec3) {}
    fn set_alpha(&mut self, _id: RenderableId, _alpha: f32) {}
    fn submit_draw(&mut self, _id: RenderableId) {}
}

/// Renderer that records submissions in order, for tests and dry runs.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub submitted: Vec<DrawItem>,
    last_transform: Option<(RenderableId, Vec3, Vec3)>,
    last_alpha: Option<(RenderableId, f32)>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for RecordingRenderer {
    fn set_transform(&mut self, id: RenderableId, position: Vec3, orientation: Vec3) {
        self.last_transform = Some((id, position, orientation));
    }

    fn set_alpha(&mut self, id: RenderableId, alpha: f32) {
        self.last_alpha = Some((id, alpha));
    }

    fn submit_draw(&mut self, id: RenderableId) {
        let (position, orientation) = match self.last_transform {
            Some((tid, p, o)) if tid == id => (p, o),
            _ => (Vec3::ZERO, Vec3::ZERO),
        };
        let alpha = match self.last_alpha {
            Some((aid, a)) if aid == id => a,
            _ => 1.0,
        };
        self.submitted.push(DrawItem {
            renderable: id,
            position,
            orientation,
            alpha,
        });
    }
}

/// Order draw items for submission.
///
/// Opaque items (alpha >= 1) keep their given order; transparent items
/// follow, sorted farthest-first by squared distance from `view_pos`.
pub fn order_draw_list(items: Vec<DrawItem>, view_pos: Vec3) -> Vec<DrawItem> {
    let (opaque, mut transparent): (Vec<_>, Vec<_>) =
        items.into_iter().partition(|item| item.alpha >= 1.0);
    transparent.sort_by(|a, b| {
        let da = a.position.distance_squared(view_pos);
        let db = b.position.distance_squared(view_pos);
        db.partial_cmp(&da).unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut ordered = opaque;
    ordered.extend(transparent);
    ordered
}

/// Push an ordered draw list through the renderer.
pub fn submit_draw_list(renderer: &mut dyn Renderer, items: &[DrawItem]) {
    for item in items {
        renderer.set_transform(item.renderable, item.position, item.orientation);
        renderer.set_alpha(item.renderable, item.alpha);
        renderer.submit_draw(item.renderable);
    }
}
