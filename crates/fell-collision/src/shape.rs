//! Collider shape variants and their pairwise intersection tests.
//!
//! The variant set is closed: adding a shape forces every match arm below
//! to be extended, so no pairing can be silently forgotten.

use glam::Vec3;

/// A collision shape positioned in world space.
///
/// Shapes live in a [`CollisionWorld`](crate::CollisionWorld) and are
/// resynchronized from their owning entity's transform once per tick via
/// [`Collider::sync`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Collider {
    /// Axis-aligned box described by center and half-extents.
    /// Half-extent components are never negative.
    Box { center: Vec3, half_extents: Vec3 },
    /// Sphere described by center and radius. Radius is never negative.
    Sphere { center: Vec3, radius: f32 },
}

impl Collider {
    /// Box collider sized from a full extent vector.
    pub fn box_from_size(center: Vec3, size: Vec3) -> Self {
        Self::Box {
            center,
            half_extents: size * 0.5,
        }
    }

    /// Shape center in world space.
    pub fn center(&self) -> Vec3 {
        match *self {
            Self::Box { center, .. } | Self::Sphere { center, .. } => center,
        }
    }

    /// Resynchronize the shape from its owning entity's transform.
    ///
    /// Boxes take `position` as their center and half of `scale` as their
    /// extents. Spheres take their radius from `scale.x` alone; spheres
    /// under non-uniform scale are not supported.
    pub fn sync(&mut self, position: Vec3, scale: Vec3) {
        match self {
            Self::Box {
                center,
                half_extents,
            } => {
                *center = position;
                *half_extents = scale * 0.5;
            }
            Self::Sphere { center, radius } => {
                *center = position;
                *radius = scale.x;
            }
        }
    }

    /// Pairwise overlap test.
    ///
    /// Box/box counts touching faces as intersecting. The sphere tests
    /// compare with strict `<`, so an exact touch is a miss.
    pub fn intersects(&self, other: &Collider) -> bool {
        match (*self, *other) {
            (
                Self::Box {
                    center: ca,
                    half_extents: ha,
                },
                Self::Box {
                    center: cb,
                    half_extents: hb,
                },
            ) => boxes_overlap(ca, ha, cb, hb),
            (
                Self::Box {
                    center,
                    half_extents,
                },
                Self::Sphere {
                    center: sphere_center,
                    radius,
                },
            )
            | (
                Self::Sphere {
                    center: sphere_center,
                    radius,
                },
                Self::Box {
                    center,
                    half_extents,
                },
            ) => box_sphere_overlap(center, half_extents, sphere_center, radius),
            (
                Self::Sphere {
                    center: ca,
                    radius: ra,
                },
                Self::Sphere {
                    center: cb,
                    radius: rb,
                },
            ) => ca.distance(cb) < ra + rb,
        }
    }
}

/// Per-axis center distance against summed half-extents, touching included.
fn boxes_overlap(ca: Vec3, ha: Vec3, cb: Vec3, hb: Vec3) -> bool {
    let delta = (ca - cb).abs();
    let reach = ha + hb;
    delta.x <= reach.x && delta.y <= reach.y && delta.z <= reach.z
}

/// Clamp the sphere center into the box, then compare squared distances.
fn box_sphere_overlap(center: Vec3, half_extents: Vec3, sphere_center: Vec3, radius: f32) -> bool {
    let closest = sphere_center.clamp(center - half_extents, center + half_extents);
    closest.distance_squared(sphere_center) < radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_box_overlapping() {
        let a = Collider::Box {
            center: Vec3::ZERO,
            half_extents: Vec3::splat(1.0),
        };
        let b = Collider::Box {
            center: Vec3::new(1.5, 0.0, 0.0),
            half_extents: Vec3::splat(1.0),
        };
        assert!(a.intersects(&b));
        assert!(b.intersects(&a)); // symmetric
    }

    #[test]
    fn test_box_box_touching_faces_hit() {
        let a = Collider::Box {
            center: Vec3::ZERO,
            half_extents: Vec3::splat(1.0),
        };
        let b = Collider::Box {
            center: Vec3::new(2.0, 0.0, 0.0),
            half_extents: Vec3::splat(1.0),
        };
        assert!(a.intersects(&b), "shared face counts as intersecting");
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_box_box_disjoint() {
        let a = Collider::Box {
            center: Vec3::ZERO,
            half_extents: Vec3::splat(1.0),
        };
        let b = Collider::Box {
            center: Vec3::new(2.1, 0.0, 0.0),
            half_extents: Vec3::splat(1.0),
        };
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn test_box_box_offset_on_all_axes() {
        let a = Collider::Box {
            center: Vec3::ZERO,
            half_extents: Vec3::new(1.0, 2.0, 3.0),
        };
        let b = Collider::Box {
            center: Vec3::new(0.5, 1.5, 2.5),
            half_extents: Vec3::splat(0.5),
        };
        assert!(a.intersects(&b));
        // Separated on y only: still a miss.
        let c = Collider::Box {
            center: Vec3::new(0.5, 3.0, 2.5),
            half_extents: Vec3::splat(0.5),
        };
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_sphere_sphere_strict_boundary() {
        let a = Collider::Sphere {
            center: Vec3::ZERO,
            radius: 1.0,
        };
        let b = Collider::Sphere {
            center: Vec3::new(2.0, 0.0, 0.0),
            radius: 1.0,
        };
        // Centers exactly r1 + r2 apart: a miss by the strict test.
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn test_sphere_sphere_overlapping() {
        let a = Collider::Sphere {
            center: Vec3::ZERO,
            radius: 1.0,
        };
        let b = Collider::Sphere {
            center: Vec3::new(1.9, 0.0, 0.0),
            radius: 1.0,
        };
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_box_sphere_touch_is_miss() {
        let b = Collider::Box {
            center: Vec3::ZERO,
            half_extents: Vec3::splat(1.0),
        };
        // Sphere center 2.0 from the box face along x, radius 1.0:
        // closest point sits exactly on the surface.
        let s = Collider::Sphere {
            center: Vec3::new(2.0, 0.0, 0.0),
            radius: 1.0,
        };
        assert!(!b.intersects(&s));
        assert!(!s.intersects(&b));
    }

    #[test]
    fn test_box_sphere_overlap_both_orders() {
        let b = Collider::Box {
            center: Vec3::ZERO,
            half_extents: Vec3::splat(1.0),
        };
        let s = Collider::Sphere {
            center: Vec3::new(1.5, 0.0, 0.0),
            radius: 0.6,
        };
        assert!(b.intersects(&s));
        assert!(s.intersects(&b));
    }

    #[test]
    fn test_sphere_inside_box_hits() {
        let b = Collider::Box {
            center: Vec3::ZERO,
            half_extents: Vec3::splat(2.0),
        };
        let s = Collider::Sphere {
            center: Vec3::new(0.2, -0.3, 0.1),
            radius: 0.1,
        };
        assert!(b.intersects(&s), "sphere fully inside the box must hit");
    }

    #[test]
    fn test_sync_box() {
        let mut c = Collider::box_from_size(Vec3::ZERO, Vec3::splat(1.0));
        c.sync(Vec3::new(3.0, 4.0, 5.0), Vec3::new(2.0, 4.0, 6.0));
        match c {
            Collider::Box {
                center,
                half_extents,
            } => {
                assert_eq!(center, Vec3::new(3.0, 4.0, 5.0));
                assert_eq!(half_extents, Vec3::new(1.0, 2.0, 3.0));
            }
            _ => panic!("sync must not change the variant"),
        }
    }

    #[test]
    fn test_sync_sphere_radius_from_scale_x() {
        let mut c = Collider::Sphere {
            center: Vec3::ZERO,
            radius: 1.0,
        };
        c.sync(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.5, 9.0, 9.0));
        match c {
            Collider::Sphere { center, radius } => {
                assert_eq!(center, Vec3::new(1.0, 2.0, 3.0));
                assert_eq!(radius, 0.5); // y and z are ignored
            }
            _ => panic!("sync must not change the variant"),
        }
    }

    #[test]
    fn test_center_accessor() {
        let b = Collider::box_from_size(Vec3::new(1.0, 2.0, 3.0), Vec3::ONE);
        let s = Collider::Sphere {
            center: Vec3::new(4.0, 5.0, 6.0),
            radius: 1.0,
        };
        assert_eq!(b.center(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(s.center(), Vec3::new(4.0, 5.0, 6.0));
    }
}
