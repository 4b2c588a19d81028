//! Swept-sphere math (ray vs inflated shape)
//!
//! Sphere of radius `r` moving along a ray = point ray vs shape inflated by `r`.
//! Cuboid inflation is approximated by an AABB grown by `r` on every axis.

use bevy::prelude::*;

/// Small value for near-zero checks (direction components, lengths).
pub const PHYSICS_EPSILON: f32 = 1e-6;

/// Result of a sweep test against a single shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepContact {
    /// Distance along the sweep direction (0 = started overlapping)
    pub distance: f32,
    pub point: Vec3,
    pub normal: Vec3,
}

fn initial_overlap(origin: Vec3, dir: Vec3) -> SweepContact {
    SweepContact {
        distance: 0.0,
        point: origin,
        normal: -dir,
    }
}

/// Sweep a sphere (`radius`) from `origin` along unit `dir` for `max_distance`
/// against a static sphere.
#[must_use]
pub fn sweep_sphere_vs_sphere(
    origin: Vec3,
    dir: Vec3,
    max_distance: f32,
    radius: f32,
    center: Vec3,
    target_radius: f32,
) -> Option<SweepContact> {
    let combined = radius + target_radius;
    let offset = origin - center;
    let c = offset.length_squared() - combined * combined;

    if c <= 0.0 {
        return Some(initial_overlap(origin, dir));
    }
    if dir.length_squared() < PHYSICS_EPSILON {
        return None;
    }

    let b = offset.dot(dir);
    if b > 0.0 {
        return None; // уходим от сферы
    }

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let t = -b - discriminant.sqrt();
    if t < 0.0 || t > max_distance {
        return None;
    }

    let swept_center = origin + dir * t;
    let normal = (swept_center - center).try_normalize().unwrap_or(-dir);

    Some(SweepContact {
        distance: t,
        point: center + normal * target_radius,
        normal,
    })
}

/// Sweep a sphere against an axis-aligned cuboid (slab method on the grown AABB).
#[must_use]
pub fn sweep_sphere_vs_cuboid(
    origin: Vec3,
    dir: Vec3,
    max_distance: f32,
    radius: f32,
    center: Vec3,
    half_extents: Vec3,
) -> Option<SweepContact> {
    let grown = half_extents + Vec3::splat(radius);
    let local = origin - center;

    if local.abs().cmple(grown).all() {
        return Some(initial_overlap(origin, dir));
    }
    if dir.length_squared() < PHYSICS_EPSILON {
        return None;
    }

    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut enter_axis = 0;

    for axis in 0..3 {
        let o = local[axis];
        let d = dir[axis];
        let h = grown[axis];

        if d.abs() < PHYSICS_EPSILON {
            if o.abs() > h {
                return None;
            }
            continue;
        }

        let t1 = (-h - o) / d;
        let t2 = (h - o) / d;
        let (near, far) = if t1 < t2 { (t1, t2) } else { (t2, t1) };

        if near > t_enter {
            t_enter = near;
            enter_axis = axis;
        }
        t_exit = t_exit.min(far);

        if t_enter > t_exit {
            return None;
        }
    }

    if t_enter < 0.0 || t_enter > max_distance {
        return None;
    }

    let mut normal = Vec3::ZERO;
    normal[enter_axis] = -dir[enter_axis].signum();

    let swept_center = origin + dir * t_enter;
    Some(SweepContact {
        distance: t_enter,
        point: swept_center - normal * radius,
        normal,
    })
}

#[must_use]
pub fn overlap_sphere_vs_sphere(center: Vec3, radius: f32, other: Vec3, other_radius: f32) -> bool {
    center.distance_squared(other) <= (radius + other_radius).powi(2)
}

#[must_use]
pub fn overlap_sphere_vs_cuboid(center: Vec3, radius: f32, box_center: Vec3, half_extents: Vec3) -> bool {
    let closest = box_center + (center - box_center).clamp(-half_extents, half_extents);
    center.distance_squared(closest) <= radius * radius
}
