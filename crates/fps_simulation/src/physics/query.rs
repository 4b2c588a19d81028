//! World query capability (sweep / raycast / overlap)
//!
//! Симуляция не владеет геометрией мира — она только спрашивает.
//! Любой backend (built-in `ColliderWorld`, rapier, Godot bridge) реализует `WorldQuery`.

use bevy::prelude::*;

use super::HitLayers;

/// Одно пересечение query с collider'ом
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryHit {
    pub point: Vec3,
    pub normal: Vec3,
    pub collider: Entity,
    /// Distance along the query direction (≤ 0 = query started inside the collider)
    pub distance: f32,
}

pub trait WorldQuery {
    /// Sphere sweep from `start` to `end`; **all** intersections sorted by distance.
    /// Triggers are included.
    fn sweep_sphere(&self, start: Vec3, end: Vec3, radius: f32, layers: HitLayers) -> Vec<QueryHit>;

    /// Closest ray hit. Colliders that contain `origin` are not reported.
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, layers: HitLayers) -> Option<QueryHit>;

    /// Colliders overlapping a sphere. Triggers are included.
    fn overlap_sphere(&self, center: Vec3, radius: f32, layers: HitLayers) -> Vec<Entity>;
}

/// Sort hits closest-first; stable so equal distances keep backend order.
pub fn sort_hits_by_distance(hits: &mut [QueryHit]) {
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
}
