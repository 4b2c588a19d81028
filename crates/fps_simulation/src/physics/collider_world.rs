//! ColliderWorld — built-in `WorldQuery` backend
//!
//! Snapshot всех `Collider` entity, пересобирается в начале fixed tick
//! (`sync_collider_world`). Порядок entries — по Entity index (детерминизм).

use bevy::prelude::*;

use super::query::{sort_hits_by_distance, QueryHit, WorldQuery};
use super::shapes::{
    overlap_sphere_vs_cuboid, overlap_sphere_vs_sphere, sweep_sphere_vs_cuboid, sweep_sphere_vs_sphere,
    SweepContact, PHYSICS_EPSILON,
};
use super::{Collider, ColliderShape, HitLayers};

#[derive(Debug, Clone, Copy)]
pub struct ColliderEntry {
    pub entity: Entity,
    pub center: Vec3,
    pub shape: ColliderShape,
    pub layer: u32,
}

impl ColliderEntry {
    fn sweep(&self, origin: Vec3, dir: Vec3, max_distance: f32, radius: f32) -> Option<SweepContact> {
        match self.shape {
            ColliderShape::Sphere { radius: target_radius } => {
                sweep_sphere_vs_sphere(origin, dir, max_distance, radius, self.center, target_radius)
            }
            ColliderShape::Cuboid { half_extents } => {
                sweep_sphere_vs_cuboid(origin, dir, max_distance, radius, self.center, half_extents)
            }
        }
    }

    fn overlaps(&self, center: Vec3, radius: f32) -> bool {
        match self.shape {
            ColliderShape::Sphere { radius: target_radius } => {
                overlap_sphere_vs_sphere(center, radius, self.center, target_radius)
            }
            ColliderShape::Cuboid { half_extents } => {
                overlap_sphere_vs_cuboid(center, radius, self.center, half_extents)
            }
        }
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct ColliderWorld {
    entries: Vec<ColliderEntry>,
}

impl ColliderWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entity: Entity, center: Vec3, collider: &Collider) {
        self.entries.push(ColliderEntry {
            entity,
            center,
            shape: collider.shape,
            layer: collider.layer,
        });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ColliderEntry] {
        &self.entries
    }

    fn candidates(&self, layers: HitLayers) -> impl Iterator<Item = &ColliderEntry> {
        self.entries.iter().filter(move |entry| layers.contains(entry.layer))
    }
}

impl WorldQuery for ColliderWorld {
    fn sweep_sphere(&self, start: Vec3, end: Vec3, radius: f32, layers: HitLayers) -> Vec<QueryHit> {
        let displacement = end - start;
        let length = displacement.length();
        // Zero-length sweep → только overlap на старте
        let dir = if length > PHYSICS_EPSILON {
            displacement / length
        } else {
            Vec3::ZERO
        };

        let mut hits: Vec<QueryHit> = self
            .candidates(layers)
            .filter_map(|entry| {
                entry.sweep(start, dir, length, radius).map(|contact| QueryHit {
                    point: contact.point,
                    normal: contact.normal,
                    collider: entry.entity,
                    distance: contact.distance,
                })
            })
            .collect();

        sort_hits_by_distance(&mut hits);
        hits
    }

    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, layers: HitLayers) -> Option<QueryHit> {
        let dir = direction.try_normalize()?;

        self.candidates(layers)
            .filter_map(|entry| {
                entry
                    .sweep(origin, dir, max_distance, 0.0)
                    // Ray, стартующий внутри collider'а, его не видит
                    .filter(|contact| contact.distance > 0.0)
                    .map(|contact| QueryHit {
                        point: contact.point,
                        normal: contact.normal,
                        collider: entry.entity,
                        distance: contact.distance,
                    })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    fn overlap_sphere(&self, center: Vec3, radius: f32, layers: HitLayers) -> Vec<Entity> {
        self.candidates(layers)
            .filter(|entry| entry.overlaps(center, radius))
            .map(|entry| entry.entity)
            .collect()
    }
}

/// System: пересобрать ColliderWorld из ECS (начало fixed tick)
pub fn sync_collider_world(mut world: ResMut<ColliderWorld>, colliders: Query<(Entity, &Collider, &Transform)>) {
    world.clear();

    let mut sorted: Vec<_> = colliders.iter().collect();
    sorted.sort_by_key(|(entity, _, _)| entity.index());

    for (entity, collider, transform) in sorted {
        world.insert(entity, transform.translation, collider);
    }
}
