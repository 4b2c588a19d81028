//! Physics domain — collision primitives для projectile simulation
//!
//! Содержит:
//! - Collider / ColliderShape (на каком слое объект, какая форма)
//! - HitLayers (битовая маска: с какими слоями работает query)
//! - WorldQuery trait (sweep / raycast / overlap) + ColliderWorld backend
//! - IgnoreHitDetection marker (projectile пролетает насквозь)
//!
//! ## Layers (битовая маска):
//! - Layer 1 (0b1 = 1): Default
//! - Layer 2 (0b10 = 2): Actors (players, NPCs, target dummies)
//! - Layer 3 (0b100 = 4): Environment (walls, floors)
//! - Layer 4 (0b1000 = 8): Triggers (pickups, zones)
//!
//! Transforms симуляции — world-space. `ChildOf` используется только как
//! иерархия владения (ignore-list, поиск Health), не для propagation.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub mod collider_world;
pub mod query;
pub mod shapes;

pub use collider_world::{sync_collider_world, ColliderEntry, ColliderWorld};
pub use query::{QueryHit, WorldQuery};

/// Layer 1: Default
pub const LAYER_DEFAULT: u32 = 0b1;

/// Layer 2: Actors
pub const LAYER_ACTORS: u32 = 0b10;

/// Layer 3: Environment
pub const LAYER_ENVIRONMENT: u32 = 0b100;

/// Layer 4: Triggers
pub const LAYER_TRIGGERS: u32 = 0b1000;

/// Mask для query: с какими layers взаимодействует projectile / raycast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HitLayers(pub u32);

impl HitLayers {
    pub const ALL: Self = Self(u32::MAX);
    pub const NONE: Self = Self(0);

    /// Collider на `layer` попадает в маску?
    pub fn contains(&self, layer: u32) -> bool {
        self.0 & layer != 0
    }

    pub fn with(self, layer: u32) -> Self {
        Self(self.0 | layer)
    }
}

impl Default for HitLayers {
    fn default() -> Self {
        Self::ALL
    }
}

/// Форма collider'а (axis-aligned, rotation игнорируется)
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum ColliderShape {
    Sphere { radius: f32 },
    Cuboid { half_extents: Vec3 },
}

/// Collider component
///
/// Позиция берётся из `Transform.translation` entity.
/// Trigger'ы участвуют в queries (collide), фильтрация — на стороне projectile.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Collider {
    pub shape: ColliderShape,
    /// Битовая маска: на каком слое находится collider
    pub layer: u32,
    /// Non-physical volume (pickup, zone)
    pub is_trigger: bool,
}

impl Collider {
    pub fn sphere(radius: f32) -> Self {
        Self {
            shape: ColliderShape::Sphere { radius },
            layer: LAYER_DEFAULT,
            is_trigger: false,
        }
    }

    pub fn cuboid(half_extents: Vec3) -> Self {
        Self {
            shape: ColliderShape::Cuboid { half_extents },
            layer: LAYER_DEFAULT,
            is_trigger: false,
        }
    }

    pub fn with_layer(mut self, layer: u32) -> Self {
        self.layer = layer;
        self
    }

    pub fn as_trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }
}

/// Marker: collider невидим для hit detection projectile'ов
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct IgnoreHitDetection;

/// Physics plugin — пересобирает ColliderWorld в начале каждого fixed tick
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ColliderWorld>().add_systems(
            FixedUpdate,
            sync_collider_world.in_set(crate::SimulationSet::SyncColliders),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_layers_mask() {
        let mask = HitLayers(LAYER_ACTORS | LAYER_ENVIRONMENT);
        assert!(mask.contains(LAYER_ACTORS));
        assert!(mask.contains(LAYER_ENVIRONMENT));
        assert!(!mask.contains(LAYER_TRIGGERS));

        assert!(HitLayers::ALL.contains(LAYER_TRIGGERS));
        assert!(!HitLayers::NONE.contains(LAYER_DEFAULT));
        assert!(HitLayers::NONE.with(LAYER_TRIGGERS).contains(LAYER_TRIGGERS));
    }

    #[test]
    fn test_collider_builders() {
        let trigger = Collider::sphere(1.0).with_layer(LAYER_TRIGGERS).as_trigger();
        assert!(trigger.is_trigger);
        assert_eq!(trigger.layer, LAYER_TRIGGERS);

        let wall = Collider::cuboid(Vec3::new(1.0, 2.0, 0.1));
        assert!(!wall.is_trigger);
        assert_eq!(wall.layer, LAYER_DEFAULT);
    }
}
