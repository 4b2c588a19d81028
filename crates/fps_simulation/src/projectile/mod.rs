//! Projectile domain (ProjectileSimulator)
//!
//! Содержит:
//! - ProjectileConfig (serde, charge scaling)
//! - Projectile component + pure motion step (gravity, trajectory correction)
//! - Hit policy: IgnoreHitDetection → trigger без Damageable → ignore-list
//! - Systems: advance (timeout / sweep / resolve), spawn (camera correction)
//!
//! Каждый projectile заканчивается ровно одним `ProjectileResolved`:
//! `Hit` или `Expired`.

use bevy::prelude::*;

pub mod components;
pub mod config;
pub mod events;
pub mod hit;
pub mod systems;

pub use components::{facing_rotation, Projectile, TrajectoryCorrection};
pub use config::{ChargeRange, ChargeScaling, ProjectileConfig};
pub use events::{ProjectileOutcome, ProjectileResolved, ProjectileSpawnRequest};
pub use hit::{hit_rejection, select_closest_valid_hit, ColliderTraits, HitRejection};
pub use systems::{advance_projectiles, resolve_hit, spawn_projectiles, ImpactWriters};

/// Допуск при сравнении оставшегося времени жизни с нулём
pub const LIFETIME_EPSILON: f32 = 1e-3;

/// Projectile plugin
///
/// `SimulationSet::Projectiles`: сначала advance существующих,
/// затем spawn новых (новые двигаются со следующего tick'а).
pub struct ProjectilePlugin;

impl Plugin for ProjectilePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ProjectileSpawnRequest>()
            .add_event::<ProjectileResolved>()
            .add_systems(
                FixedUpdate,
                (advance_projectiles, spawn_projectiles)
                    .chain()
                    .in_set(crate::SimulationSet::Projectiles),
            );
    }
}
