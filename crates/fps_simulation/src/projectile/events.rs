//! Projectile events

use bevy::prelude::*;

use super::config::ProjectileConfig;

/// Event: weapon выстрелил, нужен projectile (Weapons → Projectiles)
#[derive(Event, Debug, Clone)]
pub struct ProjectileSpawnRequest {
    pub weapon: Entity,
    /// Shooter (ignore-list, damage attribution)
    pub owner: Entity,
    /// Muzzle position
    pub position: Vec3,
    /// Направление с учётом spread
    pub direction: Vec3,
    /// Базовый конфиг (charge scaling применяется при spawn)
    pub config: ProjectileConfig,
    pub inherited_muzzle_velocity: Vec3,
    /// Charge ratio оружия в момент выстрела
    pub charge: f32,
}

/// Терминальный исход projectile'а (ровно один на projectile)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectileOutcome {
    Hit { collider: Entity, point: Vec3, normal: Vec3 },
    Expired,
}

/// Event: projectile завершил жизнь
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ProjectileResolved {
    pub projectile: Entity,
    pub owner: Entity,
    pub outcome: ProjectileOutcome,
}
