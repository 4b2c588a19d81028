//! Combat events
//!
//! Flow: projectile hit → `DamageRequest` / `AreaDamageRequest`
//! → `resolve_area_damage` → `apply_damage` → `DamageDealt` / `EntityDied`

use bevy::prelude::*;

use super::DamageFalloff;
use crate::physics::HitLayers;

/// Запрос на point damage по конкретному collider'у
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageRequest {
    /// Collider, в который попали (несёт `Damageable`)
    pub target: Entity,
    /// Base damage до множителей
    pub amount: f32,
    /// Area damage пропускает `damage_multiplier`
    pub is_area: bool,
    /// Кто нанёс урон (owner projectile'а)
    pub source: Entity,
}

/// Запрос на area damage вокруг точки
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AreaDamageRequest {
    pub damage: f32,
    pub center: Vec3,
    pub radius: f32,
    pub falloff: DamageFalloff,
    pub layers: HitLayers,
    pub source: Entity,
}

/// Событие: урон нанесен
///
/// Генерируется после применения damage к Health.
/// Используется для UI, звуков, эффектов.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageDealt {
    pub source: Entity,
    /// Entity с Health
    pub target: Entity,
    /// Collider, через который пришёл урон
    pub struck: Entity,
    pub damage: f32,
    pub is_area: bool,
    pub target_died: bool,
}

/// Событие: entity умер (health <= 0)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}
