//! Combat system module (DamageTarget + AreaDamageResolver)
//!
//! ECS ответственность:
//! - Damageable: множители урона на collider'е (headshot, self-damage)
//! - Health receiver: поиск вверх по `ChildOf` иерархии
//! - Area damage: overlap sphere → dedupe по receiver → falloff
//! - Events: DamageRequest, AreaDamageRequest, DamageDealt, EntityDied

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod systems;

// Re-export основных типов
pub use components::{AreaOfDamage, DamageFalloff, Damageable, Dead};
pub use events::{AreaDamageRequest, DamageDealt, DamageRequest, EntityDied};
pub use systems::{apply_damage, find_health_receiver, resolve_area_damage};

/// Combat Plugin
///
/// Регистрирует combat системы в `SimulationSet::Damage`.
///
/// Порядок выполнения:
/// 1. resolve_area_damage — AreaDamageRequest → DamageRequest (is_area)
/// 2. apply_damage — DamageRequest → Health, DamageDealt, EntityDied, Dead
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<DamageRequest>()
            .add_event::<AreaDamageRequest>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>();

        app.add_systems(
            FixedUpdate,
            (resolve_area_damage, apply_damage)
                .chain()
                .in_set(crate::SimulationSet::Damage),
        );
    }
}
