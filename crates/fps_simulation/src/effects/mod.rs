//! Effects sink — fire-and-forget visual / audio requests
//!
//! Симуляция не рендерит и не играет звук: она публикует
//! `VisualEffectRequested` / `SoundEffectRequested`, host их исполняет.
//!
//! Визуальные эффекты дополнительно материализуются как entity
//! `SpawnedEffect` с явным `DespawnAfter` — список истекающих entity,
//! который чистится раз в tick (`despawn_after_timeout`).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Mixer group для звука
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum SoundCategory {
    WeaponShoot,
    WeaponSwitch,
    Impact,
}

/// Event: показать visual effect (impact, muzzle flash)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct VisualEffectRequested {
    /// Prefab / asset reference
    pub effect: String,
    pub position: Vec3,
    pub rotation: Quat,
    /// Привязка к entity (muzzle flash едет вместе с muzzle)
    pub parent: Option<Entity>,
    /// `None` — эффект живёт пока его не удалит host
    pub auto_destroy_after: Option<f32>,
}

/// Event: проиграть звук в точке
#[derive(Event, Debug, Clone, PartialEq)]
pub struct SoundEffectRequested {
    pub clip: String,
    pub position: Vec3,
    pub category: SoundCategory,
    pub volume: f32,
    /// Дальность слышимости (метры)
    pub range: f32,
}

/// Материализованный visual effect
#[derive(Component, Debug, Clone, PartialEq)]
pub struct SpawnedEffect {
    pub effect: String,
}

/// Компонент-маркер: деспавн entity после указанного времени
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct DespawnAfter {
    /// Время деспавна (в секундах от старта симуляции)
    pub despawn_time: f32,
}

/// Система: VisualEffectRequested → SpawnedEffect entity
pub fn spawn_requested_effects(
    mut commands: Commands,
    mut requests: EventReader<VisualEffectRequested>,
    time: Res<Time>,
    existing: Query<()>,
) {
    let now = time.elapsed_secs();

    for request in requests.read() {
        let mut entity_commands = commands.spawn((
            SpawnedEffect {
                effect: request.effect.clone(),
            },
            Transform::from_translation(request.position).with_rotation(request.rotation),
        ));

        if let Some(lifetime) = request.auto_destroy_after {
            entity_commands.insert(DespawnAfter {
                despawn_time: now + lifetime,
            });
        }

        if let Some(parent) = request.parent.filter(|parent| existing.contains(*parent)) {
            entity_commands.insert(ChildOf(parent));
        }
    }
}

/// Система: деспавн entities с истёкшим DespawnAfter timeout
pub fn despawn_after_timeout(mut commands: Commands, query: Query<(Entity, &DespawnAfter)>, time: Res<Time>) {
    let current_time = time.elapsed_secs();

    for (entity, despawn_after) in query.iter() {
        if current_time >= despawn_after.despawn_time {
            // Родитель мог уже удалить entity вместе с children
            commands.entity(entity).try_despawn();
        }
    }
}

/// Effects plugin — регистрирует events и expiry sweep в `SimulationSet::Effects`
pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<VisualEffectRequested>()
            .add_event::<SoundEffectRequested>()
            .add_systems(
                FixedUpdate,
                (spawn_requested_effects, despawn_after_timeout)
                    .chain()
                    .in_set(crate::SimulationSet::Effects),
            );
    }
}
