//! FPS Simulation Core
//!
//! ECS-симуляция ranged combat на Bevy 0.16:
//! - weapon: fire modes (manual / automatic / charge), ammo, spread
//! - projectile: motion, trajectory correction, swept collision, impacts
//! - combat: Damageable → Health, area damage с falloff
//! - physics: WorldQuery capability (sweep / raycast / overlap)
//!
//! Rendering, audio и input devices — снаружи. Симуляция публикует
//! effect events и читает `FireInput` компоненты.
//!
//! ## Порядок fixed tick (60Hz):
//! `SyncColliders → Weapons → Projectiles → Damage → Effects → Cleanup`

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod combat;
pub mod components;
pub mod config;
pub mod effects;
pub mod input;
pub mod logger;
pub mod physics;
pub mod projectile;
pub mod weapon;

// Re-export базовых типов для удобства
pub use combat::{
    AreaDamageRequest, AreaOfDamage, CombatPlugin, DamageDealt, DamageFalloff, DamageRequest, Damageable,
    EntityDied,
};
pub use components::*;
pub use config::WeaponPresets;
pub use effects::{EffectsPlugin, SoundCategory, SoundEffectRequested, SpawnedEffect, VisualEffectRequested};
pub use input::{FireInput, FireInputProvider};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use physics::{Collider, HitLayers, IgnoreHitDetection, PhysicsPlugin, QueryHit, WorldQuery};
pub use projectile::{
    Projectile, ProjectileConfig, ProjectileOutcome, ProjectilePlugin, ProjectileResolved, ProjectileSpawnRequest,
};
pub use weapon::{FireMode, FiredShot, FuelCells, Weapon, WeaponConfig, WeaponPlugin};

/// Fixed tick rate симуляции
pub const SIMULATION_HZ: f64 = 60.0;

/// Фазы fixed tick (chained, выполняются строго по порядку)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Пересборка ColliderWorld
    SyncColliders,
    /// Ammo / charge / fire inputs → ProjectileSpawnRequest
    Weapons,
    /// Advance существующих projectile'ов, затем spawn новых
    Projectiles,
    /// Area expansion + apply damage + deaths
    Damage,
    /// Effect records + expiry sweep
    Effects,
    /// Сброс per-tick input edges
    Cleanup,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Seed, выставленный host'ом (create_headless_app), не перетираем
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ))
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::SyncColliders,
                    SimulationSet::Weapons,
                    SimulationSet::Projectiles,
                    SimulationSet::Damage,
                    SimulationSet::Effects,
                    SimulationSet::Cleanup,
                )
                    .chain(),
            )
            .add_plugins((
                PhysicsPlugin,
                WeaponPlugin,
                ProjectilePlugin,
                CombatPlugin,
                EffectsPlugin,
            ))
            .add_systems(
                FixedUpdate,
                input::clear_fire_input_edges.in_set(SimulationSet::Cleanup),
            );
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время двигается ровно на 1/60 сек за `app.update()` — один fixed tick
/// на update, без зависимости от wall clock.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / SIMULATION_HZ,
        )))
        .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ)); // 60Hz FixedUpdate

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
