//! Общие helpers для integration тестов

#![allow(dead_code)]

use bevy::prelude::*;
use fps_simulation::*;

/// Все события типа `E`, пойманные за время теста
#[derive(Resource)]
pub struct Recorded<E: Event + Clone>(pub Vec<E>);

impl<E: Event + Clone> Default for Recorded<E> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

fn record<E: Event + Clone>(mut reader: EventReader<E>, mut recorded: ResMut<Recorded<E>>) {
    recorded.0.extend(reader.read().cloned());
}

fn add_recorder<E: Event + Clone>(app: &mut App) {
    app.init_resource::<Recorded<E>>()
        .add_systems(FixedUpdate, record::<E>.in_set(SimulationSet::Cleanup));
}

/// Headless App с SimulationPlugin и записью ключевых событий
///
/// После создания делает один "холостой" update (первый delta = 0),
/// дальше каждый `app.update()` = ровно один fixed tick.
pub fn create_fps_app(seed: u64) -> App {
    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);

    add_recorder::<ProjectileSpawnRequest>(&mut app);
    add_recorder::<ProjectileResolved>(&mut app);
    add_recorder::<DamageDealt>(&mut app);
    add_recorder::<EntityDied>(&mut app);
    add_recorder::<VisualEffectRequested>(&mut app);
    add_recorder::<SoundEffectRequested>(&mut app);

    app.update();
    app
}

pub fn run_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.update();
    }
}

pub fn recorded<E: Event + Clone>(app: &App) -> Vec<E> {
    app.world().resource::<Recorded<E>>().0.clone()
}

pub fn projectile_count(app: &mut App) -> usize {
    let world = app.world_mut();
    world.query::<&Projectile>().iter(world).count()
}

/// Shooter с collider'ом-капсулой (сфера) и Health
pub fn spawn_shooter(app: &mut App, position: Vec3) -> Entity {
    app.world_mut()
        .spawn((
            Transform::from_translation(position),
            FireInput::default(),
            Health::new(100.0),
            Damageable::default(),
            Collider::sphere(0.5).with_layer(physics::LAYER_ACTORS),
        ))
        .id()
}

/// Оружие в руках shooter'а, смотрит в -Z
pub fn spawn_weapon(app: &mut App, owner: Entity, position: Vec3, config: WeaponConfig) -> Entity {
    app.world_mut()
        .spawn((
            Transform::from_translation(position),
            Weapon::new(config, owner),
            ChildOf(owner),
        ))
        .id()
}

pub fn spawn_target(app: &mut App, position: Vec3, radius: f32) -> Entity {
    app.world_mut()
        .spawn((
            Transform::from_translation(position),
            Health::new(100.0),
            Damageable::default(),
            Collider::sphere(radius).with_layer(physics::LAYER_ACTORS),
        ))
        .id()
}

pub fn fire_input(app: &mut App, shooter: Entity) -> Mut<'_, FireInput> {
    app.world_mut()
        .get_mut::<FireInput>(shooter)
        .expect("shooter has FireInput")
}

pub fn health(app: &App, entity: Entity) -> f32 {
    app.world().get::<Health>(entity).map(|health| health.current).unwrap_or(f32::NAN)
}

/// Простой оружейный конфиг: без звука/VFX, без коррекции, быстрый projectile
pub fn test_rifle() -> WeaponConfig {
    WeaponConfig {
        name: "test_rifle".to_string(),
        fire_mode: FireMode::Manual,
        delay_between_shots: 0.5,
        projectile: ProjectileConfig {
            speed: 60.0,
            damage: 25.0,
            ..Default::default()
        },
        ..Default::default()
    }
}
