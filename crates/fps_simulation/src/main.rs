//! Headless симуляция перестрелки
//!
//! `fps_simulation [presets.json]` — без аргумента берутся встроенные presets.
//! Каждое оружие стреляет по ряду мишеней, в конце печатается итог.

use anyhow::{Context, Result};
use bevy::prelude::*;
use fps_simulation::logger::{set_log_level, LogLevel};
use fps_simulation::*;
use fps_simulation::combat::Dead;

const TICKS_PER_WEAPON: usize = 300;

fn load_presets() -> Result<WeaponPresets> {
    match std::env::args().nth(1) {
        Some(path) => WeaponPresets::load_from_path(&path),
        None => Ok(WeaponPresets::builtin()),
    }
}

fn spawn_range(app: &mut App) -> Vec<Entity> {
    (0..5)
        .map(|i| {
            app.world_mut()
                .spawn((
                    Name::new(format!("Target {}", i)),
                    Transform::from_xyz(i as f32 - 2.0, 0.0, -15.0),
                    Health::new(100.0),
                    Damageable::default(),
                    Collider::sphere(0.5).with_layer(physics::LAYER_ACTORS),
                ))
                .id()
        })
        .collect()
}

fn run_weapon(seed: u64, config: WeaponConfig) -> Result<()> {
    let name = config.name.clone();
    let fire_mode = config.fire_mode;
    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);

    let camera = app.world_mut().spawn(Transform::from_xyz(0.0, 0.6, 0.0)).id();
    let shooter = app
        .world_mut()
        .spawn((
            Name::new("Player"),
            Transform::default(),
            FireInput::default(),
            PlayerShooter { camera },
            Health::new(100.0),
            Damageable::default(),
            Collider::sphere(0.4).with_layer(physics::LAYER_ACTORS),
        ))
        .id();
    let weapon = app
        .world_mut()
        .spawn((
            Transform::from_xyz(0.25, 0.4, -0.5),
            Weapon::new(config, shooter),
            ChildOf(shooter),
        ))
        .id();
    let targets = spawn_range(&mut app);

    app.update();
    for tick in 0..TICKS_PER_WEAPON {
        {
            let mut input = app
                .world_mut()
                .get_mut::<FireInput>(shooter)
                .context("shooter lost FireInput")?;

            // Charge: держим ~1 сек и отпускаем; остальные — нажатие раз в 0.5 сек
            match (fire_mode, tick % 60) {
                (FireMode::Charge, 0) => input.press(),
                (FireMode::Charge, 59) => input.release(),
                (FireMode::Charge, _) => {}
                (_, 0 | 30) => input.press(),
                (_, 15 | 45) => input.release(),
                _ => {}
            }
        }
        app.update();
    }

    let ammo = app
        .world()
        .get::<Weapon>(weapon)
        .map(|weapon| weapon.current_ammo)
        .unwrap_or_default();
    println!("== {} (ammo left {:.2}) ==", name, ammo);

    for target in targets {
        let health = app.world().get::<Health>(target).context("target lost Health")?;
        let dead = app.world().get::<Dead>(target).is_some();
        println!(
            "  {:?}: {:.1}/{:.1}{}",
            target,
            health.current,
            health.max,
            if dead { " (dead)" } else { "" }
        );
    }

    Ok(())
}

fn main() -> Result<()> {
    let seed = 42;
    println!("Starting FPS headless simulation (seed: {})", seed);

    init_logger();
    // Per-shot логи (DEBUG) в demo не нужны
    set_log_level(LogLevel::Info);

    let presets = load_presets()?;
    for name in presets.names() {
        let config = presets.get(name).cloned().context("preset disappeared")?;
        run_weapon(seed, config).with_context(|| format!("simulating weapon '{}'", name))?;
    }

    println!("Simulation complete!");
    Ok(())
}
