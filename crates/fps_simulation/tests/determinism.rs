//! Property-based тесты детерминизма
//!
//! Проверяем что перестрелка с одинаковым seed даёт идентичные результаты
//! (spread берётся из DeterministicRng, порядок обработки — по Entity index)

mod common;

use bevy::prelude::*;
use common::*;
use fps_simulation::*;

/// Ряд target'ов перед shotgun'ом
fn spawn_target_row(app: &mut App, count: usize) {
    for i in 0..count {
        let x = (i as f32 - count as f32 / 2.0) * 0.8;
        spawn_target(app, Vec3::new(x, 0.0, -12.0), 0.35);
    }
}

/// Запускает перестрелку и возвращает snapshot мира
fn run_firefight(seed: u64, tick_count: usize) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let mut app = create_fps_app(seed);

    let shooter = spawn_shooter(&mut app, Vec3::ZERO);
    spawn_weapon(&mut app, shooter, Vec3::new(0.0, 0.0, -0.2), WeaponConfig::shotgun());
    spawn_weapon(&mut app, shooter, Vec3::new(0.5, 0.0, -0.2), WeaponConfig::auto_rifle());
    spawn_target_row(&mut app, 10);

    for tick in 0..tick_count {
        // Каждые ~0.8 сек новый залп, между залпами кнопка отпущена
        match tick % 50 {
            0 => fire_input(&mut app, shooter).press(),
            30 => fire_input(&mut app, shooter).release(),
            _ => {}
        }
        app.update();
    }

    let directions: Vec<u8> = recorded::<ProjectileSpawnRequest>(&app)
        .iter()
        .flat_map(|request| format!("{:?}", request.direction).into_bytes())
        .collect();

    let world = app.world_mut();
    (
        world_snapshot::<Health>(world),
        world_snapshot::<Projectile>(world),
        directions,
    )
}

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;
    const TICK_COUNT: usize = 300;

    let run1 = run_firefight(SEED, TICK_COUNT);
    let run2 = run_firefight(SEED, TICK_COUNT);

    assert!(!run1.2.is_empty(), "Перестрелка должна произвести выстрелы");
    assert_eq!(run1.0, run2.0, "Health разошёлся при seed {}", SEED);
    assert_eq!(run1.1, run2.1, "Projectiles разошлись при seed {}", SEED);
    assert_eq!(run1.2, run2.2, "Spread разошёлся при seed {}", SEED);
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;
    const TICK_COUNT: usize = 200;

    // Запускаем 3 раза — все должны быть идентичны
    let snapshots: Vec<_> = (0..3).map(|_| run_firefight(SEED, TICK_COUNT)).collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(snapshots[0], *snapshot, "Прогон {} дал результат отличный от прогона 0", i);
    }
}

#[test]
fn test_different_seed_changes_spread() {
    const TICK_COUNT: usize = 10;

    let (_, _, directions_a) = run_firefight(1, TICK_COUNT);
    let (_, _, directions_b) = run_firefight(2, TICK_COUNT);

    assert_ne!(directions_a, directions_b, "Разные seed должны давать разный spread");
}
