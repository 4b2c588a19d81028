//! Combat integration test
//!
//! Два shooter'а с auto rifle стреляют друг в друга headless 1000 тиков
//!
//! Проверяем:
//! - Health инварианты (0 ≤ current ≤ max)
//! - Ammo инварианты (0 ≤ ammo ≤ max)
//! - Смерть фиксируется ровно один раз (Dead + EntityDied)
//! - Нет паники/крашей

mod common;

use bevy::prelude::*;
use common::*;
use fps_simulation::*;
use fps_simulation::combat::Dead;

/// Helper: shooter с auto rifle, смотрящим в `facing`
fn spawn_rifleman(app: &mut App, position: Vec3, facing: Vec3) -> (Entity, Entity) {
    let shooter = spawn_shooter(app, position);
    let weapon = app
        .world_mut()
        .spawn((
            Transform::from_translation(position + facing * 0.2).looking_to(facing, Vec3::Y),
            Weapon::new(WeaponConfig::auto_rifle(), shooter),
            ChildOf(shooter),
        ))
        .id();
    (shooter, weapon)
}

/// Test: 2 shooter'а перестреливаются 1000 тиков без краша
#[test]
fn test_two_riflemen_fight_1000_ticks() {
    let mut app = create_fps_app(42);

    let (alpha, alpha_weapon) = spawn_rifleman(&mut app, Vec3::ZERO, Vec3::NEG_Z);
    let (bravo, bravo_weapon) = spawn_rifleman(&mut app, Vec3::new(0.0, 0.0, -10.0), Vec3::Z);

    fire_input(&mut app, alpha).press();
    fire_input(&mut app, bravo).press();

    for tick in 0..1000 {
        app.update();

        for entity in [alpha, bravo] {
            let health = app.world().get::<Health>(entity).expect("Health");
            assert!(
                health.current >= 0.0 && health.current <= health.max,
                "Tick {}: health вне диапазона: {:?}",
                tick,
                health
            );
        }
        for weapon in [alpha_weapon, bravo_weapon] {
            let weapon = app.world().get::<Weapon>(weapon).expect("Weapon");
            assert!(
                weapon.current_ammo >= 0.0 && weapon.current_ammo <= weapon.config.max_ammo,
                "Tick {}: ammo вне диапазона: {}",
                tick,
                weapon.current_ammo
            );
        }
    }

    // 10 попаданий по 10 HP — оба мертвы
    for entity in [alpha, bravo] {
        assert_eq!(health(&app, entity), 0.0);
        assert!(app.world().get::<Dead>(entity).is_some(), "{:?} должен получить Dead", entity);
    }

    let deaths = recorded::<EntityDied>(&app);
    assert_eq!(deaths.len(), 2, "Каждая смерть — ровно одно событие: {:?}", deaths);
    assert!(deaths.iter().any(|death| death.entity == alpha && death.killer == Some(bravo)));
    assert!(deaths.iter().any(|death| death.entity == bravo && death.killer == Some(alpha)));

    // Урон по мёртвым не засчитывается
    let hits_on_alpha = recorded::<DamageDealt>(&app)
        .iter()
        .filter(|event| event.target == alpha)
        .count();
    assert_eq!(hits_on_alpha, 10);
}

/// Test: headshot multiplier на дочернем hitbox'е, Health на родителе
#[test]
fn test_headshot_hitbox_damages_parent_health() {
    let mut app = create_fps_app(42);

    let shooter = spawn_shooter(&mut app, Vec3::ZERO);
    spawn_weapon(&mut app, shooter, Vec3::new(0.0, 0.0, -0.2), test_rifle());

    let body = app
        .world_mut()
        .spawn((Transform::from_xyz(0.0, -5.0, -10.0), Health::new(100.0)))
        .id();
    let head = app
        .world_mut()
        .spawn((
            Transform::from_xyz(0.0, 0.0, -10.0),
            Damageable::with_multiplier(2.0),
            Collider::sphere(0.3).with_layer(physics::LAYER_ACTORS),
            ChildOf(body),
        ))
        .id();

    fire_input(&mut app, shooter).press();
    run_ticks(&mut app, 20);

    assert_eq!(health(&app, body), 50.0, "25 × 2.0 headshot");

    let dealt = recorded::<DamageDealt>(&app);
    assert_eq!(dealt.len(), 1);
    assert_eq!(dealt[0].target, body);
    assert_eq!(dealt[0].struck, head);
}
