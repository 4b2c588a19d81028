//! Weapon systems: validation, muzzle tracking, ammo / charge, fire inputs.

use bevy::prelude::*;

use super::components::Weapon;
use super::spread::shot_direction_within_spread;
use crate::effects::{SoundCategory, SoundEffectRequested, VisualEffectRequested};
use crate::input::FireInput;
use crate::projectile::ProjectileSpawnRequest;
use crate::DeterministicRng;

/// Время жизни muzzle flash (секунды)
pub const MUZZLE_FLASH_LIFETIME: f32 = 2.0;
/// Дальность слышимости выстрела / смены оружия
pub const WEAPON_SOUND_RANGE: f32 = 20.0;

/// Event: показать / убрать оружие (смена оружия)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponVisibilityRequest {
    pub weapon: Entity,
    pub show: bool,
}

/// Muzzle transform; без muzzle entity — transform самого оружия
fn muzzle_transform(weapon: &Weapon, weapon_transform: &Transform, muzzles: &Query<&Transform, Without<Weapon>>) -> Transform {
    weapon
        .muzzle
        .and_then(|muzzle| muzzles.get(muzzle).ok())
        .copied()
        .unwrap_or(*weapon_transform)
}

/// System: проверка конфигурации новых оружий (ошибки логируются, не фатальны)
pub fn validate_new_weapons(
    weapons: Query<(Entity, &Weapon), Added<Weapon>>,
    muzzles: Query<(), (With<Transform>, Without<Weapon>)>,
) {
    for (entity, weapon) in weapons.iter() {
        if let Err(error) = weapon.config.validate() {
            crate::logger::log_error(&format!("Weapon {:?}: invalid config: {:#}", entity, error));
        }

        match weapon.muzzle {
            Some(muzzle) if muzzles.contains(muzzle) => {}
            Some(muzzle) => crate::logger::log_error(&format!(
                "Weapon {:?} ('{}'): muzzle {:?} not found, firing from weapon transform",
                entity, weapon.config.name, muzzle
            )),
            None => crate::logger::log_warning(&format!(
                "Weapon {:?} ('{}'): no muzzle, firing from weapon transform",
                entity, weapon.config.name
            )),
        }
    }
}

/// System: muzzle world velocity (для inherited velocity projectile'ов)
pub fn track_muzzle_velocity(
    time: Res<Time>,
    mut weapons: Query<(&mut Weapon, &Transform)>,
    muzzles: Query<&Transform, Without<Weapon>>,
) {
    let dt = time.delta_secs();

    for (mut weapon, transform) in weapons.iter_mut() {
        let muzzle = muzzle_transform(&weapon, transform, &muzzles);
        weapon.track_muzzle(muzzle.translation, dt);
    }
}

/// System: регенерация патронов + накопление заряда
pub fn update_weapon_resources(time: Res<Time>, mut weapons: Query<&mut Weapon>) {
    let now = time.elapsed_secs();
    let dt = time.delta_secs();

    for mut weapon in weapons.iter_mut() {
        weapon.update_ammo(now, dt);
        weapon.update_charge(now, dt);
    }
}

/// System: show / hide оружия + звук смены
pub fn apply_weapon_visibility(
    mut requests: EventReader<WeaponVisibilityRequest>,
    mut weapons: Query<(&mut Weapon, &Transform)>,
    mut sound_events: EventWriter<SoundEffectRequested>,
) {
    for request in requests.read() {
        let Ok((mut weapon, transform)) = weapons.get_mut(request.weapon) else {
            crate::logger::log_warning(&format!("WeaponVisibilityRequest: {:?} is not a weapon", request.weapon));
            continue;
        };

        if weapon.set_active(request.show) {
            if let Some(clip) = weapon.config.switch_sound.clone() {
                sound_events.write(SoundEffectRequested {
                    clip,
                    position: transform.translation,
                    category: SoundCategory::WeaponSwitch,
                    volume: 1.0,
                    range: WEAPON_SOUND_RANGE,
                });
            }
        }
    }
}

/// System: fire inputs → ProjectileSpawnRequest (× bullets_per_shot) + muzzle flash + shoot sound
///
/// Оружия обрабатываются по Entity index — RNG spread детерминирован.
pub fn handle_weapon_fire_inputs(
    time: Res<Time>,
    mut rng: ResMut<DeterministicRng>,
    mut weapons: Query<(Entity, &mut Weapon, &Transform)>,
    muzzles: Query<&Transform, Without<Weapon>>,
    inputs: Query<&FireInput>,
    mut spawn_requests: EventWriter<ProjectileSpawnRequest>,
    mut visual_events: EventWriter<VisualEffectRequested>,
    mut sound_events: EventWriter<SoundEffectRequested>,
) {
    let now = time.elapsed_secs();

    let mut order: Vec<Entity> = weapons.iter().map(|(entity, _, _)| entity).collect();
    order.sort_by_key(|entity| entity.index());

    for entity in order {
        let Ok((_, mut weapon, transform)) = weapons.get_mut(entity) else {
            continue;
        };
        if !weapon.is_active {
            continue;
        }
        let Ok(input) = inputs.get(weapon.owner) else {
            continue;
        };

        let Some(shot) = weapon.handle_shoot_inputs(input, now) else {
            continue;
        };

        let muzzle = muzzle_transform(&weapon, transform, &muzzles);
        let forward = muzzle.forward().as_vec3();

        for _ in 0..shot.bullets {
            let direction = shot_direction_within_spread(forward, weapon.config.bullet_spread_angle, &mut rng.rng);
            spawn_requests.write(ProjectileSpawnRequest {
                weapon: entity,
                owner: weapon.owner,
                position: muzzle.translation,
                direction,
                config: weapon.config.projectile.clone(),
                inherited_muzzle_velocity: weapon.muzzle_world_velocity,
                charge: shot.charge,
            });
        }

        if let Some(effect) = &weapon.config.muzzle_flash {
            visual_events.write(VisualEffectRequested {
                effect: effect.clone(),
                position: muzzle.translation,
                rotation: muzzle.rotation,
                parent: weapon.muzzle,
                auto_destroy_after: Some(MUZZLE_FLASH_LIFETIME),
            });
        }

        if let Some(clip) = &weapon.config.shoot_sound {
            sound_events.write(SoundEffectRequested {
                clip: clip.clone(),
                position: muzzle.translation,
                category: SoundCategory::WeaponShoot,
                volume: 1.0,
                range: WEAPON_SOUND_RANGE,
            });
        }

        crate::logger::log(&format!(
            "🔫 Weapon {:?} ('{}') fired {} bullet(s), charge {:.2}, ammo {:.2}/{}",
            entity, weapon.config.name, shot.bullets, shot.charge, weapon.current_ammo, weapon.config.max_ammo
        ));
    }
}
