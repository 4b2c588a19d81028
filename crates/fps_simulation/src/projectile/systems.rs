//! Projectile systems: advance (timeout → step → sweep → resolve) и spawn.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::components::{facing_rotation, Projectile};
use super::events::{ProjectileOutcome, ProjectileResolved, ProjectileSpawnRequest};
use super::hit::{hit_rejection, select_closest_valid_hit, ColliderTraits};
use crate::combat::{AreaDamageRequest, DamageRequest, Damageable};
use crate::components::PlayerShooter;
use crate::effects::{SoundCategory, SoundEffectRequested, VisualEffectRequested};
use crate::physics::{Collider, ColliderWorld, IgnoreHitDetection, QueryHit, WorldQuery};

/// Громкость / дальность impact звука
pub const IMPACT_SOUND_VOLUME: f32 = 1.0;
pub const IMPACT_SOUND_RANGE: f32 = 3.0;

/// Collider query для hit filtering
pub type ColliderTraitsQuery<'w, 's> =
    Query<'w, 's, (&'static Collider, Has<IgnoreHitDetection>, Has<Damageable>)>;

fn collider_traits(colliders: &ColliderTraitsQuery, collider: Entity) -> Option<ColliderTraits> {
    colliders
        .get(collider)
        .ok()
        .map(|(collider, ignore_hit_detection, damageable)| ColliderTraits {
            ignore_hit_detection,
            is_trigger: collider.is_trigger,
            damageable,
        })
}

fn is_hit_valid(colliders: &ColliderTraitsQuery, hit: &QueryHit, ignored: &[Entity]) -> bool {
    collider_traits(colliders, hit.collider)
        .is_some_and(|traits| hit_rejection(traits, hit.collider, ignored).is_none())
}

/// Все writers, нужные для разрешения попадания
#[derive(SystemParam)]
pub struct ImpactWriters<'w> {
    pub area_damage: EventWriter<'w, AreaDamageRequest>,
    pub damage: EventWriter<'w, DamageRequest>,
    pub visual: EventWriter<'w, VisualEffectRequested>,
    pub sound: EventWriter<'w, SoundEffectRequested>,
    pub resolved: EventWriter<'w, ProjectileResolved>,
}

/// Разрешить принятое попадание: damage, impact VFX/SFX, ProjectileResolved.
/// Despawn — на вызывающей стороне.
pub fn resolve_hit(
    projectile_entity: Entity,
    projectile: &Projectile,
    hit: QueryHit,
    collider_damageable: bool,
    writers: &mut ImpactWriters,
) {
    let config = &projectile.config;

    if let Some(area) = config.area_of_damage {
        writers.area_damage.write(AreaDamageRequest {
            damage: config.damage,
            center: hit.point,
            radius: area.radius,
            falloff: area.falloff,
            layers: config.hittable_layers,
            source: projectile.owner,
        });
    } else if collider_damageable {
        writers.damage.write(DamageRequest {
            target: hit.collider,
            amount: config.damage,
            is_area: false,
            source: projectile.owner,
        });
    }

    if let Some(effect) = &config.impact_effect {
        writers.visual.write(VisualEffectRequested {
            effect: effect.clone(),
            position: hit.point + hit.normal * config.impact_effect_spawn_offset,
            rotation: facing_rotation(hit.normal),
            parent: None,
            auto_destroy_after: (config.impact_effect_lifetime > 0.0).then_some(config.impact_effect_lifetime),
        });
    }

    if let Some(clip) = &config.impact_sound {
        writers.sound.write(SoundEffectRequested {
            clip: clip.clone(),
            position: hit.point,
            category: SoundCategory::Impact,
            volume: IMPACT_SOUND_VOLUME,
            range: IMPACT_SOUND_RANGE,
        });
    }

    writers.resolved.write(ProjectileResolved {
        projectile: projectile_entity,
        owner: projectile.owner,
        outcome: ProjectileOutcome::Hit {
            collider: hit.collider,
            point: hit.point,
            normal: hit.normal,
        },
    });
}

/// Collider'ы owner'а и всех его потомков (ignore-list для self-hits)
pub fn collect_owner_colliders(
    owner: Entity,
    children: &Query<&Children>,
    has_collider: impl Fn(Entity) -> bool,
) -> Vec<Entity> {
    let mut result = Vec::new();
    let mut stack = vec![owner];

    while let Some(entity) = stack.pop() {
        if has_collider(entity) {
            result.push(entity);
        }
        if let Ok(entity_children) = children.get(entity) {
            stack.extend(entity_children.iter());
        }
    }

    result.sort_by_key(|entity| entity.index());
    result
}

/// System: advance всех projectile'ов на один fixed tick
///
/// Порядок обработки — по Entity index (детерминированное разрешение hits).
pub fn advance_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    collider_world: Res<ColliderWorld>,
    mut projectiles: Query<(Entity, &mut Projectile, &mut Transform)>,
    colliders: ColliderTraitsQuery,
    mut writers: ImpactWriters,
) {
    let dt = time.delta_secs();

    let mut order: Vec<Entity> = projectiles.iter().map(|(entity, _, _)| entity).collect();
    order.sort_by_key(|entity| entity.index());

    for entity in order {
        let Ok((_, mut projectile, mut transform)) = projectiles.get_mut(entity) else {
            continue;
        };

        // Timeout: без hit processing
        if projectile.tick_life(dt) {
            writers.resolved.write(ProjectileResolved {
                projectile: entity,
                owner: projectile.owner,
                outcome: ProjectileOutcome::Expired,
            });
            commands.entity(entity).despawn();
            continue;
        }

        let (sweep_start, sweep_end) = projectile.step(&mut transform, dt);

        let hits = collider_world.sweep_sphere(
            sweep_start,
            sweep_end,
            projectile.config.radius,
            projectile.config.hittable_layers,
        );
        let closest = select_closest_valid_hit(&hits, |hit| {
            is_hit_valid(&colliders, hit, &projectile.ignored_colliders)
        });

        if let Some(mut hit) = closest {
            // Cast начался внутри collider'а
            if hit.distance <= 0.0 {
                hit.point = projectile.root_position(&transform);
                hit.normal = -transform.forward().as_vec3();
            }

            let damageable = collider_traits(&colliders, hit.collider).is_some_and(|traits| traits.damageable);
            resolve_hit(entity, &projectile, hit, damageable, &mut writers);
            commands.entity(entity).despawn();
            continue;
        }

        let root = projectile.root_position(&transform);
        projectile.last_root_position = root;
    }
}

/// System: ProjectileSpawnRequest → projectile entity
///
/// Для `PlayerShooter` — trajectory correction к camera aim ray и
/// raycast camera → muzzle: попадание в этом зазоре разрешается сразу.
pub fn spawn_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    mut requests: EventReader<ProjectileSpawnRequest>,
    collider_world: Res<ColliderWorld>,
    shooters: Query<&PlayerShooter>,
    cameras: Query<&Transform, Without<Projectile>>,
    children: Query<&Children>,
    colliders: ColliderTraitsQuery,
    mut writers: ImpactWriters,
) {
    let now = time.elapsed_secs();
    let dt = time.delta_secs();

    for request in requests.read() {
        let ignored = collect_owner_colliders(request.owner, &children, |entity| colliders.contains(entity));
        let (mut projectile, mut transform) = Projectile::launch(request, ignored, now, dt);

        let mut spawn_hit = None;
        if let Ok(shooter) = shooters.get(request.owner) {
            match cameras.get(shooter.camera) {
                Ok(camera) => {
                    let camera_to_muzzle = projectile.apply_camera_correction(
                        &mut transform,
                        camera.translation,
                        camera.forward().as_vec3(),
                    );

                    spawn_hit = collider_world
                        .raycast(
                            camera.translation,
                            camera_to_muzzle,
                            camera_to_muzzle.length(),
                            projectile.config.hittable_layers,
                        )
                        .filter(|hit| is_hit_valid(&colliders, hit, &projectile.ignored_colliders));
                }
                Err(_) => {
                    crate::logger::log_warning(&format!(
                        "PlayerShooter {:?}: camera {:?} not found, no trajectory correction",
                        request.owner, shooter.camera
                    ));
                }
            }
        }

        let mut entity_commands = commands.spawn((transform, projectile.clone()));
        let entity = entity_commands.id();

        // Попадание в зазоре camera → muzzle: projectile не делает ни одного tick'а
        if let Some(hit) = spawn_hit {
            let damageable = collider_traits(&colliders, hit.collider).is_some_and(|traits| traits.damageable);
            resolve_hit(entity, &projectile, hit, damageable, &mut writers);
            entity_commands.despawn();
        }
    }
}
