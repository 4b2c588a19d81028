//! Area damage resolver: overlap sphere → unique receivers → falloff.

use std::collections::HashSet;

use bevy::prelude::*;

use super::damage::find_health_receiver;
use crate::combat::{AreaDamageRequest, AreaOfDamage, DamageRequest, Damageable};
use crate::components::Health;
use crate::physics::{ColliderWorld, WorldQuery};

/// Отобрать collider'ы для area damage
///
/// Только с Damageable и с Health receiver; один receiver получает урон
/// один раз (первый collider в порядке overlap'а).
/// Возвращает пары (collider, receiver).
pub fn collect_area_targets(
    overlapped: &[Entity],
    is_damageable: impl Fn(Entity) -> bool,
    receiver_of: impl Fn(Entity) -> Option<Entity>,
) -> Vec<(Entity, Entity)> {
    let mut seen_receivers = HashSet::new();

    overlapped
        .iter()
        .copied()
        .filter(|&collider| is_damageable(collider))
        .filter_map(|collider| receiver_of(collider).map(|receiver| (collider, receiver)))
        .filter(|(_, receiver)| seen_receivers.insert(*receiver))
        .collect()
}

/// Система: AreaDamageRequest → DamageRequest (is_area = true) для каждой цели
pub fn resolve_area_damage(
    mut requests: EventReader<AreaDamageRequest>,
    mut damage_requests: EventWriter<DamageRequest>,
    collider_world: Res<ColliderWorld>,
    targets: Query<(&Transform, Has<Damageable>)>,
    parents: Query<&ChildOf>,
    healths: Query<(), With<Health>>,
) {
    for request in requests.read() {
        let overlapped = collider_world.overlap_sphere(request.center, request.radius, request.layers);

        let affected = collect_area_targets(
            &overlapped,
            |collider| targets.get(collider).map(|(_, damageable)| damageable).unwrap_or(false),
            |collider| {
                find_health_receiver(
                    collider,
                    |entity| healths.contains(entity),
                    |entity| parents.get(entity).ok().map(|child_of| child_of.0),
                )
            },
        );

        let area = AreaOfDamage {
            radius: request.radius,
            falloff: request.falloff,
        };

        for (collider, _receiver) in affected {
            let Ok((transform, _)) = targets.get(collider) else {
                continue;
            };

            let distance = transform.translation.distance(request.center);
            let amount = request.damage * area.damage_ratio(distance);

            damage_requests.write(DamageRequest {
                target: collider,
                amount,
                is_area: true,
                source: request.source,
            });
        }
    }
}
