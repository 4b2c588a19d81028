//! Damage application и death systems.

use bevy::prelude::*;

use crate::combat::{DamageDealt, DamageRequest, Damageable, Dead, EntityDied};
use crate::components::Health;

/// Ограничение на глубину подъёма по иерархии (защита от циклов)
pub const MAX_HIERARCHY_DEPTH: usize = 64;

/// Найти получателя урона: сама entity или ближайший предок с Health
///
/// `has_health` / `parent_of` — доступ к миру (Query в системе, HashMap в тестах).
pub fn find_health_receiver(
    struck: Entity,
    has_health: impl Fn(Entity) -> bool,
    parent_of: impl Fn(Entity) -> Option<Entity>,
) -> Option<Entity> {
    let mut current = struck;

    for _ in 0..MAX_HIERARCHY_DEPTH {
        if has_health(current) {
            return Some(current);
        }
        current = parent_of(current)?;
    }

    None
}

/// Система: apply damage от DamageRequest событий
///
/// 1. Damageable на struck collider'е (иначе запрос отбрасывается)
/// 2. Health receiver вверх по `ChildOf` (нет receiver → no-op)
/// 3. final damage = base × multiplier (не для area) × self sensitivity (если receiver == source)
/// 4. DamageDealt, при смерти EntityDied + маркер Dead
pub fn apply_damage(
    mut commands: Commands,
    mut requests: EventReader<DamageRequest>,
    mut damage_dealt_events: EventWriter<DamageDealt>,
    mut entity_died_events: EventWriter<EntityDied>,
    damageables: Query<&Damageable>,
    parents: Query<&ChildOf>,
    mut healths: Query<&mut Health>,
) {
    for request in requests.read() {
        let Ok(damageable) = damageables.get(request.target) else {
            crate::logger::log_warning(&format!(
                "DamageRequest: {:?} has no Damageable, damage dropped",
                request.target
            ));
            continue;
        };

        let receiver = find_health_receiver(
            request.target,
            |entity| healths.contains(entity),
            |entity| parents.get(entity).ok().map(|child_of| child_of.0),
        );

        let Some(receiver) = receiver else {
            crate::logger::log(&format!(
                "DamageRequest: no Health receiver above {:?}, damage dropped",
                request.target
            ));
            continue;
        };

        let Ok(mut health) = healths.get_mut(receiver) else {
            continue;
        };

        // Мёртвые урон не получают
        if !health.is_alive() {
            continue;
        }

        let is_self = receiver == request.source;
        let final_damage = damageable.final_damage(request.amount, request.is_area, is_self);

        health.take_damage(final_damage);
        let target_died = !health.is_alive();

        crate::logger::log(&format!(
            "💥 Damage: {:?} → {:?} ({:.1} dmg{}{}, hp {:.1}/{:.1})",
            request.source,
            receiver,
            final_damage,
            if request.is_area { ", area" } else { "" },
            if is_self { ", self" } else { "" },
            health.current,
            health.max
        ));

        damage_dealt_events.write(DamageDealt {
            source: request.source,
            target: receiver,
            struck: request.target,
            damage: final_damage,
            is_area: request.is_area,
            target_died,
        });

        if target_died {
            entity_died_events.write(EntityDied {
                entity: receiver,
                killer: Some(request.source),
            });

            if let Ok(mut entity_commands) = commands.get_entity(receiver) {
                entity_commands.insert(Dead);
            }

            crate::logger::log_info(&format!("☠️ Entity {:?} killed by {:?}", receiver, request.source));
        }
    }
}
