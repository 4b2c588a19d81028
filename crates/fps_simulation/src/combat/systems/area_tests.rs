//! Tests for area damage resolver.

#[cfg(test)]
mod tests {
    use bevy::ecs::event::Events;
    use bevy::ecs::system::RunSystemOnce;
    use bevy::prelude::*;

    use crate::combat::systems::collect_area_targets;
    use crate::combat::{resolve_area_damage, AreaDamageRequest, AreaOfDamage, DamageFalloff, DamageRequest, Damageable};
    use crate::components::Health;
    use crate::physics::{sync_collider_world, Collider, ColliderWorld, HitLayers};

    #[test]
    fn test_falloff_curves() {
        assert_eq!(DamageFalloff::Constant.evaluate(0.9), 1.0);
        assert_eq!(DamageFalloff::Linear.evaluate(0.0), 1.0);
        assert!((DamageFalloff::Linear.evaluate(0.25) - 0.75).abs() < 1e-6);
        assert_eq!(DamageFalloff::Linear.evaluate(1.5), 0.0);

        let area = AreaOfDamage {
            radius: 4.0,
            falloff: DamageFalloff::Linear,
        };
        assert!((area.damage_ratio(1.0) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_collect_area_targets_dedupes_receivers() {
        let body = Entity::from_raw(1);
        let head = Entity::from_raw(2);
        let torso = Entity::from_raw(3);
        let wall = Entity::from_raw(4);

        let targets = collect_area_targets(
            &[head, wall, torso],
            |entity| entity != wall,
            |entity| if entity == head || entity == torso { Some(body) } else { None },
        );

        assert_eq!(targets, vec![(head, body)]);
    }

    #[test]
    fn test_resolve_area_damage_applies_falloff() {
        let mut app = App::new();
        app.add_event::<AreaDamageRequest>()
            .add_event::<DamageRequest>()
            .init_resource::<ColliderWorld>();

        let source = app.world_mut().spawn_empty().id();
        let near = app
            .world_mut()
            .spawn((
                Health::new(100.0),
                Damageable::default(),
                Collider::sphere(0.5),
                Transform::from_xyz(1.0, 0.0, 0.0),
            ))
            .id();
        let _far = app
            .world_mut()
            .spawn((
                Health::new(100.0),
                Damageable::default(),
                Collider::sphere(0.5),
                Transform::from_xyz(20.0, 0.0, 0.0),
            ))
            .id();
        // Без Damageable: в зоне, но урон не получает
        let _rock = app
            .world_mut()
            .spawn((Collider::sphere(0.5), Transform::from_xyz(0.0, 1.0, 0.0)))
            .id();

        let _ = app.world_mut().run_system_once(sync_collider_world);

        app.world_mut().send_event(AreaDamageRequest {
            damage: 80.0,
            center: Vec3::ZERO,
            radius: 4.0,
            falloff: DamageFalloff::Linear,
            layers: HitLayers::ALL,
            source,
        });
        let _ = app.world_mut().run_system_once(resolve_area_damage);

        let events = app.world().resource::<Events<DamageRequest>>();
        let mut cursor = events.get_cursor();
        let requests: Vec<DamageRequest> = cursor.read(events).copied().collect();

        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].target, near);
        assert!(requests[0].is_area);
        // distance 1 / radius 4 → 0.75
        assert!((requests[0].amount - 60.0).abs() < 1e-4);
    }
}
