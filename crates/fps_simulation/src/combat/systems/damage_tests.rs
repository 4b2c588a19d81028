//! Tests for damage systems.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use bevy::ecs::event::Events;
    use bevy::ecs::system::RunSystemOnce;
    use bevy::prelude::*;

    use crate::combat::{apply_damage, find_health_receiver, DamageDealt, DamageRequest, Damageable, Dead, EntityDied};
    use crate::components::Health;

    fn damage_app() -> App {
        let mut app = App::new();
        app.add_event::<DamageRequest>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>();
        app
    }

    fn read_events<E: Event + Clone>(app: &App) -> Vec<E> {
        let events = app.world().resource::<Events<E>>();
        let mut cursor = events.get_cursor();
        cursor.read(events).cloned().collect()
    }

    #[test]
    fn test_final_damage_formula() {
        let damageable = Damageable {
            damage_multiplier: 2.0,
            self_damage_sensitivity: 0.5,
        };

        // Point damage: multiplier применяется
        assert_eq!(damageable.final_damage(10.0, false, false), 20.0);
        // Self point damage: base × multiplier × sensitivity
        assert_eq!(damageable.final_damage(10.0, false, true), 10.0);
        // Area damage: multiplier пропускается
        assert_eq!(damageable.final_damage(10.0, true, false), 10.0);
        assert_eq!(damageable.final_damage(10.0, true, true), 5.0);
    }

    #[test]
    fn test_damageable_defaults() {
        let damageable = Damageable::default();
        assert_eq!(damageable.damage_multiplier, 1.0);
        assert_eq!(damageable.self_damage_sensitivity, 0.5);
    }

    #[test]
    fn test_find_health_receiver_walks_up() {
        let body = Entity::from_raw(1);
        let arm = Entity::from_raw(2);
        let hand = Entity::from_raw(3);
        let prop = Entity::from_raw(4);

        let parents: HashMap<Entity, Entity> = [(arm, body), (hand, arm)].into_iter().collect();
        let has_health = |entity: Entity| entity == body;
        let parent_of = |entity: Entity| parents.get(&entity).copied();

        assert_eq!(find_health_receiver(hand, has_health, parent_of), Some(body));
        assert_eq!(find_health_receiver(body, has_health, parent_of), Some(body));
        assert_eq!(find_health_receiver(prop, has_health, parent_of), None);
    }

    #[test]
    fn test_find_health_receiver_survives_cycle() {
        let a = Entity::from_raw(1);
        let b = Entity::from_raw(2);
        let parent_of = |entity: Entity| if entity == a { Some(b) } else { Some(a) };

        assert_eq!(find_health_receiver(a, |_| false, parent_of), None);
    }

    #[test]
    fn test_apply_damage_through_child_collider() {
        let mut app = damage_app();

        let shooter = app.world_mut().spawn(Health::new(100.0)).id();
        let target = app.world_mut().spawn(Health::new(100.0)).id();
        let head = app
            .world_mut()
            .spawn((Damageable::with_multiplier(2.0), ChildOf(target)))
            .id();

        app.world_mut().send_event(DamageRequest {
            target: head,
            amount: 15.0,
            is_area: false,
            source: shooter,
        });
        let _ = app.world_mut().run_system_once(apply_damage);

        let health = app.world().get::<Health>(target).expect("target health");
        assert_eq!(health.current, 70.0);

        let dealt: Vec<DamageDealt> = read_events(&app);
        assert_eq!(dealt.len(), 1);
        assert_eq!(dealt[0].target, target);
        assert_eq!(dealt[0].struck, head);
        assert_eq!(dealt[0].damage, 30.0);
        assert!(!dealt[0].target_died);
    }

    #[test]
    fn test_self_damage_attenuated() {
        let mut app = damage_app();

        let shooter = app
            .world_mut()
            .spawn((Health::new(100.0), Damageable::with_multiplier(1.5)))
            .id();

        app.world_mut().send_event(DamageRequest {
            target: shooter,
            amount: 40.0,
            is_area: false,
            source: shooter,
        });
        let _ = app.world_mut().run_system_once(apply_damage);

        // 40 × 1.5 × 0.5 = 30
        let health = app.world().get::<Health>(shooter).expect("health");
        assert_eq!(health.current, 70.0);
    }

    #[test]
    fn test_no_receiver_is_noop() {
        let mut app = damage_app();

        let shooter = app.world_mut().spawn_empty().id();
        let crate_box = app.world_mut().spawn(Damageable::default()).id();

        app.world_mut().send_event(DamageRequest {
            target: crate_box,
            amount: 40.0,
            is_area: false,
            source: shooter,
        });
        let _ = app.world_mut().run_system_once(apply_damage);

        let dealt: Vec<DamageDealt> = read_events(&app);
        assert!(dealt.is_empty());
    }

    #[test]
    fn test_lethal_damage_marks_dead_once() {
        let mut app = damage_app();

        let shooter = app.world_mut().spawn_empty().id();
        let target = app.world_mut().spawn((Health::new(50.0), Damageable::default())).id();

        for _ in 0..2 {
            app.world_mut().send_event(DamageRequest {
                target,
                amount: 60.0,
                is_area: false,
                source: shooter,
            });
        }
        let _ = app.world_mut().run_system_once(apply_damage);

        let health = app.world().get::<Health>(target).expect("health");
        assert_eq!(health.current, 0.0);
        assert!(app.world().get::<Dead>(target).is_some());

        let died: Vec<EntityDied> = read_events(&app);
        assert_eq!(died.len(), 1);
        assert_eq!(died[0].killer, Some(shooter));
    }
}
