//! Hit validity policy + closest hit selection

use bevy::prelude::*;

use crate::physics::QueryHit;

/// Почему hit отклонён (проверки в этом порядке)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitRejection {
    /// Collider помечен `IgnoreHitDetection`
    IgnoreHitDetection,
    /// Trigger без Damageable (pickup, zone)
    TriggerWithoutDamageable,
    /// Collider из ignore-list (owner иерархия)
    IgnoredCollider,
}

/// Свойства collider'а, важные для hit filtering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColliderTraits {
    pub ignore_hit_detection: bool,
    pub is_trigger: bool,
    pub damageable: bool,
}

pub fn hit_rejection(traits: ColliderTraits, collider: Entity, ignored: &[Entity]) -> Option<HitRejection> {
    if traits.ignore_hit_detection {
        return Some(HitRejection::IgnoreHitDetection);
    }
    if traits.is_trigger && !traits.damageable {
        return Some(HitRejection::TriggerWithoutDamageable);
    }
    if ignored.contains(&collider) {
        return Some(HitRejection::IgnoredCollider);
    }
    None
}

/// Ближайший валидный hit (строгое `<`: при равных дистанциях побеждает первый)
pub fn select_closest_valid_hit(hits: &[QueryHit], mut is_valid: impl FnMut(&QueryHit) -> bool) -> Option<QueryHit> {
    let mut closest: Option<QueryHit> = None;

    for hit in hits {
        let closer = closest.map_or(true, |current| hit.distance < current.distance);
        if closer && is_valid(hit) {
            closest = Some(*hit);
        }
    }

    closest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(collider: u32, distance: f32) -> QueryHit {
        QueryHit {
            point: Vec3::new(0.0, 0.0, -distance),
            normal: Vec3::Z,
            collider: Entity::from_raw(collider),
            distance,
        }
    }

    #[test]
    fn test_rejection_order() {
        let collider = Entity::from_raw(7);
        let ignored = [collider];

        let all_flags = ColliderTraits {
            ignore_hit_detection: true,
            is_trigger: true,
            damageable: false,
        };
        assert_eq!(
            hit_rejection(all_flags, collider, &ignored),
            Some(HitRejection::IgnoreHitDetection)
        );

        let trigger = ColliderTraits {
            is_trigger: true,
            ..Default::default()
        };
        assert_eq!(
            hit_rejection(trigger, collider, &ignored),
            Some(HitRejection::TriggerWithoutDamageable)
        );

        assert_eq!(
            hit_rejection(ColliderTraits::default(), collider, &ignored),
            Some(HitRejection::IgnoredCollider)
        );
    }

    #[test]
    fn test_damageable_trigger_is_valid() {
        let traits = ColliderTraits {
            is_trigger: true,
            damageable: true,
            ..Default::default()
        };
        assert_eq!(hit_rejection(traits, Entity::from_raw(1), &[]), None);
    }

    #[test]
    fn test_closest_hit_wins() {
        let hits = [hit(1, 3.0), hit(2, 1.5)];

        let closest = select_closest_valid_hit(&hits, |_| true).expect("hit");
        assert_eq!(closest.collider, Entity::from_raw(2));
        assert_eq!(closest.distance, 1.5);
    }

    #[test]
    fn test_invalid_hits_skipped() {
        let hits = [hit(1, 0.5), hit(2, 3.0), hit(3, 1.5)];

        let closest = select_closest_valid_hit(&hits, |hit| hit.collider != Entity::from_raw(1)).expect("hit");
        assert_eq!(closest.collider, Entity::from_raw(3));

        assert!(select_closest_valid_hit(&hits, |_| false).is_none());
    }

    #[test]
    fn test_tie_keeps_first() {
        let hits = [hit(1, 2.0), hit(2, 2.0)];
        let closest = select_closest_valid_hit(&hits, |_| true).expect("hit");
        assert_eq!(closest.collider, Entity::from_raw(1));
    }
}
