//! Spread: направление выстрела внутри конуса

use bevy::prelude::*;
use rand::Rng;

/// Равномерная точка внутри единичной сферы (rejection sampling)
pub fn random_inside_unit_sphere(rng: &mut impl Rng) -> Vec3 {
    loop {
        let point = Vec3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );
        if point.length_squared() <= 1.0 {
            return point;
        }
    }
}

/// Slerp от `forward` к случайной точке в сфере на `spread_angle / 180`
///
/// Угол между результатом и `forward` ≤ `spread_angle` градусов.
pub fn shot_direction_within_spread(forward: Vec3, spread_angle: f32, rng: &mut impl Rng) -> Vec3 {
    let Some(forward) = forward.try_normalize() else {
        return Vec3::NEG_Z;
    };

    let ratio = (spread_angle / 180.0).clamp(0.0, 1.0);
    if ratio <= 0.0 {
        return forward;
    }

    let sample = random_inside_unit_sphere(rng);
    let Some(target) = sample.try_normalize() else {
        return forward;
    };

    let rotation = Quat::IDENTITY.slerp(Quat::from_rotation_arc(forward, target), ratio);
    (rotation * forward).normalize()
}
