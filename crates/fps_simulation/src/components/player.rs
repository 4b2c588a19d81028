//! Player-controlled shooter

use bevy::prelude::*;

/// Shooter, за которым стоит камера игрока
///
/// Projectile'ы такого shooter'а корректируют траекторию к центру экрана
/// (camera aim ray), хотя физически вылетают из смещённого muzzle.
/// Камера — отдельная entity с world-space `Transform`.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct PlayerShooter {
    pub camera: Entity,
}
