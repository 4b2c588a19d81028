//! Projectile state + pure motion step
//!
//! Порядок одного tick (см. `Projectile::step`):
//! 1. position += velocity × dt (+ inherited muzzle velocity)
//! 2. trajectory correction пропорционально пройденной root дистанции
//! 3. forward = velocity
//! 4. gravity → velocity
//! 5. sweep: previous root → текущий tip

use bevy::prelude::*;

use super::config::ProjectileConfig;
use super::events::ProjectileSpawnRequest;

/// Остаток correction, который считаем "израсходованным"
const CORRECTION_EPSILON: f32 = 1e-5;

/// Rotation, при которой `forward()` (-Z) смотрит в `direction`
pub fn facing_rotation(direction: Vec3) -> Quat {
    match direction.try_normalize() {
        Some(direction) => Quat::from_rotation_arc(Vec3::NEG_Z, direction),
        None => Quat::IDENTITY,
    }
}

/// Смещение траектории от muzzle к camera aim ray
///
/// `target` — полный вектор коррекции (на плоскости, перпендикулярной
/// camera forward). Расход пропорционален пройденной дистанции,
/// не времени.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryCorrection {
    pub target: Vec3,
    pub consumed: Vec3,
    /// Дистанция полного схождения (> 0 для постепенной коррекции)
    pub distance: f32,
    pub active: bool,
}

impl TrajectoryCorrection {
    pub fn gradual(target: Vec3, distance: f32) -> Self {
        Self {
            target,
            consumed: Vec3::ZERO,
            distance,
            active: distance > 0.0 && target.length_squared() > 0.0,
        }
    }

    pub fn instant(target: Vec3) -> Self {
        Self {
            target,
            consumed: target,
            distance: 0.0,
            active: false,
        }
    }

    pub fn remaining(&self) -> Vec3 {
        self.target - self.consumed
    }

    /// Смещение на этот tick; `distance_this_frame` — сколько прошёл root
    pub fn consume(&mut self, distance_this_frame: f32) -> Vec3 {
        if !self.active {
            return Vec3::ZERO;
        }

        let left = self.remaining().length();
        let step = (distance_this_frame / self.distance * self.target).clamp_length_max(left);
        self.consumed += step;

        if left - step.length() <= CORRECTION_EPSILON {
            self.consumed = self.target;
            self.active = false;
        }

        step
    }
}

/// Projectile component
///
/// Transform entity — позиция и facing; root/tip — точки вдоль facing.
#[derive(Component, Debug, Clone)]
pub struct Projectile {
    /// Effective конфиг (после charge scaling)
    pub config: ProjectileConfig,
    pub owner: Entity,
    pub weapon: Entity,
    pub velocity: Vec3,
    pub shoot_time: f32,
    /// Монотонно убывает до 0 → expire
    pub remaining_life: f32,
    /// Root прошлого tick'а — начало sweep
    pub last_root_position: Vec3,
    /// Collider'ы owner иерархии (self-hits)
    pub ignored_colliders: Vec<Entity>,
    pub correction: Option<TrajectoryCorrection>,
    pub inherited_muzzle_velocity: Vec3,
    pub initial_charge: f32,
    pub initial_position: Vec3,
    pub initial_direction: Vec3,
}

impl Projectile {
    /// Создать projectile на muzzle
    ///
    /// Previous root фиксируется ДО spawn-смещения на inherited muzzle velocity.
    pub fn launch(
        request: &ProjectileSpawnRequest,
        ignored_colliders: Vec<Entity>,
        now: f32,
        dt: f32,
    ) -> (Self, Transform) {
        let direction = request.direction.try_normalize().unwrap_or(Vec3::NEG_Z);
        let config = request.config.with_charge(request.charge);

        let mut transform = Transform::from_translation(request.position).with_rotation(facing_rotation(direction));
        let last_root_position = transform.translation + direction * config.root_offset;
        transform.translation += request.inherited_muzzle_velocity * dt;

        let projectile = Self {
            velocity: direction * config.speed,
            shoot_time: now,
            remaining_life: config.max_life_time,
            last_root_position,
            ignored_colliders,
            correction: None,
            inherited_muzzle_velocity: request.inherited_muzzle_velocity,
            initial_charge: request.charge,
            initial_position: request.position,
            initial_direction: direction,
            owner: request.owner,
            weapon: request.weapon,
            config,
        };

        (projectile, transform)
    }

    pub fn root_position(&self, transform: &Transform) -> Vec3 {
        transform.translation + transform.forward().as_vec3() * self.config.root_offset
    }

    pub fn tip_position(&self, transform: &Transform) -> Vec3 {
        transform.translation + transform.forward().as_vec3() * self.config.tip_offset
    }

    /// Коррекция для player shooter'а
    ///
    /// `target = project_on_plane(-camera_to_muzzle, camera_forward)`.
    /// Distance 0 — применяется сразу, < 0 — отключена.
    /// Возвращает camera → muzzle вектор (для spawn raycast).
    pub fn apply_camera_correction(
        &mut self,
        transform: &mut Transform,
        camera_position: Vec3,
        camera_forward: Vec3,
    ) -> Vec3 {
        let camera_to_muzzle = self.initial_position - camera_position;
        let target = (-camera_to_muzzle).reject_from(camera_forward);
        let distance = self.config.trajectory_correction_distance;

        self.correction = if distance == 0.0 {
            transform.translation += target;
            Some(TrajectoryCorrection::instant(target))
        } else if distance < 0.0 {
            None
        } else {
            Some(TrajectoryCorrection::gradual(target, distance))
        };

        camera_to_muzzle
    }

    /// Motion phase одного tick'а. Возвращает sweep сегмент (previous root, tip).
    pub fn step(&mut self, transform: &mut Transform, dt: f32) -> (Vec3, Vec3) {
        transform.translation += self.velocity * dt;
        if self.config.inherit_weapon_velocity {
            transform.translation += self.inherited_muzzle_velocity * dt;
        }

        let root = self.root_position(transform);
        if let Some(correction) = self.correction.as_mut() {
            let distance_this_frame = root.distance(self.last_root_position);
            transform.translation += correction.consume(distance_this_frame);
        }

        if self.velocity.length_squared() > 0.0 {
            transform.rotation = facing_rotation(self.velocity);
        }

        if self.config.gravity_down_acceleration > 0.0 {
            self.velocity += Vec3::NEG_Y * self.config.gravity_down_acceleration * dt;
        }

        (self.last_root_position, self.tip_position(transform))
    }

    /// Уменьшить TTL; true — время жизни истекло
    pub fn tick_life(&mut self, dt: f32) -> bool {
        self.remaining_life -= dt;
        self.remaining_life <= super::LIFETIME_EPSILON
    }
}
