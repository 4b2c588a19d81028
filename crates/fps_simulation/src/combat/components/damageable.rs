//! Damageable — точка приёма урона на collider'е

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Collider, способный принимать урон
///
/// Health ищется на самой entity или выше по `ChildOf` иерархии
/// (hitbox головы → тело актора).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct Damageable {
    /// Множитель point damage (headshot = 2.0, броня = 0.5). Area damage его игнорирует.
    pub damage_multiplier: f32,
    /// Множитель урона по самому себе (0..1)
    pub self_damage_sensitivity: f32,
}

impl Default for Damageable {
    fn default() -> Self {
        Self {
            damage_multiplier: 1.0,
            self_damage_sensitivity: 0.5,
        }
    }
}

impl Damageable {
    pub fn with_multiplier(damage_multiplier: f32) -> Self {
        Self {
            damage_multiplier,
            ..Default::default()
        }
    }

    /// Формула:
    /// `base × (is_area ? 1 : damage_multiplier) × (is_self ? self_damage_sensitivity : 1)`
    pub fn final_damage(&self, base_damage: f32, is_area: bool, is_self: bool) -> f32 {
        let mut total = base_damage;

        if !is_area {
            total *= self.damage_multiplier;
        }
        if is_self {
            total *= self.self_damage_sensitivity;
        }

        total
    }
}

/// Компонент-маркер: entity мертв (Health <= 0)
///
/// Деспавн не автоматический — решает host.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Dead;
