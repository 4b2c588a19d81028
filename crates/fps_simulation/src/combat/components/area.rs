//! Area damage descriptor (взрывы, splash)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Кривая ослабления урона по расстоянию `t = distance / radius`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageFalloff {
    /// Полный урон во всём радиусе
    Constant,
    /// `1 - t`, ноль на краю
    #[default]
    Linear,
}

impl DamageFalloff {
    pub fn evaluate(&self, t: f32) -> f32 {
        match self {
            DamageFalloff::Constant => 1.0,
            DamageFalloff::Linear => (1.0 - t).clamp(0.0, 1.0),
        }
    }
}

/// Area damage вместо point damage при попадании projectile'а
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaOfDamage {
    pub radius: f32,
    pub falloff: DamageFalloff,
}

impl Default for AreaOfDamage {
    fn default() -> Self {
        Self {
            radius: 5.0,
            falloff: DamageFalloff::Linear,
        }
    }
}

impl AreaOfDamage {
    /// Множитель урона для цели на расстоянии `distance` от центра
    pub fn damage_ratio(&self, distance: f32) -> f32 {
        if self.radius <= 0.0 {
            return self.falloff.evaluate(0.0);
        }
        self.falloff.evaluate(distance / self.radius)
    }
}
