//! Базовые компоненты акторов: Health

use bevy::prelude::*;

/// Здоровье актора (получатель урона)
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0) // Default 100 HP
    }
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    pub fn ratio(&self) -> f32 {
        if self.max > 0.0 {
            self.current / self.max
        } else {
            0.0
        }
    }

    /// Возвращает фактически снятое количество HP
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let before = self.current;
        self.current = (self.current - amount).clamp(0.0, self.max);
        before - self.current
    }

    pub fn heal(&mut self, amount: f32) {
        self.current = (self.current + amount).min(self.max);
    }
}
