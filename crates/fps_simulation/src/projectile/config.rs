//! Projectile configuration (serde, загружается из weapon presets)

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use crate::combat::AreaOfDamage;
use crate::physics::HitLayers;

/// Диапазон параметра, масштабируемого charge ratio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChargeRange {
    pub min: f32,
    pub max: f32,
}

impl ChargeRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// `min + (max - min) × charge`, charge clamped в [0, 1]
    pub fn at(&self, charge: f32) -> f32 {
        self.min + (self.max - self.min) * charge.clamp(0.0, 1.0)
    }
}

/// Параметры, зависящие от заряда charge-оружия в момент выстрела
///
/// `None` — параметр берётся из базового конфига без изменений.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargeScaling {
    pub damage: Option<ChargeRange>,
    pub radius: Option<ChargeRange>,
    pub speed: Option<ChargeRange>,
    pub gravity_down_acceleration: Option<ChargeRange>,
    pub area_of_effect_distance: Option<ChargeRange>,
}

impl ChargeScaling {
    /// Оба конца каждого диапазона ≥ 0; радиус area damage строго > 0
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("damage", self.damage),
            ("radius", self.radius),
            ("speed", self.speed),
            ("gravity_down_acceleration", self.gravity_down_acceleration),
        ];
        for (name, range) in non_negative {
            if let Some(range) = range {
                ensure!(
                    range.min.is_finite() && range.max.is_finite() && range.min >= 0.0 && range.max >= 0.0,
                    "charge_scaling.{} must be finite and >= 0 (got {}..{})",
                    name,
                    range.min,
                    range.max
                );
            }
        }

        if let Some(range) = self.area_of_effect_distance {
            ensure!(
                range.min.is_finite() && range.max.is_finite() && range.min > 0.0 && range.max > 0.0,
                "charge_scaling.area_of_effect_distance must be > 0 (got {}..{})",
                range.min,
                range.max
            );
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    // === General ===
    /// Радиус sphere sweep (метры)
    pub radius: f32,
    /// Смещение root точки вдоль forward (начало swept volume)
    pub root_offset: f32,
    /// Смещение tip точки вдоль forward (конец swept volume)
    pub tip_offset: f32,
    /// Время жизни (секунды)
    pub max_life_time: f32,
    pub impact_effect: Option<String>,
    /// Время жизни impact VFX (≤ 0 — не удалять автоматически)
    pub impact_effect_lifetime: f32,
    /// Смещение impact VFX вдоль нормали
    pub impact_effect_spawn_offset: f32,
    pub impact_sound: Option<String>,
    pub hittable_layers: HitLayers,

    // === Movement ===
    /// Скорость (м/с)
    pub speed: f32,
    /// Гравитация (м/с², 0 = прямолинейно)
    pub gravity_down_acceleration: f32,
    /// Дистанция, на которой траектория сходится к центру экрана.
    /// 0 — мгновенно, < 0 — без коррекции.
    pub trajectory_correction_distance: f32,
    /// Добавлять скорость muzzle к движению каждый tick
    pub inherit_weapon_velocity: bool,

    // === Damage ===
    pub damage: f32,
    /// Area damage вместо point damage
    pub area_of_damage: Option<AreaOfDamage>,
    pub charge_scaling: Option<ChargeScaling>,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            radius: 0.01,
            root_offset: 0.0,
            tip_offset: 0.0,
            max_life_time: 5.0,
            impact_effect: None,
            impact_effect_lifetime: 5.0,
            impact_effect_spawn_offset: 0.1,
            impact_sound: None,
            hittable_layers: HitLayers::ALL,
            speed: 20.0,
            gravity_down_acceleration: 0.0,
            trajectory_correction_distance: -1.0,
            inherit_weapon_velocity: false,
            damage: 40.0,
            area_of_damage: None,
            charge_scaling: None,
        }
    }
}

impl ProjectileConfig {
    /// Effective конфиг для выстрела с данным charge ratio
    pub fn with_charge(&self, charge: f32) -> Self {
        let mut config = self.clone();
        let Some(scaling) = self.charge_scaling else {
            return config;
        };

        if let Some(range) = scaling.damage {
            config.damage = range.at(charge);
        }
        if let Some(range) = scaling.radius {
            config.radius = range.at(charge);
        }
        if let Some(range) = scaling.speed {
            config.speed = range.at(charge);
        }
        if let Some(range) = scaling.gravity_down_acceleration {
            config.gravity_down_acceleration = range.at(charge);
        }
        if let (Some(range), Some(area)) = (scaling.area_of_effect_distance, config.area_of_damage.as_mut()) {
            area.radius = range.at(charge);
        }

        config
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.radius >= 0.0, "projectile radius must be >= 0 (got {})", self.radius);
        ensure!(self.max_life_time > 0.0, "max_life_time must be > 0 (got {})", self.max_life_time);
        ensure!(
            self.speed.is_finite() && self.speed >= 0.0,
            "projectile speed must be finite and >= 0 (got {})",
            self.speed
        );
        ensure!(self.damage >= 0.0, "projectile damage must be >= 0 (got {})", self.damage);
        ensure!(
            self.gravity_down_acceleration >= 0.0,
            "gravity_down_acceleration must be >= 0 (got {})",
            self.gravity_down_acceleration
        );
        if let Some(area) = self.area_of_damage {
            ensure!(area.radius > 0.0, "area_of_damage.radius must be > 0 (got {})", area.radius);
        }
        if let Some(scaling) = self.charge_scaling {
            scaling.validate()?;
        }
        Ok(())
    }
}
