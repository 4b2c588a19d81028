//! Weapon configuration + built-in presets

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::combat::{AreaOfDamage, DamageFalloff};
use crate::projectile::{ChargeRange, ChargeScaling, ProjectileConfig};

/// Режим огня
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FireMode {
    /// Один выстрел на нажатие
    #[default]
    Manual,
    /// Очередь пока кнопка зажата
    Automatic,
    /// Зажать — заряд, отпустить — выстрел
    Charge,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    pub name: String,
    pub fire_mode: FireMode,

    // === Shoot ===
    /// Минимальный интервал между выстрелами (секунды)
    pub delay_between_shots: f32,
    /// Половина угла конуса разброса (градусы)
    pub bullet_spread_angle: f32,
    pub bullets_per_shot: u32,

    // === Ammo ===
    /// Регенерация (единиц в секунду)
    pub ammo_reload_rate: f32,
    /// Пауза после последнего выстрела перед регенерацией (секунды)
    pub ammo_reload_delay: f32,
    /// `f32::INFINITY` — бесконечные патроны; в JSON пишется как `"infinite"`
    #[serde(with = "ammo_capacity")]
    pub max_ammo: f32,

    // === Charge (только FireMode::Charge) ===
    pub max_charge_duration: f32,
    pub ammo_used_on_start_charge: f32,
    /// Расход патронов на полный заряд (0 → 1)
    pub ammo_usage_rate_while_charging: f32,

    // === Audio & Visual ===
    pub muzzle_flash: Option<String>,
    pub shoot_sound: Option<String>,
    pub switch_sound: Option<String>,

    pub projectile: ProjectileConfig,
}

/// `max_ammo` в JSON: число или строка `"infinite"`
mod ammo_capacity {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    const INFINITE: &str = "infinite";

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Amount(f32),
        Keyword(String),
    }

    pub fn serialize<S: Serializer>(value: &f32, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_infinite() && value.is_sign_positive() {
            serializer.serialize_str(INFINITE)
        } else {
            serializer.serialize_f32(*value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Amount(amount) => Ok(amount),
            Repr::Keyword(keyword) if keyword == INFINITE => Ok(f32::INFINITY),
            Repr::Keyword(keyword) => Err(D::Error::custom(format!(
                "max_ammo: expected a number or \"{}\", got \"{}\"",
                INFINITE, keyword
            ))),
        }
    }
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            name: "weapon".to_string(),
            fire_mode: FireMode::Manual,
            delay_between_shots: 0.5,
            bullet_spread_angle: 0.0,
            bullets_per_shot: 1,
            ammo_reload_rate: 1.0,
            ammo_reload_delay: 2.0,
            max_ammo: 8.0,
            max_charge_duration: 2.0,
            ammo_used_on_start_charge: 1.0,
            ammo_usage_rate_while_charging: 1.0,
            muzzle_flash: None,
            shoot_sound: None,
            switch_sound: None,
            projectile: ProjectileConfig::default(),
        }
    }
}

impl WeaponConfig {
    /// Пистолет-бластер: manual, точный
    pub fn blaster() -> Self {
        Self {
            name: "blaster".to_string(),
            fire_mode: FireMode::Manual,
            delay_between_shots: 0.25,
            max_ammo: 12.0,
            ammo_reload_rate: 3.0,
            ammo_reload_delay: 1.0,
            muzzle_flash: Some("muzzle_flash_blaster".to_string()),
            shoot_sound: Some("blaster_shoot".to_string()),
            switch_sound: Some("weapon_switch".to_string()),
            projectile: ProjectileConfig {
                speed: 80.0,
                damage: 25.0,
                trajectory_correction_distance: 5.0,
                impact_effect: Some("impact_blaster".to_string()),
                impact_sound: Some("impact_blaster".to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Дробовик: manual, 8 дробин в конусе
    pub fn shotgun() -> Self {
        Self {
            name: "shotgun".to_string(),
            fire_mode: FireMode::Manual,
            delay_between_shots: 0.8,
            bullet_spread_angle: 10.0,
            bullets_per_shot: 8,
            max_ammo: 4.0,
            ammo_reload_rate: 1.0,
            ammo_reload_delay: 1.5,
            muzzle_flash: Some("muzzle_flash_shotgun".to_string()),
            shoot_sound: Some("shotgun_shoot".to_string()),
            switch_sound: Some("weapon_switch".to_string()),
            projectile: ProjectileConfig {
                speed: 100.0,
                damage: 12.0,
                max_life_time: 1.0,
                trajectory_correction_distance: 0.0,
                impact_effect: Some("impact_pellet".to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Автомат: automatic, лёгкий разброс
    pub fn auto_rifle() -> Self {
        Self {
            name: "auto_rifle".to_string(),
            fire_mode: FireMode::Automatic,
            delay_between_shots: 0.1,
            bullet_spread_angle: 2.0,
            max_ammo: 30.0,
            ammo_reload_rate: 10.0,
            ammo_reload_delay: 1.0,
            muzzle_flash: Some("muzzle_flash_rifle".to_string()),
            shoot_sound: Some("rifle_shoot".to_string()),
            switch_sound: Some("weapon_switch".to_string()),
            projectile: ProjectileConfig {
                speed: 120.0,
                damage: 10.0,
                trajectory_correction_distance: 10.0,
                impact_effect: Some("impact_bullet".to_string()),
                impact_sound: Some("impact_bullet".to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Charge launcher: заряд увеличивает урон и радиус взрыва
    pub fn charge_launcher() -> Self {
        Self {
            name: "charge_launcher".to_string(),
            fire_mode: FireMode::Charge,
            delay_between_shots: 1.0,
            max_ammo: 4.0,
            ammo_reload_rate: 0.5,
            ammo_reload_delay: 2.0,
            max_charge_duration: 1.5,
            ammo_used_on_start_charge: 1.0,
            ammo_usage_rate_while_charging: 1.0,
            muzzle_flash: Some("muzzle_flash_launcher".to_string()),
            shoot_sound: Some("launcher_shoot".to_string()),
            switch_sound: Some("weapon_switch".to_string()),
            projectile: ProjectileConfig {
                radius: 0.1,
                speed: 30.0,
                gravity_down_acceleration: 4.0,
                damage: 60.0,
                impact_effect: Some("explosion".to_string()),
                impact_sound: Some("explosion".to_string()),
                area_of_damage: Some(AreaOfDamage {
                    radius: 3.0,
                    falloff: DamageFalloff::Linear,
                }),
                charge_scaling: Some(ChargeScaling {
                    damage: Some(ChargeRange::new(30.0, 120.0)),
                    speed: Some(ChargeRange::new(20.0, 45.0)),
                    area_of_effect_distance: Some(ChargeRange::new(2.0, 5.0)),
                    ..Default::default()
                }),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.max_ammo > 0.0,
            "weapon '{}': max_ammo must be > 0 (got {})",
            self.name,
            self.max_ammo
        );
        ensure!(
            self.delay_between_shots >= 0.0,
            "weapon '{}': delay_between_shots must be >= 0",
            self.name
        );
        ensure!(
            (0.0..=180.0).contains(&self.bullet_spread_angle),
            "weapon '{}': bullet_spread_angle must be in [0, 180] (got {})",
            self.name,
            self.bullet_spread_angle
        );
        ensure!(self.bullets_per_shot >= 1, "weapon '{}': bullets_per_shot must be >= 1", self.name);
        ensure!(
            self.ammo_reload_rate >= 0.0 && self.ammo_reload_delay >= 0.0,
            "weapon '{}': ammo reload rate/delay must be >= 0",
            self.name
        );
        if self.fire_mode == FireMode::Charge {
            ensure!(
                self.ammo_used_on_start_charge >= 0.0 && self.ammo_usage_rate_while_charging >= 0.0,
                "weapon '{}': charge ammo costs must be >= 0",
                self.name
            );
        }

        self.projectile
            .validate()
            .with_context(|| format!("weapon '{}': invalid projectile", self.name))
    }
}
