//! Weapon state machine (Idle / Charging × fire mode)
//!
//! Все методы принимают явные `now` / `dt` — вызываются из систем
//! с fixed time, в тестах — с произвольной временной шкалой.

use bevy::prelude::*;

use super::config::{FireMode, WeaponConfig};
use crate::input::FireInputProvider;

/// Результат успешного выстрела
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiredShot {
    /// Charge ratio на момент выстрела (0 для manual / automatic)
    pub charge: f32,
    pub bullets: u32,
}

/// Weapon component
///
/// Инварианты:
/// - 0 ≤ current_ammo ≤ max_ammo
/// - 0 ≤ current_charge ≤ 1
/// - выстрел / начало заряда только после `last_shot_time + delay_between_shots`
#[derive(Component, Debug, Clone)]
pub struct Weapon {
    pub config: WeaponConfig,
    /// Shooter (его `FireInput` управляет оружием)
    pub owner: Entity,
    /// Точка вылета; `None` → transform самого оружия
    pub muzzle: Option<Entity>,
    pub current_ammo: f32,
    pub last_shot_time: f32,
    pub is_charging: bool,
    pub current_charge: f32,
    /// Идёт регенерация патронов
    pub is_cooling: bool,
    pub current_ammo_ratio: f32,
    /// Оружие в руках (видимо) — только активное принимает input
    pub is_active: bool,
    pub last_muzzle_position: Option<Vec3>,
    pub muzzle_world_velocity: Vec3,
}

impl Weapon {
    /// Оружие с полным боезапасом, сразу активно
    pub fn new(config: WeaponConfig, owner: Entity) -> Self {
        Self {
            current_ammo: config.max_ammo,
            config,
            owner,
            muzzle: None,
            last_shot_time: f32::NEG_INFINITY,
            is_charging: false,
            current_charge: 0.0,
            is_cooling: false,
            current_ammo_ratio: 1.0,
            is_active: true,
            last_muzzle_position: None,
            muzzle_world_velocity: Vec3::ZERO,
        }
    }

    pub fn with_muzzle(mut self, muzzle: Entity) -> Self {
        self.muzzle = Some(muzzle);
        self
    }

    fn cooldown_elapsed(&self, now: f32) -> bool {
        self.last_shot_time + self.config.delay_between_shots < now
    }

    /// Доля магазина, нужная на один выстрел / начало заряда
    pub fn ammo_needed_to_shoot(&self) -> f32 {
        let cost = match self.config.fire_mode {
            FireMode::Charge => self.config.ammo_used_on_start_charge,
            FireMode::Manual | FireMode::Automatic => 1.0,
        };
        cost / self.config.max_ammo
    }

    /// Списать патроны (clamp в [0, max]) и отметить время выстрела
    pub fn use_ammo(&mut self, amount: f32, now: f32) {
        self.current_ammo = (self.current_ammo - amount).clamp(0.0, self.config.max_ammo);
        self.last_shot_time = now;
    }

    /// Регенерация после `ammo_reload_delay` без выстрелов (не во время заряда)
    pub fn update_ammo(&mut self, now: f32, dt: f32) {
        let max_ammo = self.config.max_ammo;

        if self.last_shot_time + self.config.ammo_reload_delay < now && self.current_ammo < max_ammo && !self.is_charging
        {
            self.current_ammo = (self.current_ammo + self.config.ammo_reload_rate * dt).clamp(0.0, max_ammo);
            self.is_cooling = true;
        } else {
            self.is_cooling = false;
        }

        self.current_ammo_ratio = if max_ammo.is_infinite() {
            1.0
        } else {
            self.current_ammo / max_ammo
        };
    }

    /// Накопление заряда: `dt / max_charge_duration` (мгновенно при duration ≤ 0)
    ///
    /// Патроны за заряд списываются без проверки остатка.
    pub fn update_charge(&mut self, now: f32, dt: f32) {
        if !self.is_charging || self.current_charge >= 1.0 {
            return;
        }

        let charge_left = 1.0 - self.current_charge;
        let charge_added = if self.config.max_charge_duration <= 0.0 {
            charge_left
        } else {
            (dt / self.config.max_charge_duration).clamp(0.0, charge_left)
        };

        self.use_ammo(charge_added * self.config.ammo_usage_rate_while_charging, now);
        self.current_charge = (self.current_charge + charge_added).clamp(0.0, 1.0);
    }

    /// Скорость muzzle в мире (Δposition / dt)
    pub fn track_muzzle(&mut self, muzzle_position: Vec3, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        let last = self.last_muzzle_position.unwrap_or(muzzle_position);
        self.muzzle_world_velocity = (muzzle_position - last) / dt;
        self.last_muzzle_position = Some(muzzle_position);
    }

    /// Manual / automatic выстрел. `None` — отказ без изменения состояния.
    pub fn try_shoot(&mut self, now: f32) -> Option<FiredShot> {
        if self.current_ammo < 1.0 || !self.cooldown_elapsed(now) {
            return None;
        }

        self.last_shot_time = now;
        self.current_ammo -= 1.0;

        Some(FiredShot {
            charge: self.current_charge,
            bullets: self.config.bullets_per_shot,
        })
    }

    /// Idle → Charging
    pub fn try_begin_charge(&mut self, now: f32) -> bool {
        if self.is_charging
            || self.current_ammo < self.config.ammo_used_on_start_charge
            || !self.cooldown_elapsed(now)
        {
            return false;
        }

        self.use_ammo(self.config.ammo_used_on_start_charge, now);
        self.is_charging = true;
        true
    }

    /// Charging → Idle с выстрелом накопленным зарядом
    pub fn try_release_charge(&mut self, now: f32) -> Option<FiredShot> {
        if !self.is_charging {
            return None;
        }

        let shot = FiredShot {
            charge: self.current_charge,
            bullets: self.config.bullets_per_shot,
        };
        self.last_shot_time = now;
        self.current_charge = 0.0;
        self.is_charging = false;

        Some(shot)
    }

    /// Fire mode dispatch по состоянию input'а
    pub fn handle_shoot_inputs(&mut self, input: &impl FireInputProvider, now: f32) -> Option<FiredShot> {
        match self.config.fire_mode {
            FireMode::Manual => input.fire_pressed_this_frame().then(|| self.try_shoot(now)).flatten(),
            FireMode::Automatic => input.fire_held().then(|| self.try_shoot(now)).flatten(),
            FireMode::Charge => {
                if input.fire_held() {
                    self.try_begin_charge(now);
                }
                if input.fire_released_this_frame() {
                    return self.try_release_charge(now);
                }
                None
            }
        }
    }

    /// Show / hide. Скрытое оружие теряет незавершённый заряд.
    ///
    /// Возвращает true, если нужно проиграть звук смены оружия.
    pub fn set_active(&mut self, show: bool) -> bool {
        if !show {
            self.is_charging = false;
            self.current_charge = 0.0;
        }
        self.is_active = show;
        show && self.config.switch_sound.is_some()
    }
}
