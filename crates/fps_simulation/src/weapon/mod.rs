//! Weapon domain (WeaponFireController)
//!
//! Содержит:
//! - WeaponConfig + FireMode (serde, presets)
//! - Weapon component: ammo, cooldown, charge state machine
//! - Spread (slerp к случайной точке в единичной сфере)
//! - FuelCells (индикатор боезапаса)
//!
//! Порядок в `SimulationSet::Weapons`:
//! validate → visibility → muzzle velocity → ammo/charge → fire inputs → fuel cells

use bevy::prelude::*;

pub mod components;
pub mod config;
pub mod fuel_cells;
pub mod spread;
pub mod systems;


pub use components::{FiredShot, Weapon};
pub use config::{FireMode, WeaponConfig};
pub use fuel_cells::{fuel_cell_fill_ratios, update_fuel_cells, FuelCells};
pub use spread::{random_inside_unit_sphere, shot_direction_within_spread};
pub use systems::{
    apply_weapon_visibility, handle_weapon_fire_inputs, track_muzzle_velocity, update_weapon_resources,
    validate_new_weapons, WeaponVisibilityRequest,
};

pub struct WeaponPlugin;

impl Plugin for WeaponPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<WeaponVisibilityRequest>().add_systems(
            FixedUpdate,
            (
                validate_new_weapons,
                apply_weapon_visibility,
                track_muzzle_velocity,
                update_weapon_resources,
                handle_weapon_fire_inputs,
                update_fuel_cells,
            )
                .chain()
                .in_set(crate::SimulationSet::Weapons),
        );
    }
}
