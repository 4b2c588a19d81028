//! Fuel-cell индикатор боезапаса (ячейки выдвигаются по мере расхода)

use bevy::prelude::*;

use super::components::Weapon;

fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        0.0
    } else {
        (value - a) / (b - a)
    }
}

/// Заполненность каждой ячейки: `clamp01(inverse_lerp(i/n, (i+1)/n, ammo_ratio))`
pub fn fuel_cell_fill_ratios(cell_count: usize, ammo_ratio: f32) -> Vec<f32> {
    let count = cell_count as f32;

    (0..cell_count)
        .map(|index| {
            let lower = index as f32 / count;
            let upper = (index + 1) as f32 / count;
            inverse_lerp(lower, upper, ammo_ratio).clamp(0.0, 1.0)
        })
        .collect()
}

/// Ячейки на оружии; host читает `cell_offsets()` для позиционирования
#[derive(Component, Debug, Clone, PartialEq)]
pub struct FuelCells {
    /// Локальная позиция израсходованной ячейки
    pub used_offset: Vec3,
    /// Локальная позиция полной ячейки
    pub unused_offset: Vec3,
    pub fills: Vec<f32>,
}

impl FuelCells {
    pub fn new(cell_count: usize) -> Self {
        Self {
            used_offset: Vec3::ZERO,
            unused_offset: Vec3::new(0.0, -0.1, 0.0),
            fills: vec![1.0; cell_count],
        }
    }

    pub fn refresh(&mut self, ammo_ratio: f32) {
        self.fills = fuel_cell_fill_ratios(self.fills.len(), ammo_ratio);
    }

    pub fn cell_offsets(&self) -> Vec<Vec3> {
        self.fills
            .iter()
            .map(|fill| self.used_offset.lerp(self.unused_offset, *fill))
            .collect()
    }
}

/// System: fuel cells следуют за ammo ratio
pub fn update_fuel_cells(mut weapons: Query<(&Weapon, &mut FuelCells), Changed<Weapon>>) {
    for (weapon, mut cells) in weapons.iter_mut() {
        cells.refresh(weapon.current_ammo_ratio);
    }
}
