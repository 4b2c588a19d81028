//! Fire input contract
//!
//! Host (Godot/Unity bridge, AI, тесты) пишет в `FireInput` на shooter entity.
//! Edges (`pressed` / `released`) живут ровно один fixed tick —
//! сбрасываются в `SimulationSet::Cleanup`.

use bevy::prelude::*;

/// Опрос input'а один раз за tick (без буферизации)
pub trait FireInputProvider {
    /// Edge: кнопка нажата в этом tick
    fn fire_pressed_this_frame(&self) -> bool;
    /// Level: кнопка удерживается
    fn fire_held(&self) -> bool;
    /// Edge: кнопка отпущена в этом tick
    fn fire_released_this_frame(&self) -> bool;
}

/// Состояние кнопки огня shooter'а
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct FireInput {
    pub pressed: bool,
    pub held: bool,
    pub released: bool,
}

impl FireInput {
    pub fn press(&mut self) {
        self.pressed = true;
        self.held = true;
    }

    pub fn release(&mut self) {
        if self.held {
            self.released = true;
        }
        self.held = false;
    }

    pub fn clear_edges(&mut self) {
        self.pressed = false;
        self.released = false;
    }
}

impl FireInputProvider for FireInput {
    fn fire_pressed_this_frame(&self) -> bool {
        self.pressed
    }

    fn fire_held(&self) -> bool {
        self.held
    }

    fn fire_released_this_frame(&self) -> bool {
        self.released
    }
}

/// System: сброс edges в конце fixed tick
pub fn clear_fire_input_edges(mut inputs: Query<&mut FireInput>) {
    for mut input in inputs.iter_mut() {
        if input.pressed || input.released {
            input.clear_edges();
        }
    }
}
