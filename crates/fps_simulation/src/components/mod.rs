//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: здоровье (Health) — получатель урона
//! - player: player-controlled shooter (камера для trajectory correction)

pub mod actor;
pub mod player;

// Re-exports для удобного импорта
pub use actor::*;
pub use player::*;
