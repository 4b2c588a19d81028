//! Combat systems (DamageTarget + AreaDamageResolver)

pub mod area;
pub mod damage;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod area_tests;
#[cfg(test)]
mod damage_tests;

// Re-export all systems
pub use area::*;
pub use damage::*;
