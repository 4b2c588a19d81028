//! Combat components

pub mod area;
pub mod damageable;

// Re-export all components
pub use area::*;
pub use damageable::*;
