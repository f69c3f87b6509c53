//! AI systems (FixedUpdate, Combat set)

pub mod attack;
pub mod movement;
pub mod targeting;


// Re-export all systems
pub use attack::*;
pub use movement::*;
pub use targeting::*;
