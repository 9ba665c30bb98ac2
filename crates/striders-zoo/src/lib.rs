//! Robot zoo: concrete robot definitions and their task variants.
//!
//! Currently one robot, a bipedal humanoid with three electric actuator
//! classes, plus the velocity-tracking task family built on top of it.

pub mod humanoid;
pub mod velocity;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::humanoid::{humanoid_entity, name_directory};
    pub use crate::velocity::{
        register_tasks, TASK_VELOCITY_FLAT, TASK_VELOCITY_FLAT_PLAY, TASK_VELOCITY_ROUGH,
        TASK_VELOCITY_ROUGH_PLAY,
    };
}
