//! Entity configuration for Striders: collision groups, contact sensors,
//! keyframes, and articulation assembly.
//!
//! An [`entity::EntityCfg`] bundles everything the simulation layer needs
//! to instantiate one articulated model; [`entity::EntityCfg::resolve`]
//! turns it into plain name-keyed parameter tables.

pub mod collision;
pub mod entity;
pub mod sensor;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::collision::{CollisionCfg, GeomParams};
    pub use crate::entity::{ArticulationCfg, EntityCfg, InitialStateCfg, ResolvedEntity};
    pub use crate::sensor::{ContactData, ContactSensorCfg, ReduceMode, SensorSite};
}
