//! Environment configuration for Striders: task config types, the
//! finalize-chain cascade, and the explicit task registry.
//!
//! A task variant is a chain of [`cascade::CfgStage`] values (base
//! defaults, a robot-specific stage, and optional play/debug stages) that
//! finalizes into one [`config::LocomotionEnvCfg`] handed to the training
//! runtime alongside a [`config::RlRunnerCfg`].

pub mod cascade;
pub mod config;
pub mod registry;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::cascade::CfgStage;
    pub use crate::config::{LocomotionEnvCfg, RlRunnerCfg, TerrainCfg, ViewerCfg};
    pub use crate::registry::{TaskEntry, TaskRegistry};
}
