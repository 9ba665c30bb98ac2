//! Actuator parameter derivation for robotics simulation.
//!
//! Pure Rust library with no simulation engine dependencies. Converts a
//! small set of physical motor specifications into per-joint PD control
//! gains and action scaling:
//!
//! ```text
//! ElectricActuator + GainSpec → PdGains → ActuatorCfg → JointParamTables
//! (datasheet)        (target    (kp, kd)  (per motor     (per joint, plus
//!                     response)            class)          action scale)
//! ```
//!
//! # Quick Start
//!
//! ```
//! use striders_actuator::prelude::*;
//!
//! let motor = ElectricActuator::new(0.12109824, 12.356, 95.0);
//! let gains = derive_pd_gains(&motor, GainSpec::new(5.0, 1.5)).unwrap();
//! assert!(gains.stiffness > 0.0 && gains.damping > 0.0);
//! ```

pub mod group;
pub mod motor;
pub mod tables;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::group::ActuatorCfg;
    pub use crate::motor::{derive_pd_gains, ElectricActuator, GainSpec, PdGains};
    pub use crate::tables::{build_joint_tables, JointParamTables};
}
