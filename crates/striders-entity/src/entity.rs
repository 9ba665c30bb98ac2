//! Entity assembly: keyframe, articulation, and full resolution.
//!
//! [`EntityCfg`] is the unit the environment configuration carries per
//! simulated model. [`EntityCfg::resolve`] turns it into
//! [`ResolvedEntity`], the plain name-keyed tables the simulation layer
//! consumes read-only. Resolution is pure computation over immutable
//! inputs; independent entities can resolve concurrently without locking.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use striders_actuator::group::ActuatorCfg;
use striders_actuator::tables::{build_joint_tables, JointParamTables};
use striders_core::error::{SpecError, StridersError};
use striders_core::pattern::{NameDirectory, PatternValue};

use crate::collision::{CollisionCfg, GeomParams};
use crate::sensor::ContactSensorCfg;

// ---------------------------------------------------------------------------
// InitialStateCfg
// ---------------------------------------------------------------------------

/// Initial pose for an articulated entity (a keyframe).
///
/// Joint positions and velocities are pattern-keyed; joints matched by no
/// rule are left to the consumer's default (zero).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InitialStateCfg {
    /// Base position (m).
    pub pos: [f32; 3],
    /// Base orientation quaternion [x, y, z, w].
    pub rot: [f32; 4],
    pub joint_pos: PatternValue<f32>,
    pub joint_vel: PatternValue<f32>,
}

impl Default for InitialStateCfg {
    fn default() -> Self {
        Self {
            pos: [0.0; 3],
            rot: [0.0, 0.0, 0.0, 1.0],
            joint_pos: PatternValue::scalar(0.0),
            joint_vel: PatternValue::scalar(0.0),
        }
    }
}

// ---------------------------------------------------------------------------
// ArticulationCfg
// ---------------------------------------------------------------------------

/// Actuator set plus joint-limit softening for one articulated entity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArticulationCfg {
    pub actuators: Vec<ActuatorCfg>,
    /// Fraction of the hard joint range exposed to the controller, in (0, 1].
    pub soft_joint_pos_limit_factor: f32,
}

impl Default for ArticulationCfg {
    fn default() -> Self {
        Self {
            actuators: Vec::new(),
            soft_joint_pos_limit_factor: 1.0,
        }
    }
}

impl ArticulationCfg {
    /// Validate configuration. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), SpecError> {
        let factor = self.soft_joint_pos_limit_factor;
        if factor <= 0.0 || factor > 1.0 {
            return Err(SpecError::InvalidValue {
                field: "soft_joint_pos_limit_factor",
                message: format!("{factor} is outside (0, 1]"),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// EntityCfg
// ---------------------------------------------------------------------------

/// Complete configuration for one simulated entity.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityCfg {
    pub init_state: InitialStateCfg,
    /// Collision configs, applied in order; later configs overwrite earlier
    /// ones per geometry.
    pub collisions: Vec<CollisionCfg>,
    pub sensors: Vec<ContactSensorCfg>,
    pub articulation: ArticulationCfg,
}

/// Simulation-ready tables resolved from an [`EntityCfg`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedEntity {
    pub joints: JointParamTables,
    pub geoms: HashMap<String, GeomParams>,
    /// Sensor specs, validated against the name directory.
    pub sensors: Vec<ContactSensorCfg>,
    pub init_joint_pos: HashMap<String, f32>,
    pub init_joint_vel: HashMap<String, f32>,
    pub soft_joint_pos_limit_factor: f32,
}

impl EntityCfg {
    /// Replace the sensor set, leaving the rest of the config untouched.
    #[must_use]
    pub fn with_sensors(mut self, sensors: Vec<ContactSensorCfg>) -> Self {
        self.sensors = sensors;
        self
    }

    /// Resolve the full entity against the model's name directory.
    ///
    /// Fails fast on the first configuration error; a partially resolved
    /// entity is never observable.
    pub fn resolve(&self, dir: &NameDirectory) -> Result<ResolvedEntity, StridersError> {
        self.articulation.validate()?;
        for sensor in &self.sensors {
            sensor.validate(dir)?;
        }

        let joints = build_joint_tables(&self.articulation.actuators, &dir.joint_names)?;

        let mut geoms = HashMap::new();
        for collision in &self.collisions {
            for (name, params) in collision.resolve(&dir.geom_names)? {
                geoms.insert(name, params);
            }
        }

        Ok(ResolvedEntity {
            joints,
            geoms,
            sensors: self.sensors.clone(),
            init_joint_pos: self.init_state.joint_pos.resolve(&dir.joint_names)?,
            init_joint_vel: self.init_state.joint_vel.resolve(&dir.joint_names)?,
            soft_joint_pos_limit_factor: self.articulation.soft_joint_pos_limit_factor,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
