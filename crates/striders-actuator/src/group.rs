//! Actuator group configuration.
//!
//! An actuator group binds a set of joint-name selectors to one hardware
//! class: shared effort limit, armature, and a derived PD gain pair. The
//! full set of groups for a robot must cover every actuator-driven joint
//! exactly once; see [`crate::tables::build_joint_tables`].

use serde::{Deserialize, Serialize};

use striders_core::error::SpecError;
use striders_core::pattern::PatternValue;

use crate::motor::{derive_pd_gains, ElectricActuator, GainSpec};

// ---------------------------------------------------------------------------
// ActuatorCfg
// ---------------------------------------------------------------------------

/// Configuration for one actuator group.
///
/// Selector overlap *within* `joint_names_expr` is legal and resolved
/// last-match-wins per field; overlap *across* groups is a configuration
/// error caught at table-build time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActuatorCfg {
    /// Group name, used in diagnostics.
    pub name: String,
    /// Ordered joint-name selectors defining the group's coverage.
    pub joint_names_expr: Vec<String>,
    pub effort_limit: PatternValue<f32>,
    pub stiffness: PatternValue<f32>,
    pub damping: PatternValue<f32>,
    /// Reflected inertia added to each driven joint (kg·m²).
    pub armature: PatternValue<f32>,
}

impl ActuatorCfg {
    /// Build a group from one actuator class and a target response.
    ///
    /// Effort limit and armature come from the datasheet; stiffness and
    /// damping are derived via [`derive_pd_gains`]. All four land as scalar
    /// fields shared by every joint the selectors match.
    pub fn from_actuator(
        name: impl Into<String>,
        joint_names_expr: impl IntoIterator<Item = impl Into<String>>,
        actuator: &ElectricActuator,
        spec: GainSpec,
    ) -> Result<Self, SpecError> {
        let gains = derive_pd_gains(actuator, spec)?;
        Ok(Self {
            name: name.into(),
            joint_names_expr: joint_names_expr.into_iter().map(Into::into).collect(),
            effort_limit: PatternValue::scalar(actuator.effort_limit),
            stiffness: PatternValue::scalar(gains.stiffness),
            damping: PatternValue::scalar(gains.damping),
            armature: PatternValue::scalar(actuator.reflected_inertia),
        })
    }

    /// Replace the effort-limit spec (e.g. to derate specific joints).
    #[must_use]
    pub fn with_effort_limit(mut self, spec: PatternValue<f32>) -> Self {
        self.effort_limit = spec;
        self
    }

    /// Replace the stiffness spec.
    #[must_use]
    pub fn with_stiffness(mut self, spec: PatternValue<f32>) -> Self {
        self.stiffness = spec;
        self
    }

    /// Replace the damping spec.
    #[must_use]
    pub fn with_damping(mut self, spec: PatternValue<f32>) -> Self {
        self.damping = spec;
        self
    }

    /// Replace the armature spec.
    #[must_use]
    pub fn with_armature(mut self, spec: PatternValue<f32>) -> Self {
        self.armature = spec;
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
