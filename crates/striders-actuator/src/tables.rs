//! Per-joint parameter tables assembled from actuator groups.
//!
//! [`build_joint_tables`] expands every group's selectors against the
//! robot's full joint list, verifies that no joint is claimed by two
//! different groups, resolves the four pattern-keyed fields, and derives
//! the action-scale table consumed by the policy layer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use striders_core::error::{SpecError, StridersError};
use striders_core::pattern::expand_patterns;

use crate::group::ActuatorCfg;

/// Fraction of the effort limit used for action normalization.
const ACTION_SCALE_FACTOR: f32 = 0.8;

// ---------------------------------------------------------------------------
// JointParamTables
// ---------------------------------------------------------------------------

/// Resolved per-joint control parameters.
///
/// Plain name-keyed mappings, consumed read-only by the simulation and
/// policy layers. A joint absent from a table is not configured by any
/// group; absence is never zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JointParamTables {
    pub effort_limit: HashMap<String, f32>,
    pub stiffness: HashMap<String, f32>,
    pub damping: HashMap<String, f32>,
    pub armature: HashMap<String, f32>,
    /// `0.8 · effort_limit / stiffness` per joint; joints with zero
    /// resolved stiffness are omitted rather than dividing by zero.
    pub action_scale: HashMap<String, f32>,
}

impl JointParamTables {
    /// Number of joints with at least a stiffness entry.
    pub fn joint_count(&self) -> usize {
        self.stiffness.len()
    }
}

// ---------------------------------------------------------------------------
// build_joint_tables
// ---------------------------------------------------------------------------

/// Resolve a set of actuator groups against the robot's full joint list.
///
/// Fails with [`SpecError::OverlappingJoint`] if two *different* groups
/// claim the same joint; overlap within one group's own selector list is
/// legal and resolved last-match-wins. Selectors matching no joint are
/// surfaced as warnings by the expansion. Fails fast at configuration-build
/// time; nothing here is retried.
pub fn build_joint_tables(
    groups: &[ActuatorCfg],
    joint_names: &[String],
) -> Result<JointParamTables, StridersError> {
    let mut claimed: HashMap<String, String> = HashMap::new();
    let mut tables = JointParamTables::default();

    for group in groups {
        let joints = expand_patterns(&group.joint_names_expr, joint_names)?;
        for joint in &joints {
            if let Some(first) = claimed.get(joint) {
                return Err(SpecError::OverlappingJoint {
                    joint: joint.clone(),
                    first: first.clone(),
                    second: group.name.clone(),
                }
                .into());
            }
            claimed.insert(joint.clone(), group.name.clone());
        }

        tables.effort_limit.extend(group.effort_limit.resolve(&joints)?);
        tables.stiffness.extend(group.stiffness.resolve(&joints)?);
        tables.damping.extend(group.damping.resolve(&joints)?);
        tables.armature.extend(group.armature.resolve(&joints)?);
    }

    for (joint, &effort) in &tables.effort_limit {
        if let Some(&stiffness) = tables.stiffness.get(joint) {
            if stiffness != 0.0 {
                tables
                    .action_scale
                    .insert(joint.clone(), ACTION_SCALE_FACTOR * effort / stiffness);
            }
        }
    }

    Ok(tables)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
