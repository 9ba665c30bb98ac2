//! Velocity-tracking task variants for the humanoid.
//!
//! Four registered tasks: rough and flat terrain, each with a play variant
//! for policy inspection (effectively infinite episodes, no training-time
//! randomization). All four share the humanoid entity and actuator-derived
//! action scales; the variants differ only in their cascade overrides.

use std::sync::Arc;

use striders_actuator::tables::build_joint_tables;
use striders_core::error::StridersError;
use striders_core::pattern::PatternValue;
use striders_entity::sensor::ContactSensorCfg;
use striders_env::cascade::CfgStage;
use striders_env::config::{LocomotionEnvCfg, RlRunnerCfg, ViewerCfg};
use striders_env::registry::{TaskEntry, TaskRegistry};

use crate::humanoid::{humanoid_entity, name_directory, FOOT_COLLISION_GEOMS};

pub const TASK_VELOCITY_ROUGH: &str = "Striders-Velocity-Rough-Humanoid";
pub const TASK_VELOCITY_ROUGH_PLAY: &str = "Striders-Velocity-Rough-Humanoid-Play";
pub const TASK_VELOCITY_FLAT: &str = "Striders-Velocity-Flat-Humanoid";
pub const TASK_VELOCITY_FLAT_PLAY: &str = "Striders-Velocity-Flat-Humanoid-Play";

// ---------------------------------------------------------------------------
// Shared pieces
// ---------------------------------------------------------------------------

/// Pose-reward tolerances per joint family: tight on roll/yaw joints,
/// loose on the big pitch joints that do the walking.
fn pose_reward_std() -> PatternValue<f32> {
    PatternValue::patterns([
        // Lower body.
        (".*hip_pitch.*", 0.3_f32),
        (".*hip_roll.*", 0.15),
        (".*hip_yaw.*", 0.15),
        (".*knee_pitch.*", 0.35),
        (".*ankle_roll.*", 0.25),
        (".*ankle_pitch.*", 0.1),
        // Waist.
        (".*waist_yaw.*", 0.15),
        // Arms.
        (".*shoulder_pitch.*", 0.35),
        (".*shoulder_roll.*", 0.15),
        (".*shoulder_yaw.*", 0.1),
        (".*elbow_pitch.*", 0.25),
    ])
}

fn foot_ground_sensors() -> Vec<ContactSensorCfg> {
    ["left", "right"]
        .iter()
        .map(|side| {
            ContactSensorCfg::body_pair(
                format!("{side}_foot_ground_contact"),
                format!("{side}_foot_pitch_link"),
                "terrain",
            )
        })
        .collect()
}

fn humanoid_viewer() -> ViewerCfg {
    ViewerCfg {
        body_name: "waist_yaw_link".into(),
        z_offset: 0.686,
    }
}

/// Base stage for the velocity family: the [`LocomotionEnvCfg`] defaults.
fn velocity_base() -> Arc<CfgStage<LocomotionEnvCfg>> {
    CfgStage::root(|_cfg: &mut LocomotionEnvCfg| {}).shared()
}

// ---------------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------------

/// Rough-terrain stage: humanoid entity with foot ground-contact sensors,
/// actuator-derived action scales, and per-family pose tolerances.
pub fn rough_stage() -> Result<Arc<CfgStage<LocomotionEnvCfg>>, StridersError> {
    let entity = humanoid_entity()?.with_sensors(foot_ground_sensors());
    let dir = name_directory();
    let action_scale =
        build_joint_tables(&entity.articulation.actuators, &dir.joint_names)?.action_scale;
    let foot_geoms: Vec<String> = dir
        .geom_names
        .iter()
        .filter(|g| g.contains("_foot"))
        .cloned()
        .collect();

    Ok(CfgStage::child(&velocity_base(), move |cfg| {
        cfg.entity = entity.clone();
        cfg.action_scale = action_scale.clone();
        cfg.pose_reward_std = pose_reward_std();
        cfg.foot_friction_geom_names = foot_geoms.clone();
        cfg.viewer = humanoid_viewer();
    })
    .shared())
}

/// Play variant of the rough task: effectively infinite episodes on a
/// small, fixed-difficulty terrain grid.
pub fn rough_play_stage() -> Result<Arc<CfgStage<LocomotionEnvCfg>>, StridersError> {
    Ok(CfgStage::child(&rough_stage()?, |cfg| {
        cfg.episode_length_s = 1e9;
        if let Some(terrain) = cfg.terrain.as_mut() {
            terrain.curriculum = false;
            terrain.num_rows = 5;
            terrain.num_cols = 5;
            terrain.border_width = 10.0;
        }
    })
    .shared())
}

/// Flat-ground stage: no terrain grid, self-collision sensing, and the
/// foot selector instead of an explicit geom list.
pub fn flat_stage() -> Result<Arc<CfgStage<LocomotionEnvCfg>>, StridersError> {
    let entity = humanoid_entity()?.with_sensors(vec![ContactSensorCfg::subtree_self(
        "self_collision",
        "base_link",
        10,
    )]);
    let dir = name_directory();
    let action_scale =
        build_joint_tables(&entity.articulation.actuators, &dir.joint_names)?.action_scale;

    Ok(CfgStage::child(&velocity_base(), move |cfg| {
        cfg.entity = entity.clone();
        cfg.action_scale = action_scale.clone();
        cfg.pose_reward_std = pose_reward_std();
        cfg.foot_friction_geom_names = vec![FOOT_COLLISION_GEOMS.into()];
        cfg.terrain = None;
        cfg.viewer = humanoid_viewer();
    })
    .shared())
}

/// Play variant of the flat task: infinite episodes, no training-time
/// randomization.
pub fn flat_play_stage() -> Result<Arc<CfgStage<LocomotionEnvCfg>>, StridersError> {
    Ok(CfgStage::child(&flat_stage()?, |cfg| {
        cfg.episode_length_s = 1e9;
        cfg.observation_corruption = false;
        cfg.push_robot = false;
    })
    .shared())
}

fn runner_stage(experiment_name: &str) -> Arc<CfgStage<RlRunnerCfg>> {
    let name = experiment_name.to_string();
    CfgStage::root(move |cfg: &mut RlRunnerCfg| {
        cfg.experiment_name = name.clone();
    })
    .shared()
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Register the four velocity tasks into `registry`.
pub fn register_tasks(registry: &mut TaskRegistry) -> Result<(), StridersError> {
    let rough_runner = runner_stage("humanoid_velocity_rough");
    let flat_runner = runner_stage("humanoid_velocity_flat");

    registry.register(
        TASK_VELOCITY_ROUGH,
        TaskEntry {
            env: rough_stage()?,
            rl: Arc::clone(&rough_runner),
        },
    )?;
    registry.register(
        TASK_VELOCITY_ROUGH_PLAY,
        TaskEntry {
            env: rough_play_stage()?,
            rl: rough_runner,
        },
    )?;
    registry.register(
        TASK_VELOCITY_FLAT,
        TaskEntry {
            env: flat_stage()?,
            rl: Arc::clone(&flat_runner),
        },
    )?;
    registry.register(
        TASK_VELOCITY_FLAT_PLAY,
        TaskEntry {
            env: flat_play_stage()?,
            rl: flat_runner,
        },
    )?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
