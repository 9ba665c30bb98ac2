//! Task environment and training-runner configuration types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use striders_core::error::{SpecError, StridersError};
use striders_core::pattern::PatternValue;
use striders_entity::entity::EntityCfg;

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_episode_length_s() -> f32 {
    20.0
}
const fn default_decimation() -> u32 {
    4
}
const fn default_command_resampling_s() -> f32 {
    10.0
}
const fn default_true() -> bool {
    true
}
const fn default_terrain_rows() -> u32 {
    10
}
const fn default_terrain_cols() -> u32 {
    20
}
const fn default_border_width() -> f32 {
    20.0
}
const fn default_max_iterations() -> u32 {
    30_000
}
const fn default_num_steps_per_env() -> u32 {
    24
}
const fn default_save_interval() -> u32 {
    500
}
const fn default_learning_rate() -> f32 {
    1e-3
}
const fn default_entropy_coef() -> f32 {
    0.008
}

// ---------------------------------------------------------------------------
// TerrainCfg
// ---------------------------------------------------------------------------

/// Procedural terrain grid settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainCfg {
    /// Grow difficulty row by row as training progresses.
    #[serde(default = "default_true")]
    pub curriculum: bool,
    #[serde(default = "default_terrain_rows")]
    pub num_rows: u32,
    #[serde(default = "default_terrain_cols")]
    pub num_cols: u32,
    /// Flat border around the grid (m).
    #[serde(default = "default_border_width")]
    pub border_width: f32,
}

impl Default for TerrainCfg {
    fn default() -> Self {
        Self {
            curriculum: true,
            num_rows: default_terrain_rows(),
            num_cols: default_terrain_cols(),
            border_width: default_border_width(),
        }
    }
}

// ---------------------------------------------------------------------------
// ViewerCfg
// ---------------------------------------------------------------------------

/// Camera-follow settings for the interactive viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerCfg {
    /// Body the camera tracks.
    pub body_name: String,
    /// Vertical offset of the look-at point (m).
    pub z_offset: f32,
}

impl Default for ViewerCfg {
    fn default() -> Self {
        Self {
            body_name: "base_link".into(),
            z_offset: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// LocomotionEnvCfg
// ---------------------------------------------------------------------------

/// Base configuration for the locomotion task family.
///
/// Task variants are built by cascading overrides over this value; see
/// [`crate::cascade::CfgStage`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocomotionEnvCfg {
    /// Episode length (s).
    pub episode_length_s: f32,
    /// Physics steps per control step.
    pub decimation: u32,
    /// The simulated robot.
    pub entity: EntityCfg,
    /// Per-joint action normalization scales (from the actuator tables).
    pub action_scale: HashMap<String, f32>,
    /// Pattern-keyed tolerance for the pose-tracking reward.
    pub pose_reward_std: PatternValue<f32>,
    /// Geoms whose friction is randomized by the foot-friction event.
    pub foot_friction_geom_names: Vec<String>,
    /// Terrain grid; `None` means flat ground.
    pub terrain: Option<TerrainCfg>,
    pub viewer: ViewerCfg,
    /// Apply random base pushes during training.
    pub push_robot: bool,
    /// Inject observation noise during training.
    pub observation_corruption: bool,
    /// Seconds between velocity-command resamples.
    pub command_resampling_s: f32,
}

/// Defaults for the velocity task family: rough terrain, pushes and
/// observation noise enabled.
impl Default for LocomotionEnvCfg {
    fn default() -> Self {
        Self {
            episode_length_s: default_episode_length_s(),
            decimation: default_decimation(),
            entity: EntityCfg::default(),
            action_scale: HashMap::new(),
            pose_reward_std: PatternValue::scalar(0.3),
            foot_friction_geom_names: Vec::new(),
            terrain: Some(TerrainCfg::default()),
            viewer: ViewerCfg::default(),
            push_robot: true,
            observation_corruption: true,
            command_resampling_s: default_command_resampling_s(),
        }
    }
}

// ---------------------------------------------------------------------------
// RlRunnerCfg
// ---------------------------------------------------------------------------

/// Training-runner configuration handed to the RL runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RlRunnerCfg {
    pub experiment_name: String,

    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Rollout length per environment between updates.
    #[serde(default = "default_num_steps_per_env")]
    pub num_steps_per_env: u32,

    /// Checkpoint interval in iterations.
    #[serde(default = "default_save_interval")]
    pub save_interval: u32,

    #[serde(default = "default_learning_rate")]
    pub learning_rate: f32,

    #[serde(default = "default_entropy_coef")]
    pub entropy_coef: f32,

    /// Master random seed.
    #[serde(default)]
    pub seed: u64,
}

impl Default for RlRunnerCfg {
    fn default() -> Self {
        Self {
            experiment_name: "striders".into(),
            max_iterations: default_max_iterations(),
            num_steps_per_env: default_num_steps_per_env(),
            save_interval: default_save_interval(),
            learning_rate: default_learning_rate(),
            entropy_coef: default_entropy_coef(),
            seed: 0,
        }
    }
}

impl RlRunnerCfg {
    /// Validate configuration. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), SpecError> {
        if self.learning_rate <= 0.0 {
            return Err(SpecError::NonPositive {
                field: "learning_rate",
                value: self.learning_rate,
            });
        }
        if self.num_steps_per_env == 0 {
            return Err(SpecError::InvalidValue {
                field: "num_steps_per_env",
                message: "must be >= 1".into(),
            });
        }
        Ok(())
    }

    /// Load from TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, StridersError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
