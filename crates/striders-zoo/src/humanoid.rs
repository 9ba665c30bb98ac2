//! Bipedal humanoid constants: actuator classes, collision and keyframe
//! configs, and the robot's canonical name directory.
//!
//! The robot carries three electric actuator classes, grouped by the torque
//! they deliver. Hip pitch, knee pitch, and shoulder pitch run on the 95 Nm
//! class; hip roll/yaw and the waist on the 54 Nm class; ankles, shoulder
//! roll/yaw, and elbows on the 30 Nm class.

use striders_actuator::group::ActuatorCfg;
use striders_actuator::motor::{ElectricActuator, GainSpec};
use striders_core::error::SpecError;
use striders_core::pattern::{NameDirectory, PatternValue};
use striders_entity::collision::CollisionCfg;
use striders_entity::entity::{ArticulationCfg, EntityCfg, InitialStateCfg};

// ---------------------------------------------------------------------------
// Actuator classes (datasheet constants)
// ---------------------------------------------------------------------------

pub const ACTUATOR_95NM: ElectricActuator = ElectricActuator::new(0.12109824, 12.356, 95.0);
pub const ACTUATOR_54NM: ElectricActuator = ElectricActuator::new(0.167592, 14.738, 54.0);
pub const ACTUATOR_30NM: ElectricActuator = ElectricActuator::new(0.0312822, 16.747, 30.0);

/// Target responses per class: 5 Hz across the board, the pitch-heavy 95 Nm
/// class overdamped.
pub const GAINS_95NM: GainSpec = GainSpec::new(5.0, 1.5);
pub const GAINS_54NM: GainSpec = GainSpec::new(5.0, 0.9);
pub const GAINS_30NM: GainSpec = GainSpec::new(5.0, 0.9);

/// Selector for the foot contact pads (seven per foot).
pub const FOOT_COLLISION_GEOMS: &str = r"(left|right)_foot[1-7]_collision";

// ---------------------------------------------------------------------------
// Actuator groups
// ---------------------------------------------------------------------------

/// The humanoid's actuator groups.
///
/// Together these cover all 21 actuated joints exactly once.
pub fn humanoid_actuators() -> Result<Vec<ActuatorCfg>, SpecError> {
    Ok(vec![
        ActuatorCfg::from_actuator(
            "actuator_95nm",
            [
                ".*_hip_pitch_joint",
                ".*_knee_pitch_joint",
                ".*_shoulder_pitch_joint",
            ],
            &ACTUATOR_95NM,
            GAINS_95NM,
        )?,
        ActuatorCfg::from_actuator(
            "actuator_54nm",
            [".*_hip_roll_joint", ".*_hip_yaw_joint", "waist_yaw_joint"],
            &ACTUATOR_54NM,
            GAINS_54NM,
        )?,
        ActuatorCfg::from_actuator(
            "actuator_30nm",
            [
                ".*_ankle_roll_joint",
                ".*_ankle_pitch_joint",
                ".*_shoulder_roll_joint",
                ".*_shoulder_yaw_joint",
                ".*_elbow_pitch_joint",
            ],
            &ACTUATOR_30NM,
            GAINS_30NM,
        )?,
    ])
}

// ---------------------------------------------------------------------------
// Keyframes
// ---------------------------------------------------------------------------

/// Standing pose with bent knees, base 0.686 m above ground.
pub fn knees_bent_keyframe() -> InitialStateCfg {
    InitialStateCfg {
        pos: [0.0, 0.0, 0.686],
        rot: [0.0, 0.0, 0.0, 1.0],
        joint_pos: PatternValue::patterns([
            (".*_hip_pitch_joint", -0.2468_f32),
            (".*_knee_pitch_joint", 0.5181),
            (".*_ankle_pitch_joint", -0.2468),
        ]),
        joint_vel: PatternValue::scalar(0.0),
    }
}

// ---------------------------------------------------------------------------
// Collision variants
// ---------------------------------------------------------------------------

/// All collisions enabled, self-collisions included.
///
/// Everything gets condim 1; the feet are distinguished afterwards with
/// condim 3, solver priority, and custom friction (last match wins, so the
/// broad rule comes first).
pub fn full_collision() -> CollisionCfg {
    CollisionCfg {
        geom_names_expr: vec![".*_collision".into()],
        condim: Some(PatternValue::patterns([
            (".*_collision", 1_u8),
            (FOOT_COLLISION_GEOMS, 3),
        ])),
        priority: Some(PatternValue::patterns([(FOOT_COLLISION_GEOMS, 1_i32)])),
        friction: Some(PatternValue::patterns([(FOOT_COLLISION_GEOMS, 0.6_f32)])),
        ..CollisionCfg::default()
    }
}

/// All collisions against the world, self-collisions masked off.
pub fn full_collision_without_self() -> CollisionCfg {
    CollisionCfg {
        contype: Some(0),
        conaffinity: Some(1),
        ..full_collision()
    }
}

/// Feet-only allow-list: everything except the foot pads is disabled.
pub fn feet_only_collision() -> CollisionCfg {
    CollisionCfg {
        geom_names_expr: vec![FOOT_COLLISION_GEOMS.into()],
        contype: Some(0),
        conaffinity: Some(1),
        condim: Some(PatternValue::scalar(3)),
        priority: Some(PatternValue::scalar(1)),
        friction: Some(PatternValue::scalar(0.6)),
        solimp: None,
    }
}

// ---------------------------------------------------------------------------
// Entity assembly
// ---------------------------------------------------------------------------

/// The complete humanoid entity: bent-knee keyframe, full collisions, no
/// sensors (tasks attach their own), and the three actuator groups.
pub fn humanoid_entity() -> Result<EntityCfg, SpecError> {
    Ok(EntityCfg {
        init_state: knees_bent_keyframe(),
        collisions: vec![full_collision()],
        sensors: Vec::new(),
        articulation: ArticulationCfg {
            actuators: humanoid_actuators()?,
            soft_joint_pos_limit_factor: 0.9,
        },
    })
}

// ---------------------------------------------------------------------------
// Name directory
// ---------------------------------------------------------------------------

/// Canonical joint/body/geometry names for the humanoid, as the simulation
/// layer reports them. `terrain` is listed as a body so ground-contact
/// sensors validate.
pub fn name_directory() -> NameDirectory {
    let sides = ["left", "right"];

    let mut joint_names = Vec::new();
    for side in sides {
        for joint in [
            "hip_pitch",
            "hip_roll",
            "hip_yaw",
            "knee_pitch",
            "ankle_pitch",
            "ankle_roll",
            "shoulder_pitch",
            "shoulder_roll",
            "shoulder_yaw",
            "elbow_pitch",
        ] {
            joint_names.push(format!("{side}_{joint}_joint"));
        }
    }
    joint_names.push("waist_yaw_joint".into());

    let mut body_names = vec![
        "base_link".to_string(),
        "torso_link".to_string(),
        "waist_yaw_link".to_string(),
        "terrain".to_string(),
    ];
    for side in sides {
        for link in [
            "thigh_roll_link",
            "shank_pitch_link",
            "foot_pitch_link",
            "upper_arm_roll_link",
            "lower_arm_pitch_link",
        ] {
            body_names.push(format!("{side}_{link}"));
        }
    }

    let mut geom_names = vec!["torso_collision".to_string(), "pelvis_collision".to_string()];
    for side in sides {
        for geom in ["thigh", "shank", "upper_arm", "lower_arm"] {
            geom_names.push(format!("{side}_{geom}_collision"));
        }
        for i in 1..=7 {
            geom_names.push(format!("{side}_foot{i}_collision"));
        }
    }

    NameDirectory {
        joint_names,
        body_names,
        geom_names,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use striders_actuator::motor::derive_pd_gains;
    use striders_actuator::tables::build_joint_tables;

    #[test]
    fn groups_cover_all_joints_exactly_once() {
        let dir = name_directory();
        let tables = build_joint_tables(&humanoid_actuators().unwrap(), &dir.joint_names).unwrap();
        assert_eq!(tables.joint_count(), 21);
        assert_eq!(tables.effort_limit.len(), 21);
        assert_eq!(tables.action_scale.len(), 21);
    }

    #[test]
    fn each_class_drives_its_joints() {
        let dir = name_directory();
        let tables = build_joint_tables(&humanoid_actuators().unwrap(), &dir.joint_names).unwrap();

        assert!((tables.effort_limit["left_knee_pitch_joint"] - 95.0).abs() < f32::EPSILON);
        assert!((tables.effort_limit["waist_yaw_joint"] - 54.0).abs() < f32::EPSILON);
        assert!((tables.effort_limit["right_elbow_pitch_joint"] - 30.0).abs() < f32::EPSILON);

        assert!((tables.armature["left_knee_pitch_joint"] - 0.12109824).abs() < f32::EPSILON);
        assert!((tables.armature["right_ankle_roll_joint"] - 0.0312822).abs() < f32::EPSILON);
    }

    #[test]
    fn gains_match_derivation_formula() {
        let dir = name_directory();
        let tables = build_joint_tables(&humanoid_actuators().unwrap(), &dir.joint_names).unwrap();
        let gains = derive_pd_gains(&ACTUATOR_95NM, GAINS_95NM).unwrap();
        assert!((tables.stiffness["left_hip_pitch_joint"] - gains.stiffness).abs() < 1e-4);
        assert!((tables.damping["left_hip_pitch_joint"] - gains.damping).abs() < 1e-4);
    }

    #[test]
    fn action_scale_is_eighty_percent_effort_over_stiffness() {
        let dir = name_directory();
        let tables = build_joint_tables(&humanoid_actuators().unwrap(), &dir.joint_names).unwrap();
        for joint in &dir.joint_names {
            let expected = 0.8 * tables.effort_limit[joint] / tables.stiffness[joint];
            assert!((tables.action_scale[joint] - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn keyframe_resolves_leg_joints_only() {
        let dir = name_directory();
        let keyframe = knees_bent_keyframe();
        let joint_pos = keyframe.joint_pos.resolve(&dir.joint_names).unwrap();

        assert!((joint_pos["left_hip_pitch_joint"] - (-0.2468)).abs() < 1e-6);
        assert!((joint_pos["right_knee_pitch_joint"] - 0.5181).abs() < 1e-6);
        assert!((joint_pos["left_ankle_pitch_joint"] - (-0.2468)).abs() < 1e-6);
        // Joints outside the keyframe patterns are absent, not zero.
        assert!(!joint_pos.contains_key("waist_yaw_joint"));
        assert!(!joint_pos.contains_key("left_shoulder_pitch_joint"));

        let joint_vel = keyframe.joint_vel.resolve(&dir.joint_names).unwrap();
        assert_eq!(joint_vel.len(), 21);
    }

    #[test]
    fn full_collision_distinguishes_feet() {
        let dir = name_directory();
        let resolved = full_collision().resolve(&dir.geom_names).unwrap();
        assert_eq!(resolved.len(), dir.geom_names.len());
        assert_eq!(resolved["torso_collision"].condim, Some(1));
        assert_eq!(resolved["left_foot4_collision"].condim, Some(3));
        assert_eq!(resolved["left_foot4_collision"].priority, Some(1));
        assert!((resolved["right_foot7_collision"].friction.unwrap() - 0.6).abs() < f32::EPSILON);
        assert_eq!(resolved["torso_collision"].contype, None);
    }

    #[test]
    fn without_self_variant_masks_contacts() {
        let dir = name_directory();
        let resolved = full_collision_without_self().resolve(&dir.geom_names).unwrap();
        assert_eq!(resolved["torso_collision"].contype, Some(0));
        assert_eq!(resolved["torso_collision"].conaffinity, Some(1));
        // Feet keep their differentiated parameters.
        assert_eq!(resolved["left_foot1_collision"].condim, Some(3));
    }

    #[test]
    fn feet_only_variant_is_an_allow_list() {
        let dir = name_directory();
        let resolved = feet_only_collision().resolve(&dir.geom_names).unwrap();
        assert_eq!(resolved.len(), 14);
        assert!(!resolved.contains_key("torso_collision"));
        assert_eq!(resolved["right_foot2_collision"].condim, Some(3));
    }

    #[test]
    fn entity_resolves_end_to_end() {
        let resolved = humanoid_entity()
            .unwrap()
            .resolve(&name_directory())
            .unwrap();
        assert_eq!(resolved.joints.joint_count(), 21);
        assert_eq!(resolved.geoms.len(), name_directory().geom_names.len());
        assert!((resolved.soft_joint_pos_limit_factor - 0.9).abs() < f32::EPSILON);
    }
}
