//! Electric actuator model and PD gain derivation.
//!
//! Gains follow second-order response shaping: for a target natural
//! frequency `f` (Hz), damping ratio `ζ`, and reflected inertia `I`,
//!
//! ```text
//! ω  = 2π·f
//! kp = I·ω²          (stiffness, Nm/rad)
//! kd = 2·ζ·I·ω       (damping, Nm·s/rad)
//! ```

use serde::{Deserialize, Serialize};

use striders_core::error::SpecError;

// ---------------------------------------------------------------------------
// ElectricActuator
// ---------------------------------------------------------------------------

/// Physical characteristics of one electric actuator class.
///
/// Values come straight from the motor datasheet. One instance per hardware
/// class, shared by every joint that class drives.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElectricActuator {
    /// Reflected inertia at the joint (kg·m²).
    pub reflected_inertia: f32,
    /// Velocity limit (rad/s).
    pub velocity_limit: f32,
    /// Effort limit (Nm).
    pub effort_limit: f32,
}

impl ElectricActuator {
    /// Create an actuator class from datasheet constants.
    pub const fn new(reflected_inertia: f32, velocity_limit: f32, effort_limit: f32) -> Self {
        Self {
            reflected_inertia,
            velocity_limit,
            effort_limit,
        }
    }

    /// Validate physical constants. All must be strictly positive.
    pub fn validate(&self) -> Result<(), SpecError> {
        if self.reflected_inertia <= 0.0 {
            return Err(SpecError::NonPositive {
                field: "reflected_inertia",
                value: self.reflected_inertia,
            });
        }
        if self.velocity_limit <= 0.0 {
            return Err(SpecError::NonPositive {
                field: "velocity_limit",
                value: self.velocity_limit,
            });
        }
        if self.effort_limit <= 0.0 {
            return Err(SpecError::NonPositive {
                field: "effort_limit",
                value: self.effort_limit,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// GainSpec
// ---------------------------------------------------------------------------

/// Target closed-loop response for a PD-controlled joint.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GainSpec {
    /// Natural frequency (Hz).
    pub natural_frequency_hz: f32,
    /// Damping ratio (dimensionless; 1.0 is critically damped).
    pub damping_ratio: f32,
}

impl GainSpec {
    /// Create a gain spec.
    pub const fn new(natural_frequency_hz: f32, damping_ratio: f32) -> Self {
        Self {
            natural_frequency_hz,
            damping_ratio,
        }
    }
}

// ---------------------------------------------------------------------------
// PdGains
// ---------------------------------------------------------------------------

/// PD gains derived from an actuator class and a target response.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PdGains {
    /// Position gain (Nm/rad).
    pub stiffness: f32,
    /// Velocity gain (Nm·s/rad).
    pub damping: f32,
}

/// Derive PD gains from an actuator class and a target response.
///
/// Pure and deterministic; no side effects. Non-positive inputs fail with
/// [`SpecError::NonPositive`] naming the offending field. In practice every
/// caller supplies positive datasheet literals, so the guard is unreachable,
/// but a silent negative stiffness would destabilize the simulated joint.
pub fn derive_pd_gains(actuator: &ElectricActuator, spec: GainSpec) -> Result<PdGains, SpecError> {
    actuator.validate()?;
    if spec.natural_frequency_hz <= 0.0 {
        return Err(SpecError::NonPositive {
            field: "natural_frequency_hz",
            value: spec.natural_frequency_hz,
        });
    }
    if spec.damping_ratio <= 0.0 {
        return Err(SpecError::NonPositive {
            field: "damping_ratio",
            value: spec.damping_ratio,
        });
    }

    let omega = std::f32::consts::TAU * spec.natural_frequency_hz;
    Ok(PdGains {
        stiffness: actuator.reflected_inertia * omega * omega,
        damping: 2.0 * spec.damping_ratio * actuator.reflected_inertia * omega,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const MOTOR: ElectricActuator = ElectricActuator::new(0.12109824, 12.356, 95.0);

    #[test]
    fn derived_gains_are_positive() {
        let gains = derive_pd_gains(&MOTOR, GainSpec::new(5.0, 1.5)).unwrap();
        assert!(gains.stiffness > 0.0);
        assert!(gains.damping > 0.0);
    }

    #[test]
    fn stiffness_matches_omega_squared() {
        let spec = GainSpec::new(5.0, 1.5);
        let gains = derive_pd_gains(&MOTOR, spec).unwrap();
        let omega = std::f32::consts::TAU * spec.natural_frequency_hz;
        assert!((gains.stiffness / MOTOR.reflected_inertia - omega * omega).abs() < 1e-2);
    }

    #[test]
    fn damping_matches_formula() {
        let spec = GainSpec::new(5.0, 1.5);
        let gains = derive_pd_gains(&MOTOR, spec).unwrap();
        let omega = std::f32::consts::TAU * spec.natural_frequency_hz;
        let expected = 2.0 * spec.damping_ratio * MOTOR.reflected_inertia * omega;
        assert!((gains.damping - expected).abs() < 1e-4);
    }

    #[test]
    fn derivation_is_deterministic() {
        let spec = GainSpec::new(5.0, 0.9);
        let a = derive_pd_gains(&MOTOR, spec).unwrap();
        let b = derive_pd_gains(&MOTOR, spec).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn higher_frequency_stiffens() {
        let low = derive_pd_gains(&MOTOR, GainSpec::new(5.0, 1.0)).unwrap();
        let high = derive_pd_gains(&MOTOR, GainSpec::new(10.0, 1.0)).unwrap();
        // kp scales with ω²: doubling f quadruples stiffness.
        assert!((high.stiffness / low.stiffness - 4.0).abs() < 1e-4);
        assert!((high.damping / low.damping - 2.0).abs() < 1e-4);
    }

    #[test]
    fn rejects_non_positive_inertia() {
        let bad = ElectricActuator::new(0.0, 12.356, 95.0);
        let err = derive_pd_gains(&bad, GainSpec::new(5.0, 1.5)).unwrap_err();
        assert!(matches!(
            err,
            SpecError::NonPositive {
                field: "reflected_inertia",
                ..
            }
        ));
    }

    #[test]
    fn rejects_non_positive_frequency() {
        let err = derive_pd_gains(&MOTOR, GainSpec::new(0.0, 1.5)).unwrap_err();
        assert!(matches!(
            err,
            SpecError::NonPositive {
                field: "natural_frequency_hz",
                ..
            }
        ));
    }

    #[test]
    fn rejects_non_positive_damping_ratio() {
        let err = derive_pd_gains(&MOTOR, GainSpec::new(5.0, -0.1)).unwrap_err();
        assert!(matches!(
            err,
            SpecError::NonPositive {
                field: "damping_ratio",
                ..
            }
        ));
    }

    #[test]
    fn validate_checks_each_field() {
        assert!(MOTOR.validate().is_ok());
        assert!(ElectricActuator::new(0.1, -1.0, 95.0).validate().is_err());
        assert!(ElectricActuator::new(0.1, 12.0, 0.0).validate().is_err());
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn motor_types_are_send_sync() {
        assert_send_sync::<ElectricActuator>();
        assert_send_sync::<GainSpec>();
        assert_send_sync::<PdGains>();
    }
}
