//! Collision group configuration.
//!
//! Assigns contact parameters to geometries by name selector. Two usage
//! modes fall out of the declared selectors, with an identical resolver:
//!
//! - *allow-list*: only the listed geometries get parameters, everything
//!   else is disabled via `contype`/`conaffinity` masking (e.g. feet-only
//!   contact for locomotion on flat ground);
//! - *inclusive*: a broad selector enables everything, with a distinguished
//!   subset (feet) at higher contact dimensionality and custom friction,
//!   declared after the broad rule so last-match-wins picks it up.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use striders_core::error::{SpecError, StridersError};
use striders_core::pattern::{expand_patterns, PatternValue};

/// Contact dimensionalities the solver accepts.
const VALID_CONDIM: [u8; 4] = [1, 3, 4, 6];

// ---------------------------------------------------------------------------
// GeomParams
// ---------------------------------------------------------------------------

/// Resolved contact parameters for one geometry.
///
/// `None` leaves the simulator default untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeomParams {
    /// Contact-type bitmask.
    pub contype: Option<u32>,
    /// Contact-affinity bitmask.
    pub conaffinity: Option<u32>,
    /// Contact dimensionality (1 = frictionless normal, 3 = sliding
    /// friction, 4 = +torsional, 6 = +rolling).
    pub condim: Option<u8>,
    /// Solver priority; higher wins parameter conflicts between pairs.
    pub priority: Option<i32>,
    /// Sliding friction coefficient.
    pub friction: Option<f32>,
    /// Solver impedance parameters.
    pub solimp: Option<[f32; 3]>,
}

// ---------------------------------------------------------------------------
// CollisionCfg
// ---------------------------------------------------------------------------

/// Contact-parameter assignment for a set of geometries.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CollisionCfg {
    /// Ordered geometry-name selectors defining which geoms this config
    /// touches at all.
    pub geom_names_expr: Vec<String>,
    /// Contact-type mask applied to every matched geom.
    pub contype: Option<u32>,
    /// Contact-affinity mask applied to every matched geom.
    pub conaffinity: Option<u32>,
    pub condim: Option<PatternValue<u8>>,
    pub priority: Option<PatternValue<i32>>,
    pub friction: Option<PatternValue<f32>>,
    pub solimp: Option<PatternValue<[f32; 3]>>,
}

impl CollisionCfg {
    /// Validate declared values. Every condim must be in {1, 3, 4, 6}.
    pub fn validate(&self) -> Result<(), SpecError> {
        if let Some(condim) = &self.condim {
            for &d in condim.values() {
                if !VALID_CONDIM.contains(&d) {
                    return Err(SpecError::InvalidCondim(d));
                }
            }
        }
        Ok(())
    }

    /// Resolve against the model's geometry names.
    ///
    /// Only geoms matched by `geom_names_expr` receive entries; within that
    /// set, each pattern-keyed field resolves independently and a geom the
    /// field's rules don't match keeps the simulator default (`None`).
    pub fn resolve(
        &self,
        geom_names: &[String],
    ) -> Result<HashMap<String, GeomParams>, StridersError> {
        self.validate()?;

        let geoms = expand_patterns(&self.geom_names_expr, geom_names)?;
        let condim = match &self.condim {
            Some(spec) => spec.resolve(&geoms)?,
            None => HashMap::new(),
        };
        let priority = match &self.priority {
            Some(spec) => spec.resolve(&geoms)?,
            None => HashMap::new(),
        };
        let friction = match &self.friction {
            Some(spec) => spec.resolve(&geoms)?,
            None => HashMap::new(),
        };
        let solimp = match &self.solimp {
            Some(spec) => spec.resolve(&geoms)?,
            None => HashMap::new(),
        };

        let mut out = HashMap::with_capacity(geoms.len());
        for geom in geoms {
            let params = GeomParams {
                contype: self.contype,
                conaffinity: self.conaffinity,
                condim: condim.get(&geom).copied(),
                priority: priority.get(&geom).copied(),
                friction: friction.get(&geom).copied(),
                solimp: solimp.get(&geom).copied(),
            };
            out.insert(geom, params);
        }
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
