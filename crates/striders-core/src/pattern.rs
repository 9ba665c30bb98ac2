//! Pattern-keyed configuration values.
//!
//! Robot configuration addresses joints, bodies, and geometries by
//! name-selector rather than by exact name, so one rule can cover a family
//! of entities (`.*_hip_pitch_joint` covers both legs). A
//! [`PatternValue`] is either one scalar for every name in a target list or
//! an ordered list of `(selector, value)` rules resolved with
//! last-match-wins semantics.
//!
//! Selectors are regular expressions matched against the *full* entity name
//! (anchored, case-sensitive). Names matched by no rule are absent from the
//! result; absence means "not configured", never zero.

use std::collections::HashMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::PatternError;

// ---------------------------------------------------------------------------
// Anchored compilation
// ---------------------------------------------------------------------------

fn compile_anchored(pattern: &str) -> Result<Regex, PatternError> {
    Regex::new(&format!("^(?:{pattern})$")).map_err(|source| PatternError::Syntax {
        pattern: pattern.to_string(),
        source,
    })
}

// ---------------------------------------------------------------------------
// PatternValue
// ---------------------------------------------------------------------------

/// A configuration value keyed by entity-name selectors.
///
/// Either one scalar applied to every name in a target list, or an ordered
/// list of `(selector, value)` rules. Rules are applied in declaration
/// order; when several rules match the same name, the last one wins, so
/// broad rules go first and specific overrides last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternValue<T> {
    /// One value for every name.
    Scalar(T),
    /// Ordered `(selector, value)` rules, last match wins.
    Patterns(Vec<(String, T)>),
}

impl<T: Clone> PatternValue<T> {
    /// Build the scalar variant.
    pub const fn scalar(value: T) -> Self {
        Self::Scalar(value)
    }

    /// Build the pattern-list variant from `(selector, value)` pairs.
    pub fn patterns<S: Into<String>>(rules: impl IntoIterator<Item = (S, T)>) -> Self {
        Self::Patterns(rules.into_iter().map(|(p, v)| (p.into(), v)).collect())
    }

    /// Iterate over every declared value, ignoring which names it applies to.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        let slice: Vec<&T> = match self {
            Self::Scalar(v) => vec![v],
            Self::Patterns(rules) => rules.iter().map(|(_, v)| v).collect(),
        };
        slice.into_iter()
    }

    /// Resolve against a list of unique entity names.
    ///
    /// Returns a fresh name-to-value mapping. Scalar specs map every name;
    /// pattern specs map only matched names, later rules overwriting earlier
    /// ones for the same name. A malformed selector fails immediately with
    /// [`PatternError::Syntax`].
    pub fn resolve(&self, names: &[String]) -> Result<HashMap<String, T>, PatternError> {
        let mut out = HashMap::new();
        match self {
            Self::Scalar(value) => {
                for name in names {
                    out.insert(name.clone(), value.clone());
                }
            }
            Self::Patterns(rules) => {
                for (pattern, value) in rules {
                    let re = compile_anchored(pattern)?;
                    for name in names {
                        if re.is_match(name) {
                            out.insert(name.clone(), value.clone());
                        }
                    }
                }
            }
        }
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Selector-list expansion
// ---------------------------------------------------------------------------

/// Expand an ordered selector list against a name corpus.
///
/// Returns the matched names in corpus order, deduplicated. A selector that
/// matches nothing is almost always a naming typo; it is surfaced with a
/// warning but does not fail the expansion, because selector lists double as
/// allow-list filters (a feet-only collision config deliberately leaves most
/// geometries unmatched).
pub fn expand_patterns(
    patterns: &[String],
    names: &[String],
) -> Result<Vec<String>, PatternError> {
    // Compile everything up front so a bad selector fails before any
    // partial expansion is observable.
    let mut compiled = Vec::with_capacity(patterns.len());
    for pattern in patterns {
        compiled.push((pattern, compile_anchored(pattern)?));
    }

    let mut matched = vec![false; names.len()];
    for (pattern, re) in &compiled {
        let mut hits = 0usize;
        for (i, name) in names.iter().enumerate() {
            if re.is_match(name) {
                matched[i] = true;
                hits += 1;
            }
        }
        if hits == 0 {
            tracing::warn!(pattern = %pattern, "name pattern matched no entities");
        }
    }

    Ok(names
        .iter()
        .zip(&matched)
        .filter(|(_, &hit)| hit)
        .map(|(name, _)| name.clone())
        .collect())
}

// ---------------------------------------------------------------------------
// NameDirectory
// ---------------------------------------------------------------------------

/// Entity-name corpus for one articulated model.
///
/// Supplied by the simulation layer; every selector in the configuration is
/// resolved against one of these lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NameDirectory {
    pub joint_names: Vec<String>,
    pub body_names: Vec<String>,
    pub geom_names: Vec<String>,
}

impl NameDirectory {
    pub fn has_body(&self, name: &str) -> bool {
        self.body_names.iter().any(|b| b == name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    // -- PatternValue::resolve --

    #[test]
    fn scalar_maps_every_name() {
        let spec = PatternValue::scalar(2.5_f32);
        let resolved = spec.resolve(&names(&["a", "b", "c"])).unwrap();
        assert_eq!(resolved.len(), 3);
        for v in resolved.values() {
            assert!((v - 2.5).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn last_match_wins_on_overlap() {
        let spec = PatternValue::patterns([(".*", 1_i32), ("foot.*", 2)]);
        let resolved = spec.resolve(&names(&["foot_l", "hand_l"])).unwrap();
        assert_eq!(resolved["foot_l"], 2);
        assert_eq!(resolved["hand_l"], 1);
    }

    #[test]
    fn declaration_order_decides_not_specificity() {
        // Same rules, reversed order: the broad rule now wins everywhere.
        let spec = PatternValue::patterns([("foot.*", 2_i32), (".*", 1)]);
        let resolved = spec.resolve(&names(&["foot_l", "hand_l"])).unwrap();
        assert_eq!(resolved["foot_l"], 1);
        assert_eq!(resolved["hand_l"], 1);
    }

    #[test]
    fn unmatched_names_are_absent() {
        let spec = PatternValue::patterns([("left_.*", 1.0_f32)]);
        let resolved = spec.resolve(&names(&["left_knee", "right_knee"])).unwrap();
        assert_eq!(resolved.len(), 1);
        assert!(resolved.contains_key("left_knee"));
        assert!(!resolved.contains_key("right_knee"));
    }

    #[test]
    fn matching_is_anchored_not_substring() {
        let spec = PatternValue::patterns([("knee", 1.0_f32)]);
        let resolved = spec.resolve(&names(&["knee", "left_knee_pitch"])).unwrap();
        assert_eq!(resolved.len(), 1);
        assert!(resolved.contains_key("knee"));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let spec = PatternValue::patterns([("Knee.*", 1.0_f32)]);
        let resolved = spec.resolve(&names(&["knee_pitch"])).unwrap();
        assert!(resolved.is_empty());
    }

    #[test]
    fn resolve_is_idempotent() {
        let spec = PatternValue::patterns([(".*_joint", 1.0_f32), ("waist_joint", 2.0)]);
        let corpus = names(&["waist_joint", "left_hip_joint"]);
        let first = spec.resolve(&corpus).unwrap();
        let second = spec.resolve(&corpus).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn invalid_pattern_reports_syntax_error() {
        let spec = PatternValue::patterns([("[unclosed", 1.0_f32)]);
        let err = spec.resolve(&names(&["a"])).unwrap_err();
        let PatternError::Syntax { pattern, .. } = err;
        assert_eq!(pattern, "[unclosed");
    }

    #[test]
    fn empty_name_list_resolves_empty() {
        let spec = PatternValue::scalar(1.0_f32);
        assert!(spec.resolve(&[]).unwrap().is_empty());
    }

    #[test]
    fn values_iterates_all_declared() {
        let spec = PatternValue::patterns([("a", 1_i32), ("b", 2)]);
        let vs: Vec<i32> = spec.values().copied().collect();
        assert_eq!(vs, vec![1, 2]);

        let spec = PatternValue::scalar(7_i32);
        let vs: Vec<i32> = spec.values().copied().collect();
        assert_eq!(vs, vec![7]);
    }

    // -- expand_patterns --

    #[test]
    fn expansion_preserves_corpus_order() {
        let corpus = names(&["j1", "j2", "j3", "j4"]);
        let expanded =
            expand_patterns(&names(&["j3", "j1"]), &corpus).unwrap();
        assert_eq!(expanded, names(&["j1", "j3"]));
    }

    #[test]
    fn expansion_deduplicates_overlapping_selectors() {
        let corpus = names(&["left_knee", "right_knee"]);
        let expanded =
            expand_patterns(&names(&[".*_knee", "left_.*"]), &corpus).unwrap();
        assert_eq!(expanded, corpus);
    }

    #[test]
    fn expansion_with_no_matches_is_empty_not_error() {
        let corpus = names(&["left_knee"]);
        let expanded = expand_patterns(&names(&["arm_.*"]), &corpus).unwrap();
        assert!(expanded.is_empty());
    }

    #[test]
    fn expansion_rejects_bad_selector_before_matching() {
        let corpus = names(&["left_knee"]);
        let err = expand_patterns(&names(&["left_.*", "(bad"]), &corpus).unwrap_err();
        let PatternError::Syntax { pattern, .. } = err;
        assert_eq!(pattern, "(bad");
    }

    // -- NameDirectory --

    #[test]
    fn name_directory_body_lookup() {
        let dir = NameDirectory {
            joint_names: vec![],
            body_names: names(&["base_link", "terrain"]),
            geom_names: vec![],
        };
        assert!(dir.has_body("terrain"));
        assert!(!dir.has_body("torso_link"));
    }

    // -- serde --

    #[test]
    fn pattern_value_scalar_serde_roundtrip() {
        let spec = PatternValue::scalar(0.6_f32);
        let json = serde_json::to_string(&spec).unwrap();
        let back: PatternValue<f32> = serde_json::from_str(&json).unwrap();
        assert_eq!(spec, back);
    }

    #[test]
    fn pattern_value_patterns_serde_roundtrip() {
        let spec = PatternValue::patterns([(".*_collision", 1.0_f32), ("foot_.*", 3.0)]);
        let json = serde_json::to_string(&spec).unwrap();
        let back: PatternValue<f32> = serde_json::from_str(&json).unwrap();
        assert_eq!(spec, back);
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn pattern_types_are_send_sync() {
        assert_send_sync::<PatternValue<f32>>();
        assert_send_sync::<NameDirectory>();
    }
}
