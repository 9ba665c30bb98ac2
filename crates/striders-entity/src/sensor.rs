//! Contact sensor configuration.
//!
//! A contact sensor reports interactions between two attachment sites: a
//! body (or a body's whole subtree) against another body, subtree, or
//! anything. The entity resolver checks that every referenced body exists
//! before the spec is handed to the simulation layer.

use serde::{Deserialize, Serialize};

use striders_core::error::SpecError;
use striders_core::pattern::NameDirectory;

// ---------------------------------------------------------------------------
// SensorSite
// ---------------------------------------------------------------------------

/// Attachment site for one side of a contact sensor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorSite {
    /// A single named body.
    Body(String),
    /// A named body and all of its descendants.
    Subtree(String),
}

impl SensorSite {
    /// The body name this site is anchored to.
    pub fn body_name(&self) -> &str {
        match self {
            Self::Body(name) | Self::Subtree(name) => name,
        }
    }
}

// ---------------------------------------------------------------------------
// ContactData / ReduceMode
// ---------------------------------------------------------------------------

/// Which contact quantities the sensor reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactData {
    /// Number of contacts found.
    Found,
    /// Contact force.
    Force,
    /// Contact torque.
    Torque,
    /// Penetration distance.
    Dist,
}

/// How multiple simultaneous contacts reduce to one reading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReduceMode {
    /// Report contacts individually, up to `max_contacts`.
    #[default]
    None,
    /// Keep the contact with the smallest distance.
    MinDist,
    /// Keep the contact with the largest force.
    MaxForce,
    /// Sum forces over all contacts.
    NetForce,
}

// ---------------------------------------------------------------------------
// ContactSensorCfg
// ---------------------------------------------------------------------------

/// Configuration for one contact sensor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContactSensorCfg {
    /// Sensor name, unique within the entity.
    pub name: String,
    pub primary: SensorSite,
    /// Second participant; `None` senses contact with anything.
    pub secondary: Option<SensorSite>,
    /// Maximum number of contacts reported.
    pub max_contacts: u32,
    pub data: Vec<ContactData>,
    pub reduce: ReduceMode,
}

impl ContactSensorCfg {
    /// Foot-style sensor: one body against another, net force, single slot.
    pub fn body_pair(
        name: impl Into<String>,
        primary: impl Into<String>,
        secondary: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            primary: SensorSite::Body(primary.into()),
            secondary: Some(SensorSite::Body(secondary.into())),
            max_contacts: 1,
            data: vec![ContactData::Found],
            reduce: ReduceMode::NetForce,
        }
    }

    /// Self-collision sensor over one subtree, reporting up to `max_contacts`.
    pub fn subtree_self(name: impl Into<String>, root: impl Into<String>, max_contacts: u32) -> Self {
        let root = root.into();
        Self {
            name: name.into(),
            primary: SensorSite::Subtree(root.clone()),
            secondary: Some(SensorSite::Subtree(root)),
            max_contacts,
            data: vec![ContactData::Found],
            reduce: ReduceMode::NetForce,
        }
    }

    /// Check that every referenced body exists in the directory.
    pub fn validate(&self, dir: &NameDirectory) -> Result<(), SpecError> {
        let mut sites = vec![&self.primary];
        if let Some(secondary) = &self.secondary {
            sites.push(secondary);
        }
        for site in sites {
            if !dir.has_body(site.body_name()) {
                return Err(SpecError::UnknownBody {
                    sensor: self.name.clone(),
                    body: site.body_name().to_string(),
                });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
