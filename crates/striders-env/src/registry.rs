//! Explicit task registry.
//!
//! Maps task ids to their configuration cascades. Built once at process
//! start and passed to whatever consumes it; never a global, never an
//! import-time side effect. Lookups finalize the cascade on demand, so
//! every caller gets a fresh configuration value.

use std::collections::HashMap;
use std::sync::Arc;

use striders_core::error::RegistryError;

use crate::cascade::CfgStage;
use crate::config::{LocomotionEnvCfg, RlRunnerCfg};

// ---------------------------------------------------------------------------
// TaskEntry
// ---------------------------------------------------------------------------

/// Environment and training-runner cascades for one task id.
#[derive(Clone)]
pub struct TaskEntry {
    pub env: Arc<CfgStage<LocomotionEnvCfg>>,
    pub rl: Arc<CfgStage<RlRunnerCfg>>,
}

// ---------------------------------------------------------------------------
// TaskRegistry
// ---------------------------------------------------------------------------

/// Registry of task configurations, keyed by task id.
#[derive(Default)]
pub struct TaskRegistry {
    entries: HashMap<String, TaskEntry>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task. A duplicate id is a configuration bug and is
    /// rejected rather than silently replaced.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        entry: TaskEntry,
    ) -> Result<(), RegistryError> {
        let id = id.into();
        if self.entries.contains_key(&id) {
            return Err(RegistryError::DuplicateTask(id));
        }
        self.entries.insert(id, entry);
        Ok(())
    }

    /// Finalize and return the environment configuration for a task.
    pub fn env_cfg(&self, id: &str) -> Result<LocomotionEnvCfg, RegistryError> {
        self.entry(id).map(|e| e.env.finalize())
    }

    /// Finalize and return the training-runner configuration for a task.
    pub fn rl_cfg(&self, id: &str) -> Result<RlRunnerCfg, RegistryError> {
        self.entry(id).map(|e| e.rl.finalize())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// All registered ids, sorted for stable listings.
    pub fn task_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, id: &str) -> Result<&TaskEntry, RegistryError> {
        self.entries
            .get(id)
            .ok_or_else(|| RegistryError::UnknownTask(id.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
