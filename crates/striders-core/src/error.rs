use thiserror::Error;

/// Top-level error type for the Striders workspace.
#[derive(Debug, Error)]
pub enum StridersError {
    #[error("Pattern error: {0}")]
    Pattern(#[from] PatternError),

    #[error("Spec error: {0}")]
    Spec(#[from] SpecError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Name-selector errors.
///
/// Raised at resolution time, never deferred: a malformed selector is a
/// configuration bug, not a runtime condition.
#[derive(Debug, Error)]
pub enum PatternError {
    /// The selector failed to compile as a regular expression.
    #[error("invalid name pattern `{pattern}`: {source}")]
    Syntax {
        pattern: String,
        source: regex::Error,
    },
}

/// Configuration-spec errors.
///
/// All inputs here are static configuration, so every failure is
/// deterministic and reproducible; the remedy is fixing the config, never
/// retrying.
#[derive(Debug, Error)]
pub enum SpecError {
    /// A physical or derivation input that must be strictly positive.
    #[error("invalid {field}: {value} (must be > 0)")]
    NonPositive { field: &'static str, value: f32 },

    /// Two actuator groups resolved to the same joint.
    #[error("joint `{joint}` is claimed by actuator groups `{first}` and `{second}`")]
    OverlappingJoint {
        joint: String,
        first: String,
        second: String,
    },

    /// Contact dimensionality outside the supported set.
    #[error("invalid condim {0} (must be 1, 3, 4, or 6)")]
    InvalidCondim(u8),

    /// A sensor referenced a body that is not in the name directory.
    #[error("unknown body `{body}` referenced by sensor `{sensor}`")]
    UnknownBody { sensor: String, body: String },

    /// A value outside its documented domain.
    #[error("invalid value for {field}: {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },
}

/// Task-registry errors.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("task `{0}` is already registered")]
    DuplicateTask(String),

    #[error("unknown task: {0}")]
    UnknownTask(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
