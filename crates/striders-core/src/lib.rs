// striders-core: Errors, pattern-keyed values, and name directory for the
// Striders robot configuration workspace.

pub mod error;
pub mod pattern;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::error::{PatternError, RegistryError, SpecError, StridersError};
    pub use crate::pattern::{expand_patterns, NameDirectory, PatternValue};
}
