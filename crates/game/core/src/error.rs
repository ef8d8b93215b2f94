//! Common error infrastructure for island-core.
//!
//! Only construction-time mistakes surface as errors: a hand-authored layout
//! that breaks the island invariants, or a prompt trainer without prompts.
//! Runtime operations (generation, action application, lookups) never fail;
//! they degrade to a safe default instead. Domain errors live next to the code
//! that raises them (`LayoutError` in `island::manual`, `PromptError` in
//! `prompt`) and implement [`IslandError`].

/// Severity level of an error, used for categorization and logging.
///
/// Every current error is a caller mistake; new levels join when an
/// operation gains a failure the caller cannot fix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid content or configuration supplied by the caller.
    ///
    /// Examples: two layout nodes on the same cell, an empty prompt list
    Validation,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
        }
    }
}

/// Common trait for all island-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity by who has to fix it, not by impact
/// - Return a stable, SCREAMING_SNAKE_CASE code per variant
pub trait IslandError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_labels_are_stable() {
        assert_eq!(ErrorSeverity::Validation.as_str(), "validation");
    }
}
