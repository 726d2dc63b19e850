//! Unified error hierarchy for FitPlan
//!
//! Plan generation itself is infallible for well-formed input. Errors come
//! from the edges: profile validation before generation, configuration
//! loading and validation, and document export.

use thiserror::Error;

/// Top-level error type for all FitPlan operations
#[derive(Debug, Error)]
pub enum FitPlanError {
    /// Profile rejected before generation
    #[error("Invalid profile: {0}")]
    Profile(#[from] ProfileError),

    /// Planner configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Plan export errors
    #[error("Export error: {0}")]
    Export(#[from] crate::export::ExportError),
}

/// Profile validation errors, reported to the caller before invocation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    /// Weight, height or age is zero or negative
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: String, value: String },

    /// Session length outside the supported set
    #[error("Unsupported session length: {0} min (expected 30, 45, 60, 75 or 90)")]
    InvalidSessionLength(u32),
}

/// Planner configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The split table has no entry for the fallback day count
    #[error("Split table has no entry for the fallback day count {days}")]
    MissingSplit { days: u8 },

    /// A multiplier or factor is zero or negative
    #[error("Invalid multiplier {name}={value}")]
    InvalidMultiplier { name: String, value: String },

    /// The periodization cycle does not have the expected number of weeks
    #[error("Periodization cycle must have {expected} weeks, found {found}")]
    CycleLength { expected: usize, found: usize },

    /// Session caps are empty or not sorted by minutes
    #[error("Invalid session caps: {reason}")]
    SessionCaps { reason: String },

    /// TOML parsing failed
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type alias for FitPlan operations
pub type Result<T> = std::result::Result<T, FitPlanError>;

impl FitPlanError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FitPlanError::Profile(_) => ErrorSeverity::Warning,
            FitPlanError::Config(_) | FitPlanError::Export(_) => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            FitPlanError::Profile(ProfileError::NonPositive { field, .. }) => {
                format!("Please enter a positive value for {}.", field.replace('_', " "))
            }
            FitPlanError::Profile(ProfileError::InvalidSessionLength(minutes)) => {
                format!(
                    "A {} minute session is not supported. Choose 30, 45, 60, 75 or 90 minutes.",
                    minutes
                )
            }
            FitPlanError::Config(ConfigError::Parse(_)) => {
                "The configuration file could not be read. Please check its TOML syntax.".to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Error that prevents the operation
    Error,
    /// Rejected input the user can correct
    Warning,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_severity() {
        let err = FitPlanError::Profile(ProfileError::InvalidSessionLength(50));
        assert_eq!(err.severity(), ErrorSeverity::Warning);

        let err = FitPlanError::Config(ConfigError::MissingSplit { days: 2 });
        assert_eq!(err.severity(), ErrorSeverity::Error);

        let err: FitPlanError = crate::export::ExportError::UnsupportedFormat("xml".to_string()).into();
        assert_eq!(err.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_user_messages() {
        let err: FitPlanError = ProfileError::NonPositive {
            field: "weight_kg".to_string(),
            value: "-3".to_string(),
        }
        .into();
        assert!(err.user_message().contains("weight kg"));

        let err: FitPlanError = ProfileError::InvalidSessionLength(20).into();
        assert!(err.user_message().contains("20 minute"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::CycleLength { expected: 4, found: 3 };
        assert_eq!(err.to_string(), "Periodization cycle must have 4 weeks, found 3");
    }
}
