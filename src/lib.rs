// Library interface for FitPlan modules
// The engine is a pure function from a profile to a plan; the remaining
// modules are the CLI's configuration, logging, vocabulary and export layers.

pub mod config;
pub mod constraints;
pub mod error;
pub mod exercises;
pub mod export;
pub mod logging;
pub mod metabolic;
pub mod models;
pub mod periodization;
pub mod planner;
pub mod split;
pub mod trimmer;
pub mod vocabulary;

// Re-export commonly used types for convenience
pub use models::*;
pub use config::{AppConfig, PlannerConfig};
pub use constraints::Capabilities;
pub use error::{FitPlanError, ProfileError, ConfigError, Result};
pub use exercises::ExercisePoolBuilder;
pub use logging::{LogConfig, LogLevel, LogFormat};
pub use metabolic::{BmiCategory, BmiReading, MetabolicCalculator, ProfileEstimate};
pub use periodization::{PeriodizationScheduler, SetScheme};
pub use planner::PlanGenerator;
pub use split::{Split, SplitSelector};
pub use trimmer::TimeTrimmer;
pub use vocabulary::{Catalog, Localizer};
