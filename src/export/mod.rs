use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::models::Plan;
use crate::vocabulary::Localizer;

pub mod json;
pub mod text;

/// Export format types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Text,
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "text" | "txt" => Ok(ExportFormat::Text),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Export errors
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Formatting error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

/// Render a plan in memory
pub fn render_plan(plan: &Plan, format: ExportFormat, localizer: &dyn Localizer) -> Result<String, ExportError> {
    match format {
        ExportFormat::Json => json::to_json_string(plan),
        ExportFormat::Text => text::render_plan(plan, localizer),
    }
}

/// Write a plan to `output_path` in the requested format
pub fn export_plan<P: AsRef<Path>>(
    plan: &Plan,
    format: ExportFormat,
    localizer: &dyn Localizer,
    output_path: P,
) -> Result<(), ExportError> {
    tracing::debug!(?format, path = %output_path.as_ref().display(), "Exporting plan");

    match format {
        ExportFormat::Json => json::export_plan(plan, output_path),
        ExportFormat::Text => text::export_plan(plan, localizer, output_path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("txt".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert!(matches!(
            "pdf".parse::<ExportFormat>(),
            Err(ExportError::UnsupportedFormat(ref f)) if f == "pdf"
        ));
    }
}
