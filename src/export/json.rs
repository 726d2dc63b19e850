use super::ExportError;
use crate::models::Plan;
use std::io::Write;
use std::path::Path;

/// Pretty-printed JSON for a plan
pub fn to_json_string(plan: &Plan) -> Result<String, ExportError> {
    serde_json::to_string_pretty(plan).map_err(|e| ExportError::SerializationError(e.to_string()))
}

/// Export a plan to JSON format
pub fn export_plan<P: AsRef<Path>>(plan: &Plan, output_path: P) -> Result<(), ExportError> {
    let json_data = to_json_string(plan)?;

    let mut file = std::fs::File::create(output_path)?;
    file.write_all(json_data.as_bytes())?;

    Ok(())
}
