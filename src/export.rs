use serde_json::Value;
use std::path::Path;
use log::{ info, debug };

use crate::error::ExportError;
use crate::schema::SchemaNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingFormat {
    Compact,
    Pretty,
}

#[derive(Clone, Debug)]
pub struct MappingConfig {
    pub format: MappingFormat,
    /// Wrap the tree as `{"mappings": ...}`, the body of an index-creation request.
    pub envelope: bool,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            format: MappingFormat::Pretty,
            envelope: true,
        }
    }
}

pub fn get_mapping_format(format_str: &str) -> Result<MappingFormat, String> {
    match format_str.to_lowercase().as_str() {
        "compact" | "minified" => Ok(MappingFormat::Compact),
        "pretty" => Ok(MappingFormat::Pretty),
        _ => Err(format!("Unsupported mapping format: {}", format_str)),
    }
}

/// Renders a generated mapping as a JSON document.
pub fn to_mapping_json(
    schema: &SchemaNode,
    config: &MappingConfig
) -> Result<String, ExportError> {
    let mut document = serde_json::to_value(schema)?;
    if config.envelope {
        document = serde_json::json!({ "mappings": document });
    }
    debug!("Rendering mapping as {:?} JSON (envelope: {})", config.format, config.envelope);
    render(&document, config.format)
}

fn render(document: &Value, format: MappingFormat) -> Result<String, ExportError> {
    let text = match format {
        MappingFormat::Compact => serde_json::to_string(document)?,
        MappingFormat::Pretty => serde_json::to_string_pretty(document)?,
    };
    Ok(text)
}

/// Writes the mapping document to `output_path`, creating parent directories.
pub fn write_mapping_file(
    schema: &SchemaNode,
    output_path: &str,
    config: &MappingConfig
) -> Result<(), ExportError> {
    let text = to_mapping_json(schema, config)?;
    let io_error = |source| ExportError::Io {
        path: output_path.to_string(),
        source,
    };

    if let Some(parent) = Path::new(output_path).parent() {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }
    std::fs::write(output_path, text).map_err(io_error)?;

    let field_count = schema.children().map_or(0, |children| children.len());
    info!("Wrote mapping with {} top-level fields to {}", field_count, output_path);
    Ok(())
}
