//! Generator options. Every field has a default, so an empty JSON object (or
//! no config file at all) is a valid configuration.
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::codegen::DEFAULT_INDENT;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorOptions {
    /// Indentation unit for constraint clauses, statement bodies, and the
    /// class/namespace wrapper.
    pub indent: String,
    /// Appended to the enum name to form the extension class name.
    pub class_suffix: String,
    /// Register the opt-in attribute declaration alongside the generated files.
    pub emit_marker_attribute: bool,
    /// Prefix generated files with `#nullable enable`.
    pub nullable_enable: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT.to_string(),
            class_suffix: "Predicates".to_string(),
            emit_marker_attribute: true,
            nullable_enable: true,
        }
    }
}

impl GeneratorOptions {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let options: Self = crate::path_de::from_str_with_path(&source).map_err(|source| {
            ConfigError::Decode { path: path.to_path_buf(), source }
        })?;
        options.validate()?;
        tracing::debug!(path = %path.display(), ?options, "loaded generator options");
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.indent.chars().all(|c| c == ' ' || c == '\t') {
            return Err(ConfigError::Indent(self.indent.clone()));
        }
        if !self.class_suffix.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Err(ConfigError::ClassSuffix(self.class_suffix.clone()));
        }
        Ok(())
    }
}
