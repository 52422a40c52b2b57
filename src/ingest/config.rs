use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use cairn::models::{TypeConfig, TypeDefinition};

/// Built-in type definitions
pub const DEFAULT_TYPES: &str = include_str!("default_types.toml");

/// Type definitions file, a list of `[[types]]` tables
#[derive(Debug, Deserialize, Clone)]
pub struct TypesFile {
    pub types: Vec<TypeDefinition>,
}

impl TypesFile {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read types file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse types file: {}", path.display()))
    }

    pub fn builtin() -> Result<Self> {
        Self::parse(DEFAULT_TYPES).context("Failed to parse built-in types")
    }

    pub fn parse(content: &str) -> Result<Self> {
        let file: TypesFile = toml::from_str(content)?;
        Ok(file)
    }

    pub fn into_type_config(self) -> Result<TypeConfig> {
        TypeConfig::new(self.types).context("Invalid type definitions")
    }
}
