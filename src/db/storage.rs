//! On-disk layout of a database directory.
//!
//! - `info.json`: [`DatabaseInfo`], written last so its presence marks a
//!   complete database
//! - `types.json`: type definitions in id order
//! - `nodes.dat`: gzip compressed bincode of all nodes

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};

use crate::error::{DbError, Result};
use crate::models::{Node, TypeConfig, TypeDefinition};

pub const FORMAT_VERSION: u32 = 1;

pub const INFO_FILE: &str = "info.json";
pub const TYPES_FILE: &str = "types.json";
pub const NODES_FILE: &str = "nodes.dat";

/// Metadata describing a database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseInfo {
    pub format_version: u32,

    /// Time the database was written
    pub created: DateTime<Utc>,

    /// Source file the database was imported from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    pub node_count: usize,
}

pub(crate) fn read_info(dir: &Path) -> Result<DatabaseInfo> {
    let file = File::open(dir.join(INFO_FILE))?;
    let info: DatabaseInfo = serde_json::from_reader(BufReader::new(file))?;
    if info.format_version != FORMAT_VERSION {
        return Err(DbError::InvalidData(format!(
            "unsupported format version {} (expected {})",
            info.format_version, FORMAT_VERSION
        )));
    }
    Ok(info)
}

pub(crate) fn write_info(dir: &Path, info: &DatabaseInfo) -> Result<()> {
    let mut writer = BufWriter::new(File::create(dir.join(INFO_FILE))?);
    serde_json::to_writer_pretty(&mut writer, info)?;
    writer.flush()?;
    Ok(())
}

pub(crate) fn read_types(dir: &Path) -> Result<TypeConfig> {
    let file = File::open(dir.join(TYPES_FILE))?;
    let definitions: Vec<TypeDefinition> = serde_json::from_reader(BufReader::new(file))?;
    TypeConfig::new(definitions)
}

pub(crate) fn write_types(dir: &Path, type_config: &TypeConfig) -> Result<()> {
    let mut writer = BufWriter::new(File::create(dir.join(TYPES_FILE))?);
    serde_json::to_writer_pretty(&mut writer, &type_config.definitions())?;
    writer.flush()?;
    Ok(())
}

pub(crate) fn read_nodes(dir: &Path) -> Result<Vec<Node>> {
    let file = File::open(dir.join(NODES_FILE))?;
    let decoder = GzDecoder::new(BufReader::new(file));
    let nodes: Vec<Node> = bincode::deserialize_from(decoder)?;
    Ok(nodes)
}

pub(crate) fn write_nodes(dir: &Path, nodes: &[Node]) -> Result<()> {
    let file = File::create(dir.join(NODES_FILE))?;
    let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
    bincode::serialize_into(&mut encoder, nodes)?;
    encoder.finish()?.flush()?;
    Ok(())
}

/// Check a node against the type configuration
pub(crate) fn validate_node(type_config: &TypeConfig, node: &Node) -> Result<()> {
    if !node.coord().is_valid() {
        return Err(DbError::InvalidData(format!(
            "node {} has an invalid coordinate ({}, {})",
            node.id(),
            node.coord().lat,
            node.coord().lon
        )));
    }

    let type_info = type_config.type_by_id(node.type_id()).ok_or_else(|| {
        DbError::InvalidData(format!(
            "node {} has unknown type id {}",
            node.id(),
            node.type_id().0
        ))
    })?;

    let buffer = node.feature_value_buffer();
    if buffer.slot_count() != type_info.features.len() {
        return Err(DbError::InvalidData(format!(
            "node {} has {} feature slots, type '{}' has {}",
            node.id(),
            buffer.slot_count(),
            type_info.name,
            type_info.features.len()
        )));
    }

    for (index, feature) in type_info.features.iter().enumerate() {
        if let Some(value) = buffer.value_at(index) {
            if value.feature() != *feature {
                return Err(DbError::InvalidData(format!(
                    "node {} stores {:?} in the {:?} slot",
                    node.id(),
                    value.feature(),
                    feature
                )));
            }
        }
    }

    Ok(())
}
