//! Writes database directories.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::info;

use super::storage::{self, DatabaseInfo, FORMAT_VERSION};
use crate::error::Result;
use crate::models::{FeatureValueBuffer, GeoCoord, Node, TypeConfig};

/// Collects nodes and writes them as a database directory on [`finish`](Self::finish)
pub struct DatabaseWriter {
    dir: PathBuf,
    type_config: TypeConfig,
    nodes: Vec<Node>,
}

impl DatabaseWriter {
    /// Prepare a writer, creating `dir` if needed
    pub fn create(dir: impl AsRef<Path>, type_config: TypeConfig) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;

        Ok(Self {
            dir,
            type_config,
            nodes: Vec::new(),
        })
    }

    pub fn type_config(&self) -> &TypeConfig {
        &self.type_config
    }

    /// Add a node. The buffer decides the node's type.
    pub fn add_node(&mut self, id: i64, coord: GeoCoord, features: FeatureValueBuffer) -> Result<()> {
        let node = Node::new(id, coord, features);
        storage::validate_node(&self.type_config, &node)?;
        self.nodes.push(node);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Write all files and return the metadata written
    pub fn finish(mut self, source: Option<&str>) -> Result<DatabaseInfo> {
        self.nodes.sort_by_key(|n| n.id());

        storage::write_nodes(&self.dir, &self.nodes)?;
        storage::write_types(&self.dir, &self.type_config)?;

        let info = DatabaseInfo {
            format_version: FORMAT_VERSION,
            created: Utc::now(),
            source: source.map(str::to_string),
            node_count: self.nodes.len(),
        };
        storage::write_info(&self.dir, &info)?;

        info!(
            "Wrote database with {} nodes and {} types to {}",
            info.node_count,
            self.type_config.types().len(),
            self.dir.display()
        );

        Ok(info)
    }
}
