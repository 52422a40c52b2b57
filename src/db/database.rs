//! Read-only database session.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use super::index::NodeSpatialIndex;
use super::storage::{self, DatabaseInfo};
use crate::error::{DbError, Result};
use crate::models::{Distance, GeoCoord, NodeRef, TypeConfig, TypeInfoSet};

/// Shared handle to the type configuration of an open database
pub type TypeConfigRef = Arc<TypeConfig>;

/// An open database directory
pub struct Database {
    path: PathBuf,
    info: DatabaseInfo,
    type_config: TypeConfigRef,
    index: NodeSpatialIndex,
}

impl Database {
    /// Open the database in `path`.
    ///
    /// Every failure is reported as [`DbError::OpenFailed`] with the
    /// underlying error as its source.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Self::load(path).map_err(|e| DbError::open_failed(path, e))
    }

    fn load(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            return Err(DbError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                "not a directory",
            )));
        }

        let info = storage::read_info(path)?;
        let type_config = storage::read_types(path)?;
        let nodes = storage::read_nodes(path)?;

        if nodes.len() != info.node_count {
            return Err(DbError::InvalidData(format!(
                "expected {} nodes, found {}",
                info.node_count,
                nodes.len()
            )));
        }
        for node in &nodes {
            storage::validate_node(&type_config, node)?;
        }

        let index = NodeSpatialIndex::build(nodes);

        info!(
            "Opened database {} ({} nodes, {} types)",
            path.display(),
            index.len(),
            type_config.types().len()
        );

        Ok(Self {
            path: path.to_path_buf(),
            info,
            type_config: Arc::new(type_config),
            index,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn info(&self) -> &DatabaseInfo {
        &self.info
    }

    pub fn type_config(&self) -> TypeConfigRef {
        Arc::clone(&self.type_config)
    }

    pub fn node_count(&self) -> usize {
        self.index.len()
    }

    /// All nodes of the given types within `radius` of `center`, nearest first
    pub fn load_nodes_in_radius(
        &self,
        center: GeoCoord,
        types: &TypeInfoSet,
        radius: Distance,
    ) -> NodeRegionSearchResult {
        let mut entries: Vec<NodeRegionSearchResultEntry> = self
            .index
            .within_radius(center, radius, |node| types.contains(node.type_id()))
            .into_iter()
            .map(|(node, distance)| NodeRegionSearchResultEntry { node, distance })
            .collect();

        entries.sort_by(|a, b| {
            a.distance
                .as_meters()
                .total_cmp(&b.distance.as_meters())
                .then_with(|| a.node.id().cmp(&b.node.id()))
        });

        debug!(
            "Found {} nodes of {} type(s) within {} of {}",
            entries.len(),
            types.len(),
            radius,
            center
        );

        NodeRegionSearchResult { entries }
    }

    /// Close the database, releasing the loaded nodes
    pub fn close(self) {
        debug!("Closing database {}", self.path.display());
    }
}

/// A node found by a region search
#[derive(Debug, Clone)]
pub struct NodeRegionSearchResultEntry {
    node: NodeRef,
    distance: Distance,
}

impl NodeRegionSearchResultEntry {
    pub fn new(node: NodeRef, distance: Distance) -> Self {
        Self { node, distance }
    }

    pub fn node(&self) -> &NodeRef {
        &self.node
    }

    /// Distance from the search center
    pub fn distance(&self) -> Distance {
        self.distance
    }
}

/// Result of a region search, nearest first
#[derive(Debug, Clone, Default)]
pub struct NodeRegionSearchResult {
    entries: Vec<NodeRegionSearchResultEntry>,
}

impl NodeRegionSearchResult {
    pub fn entries(&self) -> &[NodeRegionSearchResultEntry] {
        &self.entries
    }

    /// Take ownership of the entries
    pub fn into_node_results(self) -> Vec<NodeRegionSearchResultEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
