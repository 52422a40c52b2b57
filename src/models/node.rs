//! Point features stored in the database.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{FeatureValueBuffer, GeoCoord, TypeId};

/// Shared handle to a node, as returned by queries
pub type NodeRef = Arc<Node>;

/// A typed point feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// OSM node ID
    id: i64,
    coord: GeoCoord,
    features: FeatureValueBuffer,
}

impl Node {
    pub fn new(id: i64, coord: GeoCoord, features: FeatureValueBuffer) -> Self {
        Self {
            id,
            coord,
            features,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn coord(&self) -> GeoCoord {
        self.coord
    }

    pub fn type_id(&self) -> TypeId {
        self.features.type_id()
    }

    pub fn feature_value_buffer(&self) -> &FeatureValueBuffer {
        &self.features
    }
}
