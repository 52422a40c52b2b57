//! Spatial index for fast radius lookups.

use std::sync::Arc;

use rstar::{RTree, RTreeObject, AABB};
use tracing::{debug, info};

use crate::models::{Distance, GeoCoord, Node, NodeRef};

/// Earth radius used by the haversine distance, in meters
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Slack added to search envelopes, in degrees
const ENVELOPE_MARGIN_DEG: f64 = 1e-7;

/// Wrapper for R-tree indexing of nodes
#[derive(Clone)]
pub struct IndexedNode {
    pub node: NodeRef,
    position: [f64; 2],
}

impl RTreeObject for IndexedNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

impl IndexedNode {
    pub fn new(node: Node) -> Self {
        let coord = node.coord();
        Self {
            node: Arc::new(node),
            position: [coord.lon, coord.lat],
        }
    }
}

/// Spatial index for nodes using R-tree, keyed by `[lon, lat]`
pub struct NodeSpatialIndex {
    tree: RTree<IndexedNode>,
}

impl NodeSpatialIndex {
    /// Build spatial index from nodes
    pub fn build(nodes: Vec<Node>) -> Self {
        info!("Building spatial index for {} nodes...", nodes.len());

        let indexed: Vec<IndexedNode> = nodes.into_iter().map(IndexedNode::new).collect();
        let tree = RTree::bulk_load(indexed);

        info!("Spatial index built with {} entries", tree.size());

        Self { tree }
    }

    /// All nodes accepted by `filter` within `radius` of `center`, with
    /// their distance, unordered
    pub fn within_radius<F>(
        &self,
        center: GeoCoord,
        radius: Distance,
        filter: F,
    ) -> Vec<(NodeRef, Distance)>
    where
        F: Fn(&Node) -> bool,
    {
        let envelopes = search_envelopes(center, radius);
        debug!(
            "Radius lookup at ({}, {}) within {}: {} envelope(s)",
            center.lat,
            center.lon,
            radius,
            envelopes.len()
        );

        let mut found = Vec::new();
        for envelope in &envelopes {
            for candidate in self.tree.locate_in_envelope(envelope) {
                if !filter(&candidate.node) {
                    continue;
                }
                let distance = center.distance_to(&candidate.node.coord());
                if distance <= radius {
                    found.push((Arc::clone(&candidate.node), distance));
                }
            }
        }
        found
    }

    /// Get total number of indexed nodes
    pub fn len(&self) -> usize {
        self.tree.size()
    }
}

/// Lon/lat envelopes covering the circle around `center`.
///
/// Two envelopes when the circle crosses the antimeridian, the full
/// longitude range when it reaches a pole.
fn search_envelopes(center: GeoCoord, radius: Distance) -> Vec<AABB<[f64; 2]>> {
    let angular = radius.as_meters().max(0.0) / EARTH_RADIUS_M;
    let dlat = angular.to_degrees() + ENVELOPE_MARGIN_DEG;

    let min_lat = (center.lat - dlat).max(-90.0);
    let max_lat = (center.lat + dlat).min(90.0);

    let full = || vec![AABB::from_corners([-180.0, min_lat], [180.0, max_lat])];

    if center.lat.abs() + dlat >= 90.0 {
        return full();
    }

    let ratio = angular.sin() / center.lat.to_radians().cos();
    if ratio >= 1.0 {
        return full();
    }
    let dlon = ratio.asin().to_degrees() + ENVELOPE_MARGIN_DEG;
    if dlon >= 180.0 {
        return full();
    }

    let min_lon = center.lon - dlon;
    let max_lon = center.lon + dlon;

    if min_lon < -180.0 {
        vec![
            AABB::from_corners([min_lon + 360.0, min_lat], [180.0, max_lat]),
            AABB::from_corners([-180.0, min_lat], [max_lon, max_lat]),
        ]
    } else if max_lon > 180.0 {
        vec![
            AABB::from_corners([min_lon, min_lat], [180.0, max_lat]),
            AABB::from_corners([-180.0, min_lat], [max_lon - 360.0, max_lat]),
        ]
    } else {
        vec![AABB::from_corners([min_lon, min_lat], [max_lon, max_lat])]
    }
}
