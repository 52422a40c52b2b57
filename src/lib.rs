//! Cairn - a small read-only geospatial node database.
//!
//! This library provides the storage, spatial index and typed feature access
//! shared by the `ingest` and `peaks` binaries.

pub mod db;
pub mod error;
pub mod models;

pub use db::{Database, DatabaseInfo, DatabaseWriter, NodeRegionSearchResult};
pub use error::{DbError, ParseCoordError, Result};
pub use models::{
    Distance, EleFeatureValueReader, GeoCoord, NameFeatureValueReader, Node, TypeConfig,
    TypeInfoSet,
};
