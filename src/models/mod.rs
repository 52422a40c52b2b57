//! Core data models for the node database.

pub mod coord;
pub mod feature;
pub mod node;
pub mod types;

pub use coord::{Distance, GeoCoord};
pub use feature::{
    EleFeatureValue, EleFeatureValueReader, Feature, FeatureValue, FeatureValueBuffer,
    FeatureValueReader, NameFeatureValue, NameFeatureValueReader,
};
pub use node::{Node, NodeRef};
pub use types::{TagCondition, TypeConfig, TypeDefinition, TypeId, TypeInfo, TypeInfoSet};
