//! Database directory access: storage, spatial index and queries.

mod database;
mod index;
mod storage;
mod writer;

pub use database::{
    Database, NodeRegionSearchResult, NodeRegionSearchResultEntry, TypeConfigRef,
};
pub use storage::{DatabaseInfo, FORMAT_VERSION, INFO_FILE, NODES_FILE, TYPES_FILE};
pub use writer::DatabaseWriter;
