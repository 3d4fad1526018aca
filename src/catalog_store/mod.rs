mod models;
mod schema;
mod store;

pub use models::{ChildEntry, NamespacePath, NodeKind, PLAYLISTS_NAMESPACE};
pub use schema::NAMESPACE_VERSIONED_SCHEMAS;
pub use store::{ReadTxn, SqliteNamespaceStore, WriteTxn, DEFAULT_READ_POOL_SIZE};
