//! SQLite schema for the hierarchical namespace store.
//!
//! Every key is a row in `nodes`. Rows with a NULL `value` are namespaces,
//! rows with a value are leaves. Row 1 is the root namespace.

use crate::sqlite_column;
use crate::sqlite_persistence::{
    Column, ForeignKey, ForeignKeyOnChange, SqlType, Table, VersionedSchema,
};

pub const ROOT_NODE_ID: i64 = 1;

const NODES_TABLE: Table = Table {
    name: "nodes",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "parent_id",
            &SqlType::Integer,
            foreign_key = Some(&ForeignKey {
                foreign_table: "nodes",
                foreign_column: "id",
                on_delete: ForeignKeyOnChange::Cascade,
            })
        ),
        sqlite_column!("key", &SqlType::Text, non_null = true),
        sqlite_column!("value", &SqlType::Text),
    ],
    indices: &[("idx_nodes_parent", "parent_id")],
    unique_constraints: &[&["parent_id", "key"]],
};

pub const NAMESPACE_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[NODES_TABLE],
    seed: Some("INSERT INTO nodes (id, parent_id, key, value) VALUES (1, NULL, '', NULL);"),
}];
