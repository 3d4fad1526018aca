//! SQLite-backed hierarchical namespace store.
//!
//! This module provides the `SqliteNamespaceStore`, an ordered transactional
//! key-value store where keys nest into namespaces. Reads run on a small pool
//! of read-only connections, writes are serialized on a single connection.

use super::models::{ChildEntry, NamespacePath, NodeKind};
use super::schema::{NAMESPACE_VERSIONED_SCHEMAS, ROOT_NODE_ID};
use crate::error::{PlaylistError, Result};
use crate::sqlite_persistence::BASE_DB_VERSION;
use rusqlite::{params, Connection, OpenFlags, Transaction, TransactionBehavior};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info};

pub const DEFAULT_READ_POOL_SIZE: usize = 4;

/// SQLite-backed namespace store.
///
/// Cloning is cheap and clones share the same connections.
#[derive(Clone)]
pub struct SqliteNamespaceStore {
    read_pool: Vec<Arc<Mutex<Connection>>>,
    write_conn: Arc<Mutex<Connection>>,
    read_index: Arc<AtomicUsize>,
    db_path: PathBuf,
}

fn migrate_if_needed(conn: &mut Connection) -> Result<()> {
    let db_version: i64 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;

    let latest_version = NAMESPACE_VERSIONED_SCHEMAS.len() - 1;
    let latest_schema = &NAMESPACE_VERSIONED_SCHEMAS[latest_version];

    let table_count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |r| r.get(0),
    )?;

    if table_count == 0 {
        info!("Creating namespace db schema at version {}", latest_version);
        let tx = conn.transaction()?;
        latest_schema.create(&tx)?;
        tx.commit()?;
        return Ok(());
    }

    if db_version < BASE_DB_VERSION as i64 {
        return Err(PlaylistError::SchemaMismatch(format!(
            "database has no namespace schema (user_version {})",
            db_version
        )));
    }
    let current_version = (db_version - BASE_DB_VERSION as i64) as usize;
    if current_version > latest_version {
        return Err(PlaylistError::SchemaMismatch(format!(
            "database schema version {} is newer than supported version {}",
            current_version, latest_version
        )));
    }
    if current_version < latest_version {
        // Only one schema version exists so far, nothing to migrate from.
        return Err(PlaylistError::SchemaMismatch(format!(
            "no migration from schema version {} to {}",
            current_version, latest_version
        )));
    }

    latest_schema.validate(conn)
}

impl SqliteNamespaceStore {
    /// Open (or create) the store at `db_path`.
    ///
    /// # Arguments
    /// * `db_path` - Path to the SQLite database file, its directory must exist
    /// * `read_pool_size` - Number of connections for concurrent read transactions
    pub fn open<P: AsRef<Path>>(db_path: P, read_pool_size: usize) -> Result<Self> {
        let db_path = db_path.as_ref();

        let mut write_conn = Connection::open_with_flags(
            db_path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        let _journal_mode: String =
            write_conn.pragma_update_and_check(None, "journal_mode", "WAL", |r| r.get(0))?;
        write_conn.pragma_update(None, "foreign_keys", true)?;

        migrate_if_needed(&mut write_conn)?;

        let namespace_count: i64 =
            write_conn.query_row("SELECT COUNT(*) FROM nodes WHERE value IS NULL", [], |r| {
                r.get(0)
            })?;
        info!(
            "Opened namespace store at {:?}: {} namespaces",
            db_path,
            // The root row is not a user-visible namespace
            namespace_count - 1
        );

        let read_pool_size = read_pool_size.max(1);
        let mut read_pool = Vec::with_capacity(read_pool_size);
        for _ in 0..read_pool_size {
            let read_conn = Connection::open_with_flags(
                db_path,
                OpenFlags::SQLITE_OPEN_READ_ONLY
                    | OpenFlags::SQLITE_OPEN_URI
                    | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )?;
            read_pool.push(Arc::new(Mutex::new(read_conn)));
        }

        Ok(SqliteNamespaceStore {
            read_pool,
            write_conn: Arc::new(Mutex::new(write_conn)),
            read_index: Arc::new(AtomicUsize::new(0)),
            db_path: db_path.to_path_buf(),
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn get_read_conn(&self) -> Arc<Mutex<Connection>> {
        let index = self.read_index.fetch_add(1, Ordering::SeqCst) % self.read_pool.len();
        self.read_pool[index].clone()
    }

    /// Run `f` inside a read-only transaction.
    ///
    /// All reads made through the handle observe the same snapshot. The
    /// transaction is always rolled back, the handle cannot outlive `f`.
    pub fn view<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&ReadTxn<'_>) -> Result<T>,
    {
        let conn = self.get_read_conn();
        // A poisoned lock only means another reader panicked, its
        // transaction was rolled back when dropped.
        let mut guard = conn.lock().unwrap_or_else(PoisonError::into_inner);
        let tx = guard.transaction_with_behavior(TransactionBehavior::Deferred)?;
        let txn = ReadTxn { tx };
        f(&txn)
    }

    /// Run `f` inside a read-write transaction.
    ///
    /// The transaction commits only if `f` returns `Ok`, otherwise nothing
    /// `f` wrote becomes visible.
    pub fn update<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&WriteTxn<'_>) -> Result<T>,
    {
        let mut guard = self
            .write_conn
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let tx = guard.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let txn = WriteTxn {
            inner: ReadTxn { tx },
        };
        let value = f(&txn)?;
        txn.commit()?;
        Ok(value)
    }

    // =========================================================================
    // Single-shot operations, each in its own transaction
    // =========================================================================

    pub fn list_children(&self, path: &NamespacePath) -> Result<Option<Vec<ChildEntry>>> {
        self.view(|tx| tx.list_children(path))
    }

    pub fn get_leaf_value(&self, path: &NamespacePath) -> Result<Option<String>> {
        self.view(|tx| tx.get_leaf_value(path))
    }

    pub fn set_leaf_value(&self, path: &NamespacePath, value: &str) -> Result<()> {
        self.update(|tx| tx.set_leaf_value(path, value))
    }

    pub fn create_namespace(&self, path: &NamespacePath) -> Result<bool> {
        self.update(|tx| tx.create_namespace(path))
    }

    pub fn remove(&self, path: &NamespacePath) -> Result<bool> {
        self.update(|tx| tx.remove(path))
    }
}

// =============================================================================
// Transaction handles
// =============================================================================

/// Read handle bound to one snapshot.
pub struct ReadTxn<'conn> {
    tx: Transaction<'conn>,
}

/// Read-write handle, every read method of `ReadTxn` is available through `Deref`.
pub struct WriteTxn<'conn> {
    inner: ReadTxn<'conn>,
}

impl<'conn> Deref for WriteTxn<'conn> {
    type Target = ReadTxn<'conn>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

struct Node {
    id: i64,
    value: Option<String>,
}

impl Node {
    fn is_namespace(&self) -> bool {
        self.value.is_none()
    }
}

const ROOT_NODE: Node = Node {
    id: ROOT_NODE_ID,
    value: None,
};

fn type_conflict(path: &NamespacePath) -> PlaylistError {
    PlaylistError::TypeConflict {
        path: path.to_string(),
    }
}

impl ReadTxn<'_> {
    fn conn(&self) -> &Connection {
        &self.tx
    }

    fn find_child(&self, parent_id: i64, key: &str) -> Result<Option<Node>> {
        match self.conn().query_row(
            "SELECT id, value FROM nodes WHERE parent_id = ?1 AND key = ?2",
            params![parent_id, key],
            |r| {
                Ok(Node {
                    id: r.get(0)?,
                    value: r.get(1)?,
                })
            },
        ) {
            Ok(node) => Ok(Some(node)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Walk `path` and return the id of the namespace it names.
    ///
    /// `None` if any level is missing, `TypeConflict` if any level is a leaf.
    fn resolve_namespace(&self, path: &NamespacePath) -> Result<Option<i64>> {
        let mut current = ROOT_NODE_ID;
        for (depth, key) in path.segments().iter().enumerate() {
            match self.find_child(current, key)? {
                Some(node) if node.is_namespace() => current = node.id,
                Some(_) => return Err(type_conflict(&path.prefix(depth + 1))),
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }

    fn resolve_node(&self, path: &NamespacePath) -> Result<Option<Node>> {
        let Some((parent, key)) = path.split_last() else {
            return Ok(Some(ROOT_NODE));
        };
        match self.resolve_namespace(&parent)? {
            Some(parent_id) => self.find_child(parent_id, key),
            None => Ok(None),
        }
    }

    /// Immediate children of the namespace at `path`, in key order.
    ///
    /// `None` if the namespace does not exist.
    pub fn list_children(&self, path: &NamespacePath) -> Result<Option<Vec<ChildEntry>>> {
        let node = match self.resolve_node(path)? {
            Some(node) if node.is_namespace() => node,
            Some(_) => return Err(type_conflict(path)),
            None => return Ok(None),
        };

        let mut stmt = self
            .conn()
            .prepare_cached("SELECT key, value FROM nodes WHERE parent_id = ?1 ORDER BY key")?;
        let children = stmt
            .query_map(params![node.id], |r| {
                let value: Option<String> = r.get(1)?;
                Ok(ChildEntry {
                    key: r.get(0)?,
                    kind: if value.is_none() {
                        NodeKind::Namespace
                    } else {
                        NodeKind::Leaf
                    },
                    value,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!("Listed {} children of {}", children.len(), path);
        Ok(Some(children))
    }

    /// Value stored at `path`, `None` if no such key exists.
    pub fn get_leaf_value(&self, path: &NamespacePath) -> Result<Option<String>> {
        match self.resolve_node(path)? {
            Some(Node { value: Some(value), .. }) => Ok(Some(value)),
            Some(_) => Err(type_conflict(path)),
            None => Ok(None),
        }
    }

    /// Whether `path` exists as a namespace.
    pub fn namespace_exists(&self, path: &NamespacePath) -> Result<bool> {
        match self.resolve_node(path)? {
            Some(node) if node.is_namespace() => Ok(true),
            Some(_) => Err(type_conflict(path)),
            None => Ok(false),
        }
    }
}

impl WriteTxn<'_> {
    fn commit(self) -> Result<()> {
        self.inner.tx.commit()?;
        Ok(())
    }

    /// Create or overwrite the leaf at `path`. The parent namespace must exist.
    pub fn set_leaf_value(&self, path: &NamespacePath, value: &str) -> Result<()> {
        let Some((parent, key)) = path.split_last() else {
            return Err(type_conflict(path));
        };
        let parent_id = self
            .resolve_namespace(&parent)?
            .ok_or_else(|| PlaylistError::NamespaceNotFound {
                path: parent.to_string(),
            })?;

        match self.find_child(parent_id, key)? {
            Some(node) if node.is_namespace() => Err(type_conflict(path)),
            Some(node) => {
                self.conn().execute(
                    "UPDATE nodes SET value = ?1 WHERE id = ?2",
                    params![value, node.id],
                )?;
                Ok(())
            }
            None => {
                self.conn().execute(
                    "INSERT INTO nodes (parent_id, key, value) VALUES (?1, ?2, ?3)",
                    params![parent_id, key, value],
                )?;
                Ok(())
            }
        }
    }

    /// Ensure every level of `path` exists as a namespace.
    ///
    /// Returns `true` if the last level was created by this call.
    pub fn create_namespace(&self, path: &NamespacePath) -> Result<bool> {
        let mut current = ROOT_NODE_ID;
        let mut created = false;
        for (depth, key) in path.segments().iter().enumerate() {
            match self.find_child(current, key)? {
                Some(node) if node.is_namespace() => {
                    current = node.id;
                    created = false;
                }
                Some(_) => return Err(type_conflict(&path.prefix(depth + 1))),
                None => {
                    self.conn().execute(
                        "INSERT INTO nodes (parent_id, key, value) VALUES (?1, ?2, NULL)",
                        params![current, key],
                    )?;
                    current = self.conn().last_insert_rowid();
                    created = true;
                }
            }
        }
        Ok(created)
    }

    /// Delete the key at `path` together with everything nested under it.
    ///
    /// Returns `false` if nothing was there.
    pub fn remove(&self, path: &NamespacePath) -> Result<bool> {
        if path.is_root() {
            return Err(type_conflict(path));
        }
        let Some(node) = self.resolve_node(path)? else {
            return Ok(false);
        };
        self.conn().execute(
            "WITH RECURSIVE subtree(id) AS (
                SELECT ?1
                UNION ALL
                SELECT n.id FROM nodes n JOIN subtree s ON n.parent_id = s.id
             )
             DELETE FROM nodes WHERE id IN (SELECT id FROM subtree)",
            params![node.id],
        )?;
        Ok(true)
    }
}
