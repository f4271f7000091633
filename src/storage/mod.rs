//!
//! tasklane storage module
//! -----------------------
//! JSON document collections on disk, one file per record kind under a
//! configured root folder (`<root>/users.json`, `<root>/projects.json`,
//! `<root>/tasks.json`). Each collection keeps its documents in an
//! in-memory map guarded by a `parking_lot::RwLock`, loaded once at open
//! and snapshotted back to disk on every mutation via write-temp-then-
//! rename. Semantics are deliberately simple: find-by-id, filtered scan,
//! insert, replace-by-id, delete-by-id, last-write-wins, no multi-document
//! transactions.
//!
//! The public API centers around `SharedStore`, which opens the three
//! collections and is cheap to clone into handlers.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::records::{Project, Task, User};

/// A single named document collection backed by one JSON file.
#[derive(Clone)]
pub struct Collection<T> {
    path: PathBuf,
    map: Arc<RwLock<HashMap<String, T>>>,
}

impl<T: Clone + Serialize + DeserializeOwned> Collection<T> {
    /// Open the collection file under `dir`, loading any existing snapshot.
    /// A missing file means an empty collection; a corrupt file is an error
    /// rather than silent data loss.
    pub fn open(dir: &Path, name: &str) -> Result<Self> {
        let path = dir.join(format!("{}.json", name));
        let map = if path.exists() {
            let bytes = std::fs::read(&path)
                .with_context(|| format!("reading collection file {}", path.display()))?;
            serde_json::from_slice::<HashMap<String, T>>(&bytes)
                .with_context(|| format!("parsing collection file {}", path.display()))?
        } else {
            HashMap::new()
        };
        Ok(Self { path, map: Arc::new(RwLock::new(map)) })
    }

    /// Snapshot the full map to disk. Called with the write lock held so a
    /// concurrent mutation cannot interleave between update and persist.
    fn persist(&self, map: &HashMap<String, T>) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(map)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, bytes)
            .with_context(|| format!("writing snapshot {}", tmp.display()))?;
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("committing snapshot {}", self.path.display()))?;
        Ok(())
    }

    pub fn insert(&self, id: &str, doc: T) -> Result<()> {
        let mut map = self.map.write();
        map.insert(id.to_string(), doc);
        self.persist(&map)
    }

    pub fn find_by_id(&self, id: &str) -> Option<T> {
        self.map.read().get(id).cloned()
    }

    /// Scan the collection, returning documents matching the predicate.
    pub fn find_where(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        self.map.read().values().filter(|d| pred(d)).cloned().collect()
    }

    /// Replace the document under `id`. Last write wins; there is no
    /// version check. Fails if the id is not present.
    pub fn update_by_id(&self, id: &str, doc: T) -> Result<()> {
        let mut map = self.map.write();
        if !map.contains_key(id) {
            return Err(anyhow!("update_by_id: no document with id {}", id));
        }
        map.insert(id.to_string(), doc);
        self.persist(&map)
    }

    /// Remove the document under `id`. Returns whether anything was removed.
    pub fn delete_by_id(&self, id: &str) -> Result<bool> {
        let mut map = self.map.write();
        let removed = map.remove(id).is_some();
        if removed {
            self.persist(&map)?;
        }
        Ok(removed)
    }

    pub fn len(&self) -> usize {
        self.map.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle bundling the three record collections. Clone-cheap; all clones
/// share the same in-memory maps.
#[derive(Clone)]
pub struct SharedStore {
    pub users: Collection<User>,
    pub projects: Collection<Project>,
    pub tasks: Collection<Task>,
}

impl SharedStore {
    /// Open (or create) the store rooted at the given folder.
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        std::fs::create_dir_all(root)
            .with_context(|| format!("creating data root {}", root.display()))?;
        Ok(Self {
            users: Collection::open(root, "users")?,
            projects: Collection::open(root, "projects")?,
            tasks: Collection::open(root, "tasks")?,
        })
    }
}

#[cfg(test)]
mod storage_tests;
