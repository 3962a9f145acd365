//! Pressroom keyed stores
//!
//! Provides `MemoryStore<T>`, the generic map-backed store the domain
//! repositories are built on. Each store owns its own monotonically
//! increasing id sequence; ids are allocated under the store lock and
//! never reused, so a deleted row's id stays dead forever.
//!
//! The store is deliberately narrow: rows go in through `insert_with`,
//! come out as clones, and can only be mutated through `save` (replace an
//! existing row wholesale) or `update` (apply a closure to an existing
//! row). There is no blanket interior mutability for callers to lean on.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// Store-allocated row identifier
pub type Id = u64;

struct Inner<T> {
    rows: BTreeMap<Id, T>,
    next_id: Id,
}

/// Generic in-memory keyed store.
///
/// Cloning the store clones the handle, not the data; all clones share
/// the same underlying rows.
pub struct MemoryStore<T> {
    inner: Arc<RwLock<Inner<T>>>,
}

impl<T> Clone for MemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                rows: BTreeMap::new(),
                next_id: 1,
            })),
        }
    }
}

impl<T: Clone> MemoryStore<T> {
    /// Allocate a fresh id and insert the row built from it.
    ///
    /// The id is handed to `build` so the row can carry its own key.
    /// Allocation and insertion happen under one write lock, so two
    /// concurrent inserts can never observe the same id.
    pub fn insert_with(&self, build: impl FnOnce(Id) -> T) -> T {
        let mut inner = self.inner.write().expect("store lock poisoned");
        let id = inner.next_id;
        inner.next_id += 1;
        let row = build(id);
        inner.rows.insert(id, row.clone());
        row
    }

    /// Fetch a row by id.
    pub fn get(&self, id: Id) -> Option<T> {
        let inner = self.inner.read().expect("store lock poisoned");
        inner.rows.get(&id).cloned()
    }

    /// All rows in ascending id order.
    pub fn list(&self) -> Vec<T> {
        let inner = self.inner.read().expect("store lock poisoned");
        inner.rows.values().cloned().collect()
    }

    /// Replace an existing row. Returns false if the id is unknown;
    /// never inserts.
    pub fn save(&self, id: Id, row: T) -> bool {
        let mut inner = self.inner.write().expect("store lock poisoned");
        match inner.rows.get_mut(&id) {
            Some(slot) => {
                *slot = row;
                true
            }
            None => false,
        }
    }

    /// Apply a mutation to an existing row, returning the closure's
    /// result, or `None` if the id is unknown.
    pub fn update<R>(&self, id: Id, apply: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut inner = self.inner.write().expect("store lock poisoned");
        inner.rows.get_mut(&id).map(apply)
    }

    /// Delete a row by id. Returns whether a row existed.
    pub fn remove(&self, id: Id) -> bool {
        let mut inner = self.inner.write().expect("store lock poisoned");
        inner.rows.remove(&id).is_some()
    }

    /// Delete every row matching the predicate, returning how many were
    /// removed.
    pub fn remove_where(&self, pred: impl Fn(&T) -> bool) -> usize {
        let mut inner = self.inner.write().expect("store lock poisoned");
        let before = inner.rows.len();
        inner.rows.retain(|_, row| !pred(row));
        before - inner.rows.len()
    }

    pub fn len(&self) -> usize {
        let inner = self.inner.read().expect("store lock poisoned");
        inner.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
