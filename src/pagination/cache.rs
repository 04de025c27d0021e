//! Query cache
//!
//! Maps each distinct query signature to its cursor for the lifetime of the
//! cache. Entries are never evicted.

use super::cursor::{CursorHandle, QueryCursor};
use crate::query::{QueryOptions, QuerySignature};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Cursor store keyed by query signature
///
/// Clones share the same underlying store.
#[derive(Debug, Clone, Default)]
pub struct QueryCache {
    cursors: Arc<Mutex<HashMap<QuerySignature, CursorHandle>>>,
}

impl QueryCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<QuerySignature, CursorHandle>> {
        self.cursors.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get the cursor for a query, creating it on first use.
    ///
    /// Lookup and insertion happen under one lock, so concurrent callers with
    /// the same new signature always share a single cursor. Page overrides in
    /// `options` are not applied here.
    pub fn get(&self, options: &QueryOptions) -> CursorHandle {
        let signature = options.signature();
        self.lock()
            .entry(signature)
            .or_insert_with_key(|signature| {
                debug!("Creating cursor for {}", signature);
                CursorHandle::new(QueryCursor::new(options))
            })
            .clone()
    }

    /// Whether a cursor exists for the signature
    pub fn contains(&self, signature: &QuerySignature) -> bool {
        self.lock().contains_key(signature)
    }

    /// Number of cursors held
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
