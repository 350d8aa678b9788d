// CACHE BRANCH
// Overlay on top of a parent store; pending writes reach the parent in one batch
//
// SAFETY INVARIANTS:
// 1. The parent is untouched until `write` is called
// 2. `write` hands the parent a single atomic batch
// 3. Dropping the branch discards every pending write

use crate::store::{KvStore, StoreError, WriteBatch, WriteOp};
use log::debug;
use std::collections::BTreeMap;

pub struct CacheStore<'a> {
    parent: &'a mut dyn KvStore,
    /// `None` marks a pending delete
    pending: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl<'a> CacheStore<'a> {
    pub fn new(parent: &'a mut dyn KvStore) -> Self {
        CacheStore {
            parent,
            pending: BTreeMap::new(),
        }
    }

    /// Number of keys touched in this branch
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Apply pending writes to the parent atomically
    pub fn write(self) -> Result<(), StoreError> {
        let CacheStore { parent, pending } = self;
        let mut batch = WriteBatch::new();
        for (key, value) in pending {
            match value {
                Some(v) => batch.set(key, v),
                None => batch.delete(key),
            }
        }
        debug!("Writing cache branch with {} ops", batch.len());
        parent.write_batch(batch)
    }

    /// Drop pending writes explicitly
    pub fn discard(self) {
        debug!("Discarding cache branch with {} ops", self.pending_len());
    }
}

impl<'a> KvStore for CacheStore<'a> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        match self.pending.get(key) {
            Some(value) => Ok(value.clone()),
            None => self.parent.get(key),
        }
    }

    fn write_batch(&mut self, batch: WriteBatch) -> Result<(), StoreError> {
        for op in batch.into_ops() {
            match op {
                WriteOp::Set(key, value) => {
                    self.pending.insert(key, Some(value));
                }
                WriteOp::Delete(key) => {
                    self.pending.insert(key, None);
                }
            }
        }
        Ok(())
    }

    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError> {
        let mut merged: BTreeMap<Vec<u8>, Vec<u8>> =
            self.parent.scan_prefix(prefix)?.into_iter().collect();

        for (key, value) in self
            .pending
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix))
        {
            match value {
                Some(v) => {
                    merged.insert(key.clone(), v.clone());
                }
                None => {
                    merged.remove(key);
                }
            }
        }

        Ok(merged.into_iter().collect())
    }
}
