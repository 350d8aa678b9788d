use crate::store::{KvStore, StoreError};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Version and hash of the state after a block is committed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitId {
    /// Block height the state was committed at
    pub version: u64,

    /// SHA-256 over every entry in key order
    pub hash: Vec<u8>,
}

impl CommitId {
    pub fn hash_hex(&self) -> String {
        hex::encode(&self.hash)
    }
}

/// Compute the deterministic commitment over the whole store
///
/// Keys and values are length-prefixed so that adjacent entries can not be
/// re-split into a colliding sequence.
pub fn commit_id(store: &dyn KvStore, version: u64) -> Result<CommitId, StoreError> {
    let mut hasher = Sha256::new();
    hasher.update(version.to_be_bytes());
    for (key, value) in store.scan_prefix(&[])? {
        hasher.update((key.len() as u64).to_be_bytes());
        hasher.update(&key);
        hasher.update((value.len() as u64).to_be_bytes());
        hasher.update(&value);
    }
    Ok(CommitId {
        version,
        hash: hasher.finalize().to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    #[test]
    fn test_same_state_same_hash() {
        let mut a = MemoryStore::new();
        a.set(b"x", b"1").unwrap();
        a.set(b"y", b"2").unwrap();

        let mut b = MemoryStore::new();
        b.set(b"y", b"2").unwrap();
        b.set(b"x", b"1").unwrap();

        assert_eq!(commit_id(&a, 7).unwrap(), commit_id(&b, 7).unwrap());
        assert_eq!(commit_id(&a, 7).unwrap().hash.len(), 32);
    }

    #[test]
    fn test_entry_boundaries_are_committed() {
        let mut a = MemoryStore::new();
        a.set(b"ab", b"c").unwrap();

        let mut b = MemoryStore::new();
        b.set(b"a", b"bc").unwrap();

        assert_ne!(commit_id(&a, 1).unwrap().hash, commit_id(&b, 1).unwrap().hash);
    }
}
