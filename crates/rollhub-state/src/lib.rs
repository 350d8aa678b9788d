// === Key-value state ===
pub mod store;
pub mod memory;
pub mod sled_store;
pub mod cache;

// === Encoding & commitments ===
pub mod codec;
pub mod commit;

pub use store::{KvStore, StoreError, WriteBatch, WriteOp};
pub use memory::MemoryStore;
pub use sled_store::SledStore;
pub use cache::CacheStore;
pub use codec::{decode, encode};
pub use commit::{commit_id, CommitId};
