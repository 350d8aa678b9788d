//! Consensus encoding for stored values.
//!
//! Every node must produce identical bytes for identical values, so all stored
//! types use `BTreeMap` for maps and go through `bincode` with its default
//! fixed-width little-endian configuration.

use crate::store::StoreError;
use serde::{de::DeserializeOwned, Serialize};

pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
    bincode::serialize(value).map_err(|e| StoreError::Codec(e.to_string()))
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, StoreError> {
    bincode::deserialize(bytes).map_err(|e| StoreError::Codec(e.to_string()))
}
