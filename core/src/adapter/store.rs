use async_trait::async_trait;
use enum_dispatch::enum_dispatch;

use crate::model::{Collection, CollectionId, CollectionMetadata, CollectionPatch};

use super::{AdapterResult, HttpStore, MemoryStore};

/// Persistence of collection records. Every mutation returns the authoritative record
/// as stored after the mutation.
#[async_trait]
#[enum_dispatch(Store)]
pub trait CollectionStore {
    async fn list(&self) -> AdapterResult<Vec<Collection>>;
    async fn create(&self, metadata: CollectionMetadata) -> AdapterResult<Collection>;
    async fn update(&self, id: &CollectionId, patch: CollectionPatch) -> AdapterResult<Collection>;
    /// Removes the metadata record only, referenced assets stay in the asset store.
    async fn delete(&self, id: &CollectionId) -> AdapterResult<()>;
}

#[enum_dispatch]
#[derive(Debug, Clone)]
pub enum Store {
    HttpStore,
    MemoryStore,
}
