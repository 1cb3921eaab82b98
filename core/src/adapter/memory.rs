use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::instrument;

use crate::model::{Collection, CollectionId, CollectionMetadata, CollectionPatch, LibraryAsset};

use super::{
    AdapterError, AdapterResult, AssetLibrary, AssetUploader, CollectionStore, UploadFile,
    UploadedAsset,
};

/// Calls received by a `MemoryStore`, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    List,
    Create(CollectionMetadata),
    Update(CollectionId, CollectionPatch),
    Delete(CollectionId),
}

#[derive(Debug, Default)]
struct StoreState {
    collections: Vec<Collection>,
    next_id: u64,
    calls: Vec<StoreCall>,
    fail_next: Option<String>,
}

impl StoreState {
    fn take_failure(&mut self) -> AdapterResult<()> {
        match self.fail_next.take() {
            Some(message) => Err(AdapterError::Rejected(message)),
            None => Ok(()),
        }
    }
}

/// Collection store kept in process memory. Clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    /// The next call of any kind fails with `message` and changes nothing.
    pub async fn fail_next(&self, message: impl Into<String>) {
        self.state.lock().await.fail_next = Some(message.into());
    }

    pub async fn calls(&self) -> Vec<StoreCall> {
        self.state.lock().await.calls.clone()
    }

    pub async fn snapshot(&self) -> Vec<Collection> {
        self.state.lock().await.collections.clone()
    }
}

#[async_trait]
impl CollectionStore for MemoryStore {
    #[instrument(skip(self), level = "debug")]
    async fn list(&self) -> AdapterResult<Vec<Collection>> {
        let mut state = self.state.lock().await;
        state.calls.push(StoreCall::List);
        state.take_failure()?;
        Ok(state.collections.clone())
    }

    #[instrument(skip(self), level = "debug")]
    async fn create(&self, metadata: CollectionMetadata) -> AdapterResult<Collection> {
        let mut state = self.state.lock().await;
        state.calls.push(StoreCall::Create(metadata.clone()));
        state.take_failure()?;
        state.next_id += 1;
        let id = CollectionId(format!("c{}", state.next_id));
        let now = chrono::Utc::now();
        let collection = Collection {
            created_at: Some(now),
            updated_at: Some(now),
            ..Collection::from_metadata(id, metadata)
        };
        state.collections.push(collection.clone());
        Ok(collection)
    }

    #[instrument(skip(self), level = "debug")]
    async fn update(&self, id: &CollectionId, patch: CollectionPatch) -> AdapterResult<Collection> {
        let mut state = self.state.lock().await;
        state
            .calls
            .push(StoreCall::Update(id.clone(), patch.clone()));
        state.take_failure()?;
        let collection = state
            .collections
            .iter_mut()
            .find(|collection| &collection.id == id)
            .ok_or_else(|| AdapterError::NotFound(id.clone()))?;
        collection.apply_patch(patch);
        collection.updated_at = Some(chrono::Utc::now());
        Ok(collection.clone())
    }

    #[instrument(skip(self), level = "debug")]
    async fn delete(&self, id: &CollectionId) -> AdapterResult<()> {
        let mut state = self.state.lock().await;
        state.calls.push(StoreCall::Delete(id.clone()));
        state.take_failure()?;
        let len_before = state.collections.len();
        state.collections.retain(|collection| &collection.id != id);
        if state.collections.len() == len_before {
            return Err(AdapterError::NotFound(id.clone()));
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct AssetState {
    assets: Vec<LibraryAsset>,
    uploads: Vec<String>,
    fail_next: Option<String>,
}

/// Asset store kept in process memory, serving as both uploader and library.
/// Uploaded files show up in the library listing.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    state: Arc<Mutex<AssetState>>,
}

const MEMORY_ASSET_BASE: &str = "memory://assets";

impl MemoryAssets {
    pub fn new() -> MemoryAssets {
        MemoryAssets::default()
    }

    pub fn with_assets(addresses: impl IntoIterator<Item = impl Into<String>>) -> MemoryAssets {
        let assets = addresses
            .into_iter()
            .map(|address| LibraryAsset {
                address: address.into(),
                uploaded_at: None,
            })
            .collect();
        MemoryAssets {
            state: Arc::new(Mutex::new(AssetState {
                assets,
                ..Default::default()
            })),
        }
    }

    pub async fn fail_next(&self, message: impl Into<String>) {
        self.state.lock().await.fail_next = Some(message.into());
    }

    /// File names of every successful upload, in order.
    pub async fn uploads(&self) -> Vec<String> {
        self.state.lock().await.uploads.clone()
    }
}

#[async_trait]
impl AssetUploader for MemoryAssets {
    #[instrument(skip(self, bearer), level = "debug")]
    async fn upload(&self, file: UploadFile, bearer: &str) -> AdapterResult<UploadedAsset> {
        if bearer.is_empty() {
            return Err(AdapterError::MissingCredential);
        }
        let mut state = self.state.lock().await;
        if let Some(message) = state.fail_next.take() {
            return Err(AdapterError::Rejected(message));
        }
        let address = format!(
            "{}/{}/{}",
            MEMORY_ASSET_BASE,
            state.uploads.len() + 1,
            file.file_name
        );
        state.uploads.push(file.file_name);
        state.assets.push(LibraryAsset {
            address: address.clone(),
            uploaded_at: Some(chrono::Utc::now()),
        });
        Ok(UploadedAsset { address })
    }
}

#[async_trait]
impl AssetLibrary for MemoryAssets {
    #[instrument(skip(self, bearer), level = "debug")]
    async fn list_assets(&self, bearer: &str) -> AdapterResult<Vec<LibraryAsset>> {
        if bearer.is_empty() {
            return Err(AdapterError::MissingCredential);
        }
        let mut state = self.state.lock().await;
        if let Some(message) = state.fail_next.take() {
            return Err(AdapterError::Rejected(message));
        }
        Ok(state.assets.clone())
    }
}
