use async_trait::async_trait;
use enum_dispatch::enum_dispatch;

use crate::model::LibraryAsset;

use super::{AdapterResult, HttpLibrary, MemoryAssets};

#[async_trait]
#[enum_dispatch(Library)]
pub trait AssetLibrary {
    async fn list_assets(&self, bearer: &str) -> AdapterResult<Vec<LibraryAsset>>;
}

#[enum_dispatch]
#[derive(Debug, Clone)]
pub enum Library {
    HttpLibrary,
    MemoryAssets,
}
