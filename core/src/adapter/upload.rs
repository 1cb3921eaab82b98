use async_trait::async_trait;
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

use super::{AdapterResult, HttpUploader, MemoryAssets};

#[derive(Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadFile")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UploadedAsset {
    #[serde(alias = "url")]
    pub address: String,
}

#[async_trait]
#[enum_dispatch(Uploader)]
pub trait AssetUploader {
    async fn upload(&self, file: UploadFile, bearer: &str) -> AdapterResult<UploadedAsset>;
}

#[enum_dispatch]
#[derive(Debug, Clone)]
pub enum Uploader {
    HttpUploader,
    MemoryAssets,
}
