//! Boundaries to the remote collaborators: the collection store, the asset store
//! (upload and library listing) and the token storage supplying bearer credentials.
//!
//! Each concern is a trait with an HTTP implementation for real use and an in-memory one
//! for offline use and tests. The `Store`, `Uploader`, `Library` and `Credentials` enums
//! dispatch to whichever implementation is configured.

mod http;
mod library;
mod memory;
mod store;
mod token;
mod upload;

pub use http::{HttpLibrary, HttpStore, HttpUploader};
pub use library::{AssetLibrary, Library};
pub use memory::{MemoryAssets, MemoryStore, StoreCall};
pub use store::{CollectionStore, Store};
pub use token::{Credentials, StaticToken, TokenFile, TokenSource};
pub use upload::{AssetUploader, UploadFile, UploadedAsset, Uploader};

use crate::model::CollectionId;

/// Failure reported by a collaborator. The `Display` output is shown to the operator as is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdapterError {
    #[error("{0}")]
    Rejected(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("no credential available, sign in again")]
    MissingCredential,
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("collection {0} does not exist")]
    NotFound(CollectionId),
}

impl From<reqwest::Error> for AdapterError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AdapterError::Decode(err.to_string())
        } else {
            AdapterError::Transport(err.to_string())
        }
    }
}

pub type AdapterResult<T> = Result<T, AdapterError>;
