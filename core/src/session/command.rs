use crate::{
    adapter::{AdapterResult, UploadFile, UploadedAsset},
    model::{Collection, CollectionId, CollectionMetadata, CollectionPatch, Item, LibraryAsset},
};

use super::{ItemMutation, PickerTarget, Ticket};

/// Side effect the session wants performed against a collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    ListCollections,
    CreateCollection(CollectionMetadata),
    UpdateCollection {
        id: CollectionId,
        patch: CollectionPatch,
    },
    DeleteCollection(CollectionId),
    PersistItems {
        id: CollectionId,
        items: Vec<Item>,
        mutation: ItemMutation,
    },
    ListAssets,
    Upload {
        target: PickerTarget,
        file: UploadFile,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub ticket: Ticket,
    pub request: Request,
}

/// Result of a `Request`, handed back to `Session::complete` with the request's ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Collections(AdapterResult<Vec<Collection>>),
    CollectionSaved(AdapterResult<Collection>),
    CollectionDeleted {
        id: CollectionId,
        result: AdapterResult<()>,
    },
    ItemsPersisted {
        mutation: ItemMutation,
        result: AdapterResult<Collection>,
    },
    Assets(AdapterResult<Vec<LibraryAsset>>),
    Uploaded {
        target: PickerTarget,
        result: AdapterResult<UploadedAsset>,
    },
}
