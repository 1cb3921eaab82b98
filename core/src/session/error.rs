use crate::model::{CollectionId, Department};

use super::PickerTarget;

/// A required field is missing. Caught before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("title is required")]
    EmptyTitle,
    #[error("an image needs a source address")]
    MissingImageSource,
    #[error("a video needs an external video URL")]
    MissingVideoUrl,
}

/// An intent that can not be carried out in the current state. State is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("department is fixed to {0} for this account")]
    ReadOnlyField(Department),
    #[error("no collection form is open")]
    NoCollectionForm,
    #[error("no item form is open")]
    NoItemForm,
    #[error("collection {0} is not in the list")]
    UnknownCollection(CollectionId),
    #[error("only available in the collection list")]
    NotInList,
    #[error("only available while managing a collection")]
    NotManaging,
    #[error("no item at position {index}, the collection has {len} items")]
    ItemOutOfRange { index: usize, len: usize },
    #[error("the item to remove is no longer in the collection")]
    ItemGone,
    #[error("another item change is still being saved")]
    MutationInFlight,
    #[error("the form is already being saved")]
    SubmitInFlight,
    #[error("a confirmation is pending, answer it first")]
    ConfirmationPending,
    #[error("nothing to confirm")]
    NothingToConfirm,
    #[error("the picker is not open")]
    PickerClosed,
    #[error("no open form takes a {0} asset")]
    NoFieldForTarget(PickerTarget),
}
