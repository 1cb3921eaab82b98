use crate::model::LibraryAsset;

use super::Slot;

/// Which form field a picked or uploaded asset is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum PickerTarget {
    CoverImage,
    ItemSource,
}

impl PickerTarget {
    /// The slot of the form owning the target field. Results for a form that has since
    /// been closed or reopened are dropped.
    pub fn form_slot(self) -> Slot {
        match self {
            PickerTarget::CoverImage => Slot::CollectionForm,
            PickerTarget::ItemSource => Slot::ItemForm,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerState {
    Loading,
    Ready(Vec<LibraryAsset>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picker {
    target: PickerTarget,
    state: PickerState,
}

impl Picker {
    pub(super) fn open(target: PickerTarget) -> Picker {
        Picker {
            target,
            state: PickerState::Loading,
        }
    }

    pub fn target(&self) -> PickerTarget {
        self.target
    }

    pub fn state(&self) -> &PickerState {
        &self.state
    }

    pub fn assets(&self) -> &[LibraryAsset] {
        match &self.state {
            PickerState::Loading => &[],
            PickerState::Ready(assets) => assets,
        }
    }

    pub(super) fn set_assets(&mut self, assets: Vec<LibraryAsset>) {
        self.state = PickerState::Ready(assets);
    }
}
