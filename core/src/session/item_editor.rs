use crate::model::{Item, ItemKind};

use super::{AssetField, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemField {
    Source(Option<String>),
    VideoUrl(String),
    Caption(String),
}

/// Which change to the managed collection's item list a persist request carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemMutation {
    /// `form_generation` identifies the add form that produced the item
    Add { form_generation: u64 },
    Remove,
}

/// Working copy of an item about to be appended. Switching kinds keeps the other kind's
/// value around, so submitting has to look at the selected kind only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemForm {
    kind: ItemKind,
    source: AssetField,
    video_url: String,
    caption: String,
    submitting: bool,
}

impl ItemForm {
    pub fn open_add() -> ItemForm {
        ItemForm::default()
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn source(&self) -> &AssetField {
        &self.source
    }

    pub(super) fn source_mut(&mut self) -> &mut AssetField {
        &mut self.source
    }

    pub fn video_url(&self) -> &str {
        &self.video_url
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub(super) fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
    }

    pub fn select_kind(&mut self, kind: ItemKind) {
        self.kind = kind;
    }

    pub fn set(&mut self, field: ItemField) {
        match field {
            ItemField::Source(Some(address)) => self.source.set_value(address),
            ItemField::Source(None) => self.source.clear(),
            ItemField::VideoUrl(video_url) => self.video_url = video_url,
            ItemField::Caption(caption) => self.caption = caption,
        }
    }

    /// Gate used by the input surface to enable submitting. Either field counts regardless
    /// of the selected kind, `to_item` checks the one the kind needs.
    pub fn can_submit(&self) -> bool {
        self.source.is_present() || !self.video_url.trim().is_empty()
    }

    pub fn to_item(&self) -> Result<Item, ValidationError> {
        let item = match self.kind {
            ItemKind::Image => match self.source.value() {
                Some(src) => Item::image(src),
                None => return Err(ValidationError::MissingImageSource),
            },
            ItemKind::Video => {
                let video_url = self.video_url.trim();
                if video_url.is_empty() {
                    return Err(ValidationError::MissingVideoUrl);
                }
                Item::video(video_url)
            }
        };
        let caption = self.caption.trim();
        Ok(if caption.is_empty() {
            item
        } else {
            item.with_caption(caption)
        })
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn open_add_is_empty_image() {
        let form = ItemForm::open_add();
        assert_eq!(form.kind(), ItemKind::Image);
        assert!(!form.can_submit());
    }

    #[test]
    fn stale_value_of_other_kind_does_not_pass() {
        let mut form = ItemForm::open_add();
        form.set(ItemField::Source(Some("https://x/1.jpg".to_owned())));
        form.select_kind(ItemKind::Video);
        // the surface gate still lets it through
        assert!(form.can_submit());
        assert_eq!(form.to_item(), Err(ValidationError::MissingVideoUrl));

        let mut form = ItemForm::open_add();
        form.select_kind(ItemKind::Video);
        form.set(ItemField::VideoUrl("https://y/2".to_owned()));
        form.select_kind(ItemKind::Image);
        assert!(form.can_submit());
        assert_eq!(form.to_item(), Err(ValidationError::MissingImageSource));
    }

    #[test]
    fn switching_kind_keeps_values() {
        let mut form = ItemForm::open_add();
        form.set(ItemField::Source(Some("https://x/1.jpg".to_owned())));
        form.select_kind(ItemKind::Video);
        form.select_kind(ItemKind::Image);
        assert_eq!(form.to_item(), Ok(Item::image("https://x/1.jpg")));
    }

    #[test]
    fn caption_is_trimmed_and_optional() {
        let mut form = ItemForm::open_add();
        form.select_kind(ItemKind::Video);
        form.set(ItemField::VideoUrl(" https://y/2 ".to_owned()));
        form.set(ItemField::Caption(" ".to_owned()));
        assert_eq!(form.to_item(), Ok(Item::video("https://y/2")));
        form.set(ItemField::Caption("Convocation".to_owned()));
        assert_eq!(
            form.to_item(),
            Ok(Item::video("https://y/2").with_caption("Convocation"))
        );
    }
}
