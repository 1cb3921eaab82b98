use serde::{Deserialize, Serialize};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ItemKind {
    #[default]
    Image,
    Video,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ItemMedia {
    Image {
        src: String,
    },
    /// External video reference, the asset store never holds the video itself
    Video {
        #[serde(rename = "videoUrl")]
        video_url: String,
    },
}

/// One entry of a collection. Items have no identity of their own, only their position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    #[serde(flatten)]
    pub media: ItemMedia,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl Item {
    pub fn image(src: impl Into<String>) -> Item {
        Item {
            media: ItemMedia::Image { src: src.into() },
            caption: None,
        }
    }

    pub fn video(video_url: impl Into<String>) -> Item {
        Item {
            media: ItemMedia::Video {
                video_url: video_url.into(),
            },
            caption: None,
        }
    }

    pub fn with_caption(self, caption: impl Into<String>) -> Item {
        Item {
            caption: Some(caption.into()),
            ..self
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self.media {
            ItemMedia::Image { .. } => ItemKind::Image,
            ItemMedia::Video { .. } => ItemKind::Video,
        }
    }

    pub fn address(&self) -> &str {
        match &self.media {
            ItemMedia::Image { src } => src,
            ItemMedia::Video { video_url } => video_url,
        }
    }
}
