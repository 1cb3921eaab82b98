use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CollectionId, Department, Item};

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
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Category {
    #[default]
    Events,
    Campus,
    Academics,
    Sports,
    Cultural,
    Achievements,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    #[serde(alias = "_id")]
    pub id: CollectionId,
    pub title: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    /// `None` is the common, university wide scope
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<Department>,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Everything the collection editor can change. The item list is never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionMetadata {
    pub title: String,
    pub category: Category,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub department: Option<Department>,
}

/// Partial update accepted by the store. Either the metadata or the item list, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CollectionPatch {
    Metadata(CollectionMetadata),
    Items { items: Vec<Item> },
}

impl Collection {
    pub fn from_metadata(id: CollectionId, metadata: CollectionMetadata) -> Collection {
        Collection {
            id,
            title: metadata.title,
            category: metadata.category,
            description: metadata.description,
            cover_image: metadata.cover_image,
            department: metadata.department,
            items: Vec::default(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn apply_patch(&mut self, patch: CollectionPatch) {
        match patch {
            CollectionPatch::Metadata(metadata) => {
                self.title = metadata.title;
                self.category = metadata.category;
                self.description = metadata.description;
                self.cover_image = metadata.cover_image;
                self.department = metadata.department;
            }
            CollectionPatch::Items { items } => {
                self.items = items;
            }
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn deserialize_store_record() {
        let json = r#"{
            "_id": "65f1c",
            "title": "Graduation 2024",
            "category": "Events",
            "coverImage": "https://x/cover.jpg",
            "items": [
                {"kind": "image", "src": "https://x/1.jpg", "caption": "stage"},
                {"kind": "video", "videoUrl": "https://y/2"}
            ],
            "createdAt": "2024-06-01T10:00:00Z"
        }"#;
        let collection: Collection = serde_json::from_str(json).unwrap();
        assert_eq!(collection.id, CollectionId::from("65f1c"));
        assert_eq!(collection.department, None);
        assert_eq!(
            collection.items,
            vec![
                Item::image("https://x/1.jpg").with_caption("stage"),
                Item::video("https://y/2"),
            ]
        );
    }

    #[test]
    fn items_patch_only_carries_items() {
        let patch = CollectionPatch::Items {
            items: vec![Item::video("https://y/2")],
        };
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"items": [{"kind": "video", "videoUrl": "https://y/2"}]})
        );
    }

    #[test]
    fn metadata_patch_clears_department_explicitly() {
        let patch = CollectionPatch::Metadata(CollectionMetadata {
            title: "Sports day".to_owned(),
            category: Category::Sports,
            description: None,
            cover_image: None,
            department: None,
        });
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value["department"], serde_json::Value::Null);
        assert!(value.get("items").is_none());
    }
}
